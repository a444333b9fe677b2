use std::fmt;

use crate::design::{DesignResult, FinPattern};

/// Aggregate figures for a finished study.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySummary {
    pub designs: usize,
    /// Designs per fin pattern, in [`FinPattern::ALL`] order.
    pub pattern_counts: [(FinPattern, usize); 3],
    pub mean_heat_dissipation_w: f64,
    /// Name and dissipation of the best design.
    pub best: (String, f64),
}

impl StudySummary {
    /// Summarises `results`, or `None` if there are none.
    ///
    /// The best design is the one with the highest heat dissipation; on a
    /// tie the earlier design wins.
    #[must_use]
    pub fn from_results(results: &[DesignResult]) -> Option<Self> {
        let first = results.first()?;

        let pattern_counts = FinPattern::ALL.map(|pattern| {
            let count = results
                .iter()
                .filter(|r| r.parameters.pattern == pattern)
                .count();
            (pattern, count)
        });

        let total: f64 = results.iter().map(|r| r.metrics.heat_dissipation_w).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean_heat_dissipation_w = total / results.len() as f64;

        let best = results.iter().skip(1).fold(first, |best, r| {
            if r.metrics.heat_dissipation_w > best.metrics.heat_dissipation_w {
                r
            } else {
                best
            }
        });

        Some(Self {
            designs: results.len(),
            pattern_counts,
            mean_heat_dissipation_w,
            best: (best.name().to_string(), best.metrics.heat_dissipation_w),
        })
    }

    #[must_use]
    pub fn count(&self, pattern: FinPattern) -> usize {
        self.pattern_counts
            .iter()
            .find(|(p, _)| *p == pattern)
            .map_or(0, |(_, n)| *n)
    }
}

impl fmt::Display for StudySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} heatsink designs", self.designs)?;
        writeln!(f, "Design patterns used:")?;
        for (pattern, count) in &self.pattern_counts {
            writeln!(f, "  - {count} {pattern}")?;
        }
        writeln!(
            f,
            "Average heat dissipation: {:.1} W",
            self.mean_heat_dissipation_w
        )?;
        write!(f, "Best design: {} ({:.1} W)", self.best.0, self.best.1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::design::DesignParameters;
    use crate::metrics::DesignMetrics;

    fn result(name: &str, pattern: FinPattern, dissipation: f64) -> DesignResult {
        DesignResult::new(
            DesignParameters {
                width: 100.0,
                length: 100.0,
                base_height: 10.0,
                fin_height: 30.0,
                fin_thickness: 2.0,
                num_fins: 5,
                pattern,
                fin_angle: 0.0,
                name: name.into(),
            },
            DesignMetrics {
                volume_cm3: 130.0,
                surface_area_cm2: 520.0,
                weight_kg: 0.351,
                heat_dissipation_w: dissipation,
                complexity_score: 10,
            },
        )
    }

    #[test]
    fn empty_results_have_no_summary() {
        assert!(StudySummary::from_results(&[]).is_none());
    }

    #[test]
    fn counts_mean_and_best() {
        let results = [
            result("Design_1", FinPattern::Straight, 20.0),
            result("Design_2", FinPattern::Zigzag, 35.0),
            result("Design_4", FinPattern::Zigzag, 25.0),
        ];
        let summary = StudySummary::from_results(&results).unwrap();
        assert_eq!(summary.designs, 3);
        assert_eq!(summary.count(FinPattern::Straight), 1);
        assert_eq!(summary.count(FinPattern::Angled), 0);
        assert_eq!(summary.count(FinPattern::Zigzag), 2);
        assert_relative_eq!(summary.mean_heat_dissipation_w, 80.0 / 3.0);
        assert_eq!(summary.best, ("Design_2".to_string(), 35.0));
    }

    #[test]
    fn ties_keep_the_first_design() {
        let results = [
            result("Design_1", FinPattern::Angled, 30.0),
            result("Design_2", FinPattern::Straight, 30.0),
        ];
        let summary = StudySummary::from_results(&results).unwrap();
        assert_eq!(summary.best.0, "Design_1");
    }

    #[test]
    fn display_lists_patterns() {
        let summary =
            StudySummary::from_results(&[result("Design_1", FinPattern::Angled, 26.04)]).unwrap();
        let text = summary.to_string();
        assert!(text.contains("1 angled"));
        assert!(text.contains("0 zigzag"));
        assert!(text.contains("Best design: Design_1 (26.0 W)"));
    }
}
