//! Batch orchestration of a heatsink design study.
//!
//! A study samples `num_designs` designs, builds and measures each one,
//! places the successful ones on a grid in a [`StudyDocument`], and writes a
//! CSV of results next to the saved document.

pub mod config;
pub mod document;
pub mod report;
pub mod summary;

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument, warn};

use crate::builder::BuildHeatsink;
use crate::design::{DesignParameters, DesignResult, ParameterSampler};
use crate::error::{HeatsinkError, Result, StudyError};
use crate::kernel::{ShapeSnapshot, SolidGeometry};
use crate::metrics::{DesignMetrics, MetricsEvaluator};
use crate::topology::SolidStore;

pub use config::{StudyConfig, GRID_COLUMNS};
pub use document::{Bounds, PlacedObject, StudyDocument};
pub use report::{read_results, write_results, write_results_file};
pub use summary::StudySummary;

/// Timestamp layout used in output file names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A design that could not be built or measured.
#[derive(Debug)]
pub struct DesignFailure {
    /// 1-based design index.
    pub index: u32,
    pub error: HeatsinkError,
}

/// What a completed study produced.
#[derive(Debug)]
pub struct StudyOutcome {
    pub results: Vec<DesignResult>,
    pub failures: Vec<DesignFailure>,
    pub summary: StudySummary,
    pub csv_path: PathBuf,
    pub document_path: PathBuf,
}

/// Per-iteration state collected before anything is written.
struct Batch {
    results: Vec<DesignResult>,
    failures: Vec<DesignFailure>,
    document: StudyDocument,
}

/// Runs a design study for a validated [`StudyConfig`].
#[derive(Debug, Clone)]
pub struct DesignStudy {
    config: StudyConfig,
}

impl DesignStudy {
    /// # Errors
    ///
    /// Returns a [`crate::error::ConfigError`] if the configuration is out of
    /// range.
    pub fn new(config: StudyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs the study with the built-in kernel, a generator seeded from the
    /// configuration (or from entropy), and the current local time as the
    /// output file stamp.
    ///
    /// # Errors
    ///
    /// See [`DesignStudy::run_with`].
    pub fn run(&self) -> Result<StudyOutcome> {
        self.check_output_dir()?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut kernel = SolidStore::new();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.run_with(&mut rng, &mut kernel, &timestamp)
    }

    /// Runs the study against an explicit generator and kernel, stamping the
    /// output files with `timestamp`.
    ///
    /// Individual designs that fail are logged and skipped. Files are only
    /// written once at least one design has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::MissingOutputDir`] before doing any work if the
    /// output directory does not exist, [`StudyError::NoResults`] if every
    /// design failed, and I/O, CSV or JSON errors from writing the outputs.
    #[instrument(
        skip_all,
        fields(designs = self.config.num_designs, base_size = self.config.base_size)
    )]
    pub fn run_with<R, K>(
        &self,
        rng: &mut R,
        kernel: &mut K,
        timestamp: &str,
    ) -> Result<StudyOutcome>
    where
        R: Rng + ?Sized,
        K: SolidGeometry,
    {
        self.check_output_dir()?;

        let Batch {
            results,
            failures,
            mut document,
        } = self.generate(rng, kernel);

        let Some(summary) = StudySummary::from_results(&results) else {
            return Err(StudyError::NoResults.into());
        };

        let dir = &self.config.output_dir;
        let csv_path = dir.join(format!("heatsink_results_{timestamp}.csv"));
        write_results_file(&csv_path, &results)?;

        document.recompute();
        document.fit_view();
        let document_path = dir.join(format!("heatsink_designs_{timestamp}.json"));
        document.save(&document_path)?;

        info!(
            built = results.len(),
            failed = failures.len(),
            csv = %csv_path.display(),
            document = %document_path.display(),
            "study complete"
        );

        Ok(StudyOutcome {
            results,
            failures,
            summary,
            csv_path,
            document_path,
        })
    }

    fn check_output_dir(&self) -> Result<()> {
        if self.config.output_dir.is_dir() {
            Ok(())
        } else {
            Err(StudyError::MissingOutputDir(self.config.output_dir.clone()).into())
        }
    }

    fn generate<R, K>(&self, rng: &mut R, kernel: &mut K) -> Batch
    where
        R: Rng + ?Sized,
        K: SolidGeometry,
    {
        let sampler = ParameterSampler::new(f64::from(self.config.base_size));
        let evaluator = MetricsEvaluator::new(self.config.thermal_model);
        let mut batch = Batch {
            results: Vec::new(),
            failures: Vec::new(),
            document: StudyDocument::new(),
        };

        for i in 0..self.config.num_designs {
            let index = i + 1;
            info!(index, "creating design");
            let document = &mut batch.document;
            match self.design_one(i, &sampler, &evaluator, rng, kernel, document) {
                Ok(result) => batch.results.push(result),
                Err(error) => {
                    warn!(index, %error, "design failed, skipping");
                    batch.failures.push(DesignFailure { index, error });
                }
            }
        }
        batch
    }

    fn design_one<R, K>(
        &self,
        i: u32,
        sampler: &ParameterSampler,
        evaluator: &MetricsEvaluator,
        rng: &mut R,
        kernel: &mut K,
        document: &mut StudyDocument,
    ) -> Result<DesignResult>
    where
        R: Rng + ?Sized,
        K: SolidGeometry,
    {
        let params = sampler.sample(format!("Design_{}", i + 1), rng)?;
        let solid = BuildHeatsink::new(&params).execute(kernel)?;

        let measured = measure(kernel, solid, evaluator, &params);
        kernel.discard(solid);
        let Measured {
            shape,
            bounds,
            metrics,
        } = measured?;

        let color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()];
        document.add_object(
            format!("Heatsink_{}", i + 1),
            params.name.clone(),
            self.grid_position(i),
            color,
            shape,
            bounds,
        );

        Ok(DesignResult::new(params, metrics))
    }

    /// Placement of design `i` on a grid [`GRID_COLUMNS`] wide.
    fn grid_position(&self, i: u32) -> [f64; 3] {
        let pitch = self.config.grid_pitch();
        let row = i / GRID_COLUMNS;
        let col = i % GRID_COLUMNS;
        [f64::from(col) * pitch, f64::from(row) * pitch, 0.0]
    }
}

/// Everything read back from a built solid before it is discarded.
struct Measured {
    shape: ShapeSnapshot,
    bounds: Bounds,
    metrics: DesignMetrics,
}

fn measure<K: SolidGeometry>(
    kernel: &K,
    solid: K::Solid,
    evaluator: &MetricsEvaluator,
    params: &DesignParameters,
) -> Result<Measured> {
    Ok(Measured {
        shape: kernel.snapshot(solid)?,
        bounds: kernel.bounding_box(solid)?.into(),
        metrics: evaluator.evaluate(kernel, solid, params)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::fs::File;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::error::GeometryError;
    use crate::math::{Point3, Vector3};
    use crate::operations::query::Aabb;

    fn study(dir: &Path, num_designs: u32) -> DesignStudy {
        let config = StudyConfig::new(100, num_designs, dir).unwrap().with_seed(11);
        DesignStudy::new(config).unwrap()
    }

    /// Kernel that refuses fusions, either always or only while building one
    /// chosen design.
    struct RefusingKernel {
        inner: SolidStore,
        /// 1-based design to refuse; `None` refuses every design.
        target: Option<usize>,
        /// Designs measured so far, counted through `snapshot`.
        measured: Cell<usize>,
        refused: bool,
    }

    impl RefusingKernel {
        fn always() -> Self {
            Self {
                inner: SolidStore::new(),
                target: None,
                measured: Cell::new(0),
                refused: false,
            }
        }

        fn for_design(design: usize) -> Self {
            Self {
                target: Some(design),
                ..Self::always()
            }
        }

        fn refuses_now(&mut self) -> bool {
            match self.target {
                None => true,
                Some(design) => {
                    let hit = !self.refused && self.measured.get() + 1 == design;
                    self.refused |= hit;
                    hit
                }
            }
        }
    }

    impl SolidGeometry for RefusingKernel {
        type Solid = <SolidStore as SolidGeometry>::Solid;

        fn make_box(&mut self, dx: f64, dy: f64, dz: f64) -> Result<Self::Solid> {
            self.inner.make_box(dx, dy, dz)
        }
        fn rotate(&mut self, s: Self::Solid, o: Point3, d: Vector3, a: f64) -> Result<()> {
            self.inner.rotate(s, o, d, a)
        }
        fn translate(&mut self, s: Self::Solid, v: Vector3) -> Result<()> {
            self.inner.translate(s, v)
        }
        fn union(&mut self, a: Self::Solid, b: Self::Solid) -> Result<Self::Solid> {
            if self.refuses_now() {
                return Err(GeometryError::Degenerate("refused".into()).into());
            }
            self.inner.union(a, b)
        }
        fn volume(&self, s: Self::Solid) -> Result<f64> {
            self.inner.volume(s)
        }
        fn surface_area(&self, s: Self::Solid) -> Result<f64> {
            self.inner.surface_area(s)
        }
        fn bounding_box(&self, s: Self::Solid) -> Result<Aabb> {
            self.inner.bounding_box(s)
        }
        fn snapshot(&self, s: Self::Solid) -> Result<ShapeSnapshot> {
            self.measured.set(self.measured.get() + 1);
            self.inner.snapshot(s)
        }
        fn discard(&mut self, s: Self::Solid) {
            self.inner.discard(s);
        }
    }

    #[test]
    fn grid_wraps_after_three_columns() {
        let study = study(Path::new("."), 5);
        assert_eq!(study.grid_position(0), [0.0, 0.0, 0.0]);
        assert_eq!(study.grid_position(2), [300.0, 0.0, 0.0]);
        assert_eq!(study.grid_position(3), [0.0, 150.0, 0.0]);
        assert_eq!(study.grid_position(4), [150.0, 150.0, 0.0]);
    }

    #[test]
    fn seeded_run_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let study = study(dir.path(), 4);
        let mut kernel = SolidStore::new();
        let outcome = study
            .run_with(&mut StdRng::seed_from_u64(11), &mut kernel, "20240101_000000")
            .unwrap();

        assert_eq!(outcome.results.len(), 4);
        assert!(outcome.failures.is_empty());
        assert!(kernel.is_empty());
        assert!(outcome.csv_path.ends_with("heatsink_results_20240101_000000.csv"));
        assert!(outcome.document_path.ends_with("heatsink_designs_20240101_000000.json"));

        let document = StudyDocument::load(&outcome.document_path).unwrap();
        assert_eq!(document.len(), 4);
        assert!(document.view.is_some());
        for (object, result) in document.objects.iter().zip(&outcome.results) {
            assert_eq!(object.design, result.name());
            assert_eq!(object.label, result.name().replace("Design", "Heatsink"));
        }
    }

    #[test]
    fn failed_design_is_skipped_and_leaves_a_grid_gap() {
        let dir = TempDir::new().unwrap();
        let study = study(dir.path(), 3);
        let mut kernel = RefusingKernel::for_design(2);
        let outcome = study
            .run_with(&mut StdRng::seed_from_u64(11), &mut kernel, "gap")
            .unwrap();

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 2);
        assert!(matches!(
            outcome.failures[0].error,
            HeatsinkError::Geometry(GeometryError::Degenerate(_))
        ));
        assert!(kernel.inner.is_empty());

        let names: Vec<&str> = outcome.results.iter().map(DesignResult::name).collect();
        assert_eq!(names, ["Design_1", "Design_3"]);

        let csv = read_results(File::open(&outcome.csv_path).unwrap()).unwrap();
        assert_eq!(csv, outcome.results);

        let document = StudyDocument::load(&outcome.document_path).unwrap();
        let labels: Vec<&str> = document.objects.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Heatsink_1", "Heatsink_3"]);
        let pitch = study.config.grid_pitch();
        let third = document.object("Heatsink_3").unwrap();
        assert_eq!(third.placement, [2.0 * pitch, 0.0, 0.0]);
        assert_eq!(third.design, "Design_3");
        assert!(document.object("Heatsink_2").is_none());
    }

    #[test]
    fn same_seed_same_results() {
        let dir = TempDir::new().unwrap();
        let study = study(dir.path(), 3);
        let a = study
            .run_with(&mut StdRng::seed_from_u64(5), &mut SolidStore::new(), "a")
            .unwrap();
        let b = study
            .run_with(&mut StdRng::seed_from_u64(5), &mut SolidStore::new(), "b")
            .unwrap();
        assert_eq!(a.results, b.results);
    }

    #[test]
    fn all_failures_write_nothing() {
        let dir = TempDir::new().unwrap();
        let study = study(dir.path(), 3);
        let mut kernel = RefusingKernel::always();
        let result = study.run_with(&mut StdRng::seed_from_u64(1), &mut kernel, "x");

        assert!(matches!(result, Err(HeatsinkError::Study(StudyError::NoResults))));
        assert!(kernel.inner.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_output_dir_fails_first() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let result = study(&missing, 2).run();
        assert!(matches!(result, Err(HeatsinkError::Study(StudyError::MissingOutputDir(_)))));
        assert!(!missing.exists());
    }
}
