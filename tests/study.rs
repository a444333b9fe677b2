#![allow(clippy::unwrap_used)]

use std::fs::File;
use std::path::Path;

use approx::assert_relative_eq;
use heatsink_designer::design::FinPattern;
use heatsink_designer::error::{HeatsinkError, StudyError};
use heatsink_designer::metrics::{complexity_score, ThermalModel};
use heatsink_designer::study::{read_results, DesignStudy, StudyConfig, StudyDocument};
use tempfile::tempdir;

#[test]
fn full_study_outputs_agree() {
    let dir = tempdir().unwrap();
    let config = StudyConfig::new(120, 7, dir.path())
        .unwrap()
        .with_seed(2024)
        .with_thermal_model(ThermalModel::Corrected);
    let outcome = DesignStudy::new(config).unwrap().run().unwrap();

    assert_eq!(outcome.results.len() + outcome.failures.len(), 7);
    assert_eq!(outcome.summary.designs, outcome.results.len());

    let csv = read_results(File::open(&outcome.csv_path).unwrap()).unwrap();
    assert_eq!(csv, outcome.results);

    for result in &csv {
        let p = &result.parameters;
        let m = &result.metrics;
        assert!(p.respects_clearance());
        assert_eq!(m.complexity_score, complexity_score(p.pattern, p.num_fins));
        assert_relative_eq!(m.weight_kg, m.volume_cm3 * 2.7 / 1000.0, epsilon = 1e-3);
        assert_relative_eq!(m.heat_dissipation_w, m.surface_area_cm2 * 0.05, epsilon = 0.1);
        if p.pattern == FinPattern::Straight {
            let solid = p.width * p.length * p.base_height
                + f64::from(p.num_fins) * p.fin_thickness * p.length * p.fin_height;
            assert_relative_eq!(m.volume_cm3, solid / 1000.0, epsilon = 0.01);
        }
    }

    let document = StudyDocument::load(&outcome.document_path).unwrap();
    assert_eq!(document.name, "HeatsinkStudy");
    assert_eq!(document.len(), outcome.results.len());
    let view = document.view.unwrap();
    for object in &document.objects {
        let bounds = object.bounds.unwrap();
        for k in 0..3 {
            assert!(bounds.min[k] >= view.min[k] && bounds.max[k] <= view.max[k]);
        }
    }
}

#[test]
fn legacy_model_is_a_hundred_times_larger() {
    let legacy_dir = tempdir().unwrap();
    let corrected_dir = tempdir().unwrap();
    let run = |dir: &Path, model| {
        let config = StudyConfig::new(80, 2, dir)
            .unwrap()
            .with_seed(3)
            .with_thermal_model(model);
        DesignStudy::new(config).unwrap().run().unwrap()
    };
    let legacy = run(legacy_dir.path(), ThermalModel::Legacy);
    let corrected = run(corrected_dir.path(), ThermalModel::Corrected);

    for (l, c) in legacy.results.iter().zip(&corrected.results) {
        assert_eq!(l.parameters, c.parameters);
        assert_relative_eq!(
            l.metrics.heat_dissipation_w,
            c.metrics.surface_area_cm2 * 5.0,
            epsilon = 0.1
        );
    }
}

#[test]
fn missing_output_dir_is_reported() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent");
    let config = StudyConfig::new(100, 1, &missing).unwrap();
    let result = DesignStudy::new(config).unwrap().run();
    assert!(matches!(result, Err(HeatsinkError::Study(StudyError::MissingOutputDir(_)))));
    assert!(!missing.exists());
}

#[test]
fn out_of_range_config_is_rejected() {
    let config = StudyConfig {
        num_designs: 20,
        ..StudyConfig::default()
    };
    assert!(DesignStudy::new(config).is_err());
}
