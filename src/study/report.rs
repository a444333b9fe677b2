//! CSV export of study results.
//!
//! One row per successful design. Columns are the design parameters
//! followed by the metrics:
//!
//! `width,length,base_height,fin_height,fin_thickness,num_fins,pattern,
//! fin_angle,name,volume_cm3,surface_area_cm2,weight_kg,heat_dissipation_W,
//! complexity_score`

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::design::{DesignParameters, DesignResult, FinPattern};
use crate::error::{Result, StudyError};
use crate::metrics::DesignMetrics;

/// Flat CSV row. The csv crate cannot serialize nested structs, so the
/// parameter and metric fields are spelled out here in column order.
#[derive(Debug, Serialize, Deserialize)]
struct ResultRow {
    width: f64,
    length: f64,
    base_height: f64,
    fin_height: f64,
    fin_thickness: f64,
    num_fins: u32,
    pattern: FinPattern,
    fin_angle: f64,
    name: String,
    volume_cm3: f64,
    surface_area_cm2: f64,
    weight_kg: f64,
    #[serde(rename = "heat_dissipation_W")]
    heat_dissipation_w: f64,
    complexity_score: u32,
}

impl From<&DesignResult> for ResultRow {
    fn from(result: &DesignResult) -> Self {
        let p = &result.parameters;
        let m = &result.metrics;
        Self {
            width: p.width,
            length: p.length,
            base_height: p.base_height,
            fin_height: p.fin_height,
            fin_thickness: p.fin_thickness,
            num_fins: p.num_fins,
            pattern: p.pattern,
            fin_angle: p.fin_angle,
            name: p.name.clone(),
            volume_cm3: m.volume_cm3,
            surface_area_cm2: m.surface_area_cm2,
            weight_kg: m.weight_kg,
            heat_dissipation_w: m.heat_dissipation_w,
            complexity_score: m.complexity_score,
        }
    }
}

impl From<ResultRow> for DesignResult {
    fn from(row: ResultRow) -> Self {
        Self::new(
            DesignParameters {
                width: row.width,
                length: row.length,
                base_height: row.base_height,
                fin_height: row.fin_height,
                fin_thickness: row.fin_thickness,
                num_fins: row.num_fins,
                pattern: row.pattern,
                fin_angle: row.fin_angle,
                name: row.name,
            },
            DesignMetrics {
                volume_cm3: row.volume_cm3,
                surface_area_cm2: row.surface_area_cm2,
                weight_kg: row.weight_kg,
                heat_dissipation_w: row.heat_dissipation_w,
                complexity_score: row.complexity_score,
            },
        )
    }
}

/// Writes results with a header row.
///
/// # Errors
///
/// Returns [`StudyError::NoResults`] for an empty slice (there is nothing to
/// take a header from), or a CSV error if writing fails.
pub fn write_results<W: Write>(writer: W, results: &[DesignResult]) -> Result<()> {
    if results.is_empty() {
        return Err(StudyError::NoResults.into());
    }
    let mut csv = csv::Writer::from_writer(writer);
    for result in results {
        csv.serialize(ResultRow::from(result)).map_err(StudyError::from)?;
    }
    csv.flush().map_err(StudyError::from)?;
    Ok(())
}

/// Writes results to a new file at `path`.
///
/// The file is only created once there is at least one result.
///
/// # Errors
///
/// See [`write_results`]; also fails if the file cannot be created.
pub fn write_results_file(path: &Path, results: &[DesignResult]) -> Result<()> {
    if results.is_empty() {
        return Err(StudyError::NoResults.into());
    }
    let file = File::create(path).map_err(StudyError::from)?;
    write_results(file, results)
}

/// Reads results written by [`write_results`].
///
/// # Errors
///
/// Returns a CSV error on malformed input.
pub fn read_results<R: Read>(reader: R) -> Result<Vec<DesignResult>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut results = Vec::new();
    for row in csv.deserialize::<ResultRow>() {
        results.push(row.map_err(StudyError::from)?.into());
    }
    Ok(results)
}
