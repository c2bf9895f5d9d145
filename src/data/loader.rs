use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{LaunchRecord, LaunchTable, Outcome};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

/// Reasons a launch CSV is rejected.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        /// 1-based file line, header included.
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("CSV contains no launch records")]
    Empty,
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the launch table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening launch data {}", path.display()))?;
    let table =
        load_reader(file).with_context(|| format!("reading launch data {}", path.display()))?;
    Ok(table)
}

/// Parse launch records from any CSV source.
///
/// The header row must name every required column; extra columns are
/// ignored apart from the optional flight number and booster version.
pub fn load_reader<R: Read>(source: R) -> Result<LaunchTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let index_of = |name: &str| headers.iter().position(|h| h == name);
    let mut required = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = index_of(name).ok_or(LoadError::MissingColumn(name))?;
    }
    let [site_idx, payload_idx, class_idx, category_idx] = required;
    let flight_idx = index_of(COL_FLIGHT_NUMBER);
    let version_idx = index_of(COL_BOOSTER_VERSION);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map_or(row_no + 2, |pos| pos.line() as usize);
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let payload_raw = cell(payload_idx);
        let payload_mass_kg = payload_raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| invalid(line, COL_PAYLOAD_MASS, payload_raw))?;

        let class_raw = cell(class_idx);
        let outcome = parse_class(class_raw)
            .ok_or_else(|| invalid(line, COL_CLASS, class_raw))?;

        let launch_site = cell(site_idx);
        if launch_site.is_empty() {
            return Err(invalid(line, COL_LAUNCH_SITE, launch_site));
        }

        let category = cell(category_idx);
        if category.is_empty() {
            return Err(invalid(line, COL_BOOSTER_CATEGORY, category));
        }

        let flight_number = match flight_idx.map(cell).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| invalid(line, COL_FLIGHT_NUMBER, raw))?,
            ),
            None => None,
        };

        records.push(LaunchRecord {
            launch_site: launch_site.to_string(),
            payload_mass_kg,
            outcome,
            booster_version_category: category.to_string(),
            flight_number,
            booster_version: version_idx
                .map(cell)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        });
    }

    LaunchTable::from_records(records).ok_or(LoadError::Empty)
}

fn invalid(line: usize, column: &'static str, value: &str) -> LoadError {
    LoadError::InvalidValue {
        line,
        column,
        value: value.to_string(),
    }
}

/// Accept `0`/`1` as well as float spellings such as `1.0`.
fn parse_class(raw: &str) -> Option<Outcome> {
    if let Ok(i) = raw.parse::<i64>() {
        return Outcome::from_class(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f == 0.0 => Some(Outcome::Failed),
        Ok(f) if f == 1.0 => Some(Outcome::Success),
        _ => None,
    }
}
