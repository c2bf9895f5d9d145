use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome stored in the `class` column (0 / 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failed,
    Success,
}

impl Outcome {
    /// Interpret a raw `class` value. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failed),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric class, as plotted on the scatter y axis.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failed => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failed => write!(f, "Failed"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the input table
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Used only for colour grouping in the scatter chart.
    pub booster_version_category: String,
    pub flight_number: Option<i64>,
    pub booster_version: Option<String>,
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable launch table plus the values derived from it once at
/// construction: site list, booster categories and payload bounds.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    categories: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchTable {
    /// Build the table and its derived indices. Returns `None` for an empty
    /// record set, which has no payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut min_payload = first.payload_mass_kg;
        let mut max_payload = first.payload_mass_kg;
        let mut sites: Vec<String> = Vec::new();
        let mut categories: Vec<String> = Vec::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !categories.contains(&rec.booster_version_category) {
                categories.push(rec.booster_version_category.clone());
            }
        }

        Some(LaunchTable {
            records,
            sites,
            categories,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Smallest observed payload mass; the slider's lower bound.
    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    /// Largest observed payload mass; the slider's upper bound.
    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
