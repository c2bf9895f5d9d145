use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{LaunchRecord, LaunchTable};

/// Dropdown value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";
/// Human label for [`ALL_SITES`].
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// The dropdown's current value: either the sentinel or a concrete site.
///
/// A concrete site does not have to exist in the table; an unknown name
/// simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn parse(value: &str) -> Self {
        SiteSelection::from(value.to_string())
    }

    /// The raw widget value (`ALL` or the site name).
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    /// Name used in chart titles.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_LABEL,
            SiteSelection::Site(site) => site,
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> Self {
        match selection {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload window `[low, high]` from the range slider.
///
/// Serialized as a two-element array, matching the slider's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// The full observed range of a table; the slider's initial value.
    pub fn full(table: &LaunchTable) -> Self {
        PayloadRange::new(table.min_payload(), table.max_payload())
    }

    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        PayloadRange::new(low, high)
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.low, range.high]
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records at the selected site (all records for the sentinel).
pub fn by_site<'a>(
    table: &'a LaunchTable,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table.records().iter().filter(move |rec| site.matches(rec))
}

/// Records whose payload lies in `range`, further restricted to the
/// selected site unless the sentinel is selected.
pub fn by_site_and_payload<'a>(
    table: &'a LaunchTable,
    site: &'a SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table
        .records()
        .iter()
        .filter(move |rec| range.contains(rec.payload_mass_kg) && site.matches(rec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_site_table;

    #[test]
    fn sentinel_round_trips_through_widget_value() {
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::parse("A"), SiteSelection::Site("A".into()));
        assert_eq!(SiteSelection::All.value(), "ALL");
        assert_eq!(SiteSelection::All.label(), "All Sites");

        let parsed: SiteSelection = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(parsed, SiteSelection::All);
        let json = serde_json::to_string(&SiteSelection::Site("B".into())).unwrap();
        assert_eq!(json, "\"B\"");
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(1000.0, 2000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(2000.1));
        assert!(!PayloadRange::new(5.0, 1.0).contains(3.0));

        let parsed: PayloadRange = serde_json::from_str("[0, 9600]").unwrap();
        assert_eq!(parsed, PayloadRange::new(0.0, 9600.0));
    }

    #[test]
    fn filters_by_site_and_payload() {
        let table = two_site_table();
        let all = SiteSelection::All;
        let a = SiteSelection::Site("A".into());

        assert_eq!(by_site(&table, &all).count(), 10);
        assert_eq!(by_site(&table, &a).count(), 5);

        let range = PayloadRange::new(1500.0, 4000.0);
        let payloads: Vec<f64> = by_site_and_payload(&table, &all, range)
            .map(|r| r.payload_mass_kg)
            .collect();
        assert_eq!(payloads, [1500.0, 2500.0, 3000.0, 4000.0, 4000.0]);

        let at_a: Vec<f64> = by_site_and_payload(&table, &a, range)
            .map(|r| r.payload_mass_kg)
            .collect();
        assert_eq!(at_a, [1500.0, 2500.0, 4000.0]);
    }

    #[test]
    fn unknown_site_matches_nothing() {
        let table = two_site_table();
        let nowhere = SiteSelection::Site("Boca Chica".into());
        assert_eq!(by_site(&table, &nowhere).count(), 0);
    }
}
