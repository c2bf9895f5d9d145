use log::debug;

use crate::chart::{Axis, Figure, Legend, Marker, PieTrace, ScatterTrace, Title, Trace};
use crate::color::{to_hex, ColorMap};
use crate::data::filter::{by_site, by_site_and_payload, PayloadRange, SiteSelection};
use crate::data::loader::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_PAYLOAD_MASS};
use crate::data::model::{LaunchRecord, LaunchTable, Outcome};

/// Donut hole for the single-site outcome chart.
pub const OUTCOME_HOLE: f64 = 0.3;
pub const FAILED_COLOR: &str = "red";
pub const SUCCESS_COLOR: &str = "green";

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Successful launches per site, one entry per site in table order.
/// Sites without a success are kept with a zero count.
pub fn success_counts_by_site(table: &LaunchTable) -> Vec<(String, u64)> {
    table
        .sites()
        .iter()
        .map(|site| {
            let successes = table
                .records()
                .iter()
                .filter(|r| r.launch_site == *site && r.outcome.is_success())
                .count() as u64;
            (site.clone(), successes)
        })
        .collect()
}

/// `[failed, success]` counts over the records of one selection.
pub fn outcome_counts(table: &LaunchTable, site: &SiteSelection) -> [u64; 2] {
    by_site(table, site).fold([0, 0], |mut counts, rec| {
        match rec.outcome {
            Outcome::Failed => counts[0] += 1,
            Outcome::Success => counts[1] += 1,
        }
        counts
    })
}

// ---------------------------------------------------------------------------
// Pie chart: site / outcome summary
// ---------------------------------------------------------------------------

/// Outcome summary for the selected site.
///
/// For the sentinel this is one slice per site sized by its success count,
/// not a global success/failure split. For a concrete site it is a
/// Failed/Success donut. A site with no records yields an empty pie.
pub fn site_summary(table: &LaunchTable, site: &SiteSelection) -> Figure {
    debug!("site_summary({site})");
    match site {
        SiteSelection::All => {
            let (labels, values) = success_counts_by_site(table).into_iter().unzip();
            let mut fig = Figure::new("Total Success Launches by Site");
            fig.data.push(Trace::Pie(PieTrace {
                labels,
                values,
                ..PieTrace::default()
            }));
            fig
        }
        SiteSelection::Site(name) => {
            let mut fig = Figure::new(format!("Total Success vs Failed Launches for {name}"));
            let [failed, success] = outcome_counts(table, site);
            let trace = if failed + success == 0 {
                PieTrace {
                    hole: Some(OUTCOME_HOLE),
                    ..PieTrace::default()
                }
            } else {
                PieTrace {
                    labels: vec![Outcome::Failed.to_string(), Outcome::Success.to_string()],
                    values: vec![failed, success],
                    hole: Some(OUTCOME_HOLE),
                    marker: Marker {
                        colors: vec![FAILED_COLOR.to_string(), SUCCESS_COLOR.to_string()],
                        ..Marker::default()
                    },
                    sort: false,
                }
            };
            fig.data.push(Trace::Pie(trace));
            fig
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter chart: payload / outcome correlation
// ---------------------------------------------------------------------------

/// Payload mass against outcome for the records inside `range` (and at the
/// selected site), one trace per booster version category.
///
/// Traces follow the table's category order and take their colour from a
/// map over all categories, so colours stay put as the filters change.
pub fn payload_correlation(
    table: &LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> Figure {
    debug!("payload_correlation({site}, [{}, {}])", range.low, range.high);
    let colors = ColorMap::new(table.categories());
    let matching: Vec<&LaunchRecord> = by_site_and_payload(table, site, range).collect();

    let mut fig = Figure::new(format!(
        "Correlation between Payload and Success for {}",
        site.label()
    ));
    fig.layout.xaxis = Some(Axis {
        title: Title::new(COL_PAYLOAD_MASS),
    });
    fig.layout.yaxis = Some(Axis {
        title: Title::new(COL_CLASS),
    });
    fig.layout.legend = Some(Legend {
        title: Title::new(COL_BOOSTER_CATEGORY),
    });

    for category in table.categories() {
        let points: Vec<&LaunchRecord> = matching
            .iter()
            .copied()
            .filter(|r| r.booster_version_category == *category)
            .collect();
        if points.is_empty() {
            continue;
        }
        fig.data.push(Trace::Scatter(ScatterTrace {
            name: category.clone(),
            x: points.iter().map(|r| r.payload_mass_kg).collect(),
            y: points.iter().map(|r| f64::from(r.outcome.class())).collect(),
            text: points.iter().map(|r| hover_text(r)).collect(),
            marker: Marker {
                color: Some(to_hex(colors.color_for(category))),
                ..Marker::default()
            },
            ..ScatterTrace::default()
        }));
    }

    fig
}

fn hover_text(record: &LaunchRecord) -> String {
    let mut text = record.launch_site.clone();
    if let Some(flight) = record.flight_number {
        text.push_str(&format!("<br>Flight {flight}"));
    }
    if let Some(version) = &record.booster_version {
        text.push_str(&format!("<br>{version}"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, two_site_table};

    fn pie(fig: &Figure) -> &PieTrace {
        match fig.data.as_slice() {
            [Trace::Pie(pie)] => pie,
            other => panic!("expected one pie trace, got {other:?}"),
        }
    }

    fn scatter_points(fig: &Figure) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = fig
            .data
            .iter()
            .flat_map(|t| match t {
                Trace::Scatter(s) => s
                    .x
                    .iter()
                    .copied()
                    .zip(s.y.iter().copied())
                    .collect::<Vec<_>>(),
                Trace::Pie(_) => Vec::new(),
            })
            .collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points
    }

    #[test]
    fn all_sites_pie_counts_successes_per_site() {
        let table = two_site_table();
        let fig = site_summary(&table, &SiteSelection::All);
        let pie = pie(&fig);
        assert_eq!(pie.labels, ["A", "B"]);
        assert_eq!(pie.values, [3, 1]);
        assert_eq!(pie.hole, None);
        assert_eq!(fig.title(), "Total Success Launches by Site");
    }

    #[test]
    fn site_pie_is_failed_success_donut() {
        let table = two_site_table();
        let fig = site_summary(&table, &SiteSelection::Site("A".into()));
        let pie = pie(&fig);
        assert_eq!(pie.labels, ["Failed", "Success"]);
        assert_eq!(pie.values, [2, 3]);
        assert_eq!(pie.hole, Some(0.3));
        assert_eq!(pie.marker.colors, ["red", "green"]);
        assert_eq!(fig.title(), "Total Success vs Failed Launches for A");
    }

    #[test]
    fn every_site_pie_sums_to_site_record_count() {
        let table = two_site_table();
        for site in table.sites() {
            let selection = SiteSelection::Site(site.clone());
            let fig = site_summary(&table, &selection);
            let pie = pie(&fig);
            assert_eq!(pie.labels, ["Failed", "Success"]);
            let expected = table
                .records()
                .iter()
                .filter(|r| r.launch_site == *site)
                .count() as u64;
            assert_eq!(pie.total(), expected);
        }
    }

    #[test]
    fn single_outcome_site_keeps_both_labels() {
        let table =
            LaunchTable::from_records(vec![record("X", 10.0, 1, "FT"), record("X", 20.0, 1, "FT")])
                .unwrap();
        let fig = site_summary(&table, &SiteSelection::Site("X".into()));
        assert_eq!(pie(&fig).values, [0, 2]);
    }

    #[test]
    fn all_sites_pie_keeps_sites_without_success() {
        let table =
            LaunchTable::from_records(vec![record("X", 10.0, 0, "FT"), record("Y", 20.0, 1, "FT")])
                .unwrap();
        let fig = site_summary(&table, &SiteSelection::All);
        assert_eq!(pie(&fig).labels, ["X", "Y"]);
        assert_eq!(pie(&fig).values, [0, 1]);
    }

    #[test]
    fn unknown_site_gives_empty_chart() {
        let table = two_site_table();
        let nowhere = SiteSelection::Site("Nowhere".into());
        assert!(site_summary(&table, &nowhere).is_empty());
        let range = PayloadRange::full(&table);
        assert!(payload_correlation(&table, &nowhere, range).is_empty());
    }

    #[test]
    fn scatter_filters_inclusive_range_and_site() {
        let table = two_site_table();
        let range = PayloadRange::new(1500.0, 4000.0);

        let all = payload_correlation(&table, &SiteSelection::All, range);
        assert_eq!(
            scatter_points(&all),
            [(1500.0, 0.0), (2500.0, 1.0), (3000.0, 1.0), (4000.0, 0.0), (4000.0, 0.0)]
        );
        assert_eq!(all.title(), "Correlation between Payload and Success for All Sites");

        let b = payload_correlation(&table, &SiteSelection::Site("B".into()), range);
        assert_eq!(scatter_points(&b), [(3000.0, 1.0), (4000.0, 0.0)]);
        assert_eq!(b.title(), "Correlation between Payload and Success for B");
    }

    #[test]
    fn scatter_groups_by_category_with_stable_colours() {
        let table = two_site_table();
        let full = payload_correlation(&table, &SiteSelection::All, PayloadRange::full(&table));
        let names: Vec<&str> = full
            .data
            .iter()
            .filter_map(|t| match t {
                Trace::Scatter(s) => Some(s.name.as_str()),
                Trace::Pie(_) => None,
            })
            .collect();
        assert_eq!(names, ["v1.0", "v1.1", "FT", "B4", "B5"]);

        let colour_of = |fig: &Figure, name: &str| {
            fig.data.iter().find_map(|t| match t {
                Trace::Scatter(s) if s.name == name => s.marker.color.clone(),
                _ => None,
            })
        };
        let narrow = payload_correlation(
            &table,
            &SiteSelection::Site("A".into()),
            PayloadRange::new(9000.0, 9600.0),
        );
        assert_eq!(narrow.data.len(), 1);
        assert_eq!(colour_of(&narrow, "B5"), colour_of(&full, "B5"));
    }

    #[test]
    fn minimum_payload_boundary_returns_only_minimum_records() {
        let table = two_site_table();
        let min = table.min_payload();
        let fig = payload_correlation(&table, &SiteSelection::All, PayloadRange::new(min, min));
        assert_eq!(scatter_points(&fig), [(0.0, 0.0), (0.0, 0.0)]);

        let max = table.max_payload();
        let fig = payload_correlation(&table, &SiteSelection::All, PayloadRange::new(max, max));
        assert_eq!(scatter_points(&fig), [(9600.0, 1.0)]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let table = two_site_table();
        let fig = payload_correlation(
            &table,
            &SiteSelection::All,
            PayloadRange::new(5000.0, 1000.0),
        );
        assert!(fig.is_empty());
    }

    #[test]
    fn callbacks_are_idempotent() {
        let table = two_site_table();
        let site = SiteSelection::Site("B".into());
        assert_eq!(site_summary(&table, &site), site_summary(&table, &site));
        let range = PayloadRange::new(0.0, 5000.0);
        assert_eq!(
            payload_correlation(&table, &site, range),
            payload_correlation(&table, &site, range)
        );
    }

    #[test]
    fn hover_text_includes_optional_columns() {
        let mut rec = record("A", 1.0, 1, "FT");
        assert_eq!(hover_text(&rec), "A");
        rec.flight_number = Some(7);
        rec.booster_version = Some("F9 FT B1021".into());
        assert_eq!(hover_text(&rec), "A<br>Flight 7<br>F9 FT B1021");
    }
}
