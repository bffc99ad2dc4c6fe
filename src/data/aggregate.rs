use std::collections::HashMap;

use super::error::MissingColumn;
use super::model::{Category, FilteredView, Lift};

// ---------------------------------------------------------------------------
// Categorical distribution
// ---------------------------------------------------------------------------

/// Occurrence counts of the values of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub category: Category,
    /// (value, count), most frequent first; ties keep first-seen order.
    pub counts: Vec<(String, usize)>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count the rows of `view` per value of `category`.
///
/// Only observed values appear. Blank cells are counted under the empty
/// string, so the counts always add up to `view.len()`.
pub fn value_counts(view: &FilteredView<'_>, category: Category) -> Result<Distribution, MissingColumn> {
    if !view.columns.has_category(category) {
        return Err(MissingColumn {
            column: category.column(),
        });
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in &view.rows {
        let value = row.category(category);
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }
    // Stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(Distribution { category, counts })
}

// ---------------------------------------------------------------------------
// Top-N ranking
// ---------------------------------------------------------------------------

/// One bar of a top-N chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLifter {
    pub name: String,
    pub value: f64,
}

/// The `n` rows with the heaviest `lift`, heaviest first.
///
/// Rows without a value for the lift are not candidates. Equal values keep
/// their original row order.
pub fn top_n(view: &FilteredView<'_>, lift: Lift, n: usize) -> Result<Vec<RankedLifter>, MissingColumn> {
    if !view.columns.has_lift(lift) {
        return Err(MissingColumn {
            column: lift.column(),
        });
    }

    let mut candidates: Vec<RankedLifter> = view
        .rows
        .iter()
        .filter_map(|row| {
            let value = row.best(lift).filter(|v| !v.is_nan())?;
            Some(RankedLifter {
                name: row.name.clone(),
                value,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.value.total_cmp(&a.value));
    candidates.truncate(n);
    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Dashboard: every aggregate for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LiftRanking {
    pub lift: Lift,
    pub ranking: Result<Vec<RankedLifter>, MissingColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Rows behind the charts.
    pub row_count: usize,
    pub sex: Result<Distribution, MissingColumn>,
    /// Squat, bench and deadlift, in that order.
    pub rankings: Vec<LiftRanking>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardOutcome {
    /// The selection matched no rows.
    NoData,
    Charts(Dashboard),
}

/// Run every aggregate over `view`. Each chart fails independently.
pub fn build_dashboard(view: &FilteredView<'_>, n: usize) -> DashboardOutcome {
    if view.is_empty() {
        return DashboardOutcome::NoData;
    }

    let rankings = Lift::ALL
        .into_iter()
        .map(|lift| LiftRanking {
            lift,
            ranking: top_n(view, lift, n),
        })
        .collect();

    DashboardOutcome::Charts(Dashboard {
        row_count: view.len(),
        sex: value_counts(view, Category::Sex),
        rankings,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::{filter_table, Selection, WeightClassChoice};
    use crate::data::model::{ColumnPresence, LiftResult, LiftTable};
    use crate::data::testing::{row, sample_table};

    fn ipf_2023(table: &LiftTable) -> FilteredView<'_> {
        filter_table(table, &Selection::new(2023, "IPF", WeightClassChoice::All))
    }

    fn names(ranking: &[RankedLifter]) -> Vec<&str> {
        ranking.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn top_n_example_from_three_squats() {
        let table = LiftTable::new(
            vec![
                row("A", "M", "2024-01-01", "IPF", "93", Some(200.0), None, None),
                row("B", "M", "2024-01-01", "IPF", "93", Some(250.0), None, None),
                row("C", "M", "2024-01-01", "IPF", "93", Some(180.0), None, None),
            ],
            ColumnPresence::all(),
        );
        let view = FilteredView::whole(&table);
        let ranking = top_n(&view, Lift::Squat, 10).unwrap();
        assert_eq!(
            ranking,
            vec![
                RankedLifter { name: "B".into(), value: 250.0 },
                RankedLifter { name: "A".into(), value: 200.0 },
                RankedLifter { name: "C".into(), value: 180.0 },
            ]
        );
    }

    #[test]
    fn top_n_excludes_missing_lifts() {
        let table = sample_table();
        let view = ipf_2023(&table);
        let squat = top_n(&view, Lift::Squat, 10).unwrap();
        assert_eq!(names(&squat), vec!["Ben", "Dana", "Cara"]);

        let bench = top_n(&view, Lift::Bench, 10).unwrap();
        assert_eq!(names(&bench), vec!["Eli", "Ben", "Dana"]);
    }

    #[test]
    fn top_n_ties_keep_row_order() {
        let table = sample_table();
        let view = ipf_2023(&table);
        let deadlift = top_n(&view, Lift::Deadlift, 10).unwrap();
        assert_eq!(names(&deadlift), vec!["Eli", "Ben", "Cara", "Dana"]);
    }

    #[test]
    fn top_n_caps_at_n_and_is_non_increasing() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let rows: Vec<LiftResult> = (0..25)
            .map(|i| LiftResult {
                name: format!("L{i}"),
                sex: "M".into(),
                date,
                federation: "IPF".into(),
                weight_class: "83".into(),
                squat: Some(((i * 37) % 25) as f64 * 10.0),
                bench: (i % 3 != 0).then_some(100.0 + i as f64),
                deadlift: None,
            })
            .collect();
        let table = LiftTable::new(rows, ColumnPresence::all());
        let view = FilteredView::whole(&table);

        let squat = top_n(&view, Lift::Squat, 10).unwrap();
        assert_eq!(squat.len(), 10);
        assert!(squat.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(squat[0].value, 240.0);

        let bench = top_n(&view, Lift::Bench, 10).unwrap();
        assert_eq!(bench.len(), 10);
        assert!(bench.windows(2).all(|w| w[0].value >= w[1].value));

        assert!(top_n(&view, Lift::Deadlift, 10).unwrap().is_empty());
    }

    #[test]
    fn top_n_skips_nan_values() {
        let table = LiftTable::new(
            vec![
                row("A", "M", "2024-01-01", "IPF", "93", Some(f64::NAN), None, None),
                row("B", "M", "2024-01-01", "IPF", "93", Some(210.0), None, None),
                row("C", "M", "2024-01-01", "IPF", "93", Some(190.0), None, None),
            ],
            ColumnPresence::all(),
        );
        let view = FilteredView::whole(&table);
        let squat = top_n(&view, Lift::Squat, 10).unwrap();
        assert_eq!(names(&squat), vec!["B", "C"]);
        assert!(squat.iter().all(|r| !r.value.is_nan()));
    }

    #[test]
    fn top_n_returns_all_when_fewer_than_n_qualify() {
        let table = sample_table();
        let view = ipf_2023(&table);
        assert_eq!(top_n(&view, Lift::Squat, 10).unwrap().len(), 3);
        assert_eq!(top_n(&view, Lift::Squat, 2).unwrap().len(), 2);
    }

    #[test]
    fn value_counts_sum_to_row_count() {
        let table = sample_table();
        let view = ipf_2023(&table);
        let dist = value_counts(&view, Category::Sex).unwrap();
        assert_eq!(dist.total(), view.len());
        assert_eq!(
            dist.counts,
            vec![("M".to_string(), 2), ("F".to_string(), 2)]
        );
    }

    #[test]
    fn value_counts_keeps_blank_cells_as_their_own_value() {
        let table = LiftTable::new(
            vec![
                row("A", "M", "2024-01-01", "IPF", "93", None, None, None),
                row("B", "", "2024-02-01", "IPF", "93", None, None, None),
                row("C", "F", "2024-03-01", "IPF", "63", None, None, None),
                row("D", "", "2024-04-01", "IPF", "63", None, None, None),
            ],
            ColumnPresence::all(),
        );
        let view = FilteredView::whole(&table);
        let dist = value_counts(&view, Category::Sex).unwrap();
        assert_eq!(dist.total(), view.len());
        assert!(dist.counts.contains(&(String::new(), 2)));
        assert_eq!(
            dist.counts,
            vec![
                (String::new(), 2),
                ("M".to_string(), 1),
                ("F".to_string(), 1),
            ]
        );
    }

    #[test]
    fn value_counts_orders_by_frequency() {
        let table = sample_table();
        let view = FilteredView::whole(&table);
        let dist = value_counts(&view, Category::WeightClass).unwrap();
        assert_eq!(
            dist.counts,
            vec![
                ("93".to_string(), 3),
                ("63".to_string(), 2),
                ("120+".to_string(), 1),
            ]
        );
        assert_eq!(dist.total(), table.len());
    }

    #[test]
    fn value_counts_of_empty_view_is_empty() {
        let table = sample_table();
        let view = filter_table(&table, &Selection::new(1999, "IPF", WeightClassChoice::All));
        let dist = value_counts(&view, Category::Federation).unwrap();
        assert!(dist.is_empty());
    }

    #[test]
    fn empty_selection_yields_no_data() {
        let table = sample_table();
        let view = filter_table(
            &table,
            &Selection::new(2099, "NONEXISTENT", WeightClassChoice::All),
        );
        assert_eq!(build_dashboard(&view, 10), DashboardOutcome::NoData);
    }

    #[test]
    fn missing_bench_column_only_skips_bench() {
        let rows = sample_table().rows().to_vec();
        let columns = ColumnPresence {
            bench: false,
            ..ColumnPresence::all()
        };
        let table = LiftTable::new(rows, columns);
        let view = ipf_2023(&table);

        let DashboardOutcome::Charts(dashboard) = build_dashboard(&view, 10) else {
            panic!("expected charts");
        };
        assert_eq!(dashboard.row_count, 4);
        assert!(dashboard.sex.is_ok());

        let by_lift = |lift: Lift| {
            dashboard
                .rankings
                .iter()
                .find(|r| r.lift == lift)
                .map(|r| r.ranking.clone())
                .unwrap()
        };
        assert_eq!(
            by_lift(Lift::Bench),
            Err(MissingColumn { column: "Best3BenchKg" })
        );
        assert_eq!(by_lift(Lift::Squat).unwrap().len(), 3);
        assert_eq!(by_lift(Lift::Deadlift).unwrap().len(), 4);
    }

    #[test]
    fn missing_sex_column_is_reported() {
        let rows = sample_table().rows().to_vec();
        let columns = ColumnPresence {
            sex: false,
            ..ColumnPresence::all()
        };
        let table = LiftTable::new(rows, columns);
        let view = ipf_2023(&table);
        assert_eq!(
            value_counts(&view, Category::Sex),
            Err(MissingColumn { column: "Sex" })
        );
    }
}
