use super::model::{CellValue, RawTable};
use crate::config::{ALL_CLUSTERS, CLUSTER_COLUMN, HOURS_COLUMN};

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

/// Wanted columns split into the ones the table actually has (in wanted
/// order) and the ones it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProjection {
    pub available: Vec<String>,
    pub missing: Vec<String>,
}

pub fn project_columns(table: &RawTable, wanted: &[&str]) -> ColumnProjection {
    let (available, missing) = wanted
        .iter()
        .map(|c| c.to_string())
        .partition(|c| table.has_column(c));
    ColumnProjection { available, missing }
}

// ---------------------------------------------------------------------------
// Cluster filter
// ---------------------------------------------------------------------------

/// The operator's single-choice filter: the sentinel "all clusters", or one
/// exact cluster value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClusterFilter {
    #[default]
    All,
    Only(CellValue),
}

impl ClusterFilter {
    pub fn label(&self) -> String {
        match self {
            ClusterFilter::All => ALL_CLUSTERS.to_string(),
            ClusterFilter::Only(v) => v.to_string(),
        }
    }
}

/// Distinct cluster values, sorted, for the filter control.
pub fn cluster_choices(table: &RawTable) -> Vec<CellValue> {
    table
        .unique_values
        .get(CLUSTER_COLUMN)
        .map(|vals| vals.iter().cloned().collect())
        .unwrap_or_default()
}

/// Indices of the rows that pass the current filter.
///
/// `All` passes everything; `Only(v)` keeps exactly the rows whose cluster
/// cell equals `v` (exact, case-sensitive). Rows without the cluster column
/// never match a concrete value.
pub fn filtered_indices(table: &RawTable, filter: &ClusterFilter) -> Vec<usize> {
    match filter {
        ClusterFilter::All => (0..table.len()).collect(),
        ClusterFilter::Only(wanted) => table
            .records
            .iter()
            .enumerate()
            .filter(|(_, rec)| rec.get(CLUSTER_COLUMN) == Some(wanted))
            .map(|(i, _)| i)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Summary metric
// ---------------------------------------------------------------------------

/// Arithmetic mean of the accumulated-hours column over the given rows.
/// `None` when the row set is empty or the column does not exist; the UI
/// renders that as "no data" rather than a NaN.
pub fn mean_hours(table: &RawTable, indices: &[usize]) -> Option<f64> {
    if indices.is_empty() || !table.has_column(HOURS_COLUMN) {
        return None;
    }
    let sum: f64 = indices
        .iter()
        .map(|&i| {
            table.records[i]
                .get(HOURS_COLUMN)
                .and_then(CellValue::as_f64)
                .unwrap_or(0.0)
        })
        .sum();
    Some(sum / indices.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{coerce_numeric_column, parse_records};
    use serde_json::json;

    fn sample_table() -> RawTable {
        let mut table = parse_records(vec![
            vec![
                json!("클러스터"),
                json!("사번"),
                json!("이름"),
                json!("부서명"),
                json!("누적시간"),
            ],
            vec![json!("서울"), json!("1001"), json!("김"), json!("운영"), json!("20")],
            vec![json!("부산"), json!("1002"), json!("이"), json!("개발"), json!("")],
            vec![json!("서울"), json!("1003"), json!("박"), json!("개발"), json!("15.5")],
        ]);
        coerce_numeric_column(&mut table, "누적시간");
        table
    }

    #[test]
    fn projection_is_an_ordered_subset_of_wanted() {
        let table = sample_table();
        let wanted = ["클러스터", "사번", "이름", "부서명", "누적시간"];
        let proj = project_columns(&table, &wanted);
        assert_eq!(proj.available, wanted.to_vec());
        assert!(proj.missing.is_empty());
    }

    #[test]
    fn missing_columns_are_reported_but_not_fatal() {
        // Scenario: the department column is absent from the sheet
        let mut table = parse_records(vec![
            vec![json!("클러스터"), json!("사번"), json!("이름"), json!("누적시간")],
            vec![json!("서울"), json!("1001"), json!("김"), json!("20")],
        ]);
        coerce_numeric_column(&mut table, "누적시간");

        let proj = project_columns(
            &table,
            &["클러스터", "사번", "이름", "부서명", "누적시간"],
        );
        assert_eq!(proj.missing, vec!["부서명"]);
        assert_eq!(proj.available, vec!["클러스터", "사번", "이름", "누적시간"]);
    }

    #[test]
    fn no_wanted_column_present_yields_empty_available() {
        let table = parse_records(vec![vec![json!("x")], vec![json!("1")]]);
        let proj = project_columns(&table, &["클러스터", "누적시간"]);
        assert!(proj.available.is_empty());
        assert_eq!(proj.missing.len(), 2);
    }

    #[test]
    fn all_filter_keeps_every_row() {
        let table = sample_table();
        assert_eq!(filtered_indices(&table, &ClusterFilter::All), vec![0, 1, 2]);
    }

    #[test]
    fn concrete_filter_matches_exactly() {
        let table = sample_table();
        let seoul = ClusterFilter::Only(CellValue::String("서울".into()));
        assert_eq!(filtered_indices(&table, &seoul), vec![0, 2]);

        // exact match only: no partial or case-folded hits
        let nope = ClusterFilter::Only(CellValue::String("서".into()));
        assert!(filtered_indices(&table, &nope).is_empty());
    }

    #[test]
    fn cluster_choices_are_sorted_and_distinct() {
        let table = sample_table();
        let labels: Vec<String> = cluster_choices(&table)
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(labels, vec!["부산", "서울"]);
    }

    #[test]
    fn mean_over_coerced_hours() {
        let table = sample_table();
        let all = filtered_indices(&table, &ClusterFilter::All);
        let mean = mean_hours(&table, &all).unwrap();
        assert!((mean - 35.5 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{mean:.1}"), "11.8");
    }

    #[test]
    fn mean_follows_the_filter() {
        let table = sample_table();
        let seoul = filtered_indices(
            &table,
            &ClusterFilter::Only(CellValue::String("서울".into())),
        );
        let mean = mean_hours(&table, &seoul).unwrap();
        assert!((mean - 17.75).abs() < 1e-9);
    }

    #[test]
    fn empty_row_set_has_no_mean() {
        let table = sample_table();
        assert_eq!(mean_hours(&table, &[]), None);
    }

    #[test]
    fn missing_hours_column_has_no_mean() {
        let table = parse_records(vec![vec![json!("클러스터")], vec![json!("서울")]]);
        assert_eq!(mean_hours(&table, &[0]), None);
    }
}
