use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the worksheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as returned by the Sheets API.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Empty => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Empty, Empty) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.  Numeric-looking strings
    /// count, matching the loose typing of spreadsheet cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the worksheet
// ---------------------------------------------------------------------------

/// A single row keyed by column name. Columns the source row did not have
/// are simply absent keys.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }
}

// ---------------------------------------------------------------------------
// RawTable – the complete loaded worksheet
// ---------------------------------------------------------------------------

/// The full fetched worksheet with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// All rows, in sheet order.
    pub records: Vec<Record>,
    /// Ordered column names: header order, extended by the union of
    /// whatever extra keys individual rows carried.
    pub column_names: Vec<String>,
    /// For each column the sorted set of distinct values observed.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl RawTable {
    /// Build column indices from parsed records. `header` fixes the order
    /// of the columns the sheet declared; columns seen only in rows are
    /// appended after it.
    pub fn from_records(header: Vec<String>, records: Vec<Record>) -> Self {
        let mut column_names = header;
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.fields {
                if !column_names.iter().any(|c| c == col) {
                    column_names.push(col.clone());
                }
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }

        RawTable {
            records,
            column_names,
            unique_values,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        Record {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn column_union_preserves_header_order() {
        let header = vec!["b".to_string(), "a".to_string()];
        let records = vec![
            record(&[("b", CellValue::Integer(1))]),
            record(&[("a", CellValue::Integer(2)), ("extra", CellValue::Empty)]),
        ];
        let table = RawTable::from_records(header, records);
        assert_eq!(table.column_names, vec!["b", "a", "extra"]);
    }

    #[test]
    fn unique_values_are_sorted_and_distinct() {
        let records = vec![
            record(&[("cluster", CellValue::String("B".into()))]),
            record(&[("cluster", CellValue::String("A".into()))]),
            record(&[("cluster", CellValue::String("B".into()))]),
        ];
        let table = RawTable::from_records(vec!["cluster".to_string()], records);
        let clusters: Vec<String> = table.unique_values["cluster"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(clusters, vec!["A", "B"]);
    }

    #[test]
    fn as_f64_parses_numeric_strings() {
        assert_eq!(CellValue::String("12.5".into()).as_f64(), Some(12.5));
        assert_eq!(CellValue::String("abc".into()).as_f64(), None);
        assert_eq!(CellValue::Integer(20).as_f64(), Some(20.0));
        assert_eq!(CellValue::Empty.as_f64(), None);
    }
}
