use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde_json::Value as JsonValue;

use super::model::{CellValue, RawTable, Record};
use super::sheets::{self, SheetsClient};
use crate::config::HOURS_COLUMN;
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one worksheet as a [`RawTable`].
///
/// * `client` absent → an empty table, no error. Downstream renders the
///   empty state instead of crashing.
/// * Fresh cache entry for `(url, worksheet)` → served without a fetch.
/// * Otherwise the worksheet is fetched, records are parsed and the
///   accumulated-hours column is coerced to numeric, then the result is
///   cached.
pub fn load(
    client: Option<&SheetsClient>,
    cache: &mut TableCache,
    url: &str,
    worksheet: &str,
) -> Result<RawTable, ViewerError> {
    let Some(client) = client else {
        return Ok(RawTable::default());
    };

    let key = CacheKey::new(url, worksheet);
    if let Some(table) = cache.fresh(&key) {
        log::debug!("cache hit for '{worksheet}' ({} rows)", table.len());
        return Ok(table.clone());
    }

    let table = fetch(client, url, worksheet)?;
    log::info!(
        "loaded {} rows from '{worksheet}' with columns {:?}",
        table.len(),
        table.column_names
    );
    cache.insert(key, table.clone());
    Ok(table)
}

fn fetch(
    client: &SheetsClient,
    url: &str,
    worksheet: &str,
) -> Result<RawTable, ViewerError> {
    let id = sheets::spreadsheet_id_from_url(url).map_err(ViewerError::LoadFailure)?;

    let titles = client
        .worksheet_titles(id)
        .map_err(ViewerError::LoadFailure)?;
    require_worksheet(&titles, worksheet)?;

    let values = client
        .worksheet_values(id, worksheet)
        .map_err(ViewerError::LoadFailure)?;

    let mut table = parse_records(values);
    coerce_numeric_column(&mut table, HOURS_COLUMN);
    Ok(table)
}

/// Check that the requested worksheet actually exists in the document.
/// Exact title match, like gspread's `WorksheetNotFound`.
pub fn require_worksheet(titles: &[String], worksheet: &str) -> Result<(), ViewerError> {
    if titles.iter().any(|t| t == worksheet) {
        Ok(())
    } else {
        Err(ViewerError::WorksheetNotFound(worksheet.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record parsing
// ---------------------------------------------------------------------------

/// Turn the raw value grid into records. The first row is the header;
/// data cells beyond the header width are dropped, rows shorter than the
/// header leave the trailing columns as absent keys. Header cells with an
/// empty title are skipped entirely.
pub fn parse_records(values: Vec<Vec<JsonValue>>) -> RawTable {
    let mut rows = values.into_iter();
    let Some(header_row) = rows.next() else {
        return RawTable::default();
    };
    let header: Vec<String> = header_row
        .into_iter()
        .map(|cell| cell_text(&cell))
        .collect();

    let mut records = Vec::new();
    for row in rows {
        let mut fields = BTreeMap::new();
        for (name, cell) in header.iter().zip(row) {
            if name.is_empty() {
                continue;
            }
            fields.insert(name.clone(), json_to_cell(cell));
        }
        records.push(Record { fields });
    }

    let header = header.into_iter().filter(|h| !h.is_empty()).collect();
    RawTable::from_records(header, records)
}

fn cell_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_to_cell(val: JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.is_empty() => CellValue::Empty,
        JsonValue::String(s) => CellValue::String(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(b),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Force `column` to `Float` in every record: numbers and numeric-looking
/// strings keep their value, everything else (including absent keys)
/// becomes `0`. No-op when the table never had the column at all.
pub fn coerce_numeric_column(table: &mut RawTable, column: &str) {
    if !table.has_column(column) {
        return;
    }
    for rec in &mut table.records {
        let v = rec.get(column).and_then(CellValue::as_f64).unwrap_or(0.0);
        rec.fields.insert(column.to_string(), CellValue::Float(v));
    }
    let coerced = table
        .records
        .iter()
        .filter_map(|r| r.get(column))
        .cloned()
        .collect();
    table.unique_values.insert(column.to_string(), coerced);
}

// ---------------------------------------------------------------------------
// Table cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CacheKey {
    url: String,
    worksheet: String,
}

impl CacheKey {
    pub fn new(url: &str, worksheet: &str) -> Self {
        CacheKey {
            url: url.to_string(),
            worksheet: worksheet.to_string(),
        }
    }
}

struct CacheEntry {
    table: RawTable,
    fetched_at: Instant,
}

/// Process-wide read cache for fetched tables. Entries expire after the
/// configured TTL; expired entries trigger a refetch on the next load.
pub struct TableCache {
    entries: BTreeMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        TableCache {
            entries: BTreeMap::new(),
            ttl,
        }
    }

    fn fresh(&self, key: &CacheKey) -> Option<&RawTable> {
        self.fresh_at(key, Instant::now())
    }

    /// Lookup with an explicit clock, so expiry is testable.
    fn fresh_at(&self, key: &CacheKey, now: Instant) -> Option<&RawTable> {
        let entry = self.entries.get(key)?;
        if now.duration_since(entry.fetched_at) < self.ttl {
            Some(&entry.table)
        } else {
            None
        }
    }

    fn insert(&mut self, key: CacheKey, table: RawTable) {
        self.entries.insert(
            key,
            CacheEntry {
                table,
                fetched_at: Instant::now(),
            },
        );
    }
}
