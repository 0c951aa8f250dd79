//! Fixed deployment configuration.
//!
//! The original deployment hard-codes one document and one worksheet; the
//! constants live here so every stage reads the same values. Column names
//! are locale-specific and must match the sheet headers exactly.

use std::time::Duration;

/// The spreadsheet document this viewer is pointed at.
pub const SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1dvx7XQDZCp1f60bdoEi6KcUGpvghO3kxdGZJkj_ZSiE";

/// Worksheet (sub-table) holding the per-cluster RAW data.
pub const DEFAULT_WORKSHEET: &str = "클러스터별";

/// Local service-account file, checked before the environment secret.
pub const SERVICE_ACCOUNT_FILE: &str = "credentials.json";

/// Environment variable holding the service-account JSON directly.
pub const SERVICE_ACCOUNT_ENV: &str = "SERVICE_ACCOUNT_JSON";

/// OAuth scopes requested for the service-account grant.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
];

/// Ordered list of columns shown in the table. Missing ones are warned
/// about; the table renders whatever subset exists.
pub const DISPLAY_COLUMNS: &[&str] = &["클러스터", "사번", "이름", "부서명", "누적시간"];

/// Categorical column driving the single-select filter.
pub const CLUSTER_COLUMN: &str = "클러스터";

/// Numeric column that gets coerced and averaged.
pub const HOURS_COLUMN: &str = "누적시간";

/// Filter sentinel meaning "all clusters".
pub const ALL_CLUSTERS: &str = "전체";

/// How long a fetched table is served from cache before refetching.
pub const CACHE_TTL: Duration = Duration::from_secs(300);
