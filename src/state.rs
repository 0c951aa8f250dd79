use crate::auth;
use crate::color::ClusterColors;
use crate::config::{CACHE_TTL, CLUSTER_COLUMN, DEFAULT_WORKSHEET, SHEET_URL};
use crate::data::filter::{ClusterFilter, cluster_choices, filtered_indices};
use crate::data::loader::{self, TableCache};
use crate::data::model::RawTable;
use crate::data::sheets::SheetsClient;
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Authorized client, memoized for the process lifetime.
    /// `None` when credential resolution failed.
    pub client: Option<SheetsClient>,

    /// Terminal credential failure, shown instead of any content.
    pub auth_error: Option<ViewerError>,

    /// TTL cache for fetched tables, passed explicitly into the loader.
    pub cache: TableCache,

    /// Last loaded table (possibly empty). `None` before the first load.
    pub table: Option<RawTable>,

    /// Operator-facing message from the last failed load.
    pub load_error: Option<String>,

    /// Current single-choice cluster filter.
    pub filter: ClusterFilter,

    /// Indices of rows passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Colour assignment for the distinct cluster values.
    pub colors: Option<ClusterColors>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            client: None,
            auth_error: None,
            cache: TableCache::new(CACHE_TTL),
            table: None,
            load_error: None,
            filter: ClusterFilter::All,
            visible_indices: Vec::new(),
            colors: None,
        }
    }
}

impl AppState {
    /// Resolve credentials once and run the initial load.
    pub fn new() -> Self {
        let mut state = Self::default();
        match auth::resolve() {
            Ok(client) => state.client = Some(client),
            Err(e) => {
                log::error!("credential resolution failed: {e}");
                state.auth_error = Some(e);
            }
        }
        state.reload();
        state
    }

    /// Fetch (or re-serve from cache) the configured worksheet.
    pub fn reload(&mut self) {
        let result = loader::load(
            self.client.as_ref(),
            &mut self.cache,
            SHEET_URL,
            DEFAULT_WORKSHEET,
        );
        self.apply_load_result(result);
    }

    /// Fold a load outcome into the state: a failure is reported and leaves
    /// an empty table behind so the page degrades instead of crashing.
    fn apply_load_result(&mut self, result: Result<RawTable, ViewerError>) {
        match result {
            Ok(table) => {
                self.load_error = None;
                self.set_table(table);
            }
            Err(e) => {
                log::error!("load failed: {e}");
                self.load_error = Some(e.to_string());
                self.set_table(RawTable::default());
            }
        }
    }

    /// Ingest a loaded table: rebuild colours, drop a filter selection that
    /// no longer exists, recompute visible rows.
    pub fn set_table(&mut self, table: RawTable) {
        self.colors = table
            .unique_values
            .get(CLUSTER_COLUMN)
            .map(ClusterColors::new);

        if let ClusterFilter::Only(v) = &self.filter {
            if !cluster_choices(&table).contains(v) {
                self.filter = ClusterFilter::All;
            }
        }

        self.visible_indices = filtered_indices(&table, &self.filter);
        self.table = Some(table);
    }

    /// Change the filter selection and recompute visible rows.
    pub fn set_filter(&mut self, filter: ClusterFilter) {
        self.filter = filter;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.filter);
        }
    }
}
