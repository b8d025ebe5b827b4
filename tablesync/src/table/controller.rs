//! The table state controller.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::codec::{
    FilterValue, PageState, SortKey, decode_filter_value, decode_pagination, decode_sort,
    encode_filter_value, encode_pagination, encode_sort,
};
use crate::commit::{CommitBatch, CommitPipeline, Debouncer, SchedulerConfig};
use crate::store::{QueryParamStore, WriteOptions};

use super::callbacks::TableCallbacks;
use super::column::{ColumnSpec, FilterMode, SyntheticColumn, augment_columns};
use super::slice::{Slice, Update};

/// Query key for the 1-based page number.
pub(crate) const PAGE_KEY: &str = "page";
/// Query key for the page size.
pub(crate) const PER_PAGE_KEY: &str = "perPage";
/// Query key for the sort token list.
pub(crate) const SORT_KEY: &str = "sort";

const RESERVED_KEYS: [&str; 3] = [PAGE_KEY, PER_PAGE_KEY, SORT_KEY];

/// How column filters are expressed in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSyntax {
    /// One query key per filterable column, decoded independently.
    #[default]
    PerColumn,
    /// Filters are a single composed expression owned by an outer layer;
    /// the per-column codecs and their query keys are not engaged at all.
    Composed,
}

/// Configuration for a [`TableController`].
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    /// Caller-supplied column list (before augmentation).
    pub columns: Vec<ColumnSpec>,
    /// Synthetic columns injected by the augmentation pass.
    pub synthetics: Vec<SyntheticColumn>,
    /// Pagination used when the store holds nothing (or garbage).
    pub default_page: PageState,
    /// Per-column filter keys vs a composed expression.
    pub filter_syntax: FilterSyntax,
    /// Debounce/throttle windows for the commit scheduler.
    pub scheduler: SchedulerConfig,
    /// Pass-through options for every store write.
    pub write_options: WriteOptions,
    /// Optional row-level capabilities for column glue.
    pub callbacks: TableCallbacks,
}

impl TableConfig {
    /// Config with the given columns and default everything else.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Add synthetic columns for the augmentation pass.
    pub fn synthetics(mut self, synthetics: Vec<SyntheticColumn>) -> Self {
        self.synthetics = synthetics;
        self
    }

    /// Set the default pagination.
    pub fn default_page(mut self, default_page: PageState) -> Self {
        self.default_page = default_page;
        self
    }

    /// Set the filter syntax mode.
    pub fn filter_syntax(mut self, filter_syntax: FilterSyntax) -> Self {
        self.filter_syntax = filter_syntax;
        self
    }

    /// Set the scheduler windows.
    pub fn scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Set the store write options.
    pub fn write_options(mut self, write_options: WriteOptions) -> Self {
        self.write_options = write_options;
        self
    }

    /// Wire row-level capabilities.
    pub fn callbacks(mut self, callbacks: TableCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}

/// Orchestrates pagination, sorting, and column filters for one table.
///
/// Each slice exposes a `(get, set)` pair where the setter accepts either
/// a plain value or a pure updater via [`Update`]. Sorting and pagination
/// commit immediately; filters commit through the debouncer, and every
/// filter commit carries a reset to the first page in the same batch.
///
/// The controller owns its scheduler tasks; call [`dispose`] when the
/// owning table goes away so no pending commit outlives it.
///
/// [`dispose`]: TableController::dispose
pub struct TableController {
    columns: Vec<ColumnSpec>,
    sortable_ids: HashSet<String>,
    filter_modes: HashMap<String, FilterMode>,
    filter_syntax: FilterSyntax,
    default_page: PageState,
    callbacks: TableCallbacks,
    scheduler: SchedulerConfig,
    store: Arc<dyn QueryParamStore>,
    pipeline: CommitPipeline,
    debouncers: Mutex<HashMap<String, Debouncer<CommitBatch>>>,
    pagination: Slice<PageState>,
    sort: Slice<Vec<SortKey>>,
    filters: Slice<HashMap<String, FilterValue>>,
    disposed: AtomicBool,
}

impl TableController {
    /// Build a controller over the given store.
    ///
    /// Runs the column augmentation pass, then seeds every slice with the
    /// configured defaults merged under whatever the store already holds.
    /// Must be called inside a tokio runtime (the scheduler tasks are
    /// spawned here).
    pub fn new(config: TableConfig, store: Arc<dyn QueryParamStore>) -> Self {
        let columns = augment_columns(config.columns, &config.synthetics);
        debug_assert!(
            !columns
                .iter()
                .any(|column| RESERVED_KEYS.contains(&column.id.as_str())),
            "column ids must not collide with reserved query keys"
        );

        let sortable_ids: HashSet<String> = columns
            .iter()
            .filter(|column| column.sortable)
            .map(|column| column.id.clone())
            .collect();
        let filter_modes: HashMap<String, FilterMode> = columns
            .iter()
            .filter(|column| !RESERVED_KEYS.contains(&column.id.as_str()))
            .filter_map(|column| {
                column
                    .filter
                    .clone()
                    .map(|mode| (column.id.clone(), mode))
            })
            .collect();

        let pagination = decode_pagination(
            store.read(PAGE_KEY).as_deref(),
            store.read(PER_PAGE_KEY).as_deref(),
            config.default_page,
        );
        let sort = store
            .read(SORT_KEY)
            .map(|raw| decode_sort(&raw, &sortable_ids))
            .unwrap_or_default();
        let filters = decode_filters(&*store, &filter_modes, config.filter_syntax);

        let pipeline = CommitPipeline::spawn(
            Arc::clone(&store),
            config.scheduler.throttle,
            config.write_options,
        );

        Self {
            columns,
            sortable_ids,
            filter_modes,
            filter_syntax: config.filter_syntax,
            default_page: config.default_page,
            callbacks: config.callbacks,
            scheduler: config.scheduler,
            store,
            pipeline,
            debouncers: Mutex::new(HashMap::new()),
            pagination: Slice::new(pagination),
            sort: Slice::new(sort),
            filters: Slice::new(filters),
            disposed: AtomicBool::new(false),
        }
    }

    /// The augmented column list.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// The row-level capabilities wired by the host.
    pub fn callbacks(&self) -> &TableCallbacks {
        &self.callbacks
    }

    /// The active filter syntax mode.
    pub fn filter_syntax(&self) -> FilterSyntax {
        self.filter_syntax
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current pagination state.
    pub fn pagination(&self) -> PageState {
        self.pagination.get()
    }

    /// Update pagination and commit immediately (a page click is a
    /// discrete action, not continuous input).
    pub fn set_pagination(&self, update: impl Into<Update<PageState>>) {
        if self.is_disposed() {
            return;
        }
        let update = update.into();
        let next = self.pagination.apply(Update::with(move |previous: &PageState| {
            let next = update.apply(previous);
            PageState::new(next.page_index, next.page_size)
        }));
        let (page, per_page) = encode_pagination(&next);
        self.pipeline.commit(vec![
            (PAGE_KEY.to_string(), Some(page)),
            (PER_PAGE_KEY.to_string(), Some(per_page)),
        ]);
    }

    /// Clamp the page index when the visible collection changes size, so
    /// a shrunken result set cannot leave the table past its last page.
    pub fn on_collection_changed(&self, total_rows: usize) {
        let current = self.pagination.get();
        let last_page = if total_rows == 0 {
            0
        } else {
            (total_rows - 1) / current.page_size
        };
        if current.page_index > last_page {
            self.set_pagination(Update::with(move |previous: &PageState| PageState {
                page_index: last_page,
                ..*previous
            }));
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Current sort list, primary key first.
    pub fn sort_state(&self) -> Vec<SortKey> {
        self.sort.get()
    }

    /// Replace the sort list and commit immediately.
    ///
    /// Keys referencing unknown or unsortable columns are dropped
    /// silently, matching the decode-side tolerance.
    pub fn set_sort(&self, update: impl Into<Update<Vec<SortKey>>>) {
        if self.is_disposed() {
            return;
        }
        let update = update.into();
        let sortable_ids = self.sortable_ids.clone();
        let next = self.sort.apply(Update::with(move |previous: &Vec<SortKey>| {
            let mut next = update.apply(previous);
            next.retain(|key| sortable_ids.contains(&key.column));
            next
        }));
        let encoded = encode_sort(&next);
        let value = (!encoded.is_empty()).then_some(encoded);
        self.pipeline.commit(vec![(SORT_KEY.to_string(), value)]);
    }

    /// Single-column sort interaction: a new column sorts ascending, the
    /// current primary column flips direction.
    pub fn toggle_sort(&self, column: &str) {
        if !self.sortable_ids.contains(column) {
            log::debug!("ignoring sort toggle for non-sortable column '{}'", column);
            return;
        }
        let column = column.to_string();
        self.set_sort(Update::with(move |previous: &Vec<SortKey>| {
            match previous.first() {
                Some(primary) if primary.column == column => vec![SortKey {
                    column,
                    direction: primary.direction.toggled(),
                }],
                _ => vec![SortKey::asc(column)],
            }
        }));
    }

    // -------------------------------------------------------------------------
    // Column filters
    // -------------------------------------------------------------------------

    /// Current filter value for a column.
    pub fn filter(&self, column: &str) -> Option<FilterValue> {
        self.filters.get().get(column).cloned()
    }

    /// All current filter values.
    pub fn filters(&self) -> HashMap<String, FilterValue> {
        self.filters.get()
    }

    /// Update a column filter.
    ///
    /// The in-memory slice changes right away; persistence goes through
    /// the debouncer so typing coalesces into one commit, and that commit
    /// always carries a reset to the first page. An empty value clears
    /// the filter (its key is removed, never written empty). In
    /// [`FilterSyntax::Composed`] mode nothing is persisted per column.
    pub fn set_filter(&self, column: &str, update: impl Into<Update<Option<FilterValue>>>) {
        if self.is_disposed() {
            return;
        }
        if !self.filter_modes.contains_key(column) {
            log::debug!("ignoring filter for non-filterable column '{}'", column);
            return;
        }
        let update = update.into();
        let next = self.filters.apply({
            let column = column.to_string();
            Update::with(move |previous: &HashMap<String, FilterValue>| {
                let mut filters = previous.clone();
                let current = filters.get(&column).cloned();
                match update.apply(&current).filter(|value| !value.is_empty()) {
                    Some(value) => filters.insert(column, value),
                    None => filters.remove(&column),
                };
                filters
            })
        });
        if self.filter_syntax == FilterSyntax::Composed {
            return;
        }

        let token = next.get(column).and_then(encode_filter_value);
        let batch = vec![
            (column.to_string(), token),
            (PAGE_KEY.to_string(), Some("1".to_string())),
        ];
        self.submit_debounced(column, batch);
    }

    /// Route a batch through the column's debouncer, spawning it lazily
    /// on first use (and after `cancel_pending` dropped the previous one).
    fn submit_debounced(&self, column: &str, batch: CommitBatch) {
        let mut debouncers = self
            .debouncers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        debouncers
            .entry(column.to_string())
            .or_insert_with(|| {
                let handle = self.pipeline.handle();
                let pagination = self.pagination.clone();
                Debouncer::spawn(self.scheduler.debounce, move |batch: CommitBatch| {
                    pagination
                        .apply(Update::with(|previous: &PageState| previous.first_page()));
                    handle.commit(batch);
                })
            })
            .submit(batch);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Re-decode the store into the slices, e.g. after the host navigated
    /// back or forward. Absent or malformed values fall back to the
    /// configured defaults.
    pub fn rehydrate(&self) {
        let pagination = decode_pagination(
            self.store.read(PAGE_KEY).as_deref(),
            self.store.read(PER_PAGE_KEY).as_deref(),
            self.default_page,
        );
        let sort = self
            .store
            .read(SORT_KEY)
            .map(|raw| decode_sort(&raw, &self.sortable_ids))
            .unwrap_or_default();
        let filters = decode_filters(&*self.store, &self.filter_modes, self.filter_syntax);
        self.pagination.apply(Update::set(pagination));
        self.sort.apply(Update::set(sort));
        self.filters.apply(Update::set(filters));
    }

    /// Discard pending debounced commits without tearing the controller
    /// down. The UI calls this when the row modal opens or closes so a
    /// half-typed filter cannot land underneath it.
    pub fn cancel_pending(&self) {
        let debouncers = {
            let mut guard = self
                .debouncers
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *guard)
        };
        for debouncer in debouncers.into_values() {
            debouncer.cancel();
        }
    }

    /// Tear down the scheduler. No commit fires after this returns; the
    /// setters become no-ops.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.cancel_pending();
        self.pipeline.shutdown();
    }

    /// Whether [`dispose`](TableController::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

fn decode_filters(
    store: &dyn QueryParamStore,
    filter_modes: &HashMap<String, FilterMode>,
    filter_syntax: FilterSyntax,
) -> HashMap<String, FilterValue> {
    if filter_syntax == FilterSyntax::Composed {
        return HashMap::new();
    }
    filter_modes
        .iter()
        .filter_map(|(column, mode)| {
            decode_filter_value(store.read(column).as_deref(), mode.is_list())
                .map(|value| (column.clone(), value))
        })
        .collect()
}
