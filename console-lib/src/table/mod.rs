//! Remote data table
//!
//! [`RemoteTable`] keeps the pagination, ordering and search state of a
//! server-side paginated listing and fetches the matching page through a
//! [`Loader`] whenever that state changes. Pages are cached under their
//! [`QueryKey`], so going back to a page shows it right away while it is
//! fetched again. While a new page loads and has nothing cached, the
//! previous page stays on screen.
//!
//! The table never spawns. Fetches are futures it owns; a front end calls
//! [`RemoteTable::next_event`] (or [`RemoteTable::settle`]) to drive them and
//! the search debounce, and [`RemoteTable::view`] to draw.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use console_lib::api::{FnLoader, query::PageResult};
//! use console_lib::model::Record;
//! use console_lib::table::{Column, RemoteTable};
//!
//! # async fn example() {
//! let loader = FnLoader::new(|_params| async { Ok(PageResult::<Record>::default()) });
//! let mut table = RemoteTable::builder(Arc::new(loader))
//!     .column(Column::new("Name", "name"))
//!     .search(true)
//!     .build();
//!
//! table.settle().await;
//! table.toggle_sort("name");
//! table.settle().await;
//! println!("{}", table.view().footer.page_label());
//! # }
//! ```

mod actions;
mod column;
mod delete;
pub mod presets;
mod render;
mod state;

pub use actions::*;
pub use column::*;
pub use delete::*;
pub use render::*;
pub use state::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use log::debug;
use log::warn;
use tokio::time::Instant;

use crate::api::Loader;
use crate::api::query::PageResult;
use crate::api::query::PageSize;
use crate::api::query::SortSpec;
use crate::cache::CacheConfig;
use crate::cache::QueryCache;
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::debounce::Debounced;
use crate::error::Error;
use crate::error::TableError;
use crate::model::Row;

/// Behavior switches of a [`RemoteTable`].
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Show a search box and send its debounced contents as `query`.
    pub search_enabled: bool,
    /// Offer a delete action per row.
    pub delete_visible: bool,
    /// Offer an edit action per row.
    pub edit_visible: bool,
    /// Order used initially and after a sort cycle ends.
    pub default_sort: SortSpec,
    pub initial_page_size: PageSize,
    pub search_debounce: Duration,
    /// Go back to the first page when ordering, page size or search change.
    pub reset_page_on_change: bool,
    pub cache: CacheConfig,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            search_enabled: false,
            delete_visible: false,
            edit_visible: false,
            default_sort: SortSpec::default(),
            initial_page_size: PageSize::default(),
            search_debounce: DEFAULT_DEBOUNCE,
            reset_page_on_change: true,
            cache: CacheConfig::default(),
        }
    }
}

/// Something that happened while driving a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A page arrived and was cached. `current` tells whether it is the page
    /// now on screen.
    Loaded { key: QueryKey, current: bool },
    /// A fetch failed.
    Failed { key: QueryKey, current: bool },
    /// A response lost to a newer request for the same key and was dropped.
    Superseded { key: QueryKey },
    /// The search box contents were committed.
    SearchCommitted(String),
}

struct Completed<R> {
    key: QueryKey,
    seq: u64,
    result: Result<PageResult<R>, Error>,
}

enum Wake<R> {
    Fetched(Completed<R>),
    SearchDue,
}

/// A paginated, sortable, searchable listing backed by a [`Loader`].
pub struct RemoteTable<R: Row> {
    columns: Vec<Column<R>>,
    loader: Arc<dyn Loader<R>>,
    actions: Arc<dyn RowActions<R>>,
    options: TableOptions,
    state: QueryState,
    search: Debounced<String>,
    cache: QueryCache<QueryKey, PageResult<R>>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completed<R>>>,
    /// Newest outstanding request per key.
    pending: HashMap<QueryKey, u64>,
    next_seq: u64,
    shown: Option<(QueryKey, Arc<PageResult<R>>)>,
    last_error: Option<Arc<Error>>,
    delete: DeleteFlow,
    deleting: bool,
}

impl<R: Row> RemoteTable<R> {
    pub fn builder(loader: Arc<dyn Loader<R>>) -> RemoteTableBuilder<R> {
        RemoteTableBuilder::new(loader)
    }

    /// Creates the table and issues the fetch for its initial state.
    pub fn new(
        columns: Vec<Column<R>>,
        loader: Arc<dyn Loader<R>>,
        actions: Arc<dyn RowActions<R>>,
        options: TableOptions,
    ) -> Self {
        let mut state = QueryState::new(options.default_sort.clone());
        state.page_size = options.initial_page_size;
        let mut table = Self {
            columns,
            loader,
            actions,
            search: Debounced::with_delay(String::new(), options.search_debounce),
            cache: QueryCache::new(options.cache.clone()),
            options,
            state,
            in_flight: FuturesUnordered::new(),
            pending: HashMap::new(),
            next_seq: 0,
            shown: None,
            last_error: None,
            delete: DeleteFlow::default(),
            deleting: false,
        };
        table.fetch(table.current_key());
        table
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn current_key(&self) -> QueryKey {
        self.state.key(self.options.search_enabled)
    }

    // Data

    /// Rows on screen. Empty until the first page arrives.
    pub fn rows(&self) -> &[R] {
        self.shown
            .as_ref()
            .map(|(_, page)| page.results())
            .unwrap_or_default()
    }

    pub fn row(&self, index: usize) -> Option<&R> {
        self.rows().get(index)
    }

    pub fn page(&self) -> Option<&PageResult<R>> {
        self.shown.as_ref().map(|(_, page)| page.as_ref())
    }

    /// Page of the current query, `None` while a placeholder is shown.
    fn current_page(&self) -> Option<&PageResult<R>> {
        if self.is_placeholder() {
            return None;
        }
        self.page()
    }

    /// Total number of pages of the current query, unknown until its page
    /// arrives.
    pub fn page_count(&self) -> Option<u32> {
        self.current_page().and_then(PageResult::total_pages)
    }

    pub fn total_results(&self) -> Option<u64> {
        self.current_page().map(PageResult::total_results)
    }

    /// Whether the rows on screen belong to an earlier query.
    pub fn is_placeholder(&self) -> bool {
        match &self.shown {
            Some((key, _)) => *key != self.current_key(),
            None => false,
        }
    }

    /// Whether the current query is being fetched.
    pub fn is_fetching(&self) -> bool {
        self.pending.contains_key(&self.current_key())
    }

    /// Whether any fetch or search commit is outstanding.
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty() || self.search.is_pending()
    }

    /// Failure of the most recent fetch of the current query.
    pub fn last_error(&self) -> Option<&Arc<Error>> {
        self.last_error.as_ref()
    }

    // Pagination

    pub fn can_previous_page(&self) -> bool {
        self.state.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        match self.page_count() {
            Some(count) => self.state.page_index.saturating_add(1) < count,
            None => false,
        }
    }

    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.set_page_index(self.state.page_index - 1);
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.set_page_index(self.state.page_index + 1);
        }
    }

    pub fn last_page(&mut self) {
        if let Some(count) = self.page_count().filter(|count| *count > 0) {
            self.set_page_index(count - 1);
        }
    }

    /// Moves to a page, clamped to the last known page.
    pub fn set_page_index(&mut self, index: u32) {
        let index = match self.page_count() {
            Some(count) => index.min(count.saturating_sub(1)),
            None => index,
        };
        self.update(|state| state.page_index = index);
    }

    /// Moves to the page a user typed (1-based).
    pub fn jump_to_page(&mut self, input: &str) {
        self.set_page_index(parse_page_input(input));
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        let reset = self.options.reset_page_on_change;
        self.update(|state| {
            if state.page_size != size {
                state.page_size = size;
                if reset {
                    state.page_index = 0;
                }
            }
        });
    }

    // Sorting

    /// Advances the sort cycle of a column header: descending, ascending,
    /// then back to the default order.
    pub fn toggle_sort(&mut self, column: &str) {
        let sort = self.state.sort.toggled(column, &self.options.default_sort);
        self.set_sort(sort);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        let reset = self.options.reset_page_on_change;
        self.update(|state| {
            if state.sort != sort {
                state.sort = sort;
                if reset {
                    state.page_index = 0;
                }
            }
        });
    }

    // Search

    /// Current contents of the search box.
    pub fn search_input(&self) -> &str {
        self.search.value()
    }

    /// Updates the search box. The query changes once typing pauses.
    pub fn set_search(&mut self, text: impl Into<String>) {
        if !self.options.search_enabled {
            debug!("ignoring search input on a table without search");
            return;
        }
        self.search.set(text.into());
    }

    /// Commits the search box if its debounce delay has passed.
    pub fn tick(&mut self) -> Option<TableEvent> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<TableEvent> {
        if !self.search.poll_at(now) {
            return None;
        }
        let term = self.search.debounced().clone();
        let reset = self.options.reset_page_on_change;
        self.update(|state| {
            state.search = term.clone();
            if reset {
                state.page_index = 0;
            }
        });
        Some(TableEvent::SearchCommitted(term))
    }

    // Fetching

    /// Fetches the current query again, superseding any request for it that
    /// is still running.
    pub fn refetch(&mut self) {
        self.fetch(self.current_key());
    }

    /// Waits for the next fetch to finish or the search to commit.
    ///
    /// Returns `None` once nothing is outstanding.
    pub async fn next_event(&mut self) -> Option<TableEvent> {
        loop {
            let deadline = self.search.deadline();
            if self.in_flight.is_empty() && deadline.is_none() {
                return None;
            }
            let has_fetches = !self.in_flight.is_empty();
            let wake_at = deadline.unwrap_or_else(Instant::now);

            let wake = tokio::select! {
                Some(done) = self.in_flight.next(), if has_fetches => Wake::Fetched(done),
                _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => Wake::SearchDue,
            };

            match wake {
                Wake::Fetched(done) => return Some(self.complete(done)),
                Wake::SearchDue => {
                    if let Some(event) = self.tick_at(wake_at) {
                        return Some(event);
                    }
                }
            }
        }
    }

    /// Drives the table until nothing is outstanding and returns what
    /// happened on the way.
    pub async fn settle(&mut self) -> Vec<TableEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    fn update(&mut self, change: impl FnOnce(&mut QueryState)) {
        let before = self.current_key();
        change(&mut self.state);
        let key = self.current_key();
        if key == before {
            return;
        }

        self.last_error = None;
        if let Some(page) = self.cache.get(&key) {
            debug!("showing cached page for {key:?}");
            self.shown = Some((key.clone(), page));
        }
        if self.pending.contains_key(&key) {
            debug!("fetch for {key:?} already running");
            return;
        }
        self.fetch(key);
    }

    fn fetch(&mut self, key: QueryKey) {
        self.next_seq += 1;
        let seq = self.next_seq;
        let params = key.params();
        debug!(
            "fetching page {} (limit {}, sort {}, query {:?})",
            params.page, params.limit, params.sort_by, params.query
        );

        self.pending.insert(key.clone(), seq);
        let loader = Arc::clone(&self.loader);
        self.in_flight.push(
            async move {
                let result = loader.load(params).await;
                Completed { key, seq, result }
            }
            .boxed(),
        );
    }

    fn complete(&mut self, done: Completed<R>) -> TableEvent {
        let Completed { key, seq, result } = done;
        if self.pending.get(&key) != Some(&seq) {
            debug!("dropping superseded response for {key:?}");
            return TableEvent::Superseded { key };
        }
        self.pending.remove(&key);

        let current = key == self.current_key();
        match result {
            Ok(page) => {
                if let Some(page) = self.cache.insert(key.clone(), page, seq) {
                    if current {
                        self.shown = Some((key.clone(), page));
                        self.last_error = None;
                    }
                }
                self.cache.gc(Some(&self.current_key()));
                TableEvent::Loaded { key, current }
            }
            Err(err) => {
                warn!("fetch for {key:?} failed: {err}");
                if current {
                    self.last_error = Some(Arc::new(err));
                }
                TableEvent::Failed { key, current }
            }
        }
    }

    // Row actions

    /// Activates a row on screen. Returns `false` if there is no such row.
    pub fn click_row(&self, index: usize) -> bool {
        match self.row(index) {
            Some(row) => {
                self.actions.on_row(row);
                true
            }
            None => false,
        }
    }

    /// Runs the edit action of a row, if the table offers editing.
    pub fn edit_row(&self, index: usize) -> bool {
        if !self.options.edit_visible {
            return false;
        }
        match self.row(index) {
            Some(row) => {
                self.actions.on_edit(row);
                true
            }
            None => false,
        }
    }

    // Delete

    pub fn delete_phase(&self) -> DeletePhase {
        self.delete.phase()
    }

    /// Opens the delete confirmation for a row on screen. Rows without an
    /// id cannot be deleted.
    pub fn request_delete(&mut self, index: usize) -> bool {
        if !self.options.delete_visible {
            return false;
        }
        match self.row(index).map(Row::row_id) {
            Some(id) if !id.is_empty() => {
                self.delete.request(id);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Deletes the row waiting for confirmation.
    ///
    /// On success the dialog closes and the current page is fetched again.
    /// On failure the dialog stays open on the same row and the error is
    /// returned. If the row is no longer on screen the dialog closes with
    /// [`TableError::DeleteTargetMissing`].
    pub async fn confirm_delete(&mut self) -> Result<(), Error> {
        let id = self
            .delete
            .target()
            .cloned()
            .ok_or(TableError::NoDeleteTarget)?;
        let Some(row) = self.rows().iter().find(|row| row.row_id() == id).cloned() else {
            self.delete.abandon();
            return Err(TableError::DeleteTargetMissing(id).into());
        };

        self.delete.begin();
        let actions = Arc::clone(&self.actions);
        match actions.on_delete(&row).await {
            Ok(()) => {
                self.delete.succeed();
                self.refetch();
                Ok(())
            }
            Err(err) => {
                warn!("delete of {id} failed: {err}");
                self.delete.fail();
                Err(err)
            }
        }
    }

    /// Caller-owned loading flag of the confirm button.
    pub fn set_deleting(&mut self, deleting: bool) {
        self.deleting = deleting;
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting || matches!(self.delete.phase(), DeletePhase::Deleting(_))
    }
}

/// Builder for [`RemoteTable`].
pub struct RemoteTableBuilder<R: Row> {
    loader: Arc<dyn Loader<R>>,
    columns: Vec<Column<R>>,
    actions: Arc<dyn RowActions<R>>,
    options: TableOptions,
}

impl<R: Row> RemoteTableBuilder<R> {
    pub fn new(loader: Arc<dyn Loader<R>>) -> Self {
        Self {
            loader,
            columns: Vec::new(),
            actions: Arc::new(NoActions),
            options: TableOptions::default(),
        }
    }

    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column<R>>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn actions(mut self, actions: Arc<dyn RowActions<R>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn search(mut self, enabled: bool) -> Self {
        self.options.search_enabled = enabled;
        self
    }

    pub fn delete_visible(mut self, visible: bool) -> Self {
        self.options.delete_visible = visible;
        self
    }

    pub fn edit_visible(mut self, visible: bool) -> Self {
        self.options.edit_visible = visible;
        self
    }

    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.options.default_sort = sort;
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.options.initial_page_size = size;
        self
    }

    pub fn search_debounce(mut self, delay: Duration) -> Self {
        self.options.search_debounce = delay;
        self
    }

    pub fn reset_page_on_change(mut self, reset: bool) -> Self {
        self.options.reset_page_on_change = reset;
        self
    }

    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.options.cache = cache;
        self
    }

    /// Builds the table and issues its first fetch.
    pub fn build(self) -> RemoteTable<R> {
        RemoteTable::new(self.columns, self.loader, self.actions, self.options)
    }
}
