pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

use tracing::{debug, info};
use uuid::Uuid;

use errors::CoreError;
use models::{
    expense::Expense,
    ledger::Ledger,
    settings::Settings,
    summary::Summary,
    view::{DeleteHandle, ListView, RenderedViews, SummaryView},
};
use services::{
    ledger_service::LedgerService, render_service::RenderService,
    summary_service::SummaryService,
};
use storage::{manager::StorageManager, traits::KeyValueStore};

/// Receives freshly rendered views after every change to the ledger.
///
/// Hosts implement this to redraw whatever surface they own (terminal,
/// DOM, GUI widget).
pub trait ViewSink {
    fn refresh(&mut self, list: &ListView, summary: &SummaryView);
}

impl<F> ViewSink for F
where
    F: FnMut(&ListView, &SummaryView),
{
    fn refresh(&mut self, list: &ListView, summary: &SummaryView) {
        self(list, summary)
    }
}

/// Main entry point for the Expense Tracker core library.
/// Owns the ledger, the durable store it is mirrored to, and the views
/// derived from it.
#[must_use]
pub struct ExpenseTracker<S: KeyValueStore> {
    ledger: Ledger,
    store: S,
    settings: Settings,
    ledger_service: LedgerService,
    summary_service: SummaryService,
    render_service: RenderService,
    views: RenderedViews,
    sinks: Vec<Box<dyn ViewSink>>,
}

impl<S: KeyValueStore> std::fmt::Debug for ExpenseTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("expenses", &self.ledger.len())
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl<S: KeyValueStore> ExpenseTracker<S> {
    /// Load the ledger from `store` (empty if nothing usable is stored)
    /// and render the initial views.
    pub fn open(store: S, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let ledger = StorageManager::load_ledger(&store, &settings.storage_key)?;
        info!(
            store = store.name(),
            key = %settings.storage_key,
            expenses = ledger.len(),
            "ledger loaded"
        );
        Ok(Self::build(ledger, store, settings))
    }

    /// Open with default settings.
    pub fn open_default(store: S) -> Result<Self, CoreError> {
        Self::open(store, Settings::default())
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Record a new expense at the end of the ledger.
    ///
    /// Rejected input leaves both the ledger and the store untouched.
    pub fn add(
        &mut self,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<Uuid, CoreError> {
        let expense = self
            .ledger_service
            .create_expense(amount, category, description)?;
        let id = expense.id;

        let mut next = self.ledger.clone();
        self.ledger_service.add(&mut next, expense)?;
        self.commit(next)?;

        info!(%id, amount, category = category.trim(), expenses = self.ledger.len(), "expense added");
        Ok(id)
    }

    /// Record a new expense from form text; the amount is parsed first.
    pub fn submit(
        &mut self,
        amount_text: &str,
        category: &str,
        description: &str,
    ) -> Result<Uuid, CoreError> {
        let amount = self.ledger_service.parse_amount(amount_text)?;
        self.add(amount, category, description)
    }

    /// Delete the expense at `index` (0-based, as last rendered).
    /// Returns `Ok(None)` without persisting when `index` is out of range.
    pub fn delete(&mut self, index: usize) -> Result<Option<Expense>, CoreError> {
        let mut next = self.ledger.clone();
        let Some(removed) = self.ledger_service.delete(&mut next, index) else {
            debug!(index, expenses = self.ledger.len(), "delete ignored, index out of range");
            return Ok(None);
        };
        self.commit(next)?;

        info!(index, id = %removed.id, expenses = self.ledger.len(), "expense deleted");
        Ok(Some(removed))
    }

    /// Delete the expense with the given id.
    pub fn delete_by_id(&mut self, id: Uuid) -> Result<Option<Expense>, CoreError> {
        match self.ledger.position_of(id) {
            Some(index) => self.delete(index),
            None => {
                debug!(%id, "delete ignored, unknown id");
                Ok(None)
            }
        }
    }

    /// Delete through a rendered affordance. Stale handles are a no-op.
    pub fn delete_handle(&mut self, handle: DeleteHandle) -> Result<Option<Expense>, CoreError> {
        let mut next = self.ledger.clone();
        let Some(removed) = self.ledger_service.delete_handle(&mut next, handle) else {
            debug!(index = handle.index, id = %handle.id, "delete ignored, stale handle");
            return Ok(None);
        };
        self.commit(next)?;

        info!(index = handle.index, id = %removed.id, expenses = self.ledger.len(), "expense deleted");
        Ok(Some(removed))
    }

    /// Re-read the ledger from the store, discarding in-memory state.
    /// Another writer to the same store always wins here.
    pub fn reload(&mut self) -> Result<(), CoreError> {
        self.ledger = StorageManager::load_ledger(&self.store, &self.settings.storage_key)?;
        info!(expenses = self.ledger.len(), "ledger reloaded");
        self.refresh_views();
        Ok(())
    }

    /// Register a view sink, refreshed after every subsequent mutation or
    /// reload. The views current at subscription time are in `views()`.
    pub fn subscribe(&mut self, sink: Box<dyn ViewSink>) {
        self.sinks.push(sink);
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Total and per-category totals of the current ledger.
    #[must_use]
    pub fn compute_summary(&self) -> Summary {
        self.summary_service.compute_summary(&self.ledger)
    }

    /// Render the expense list from the current ledger.
    #[must_use]
    pub fn render_list(&self) -> ListView {
        self.render_service.render_list(&self.settings, &self.ledger)
    }

    /// Render the summary panel from the current ledger.
    #[must_use]
    pub fn render_summary(&self) -> SummaryView {
        self.render_service
            .render_summary(&self.settings, &self.compute_summary())
    }

    /// The views produced by the last load or mutation.
    #[must_use]
    pub fn views(&self) -> &RenderedViews {
        &self.views
    }

    /// Format an amount the way the views do.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        self.render_service.format_amount(&self.settings, amount)
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        self.ledger.expenses()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.ledger.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to reopen it later.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Persist `next` and only then make it the current ledger, so a
    /// failed write leaves memory and store as they were.
    fn commit(&mut self, next: Ledger) -> Result<(), CoreError> {
        StorageManager::save_ledger(&mut self.store, &self.settings.storage_key, &next)?;
        self.ledger = next;
        self.refresh_views();
        Ok(())
    }

    fn refresh_views(&mut self) {
        self.views = self.render_views();
        for sink in &mut self.sinks {
            sink.refresh(&self.views.list, &self.views.summary);
        }
        debug!(sinks = self.sinks.len(), expenses = self.ledger.len(), "views rendered");
    }

    fn render_views(&self) -> RenderedViews {
        RenderedViews {
            list: self.render_list(),
            summary: self.render_summary(),
        }
    }

    fn build(ledger: Ledger, store: S, settings: Settings) -> Self {
        let ledger_service = LedgerService::new();
        let summary_service = SummaryService::new();
        let render_service = RenderService::new();
        let views = RenderedViews {
            list: render_service.render_list(&settings, &ledger),
            summary: render_service
                .render_summary(&settings, &summary_service.compute_summary(&ledger)),
        };

        Self {
            ledger,
            store,
            settings,
            ledger_service,
            summary_service,
            render_service,
            views,
            sinks: Vec::new(),
        }
    }
}
