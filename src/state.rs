use crate::data::filter::{
    AmountField, FilterInputs, apply_filters, filter_by_amount, filter_by_date,
};
use crate::data::model::FinancialRecord;
use crate::data::sort::{SortKey, sort_records};
use crate::data::store::DatasetStore;
use crate::error::{FilterError, FilterKind};

// ---------------------------------------------------------------------------
// Change notification
// ---------------------------------------------------------------------------

/// What replaced the working dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Loaded,
    Filtered,
    Sorted { key: SortKey, ascending: bool },
    Reset,
}

/// Published every time `working` is reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingChanged {
    pub cause: ChangeCause,
    pub rows: usize,
}

type Listener = Box<dyn FnMut(&WorkingChanged)>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the startup fetch stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Pending,
    Loaded,
    Failed(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Original and working datasets.
    pub store: DatasetStore,

    /// The six filter text fields.
    pub inputs: FilterInputs,

    /// Blocking validation notice; the UI shows it until dismissed.
    pub notice: Option<String>,

    pub fetch: FetchStatus,

    listeners: Vec<Listener>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: DatasetStore::default(),
            inputs: FilterInputs::default(),
            notice: None,
            fetch: FetchStatus::Pending,
            listeners: Vec::new(),
        }
    }
}

impl AppState {
    /// Register a callback for every working-dataset change.
    pub fn subscribe(&mut self, listener: impl FnMut(&WorkingChanged) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn publish(&mut self, cause: ChangeCause) {
        let event = WorkingChanged {
            cause,
            rows: self.store.working().len(),
        };
        log::debug!("Working dataset changed: {event:?}");
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Currently displayed records.
    pub fn working(&self) -> &[FinancialRecord] {
        self.store.working()
    }

    /// Ingest the outcome of the startup fetch.
    ///
    /// A failure is logged and leaves both datasets empty.
    pub fn finish_fetch(&mut self, result: anyhow::Result<Vec<FinancialRecord>>) {
        match result {
            Ok(records) => {
                self.store.load(records);
                self.fetch = FetchStatus::Loaded;
                self.publish(ChangeCause::Loaded);
            }
            Err(e) => {
                log::error!("Error fetching data: {e:#}");
                self.fetch = FetchStatus::Failed(format!("{e:#}"));
            }
        }
    }

    /// Run the compound filter pass over the working dataset.
    ///
    /// On a validation error the working dataset is untouched and the error
    /// becomes the blocking notice.
    pub fn apply_filters(&mut self) -> Result<(), FilterError> {
        if self.inputs.is_empty() {
            return Ok(());
        }
        let result = apply_filters(self.store.working(), &self.inputs);
        self.commit_filtered(result)
    }

    /// Run a single filter over the working dataset.
    ///
    /// Unlike [`AppState::apply_filters`], a filter with no bounds is an error.
    pub fn apply_filter(&mut self, kind: FilterKind) -> Result<(), FilterError> {
        let working = self.store.working();
        let inputs = &self.inputs;
        let result = match kind {
            FilterKind::Date => filter_by_date(working, &inputs.start_date, &inputs.end_date),
            FilterKind::Revenue => filter_by_amount(
                working,
                AmountField::Revenue,
                &inputs.min_revenue,
                &inputs.max_revenue,
            ),
            FilterKind::NetIncome => filter_by_amount(
                working,
                AmountField::NetIncome,
                &inputs.min_net_income,
                &inputs.max_net_income,
            ),
        };
        self.commit_filtered(result)
    }

    fn commit_filtered(
        &mut self,
        result: Result<Vec<FinancialRecord>, FilterError>,
    ) -> Result<(), FilterError> {
        match result {
            Ok(filtered) => {
                self.store.replace_working(filtered);
                self.publish(ChangeCause::Filtered);
                Ok(())
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Restore the fetched dataset and clear every filter field.
    pub fn reset(&mut self) {
        self.store.reset();
        self.inputs = FilterInputs::default();
        self.publish(ChangeCause::Reset);
    }

    /// Reorder the working dataset by one column.
    pub fn sort_by(&mut self, key: SortKey, ascending: bool) {
        let sorted = sort_records(self.store.working(), key, ascending);
        self.store.replace_working(sorted);
        self.publish(ChangeCause::Sorted { key, ascending });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
