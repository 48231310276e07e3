use super::model::FinancialRecord;

// ---------------------------------------------------------------------------
// Dataset store: the fetched original plus the displayed working copy
// ---------------------------------------------------------------------------

/// Holds the dataset as fetched (`original`) and as currently displayed
/// (`working`).
///
/// `original` is written once per successful fetch and otherwise read-only.
/// `working` is only ever replaced wholesale, never edited in place, so
/// [`DatasetStore::reset`] can always restore the fetched order exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    original: Vec<FinancialRecord>,
    working: Vec<FinancialRecord>,
}

impl DatasetStore {
    /// Replace both sequences with independent copies of `records`.
    pub fn load(&mut self, records: Vec<FinancialRecord>) {
        self.working = records.clone();
        self.original = records;
    }

    /// Restore `working` to a copy of `original`.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
    }

    pub fn replace_working(&mut self, records: Vec<FinancialRecord>) {
        self.working = records;
    }

    pub fn original(&self) -> &[FinancialRecord] {
        &self.original
    }

    pub fn working(&self) -> &[FinancialRecord] {
        &self.working
    }
}
