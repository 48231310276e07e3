use std::cmp::Ordering;
use std::fmt;

use super::filter::AmountField;
use super::model::FinancialRecord;

/// Column the table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Revenue,
    NetIncome,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Revenue, SortKey::NetIncome];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Date => write!(f, "Date"),
            SortKey::Revenue => write!(f, "Revenue"),
            SortKey::NetIncome => write!(f, "Net Income"),
        }
    }
}

/// Order two optional keys. Present keys follow `ascending`; a missing key
/// (unparseable field) goes after every present key in both directions.
fn compare_keys<K: Ord>(a: Option<K>, b: Option<K>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if ascending => a.cmp(&b),
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Return a new sequence ordered by `key`.
///
/// The sort is stable: records with equal keys keep their input order.
pub fn sort_records(
    records: &[FinancialRecord],
    key: SortKey,
    ascending: bool,
) -> Vec<FinancialRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Date => {
            sorted.sort_by(|a, b| compare_keys(a.parsed_date(), b.parsed_date(), ascending))
        }
        SortKey::Revenue => sorted.sort_by(|a, b| {
            compare_keys(
                AmountField::Revenue.value_of(a),
                AmountField::Revenue.value_of(b),
                ascending,
            )
        }),
        SortKey::NetIncome => sorted.sort_by(|a, b| {
            compare_keys(
                AmountField::NetIncome.value_of(a),
                AmountField::NetIncome.value_of(b),
                ascending,
            )
        }),
    }
    sorted
}
