use chrono::NaiveDate;

use super::model::{FinancialRecord, parse_date, parse_leading_int};
use crate::error::{FilterError, FilterKind};

// ---------------------------------------------------------------------------
// Filter inputs: the six user-entered bounds
// ---------------------------------------------------------------------------

/// Raw text of the filter inputs, exactly as typed.
/// An empty (or whitespace-only) field means "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub start_date: String,
    pub end_date: String,
    pub min_revenue: String,
    pub max_revenue: String,
    pub min_net_income: String,
    pub max_net_income: String,
}

impl FilterInputs {
    pub fn has_date_bound(&self) -> bool {
        is_set(&self.start_date) || is_set(&self.end_date)
    }

    pub fn has_revenue_bound(&self) -> bool {
        is_set(&self.min_revenue) || is_set(&self.max_revenue)
    }

    pub fn has_net_income_bound(&self) -> bool {
        is_set(&self.min_net_income) || is_set(&self.max_net_income)
    }

    pub fn is_empty(&self) -> bool {
        !self.has_date_bound() && !self.has_revenue_bound() && !self.has_net_income_bound()
    }
}

fn is_set(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Integer field a range filter or sort can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Revenue,
    NetIncome,
}

impl AmountField {
    pub fn value_of(self, record: &FinancialRecord) -> Option<i64> {
        match self {
            AmountField::Revenue => record.revenue(),
            AmountField::NetIncome => record.net_income(),
        }
    }

    fn kind(self) -> FilterKind {
        match self {
            AmountField::Revenue => FilterKind::Revenue,
            AmountField::NetIncome => FilterKind::NetIncome,
        }
    }
}

// ---------------------------------------------------------------------------
// Bound resolution
// ---------------------------------------------------------------------------

fn resolve_date(raw: &str, bound: &'static str) -> Result<Option<NaiveDate>, FilterError> {
    if !is_set(raw) {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| FilterError::InvalidDate {
            bound,
            value: raw.trim().to_string(),
        })
}

/// An amount bound as typed. A non-empty bound with no leading integer
/// (or one out of `i64` range) can never be satisfied.
enum AmountBound {
    Unset,
    Value(i64),
    Unsatisfiable,
}

impl AmountBound {
    fn value_or(self, default: i64) -> i64 {
        match self {
            AmountBound::Value(v) => v,
            _ => default,
        }
    }
}

fn resolve_amount(raw: &str) -> AmountBound {
    if !is_set(raw) {
        return AmountBound::Unset;
    }
    match parse_leading_int(raw) {
        Some(v) => AmountBound::Value(v),
        None => AmountBound::Unsatisfiable,
    }
}

// ---------------------------------------------------------------------------
// Single filters
// ---------------------------------------------------------------------------

/// Keep records whose date lies in `[start, end]` (inclusive, either side
/// optional).
///
/// Errors if both bounds are unset or a provided bound does not parse.
/// Records with an unparseable date are dropped and logged.
pub fn filter_by_date(
    records: &[FinancialRecord],
    start: &str,
    end: &str,
) -> Result<Vec<FinancialRecord>, FilterError> {
    if !is_set(start) && !is_set(end) {
        return Err(FilterError::NoBounds {
            filter: FilterKind::Date,
        });
    }
    let start = resolve_date(start, "start")?;
    let end = resolve_date(end, "end")?;

    Ok(records
        .iter()
        .filter(|rec| {
            let Some(day) = rec.parsed_date() else {
                log::warn!("Invalid date found in statement: {:?}", rec.date);
                return false;
            };
            start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
        })
        .cloned()
        .collect())
}

/// Keep records whose `field` parses as an integer within `[min, max]`.
///
/// An unset min behaves as negative infinity, an unset max as positive
/// infinity. Records whose field does not parse never match, and a bound
/// that does not parse matches nothing.
pub fn filter_by_amount(
    records: &[FinancialRecord],
    field: AmountField,
    min: &str,
    max: &str,
) -> Result<Vec<FinancialRecord>, FilterError> {
    if !is_set(min) && !is_set(max) {
        return Err(FilterError::NoBounds {
            filter: field.kind(),
        });
    }
    let (min, max) = match (resolve_amount(min), resolve_amount(max)) {
        (AmountBound::Unsatisfiable, _) | (_, AmountBound::Unsatisfiable) => {
            log::warn!(
                "Non-numeric {} bound ({min:?}, {max:?}); nothing matches",
                field.kind()
            );
            return Ok(Vec::new());
        }
        (lo, hi) => (lo.value_or(i64::MIN), hi.value_or(i64::MAX)),
    };

    Ok(records
        .iter()
        .filter(|rec| {
            field
                .value_of(rec)
                .is_some_and(|v| (min..=max).contains(&v))
        })
        .cloned()
        .collect())
}

// ---------------------------------------------------------------------------
// Compound apply
// ---------------------------------------------------------------------------

/// Run every filter that has at least one bound, in the order
/// date → revenue → net income, each narrowing the previous result.
///
/// Filters without bounds are skipped. The first validation error aborts
/// the whole pass; the caller keeps its input untouched in that case.
pub fn apply_filters(
    records: &[FinancialRecord],
    inputs: &FilterInputs,
) -> Result<Vec<FinancialRecord>, FilterError> {
    let mut current = records.to_vec();

    if inputs.has_date_bound() {
        current = filter_by_date(&current, &inputs.start_date, &inputs.end_date)?;
    }
    if inputs.has_revenue_bound() {
        current = filter_by_amount(
            &current,
            AmountField::Revenue,
            &inputs.min_revenue,
            &inputs.max_revenue,
        )?;
    }
    if inputs.has_net_income_bound() {
        current = filter_by_amount(
            &current,
            AmountField::NetIncome,
            &inputs.min_net_income,
            &inputs.max_net_income,
        )?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, json};

    fn rec(date: &str, revenue: JsonValue, net_income: JsonValue) -> FinancialRecord {
        FinancialRecord {
            date: date.to_string(),
            revenue,
            net_income,
            gross_profit: json!(0),
            eps: json!(1.0),
            operating_income: json!(0),
        }
    }

    fn dates(records: &[FinancialRecord]) -> Vec<&str> {
        records.iter().map(|r| r.date.as_str()).collect()
    }

    fn sample() -> Vec<FinancialRecord> {
        vec![
            rec("2020-09-26", json!(274515000000_i64), json!(57411000000_i64)),
            rec("2021-09-25", json!("365817000000"), json!(94680000000_i64)),
            rec("garbage", json!(1), json!(1)),
            rec("2022-09-24", json!(null), json!(-5)),
            rec("2023-09-30", json!("n/a"), json!(96995000000_i64)),
            rec("2019-09-28", json!(0), json!(0)),
        ]
    }

    #[test]
    fn date_filter_start_only_keeps_parseable_dates_on_or_after() {
        let out = filter_by_date(&sample(), "2021-09-25", "").unwrap();
        assert_eq!(dates(&out), vec!["2021-09-25", "2022-09-24", "2023-09-30"]);
    }

    #[test]
    fn date_filter_is_inclusive_on_both_ends() {
        let out = filter_by_date(&sample(), "2020-09-26", "2022-09-24").unwrap();
        assert_eq!(dates(&out), vec!["2020-09-26", "2021-09-25", "2022-09-24"]);
    }

    #[test]
    fn date_filter_end_only() {
        let out = filter_by_date(&sample(), "", "2020-12-31").unwrap();
        assert_eq!(dates(&out), vec!["2020-09-26", "2019-09-28"]);
    }

    #[test]
    fn date_filter_rejects_missing_and_invalid_bounds() {
        assert_eq!(
            filter_by_date(&sample(), "", "  "),
            Err(FilterError::NoBounds {
                filter: FilterKind::Date
            })
        );
        assert_eq!(
            filter_by_date(&sample(), "2021-02-30", ""),
            Err(FilterError::InvalidDate {
                bound: "start",
                value: "2021-02-30".into()
            })
        );
    }

    #[test]
    fn revenue_filter_non_negative_excludes_unparseable() {
        let out = filter_by_amount(&sample(), AmountField::Revenue, "0", "").unwrap();
        assert_eq!(
            dates(&out),
            vec!["2020-09-26", "2021-09-25", "garbage", "2019-09-28"]
        );
    }

    #[test]
    fn amount_filter_is_inclusive() {
        let out = filter_by_amount(&sample(), AmountField::NetIncome, "-5", "0").unwrap();
        assert_eq!(dates(&out), vec!["2022-09-24", "2019-09-28"]);
    }

    #[test]
    fn amount_filter_needs_a_bound() {
        assert_eq!(
            filter_by_amount(&sample(), AmountField::Revenue, "", ""),
            Err(FilterError::NoBounds {
                filter: FilterKind::Revenue
            })
        );
    }

    #[test]
    fn non_numeric_bound_matches_nothing() {
        assert_eq!(
            filter_by_amount(&sample(), AmountField::NetIncome, "lots", ""),
            Ok(Vec::new())
        );
        assert_eq!(
            filter_by_amount(&sample(), AmountField::Revenue, "", "100000000000000000000"),
            Ok(Vec::new())
        );
    }

    #[test]
    fn compound_apply_with_non_numeric_bound_empties_result() {
        let inputs = FilterInputs {
            start_date: "2020-01-01".into(),
            max_net_income: "x".into(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &inputs), Ok(Vec::new()));
    }

    #[test]
    fn compound_apply_narrows_in_order() {
        let inputs = FilterInputs {
            start_date: "2020-01-01".into(),
            min_revenue: "300000000000".into(),
            ..Default::default()
        };
        let out = apply_filters(&sample(), &inputs).unwrap();
        assert_eq!(dates(&out), vec!["2021-09-25"]);
    }

    #[test]
    fn compound_apply_runs_date_filter_with_single_bound() {
        let inputs = FilterInputs {
            end_date: "2020-12-31".into(),
            ..Default::default()
        };
        let out = apply_filters(&sample(), &inputs).unwrap();
        assert_eq!(dates(&out), vec!["2020-09-26", "2019-09-28"]);
    }

    #[test]
    fn compound_apply_without_bounds_is_identity() {
        let data = sample();
        assert_eq!(apply_filters(&data, &FilterInputs::default()).unwrap(), data);
    }

    #[test]
    fn compound_apply_fails_whole_pass_on_bad_date() {
        let inputs = FilterInputs {
            start_date: "2020-31-01".into(),
            min_revenue: "0".into(),
            ..Default::default()
        };
        assert!(matches!(
            apply_filters(&sample(), &inputs),
            Err(FilterError::InvalidDate { bound: "start", .. })
        ));
    }
}
