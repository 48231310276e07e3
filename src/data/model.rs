use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// FinancialRecord – one fiscal-period income statement
// ---------------------------------------------------------------------------

/// One income statement as projected from the provider response.
///
/// Numeric fields are kept as the raw JSON value the provider sent. Sources
/// are not trusted to send numbers, so interpretation happens at filter /
/// sort / render time via [`as_integer`] and [`as_float`], and a value that
/// does not interpret is simply "non-matching" rather than a decode error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default)]
    pub revenue: JsonValue,
    #[serde(default)]
    pub net_income: JsonValue,
    #[serde(default)]
    pub gross_profit: JsonValue,
    #[serde(default)]
    pub eps: JsonValue,
    #[serde(default)]
    pub operating_income: JsonValue,
}

impl FinancialRecord {
    /// Calendar day of the statement, if `date` parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn revenue(&self) -> Option<i64> {
        as_integer(&self.revenue)
    }

    pub fn net_income(&self) -> Option<i64> {
        as_integer(&self.net_income)
    }
}

// ---------------------------------------------------------------------------
// Lenient parsing helpers
// ---------------------------------------------------------------------------

/// Accept any JSON value for a text field: `null` becomes empty, numbers and
/// other scalars keep their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    })
}

/// Parse the leading integer of a string.
///
/// Leading whitespace and one optional sign are skipped, then the longest run
/// of ASCII digits is taken: `"  -42"` → -42, `"12abc"` → 12, `"abc"` → None.
/// Out-of-range runs return None.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let rest = &s[sign_len..];
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    s[..sign_len + digits_end].parse().ok()
}

/// Interpret a raw field as an integer.
///
/// JSON integers pass through, finite floats truncate toward zero, strings
/// use [`parse_leading_int`]. Everything else is `None`.
pub fn as_integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
            (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64)
                .then(|| f.trunc() as i64)
        }),
        JsonValue::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// Interpret a raw field as a float for display.
pub fn as_float(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Parse a `YYYY-MM-DD` date, ignoring any trailing time part
/// (`2023-09-30T00:00:00Z`, `2023-09-30 16:00:00`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
