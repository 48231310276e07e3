use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde_json::Value as JsonValue;

use super::model::FinancialRecord;
use crate::config::Config;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the income-statement history from the configured endpoint.
///
/// One GET, no retry. Fails when no endpoint is configured, on transport
/// errors, non-success status, or a body that is not a statement array.
pub fn fetch_statements(config: &Config) -> Result<Vec<FinancialRecord>> {
    let url = config
        .endpoint
        .as_deref()
        .context("no statements endpoint configured (set INCOME_LENS_API_URL or FMP_API_KEY)")?;

    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("income-lens/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(url)
        .send()
        .context("requesting income statements")?;

    let status = response.status();
    if !status.is_success() {
        bail!("statements endpoint returned HTTP {status}");
    }

    let body = response.text().context("reading response body")?;
    let records = parse_statements(&body)?;
    log::info!(
        "Fetched {} income statements from {}",
        records.len(),
        redact(url)
    );
    Ok(records)
}

/// Run [`fetch_statements`] on a background thread.
///
/// The result arrives exactly once on the returned channel. `on_done` runs
/// on the worker thread after sending, so the UI can schedule a repaint.
pub fn spawn_fetch<F>(config: Config, on_done: F) -> Receiver<Result<Vec<FinancialRecord>>>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver is gone only if the window closed first.
        let _ = tx.send(fetch_statements(&config));
        on_done();
    });
    rx
}

// ---------------------------------------------------------------------------
// Body decoding
// ---------------------------------------------------------------------------

/// Decode a provider response body into projected records.
///
/// Expected shape (Financial Modeling Prep `income-statement`):
///
/// ```json
/// [
///   { "date": "2023-09-30", "revenue": 383285000000, "netIncome": 96995000000,
///     "grossProfit": 169148000000, "eps": 6.16, "operatingIncome": 114301000000,
///     "symbol": "AAPL", ... },
///   ...
/// ]
/// ```
///
/// Extra fields are discarded. A top-level object carrying `"Error Message"`
/// is the provider's way of reporting a bad key or symbol.
pub fn parse_statements(body: &str) -> Result<Vec<FinancialRecord>> {
    let root: JsonValue = serde_json::from_str(body).context("parsing statements JSON")?;

    let items = match root {
        JsonValue::Array(items) => items,
        JsonValue::Object(obj) => {
            if let Some(msg) = obj.get("Error Message").and_then(|m| m.as_str()) {
                bail!("provider error: {msg}");
            }
            bail!("expected a JSON array of statements, got an object");
        }
        other => bail!("expected a JSON array of statements, got {other}"),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<FinancialRecord>(item)
                .with_context(|| format!("decoding statement {i}"))
        })
        .collect()
}

/// Strip the query string so API keys never reach the log.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn parses_provider_array() {
        let body = json!([
            {
                "date": "2023-09-30",
                "symbol": "AAPL",
                "reportedCurrency": "USD",
                "revenue": 383285000000_i64,
                "netIncome": 96995000000_i64,
                "grossProfit": 169148000000_i64,
                "eps": 6.16,
                "operatingIncome": 114301000000_i64
            },
            {
                "date": "2022-09-24",
                "revenue": "394328000000",
                "netIncome": null
            }
        ])
        .to_string();

        let records = parse_statements(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2023-09-30");
        assert_eq!(records[0].revenue(), Some(383_285_000_000));
        assert_eq!(records[1].revenue(), Some(394_328_000_000));
        assert_eq!(records[1].net_income(), None);
        assert_eq!(records[1].eps, JsonValue::Null);
    }

    #[test]
    fn empty_array_is_empty_dataset() {
        assert!(parse_statements("[]").unwrap().is_empty());
    }

    #[test]
    fn empty_body_is_an_error() {
        assert!(parse_statements("").is_err());
    }

    #[test]
    fn provider_error_object_is_reported() {
        let body = r#"{"Error Message": "Invalid API KEY."}"#;
        let err = parse_statements(body).unwrap_err();
        assert!(err.to_string().contains("Invalid API KEY."));
    }

    #[test]
    fn non_object_item_is_an_error() {
        assert!(parse_statements("[1, 2]").is_err());
    }

    #[test]
    fn missing_endpoint_fails_without_network() {
        let config = Config {
            endpoint: None,
            symbol: None,
            timeout: Duration::from_secs(1),
        };
        let err = fetch_statements(&config).unwrap_err();
        assert!(err.to_string().contains("no statements endpoint"));
    }

    #[test]
    fn spawned_fetch_delivers_failure_once() {
        let config = Config {
            endpoint: None,
            symbol: None,
            timeout: Duration::from_secs(1),
        };
        let rx = spawn_fetch(config, || {});
        assert!(rx.recv().unwrap().is_err());
        assert!(rx.recv().is_err());
    }

    #[test]
    fn redact_drops_query() {
        assert_eq!(
            redact("https://host/api/v3/income-statement/AAPL?apikey=secret"),
            "https://host/api/v3/income-statement/AAPL"
        );
    }
}
