use std::time::Duration;

pub const FMP_BASE: &str = "https://financialmodelingprep.com/api/v3";
pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Full statements URL; `None` when neither a URL nor a key was given.
    pub endpoint: Option<String>,
    /// Ticker shown in the header, when the URL was built from a symbol.
    pub symbol: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable lookup.
    ///
    /// * `INCOME_LENS_API_URL` – complete endpoint, used verbatim
    /// * `FMP_API_KEY` – Financial Modeling Prep key, used when no URL is set
    /// * `INCOME_LENS_SYMBOL` – ticker for the built URL (default `AAPL`)
    /// * `INCOME_LENS_PERIOD` – `annual` (default) or `quarter`
    /// * `INCOME_LENS_TIMEOUT_SECS` – HTTP timeout (default 30)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = var("INCOME_LENS_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let (endpoint, symbol) = if let Some(url) = var("INCOME_LENS_API_URL") {
            (Some(url), None)
        } else if let Some(key) = var("FMP_API_KEY") {
            let symbol = var("INCOME_LENS_SYMBOL")
                .unwrap_or_else(|| DEFAULT_SYMBOL.to_string())
                .to_ascii_uppercase();
            let period = match var("INCOME_LENS_PERIOD").as_deref() {
                Some("quarter") => "quarter",
                _ => "annual",
            };
            let url = format!("{FMP_BASE}/income-statement/{symbol}?period={period}&apikey={key}");
            (Some(url), Some(symbol))
        } else {
            (None, None)
        };

        Config {
            endpoint,
            symbol,
            timeout: Duration::from_secs(timeout),
        }
    }

    /// Window / header title.
    pub fn title(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{symbol} Income Statements"),
            None => "Income Statements".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn nothing_set_means_no_endpoint() {
        let cfg = config(&[]);
        assert!(cfg.endpoint.is_none());
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.title(), "Income Statements");
    }

    #[test]
    fn explicit_url_wins_over_key() {
        let cfg = config(&[
            ("INCOME_LENS_API_URL", "https://example.com/statements.json"),
            ("FMP_API_KEY", "k"),
        ]);
        assert_eq!(cfg.endpoint.as_deref(), Some("https://example.com/statements.json"));
        assert!(cfg.symbol.is_none());
    }

    #[test]
    fn key_builds_provider_url() {
        let cfg = config(&[
            ("FMP_API_KEY", "secret"),
            ("INCOME_LENS_SYMBOL", "msft"),
            ("INCOME_LENS_PERIOD", "quarter"),
            ("INCOME_LENS_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(
            cfg.endpoint.as_deref(),
            Some(concat!(
                "https://financialmodelingprep.com/api/v3/income-statement/MSFT",
                "?period=quarter&apikey=secret"
            ))
        );
        assert_eq!(cfg.title(), "MSFT Income Statements");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[("INCOME_LENS_API_URL", "  "), ("FMP_API_KEY", "k")]);
        assert_eq!(cfg.symbol.as_deref(), Some("AAPL"));
        assert!(cfg.endpoint.unwrap().contains("period=annual"));
    }
}
