use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;

const BASE_URL: &str = "https://api.frankfurter.dev/v1";

/// Frankfurter API client for fiat exchange rates (ECB data, no API key).
///
/// Used as a single best-effort lookup when the config file does not pin
/// an exchange rate. A failure here is reported and the run falls back
/// to whatever the caller decides; there is no retry.
pub struct FrankfurterClient {
    client: Client,
    base_url: String,
}

impl FrankfurterClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Latest rate expressed as base units per one quote unit.
    /// E.g. `latest_rate("EUR", "USD")` with USD at 1.09 EUR⁻¹ returns
    /// ~0.92, ready to divide a EUR amount into USD.
    pub async fn latest_rate(&self, base: &str, quote: &str) -> Result<f64, CoreError> {
        let base = base.to_uppercase();
        let quote = quote.to_uppercase();

        if base == quote {
            return Ok(1.0);
        }

        // Frankfurter returns quote-per-base; the report wants base-per-quote.
        let url = format!("{}/latest?base={base}&symbols={quote}", self.base_url);
        let resp: RatesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                resource: "exchange rate".to_string(),
                message: format!("Failed to parse rate for {base}/{quote}: {e}"),
            })?;

        let quote_per_base =
            resp.rates
                .get(&quote)
                .copied()
                .ok_or_else(|| CoreError::RateNotAvailable {
                    base: base.clone(),
                    quote: quote.clone(),
                })?;

        if !quote_per_base.is_finite() || quote_per_base <= 0.0 {
            return Err(CoreError::RateNotAvailable { base, quote });
        }

        Ok(1.0 / quote_per_base)
    }
}

impl Default for FrankfurterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}
