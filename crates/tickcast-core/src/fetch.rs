//! Daily OHLCV acquisition with retries.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{PricePoint, PriceSeries, Symbol, TradingDate};
use crate::http_client::{HttpClient, HttpRequest};
use crate::retry::RetryPolicy;

/// Configuration for the market data fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub chart_endpoint: String,
    /// Trailing window requested from the chart endpoint.
    pub lookback: String,
    pub interval: String,
    pub timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            chart_endpoint: String::from("https://query1.finance.yahoo.com/v8/finance/chart"),
            lookback: String::from("1y"),
            interval: String::from("1d"),
            timeout_ms: 10_000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Acquisition outcome. `series` is absent when every attempt failed;
/// per-attempt failures are kept as warnings either way.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub series: Option<PriceSeries>,
    pub attempts: u32,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

struct AttemptError {
    message: String,
    retryable: bool,
}

impl AttemptError {
    fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

/// Fetches daily history from the chart endpoint, retrying transient
/// failures per the configured policy.
pub struct MarketDataFetcher {
    config: FetcherConfig,
    http: Arc<dyn HttpClient>,
}

impl MarketDataFetcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_config(FetcherConfig::default(), http)
    }

    pub fn with_config(config: FetcherConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub async fn fetch(&self, symbol: &Symbol) -> FetchReport {
        let mut warnings = Vec::new();
        let max_attempts = self.config.retry.max_attempts.max(1);

        for attempt in 0..max_attempts {
            match self.attempt(symbol).await {
                Ok(series) => {
                    return FetchReport {
                        series: Some(series),
                        attempts: attempt + 1,
                        warnings,
                    };
                }
                Err(error) => {
                    warnings.push(format!(
                        "fetch attempt {} of {} for {} failed: {}",
                        attempt + 1,
                        max_attempts,
                        symbol,
                        error.message
                    ));
                    if !error.retryable {
                        return FetchReport {
                            series: None,
                            attempts: attempt + 1,
                            warnings,
                        };
                    }
                    if attempt + 1 < max_attempts {
                        tokio::time::sleep(self.config.retry.delay_for_attempt(attempt)).await;
                    }
                }
            }
        }

        FetchReport {
            series: None,
            attempts: max_attempts,
            warnings,
        }
    }

    /// One request against the chart endpoint. Transport errors keep their
    /// retryability; upstream status, parse, and empty-result faults are
    /// treated as transient.
    async fn attempt(&self, symbol: &Symbol) -> Result<PriceSeries, AttemptError> {
        let url = format!(
            "{}/{}?range={}&interval={}",
            self.config.chart_endpoint,
            urlencoding::encode(symbol.as_str()),
            self.config.lookback,
            self.config.interval
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let response = self.http.execute(request).await.map_err(|e| AttemptError {
            message: e.message().to_owned(),
            retryable: e.retryable(),
        })?;
        if !response.is_success() {
            return Err(AttemptError::transient(format!(
                "status {}",
                response.status
            )));
        }

        let parsed: ChartResponse = serde_json::from_str(&response.body)
            .map_err(|e| AttemptError::transient(format!("malformed chart: {e}")))?;

        if let Some(error) = parsed.chart.error {
            if !error.is_null() {
                return Err(AttemptError::transient(format!("chart error: {error}")));
            }
        }

        let result = parsed
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
            .ok_or_else(|| AttemptError::transient("empty chart result"))?;

        let series = flatten_chart(symbol.clone(), result).map_err(AttemptError::transient)?;
        if series.is_empty() {
            return Err(AttemptError::transient("no usable rows in chart result"));
        }
        Ok(series)
    }
}

/// Zip the chart's parallel arrays into validated points, dropping rows
/// with missing or inconsistent values.
fn flatten_chart(symbol: Symbol, result: ChartResult) -> Result<PriceSeries, String> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut points = Vec::with_capacity(timestamps.len());
    for (index, &secs) in timestamps.iter().enumerate() {
        let row = (
            quote.open.get(index).copied().flatten(),
            quote.high.get(index).copied().flatten(),
            quote.low.get(index).copied().flatten(),
            quote.close.get(index).copied().flatten(),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = row else {
            continue;
        };
        let volume = quote
            .volume
            .get(index)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0);

        let Ok(date) = TradingDate::from_unix_timestamp(secs) else {
            continue;
        };
        if let Ok(point) = PricePoint::new(date, open, high, low, close, volume) {
            points.push(point);
        }
    }

    PriceSeries::new(symbol, points).map_err(|e| e.to_string())
}
