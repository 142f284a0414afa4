// Shared fixtures for the behavioral test suites.
pub use std::sync::{Arc, Mutex};

pub use tickcast_core::{
    Backoff, FetcherConfig, ForecastEngine, ForecastPipeline, HttpClient, HttpError, HttpRequest,
    HttpResponse, IndicatorSet, MarketDataFetcher, MomentumState, MoodScore, NewsSentimentService,
    PipelineFailure, PricePoint, PriceSeries, ResolverConfig, RetryPolicy, Symbol, TickerResolver,
    TradingDate, TrendModel,
};

use std::future::Future;
use std::pin::Pin;

/// Transport stub that answers by URL substring and records every request.
pub struct ScriptedHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_route(
        mut self,
        url_fragment: impl Into<String>,
        response: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.routes.push((url_fragment.into(), response));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.iter().map(|req| req.url.clone()).collect())
            .unwrap_or_default()
    }
}

impl Default for ScriptedHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Err(HttpError::non_retryable("no scripted route")));

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        Box::pin(async move { response })
    }
}

/// Chart endpoint body with calendar-daily rows starting at `base_ts`.
pub fn chart_body(base_ts: i64, closes: &[f64]) -> String {
    let timestamps: Vec<i64> = (0..closes.len())
        .map(|i| base_ts + (i as i64) * 86_400)
        .collect();
    let opens: Vec<f64> = closes.iter().map(|c| c - 0.5).collect();
    let highs: Vec<f64> = closes.iter().map(|c| c + 2.0).collect();
    let lows: Vec<f64> = closes.iter().map(|c| c - 2.0).collect();
    let volumes: Vec<i64> = closes.iter().map(|_| 25_000).collect();

    serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": { "quote": [{
                    "open": opens,
                    "high": highs,
                    "low": lows,
                    "close": closes,
                    "volume": volumes,
                }]}
            }],
            "error": null
        }
    })
    .to_string()
}

/// 2024-01-02 00:00:00 UTC, a Tuesday.
pub const BASE_TS: i64 = 1_704_153_600;

pub fn upbeat_feed() -> String {
    String::from(
        r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>feed</title>
  <item>
    <title>Shares surge after strong profit beats estimates</title>
    <pubDate>Tue, 20 Aug 2024 07:30:00 GMT</pubDate>
  </item>
  <item>
    <title>Brokerage upgrades stock on bullish growth outlook</title>
    <pubDate>Tue, 20 Aug 2024 05:00:00 GMT</pubDate>
  </item>
</channel></rss>"#,
    )
}

/// Daily series over consecutive calendar days for direct engine tests.
pub fn linear_series_from(
    start: time::Date,
    start_close: f64,
    step: f64,
    days: usize,
) -> PriceSeries {
    let mut day = TradingDate::new(start);
    let points = (0..days)
        .map(|i| {
            let close = start_close + step * i as f64;
            let point = PricePoint::new(day, close - 0.5, close + 2.0, close - 2.0, close, 25_000)
                .expect("valid point");
            day = day.succ();
            point
        })
        .collect();
    PriceSeries::new(Symbol::parse("TCS.NS").expect("valid"), points).expect("ordered")
}
