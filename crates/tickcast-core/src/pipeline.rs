//! End-to-end orchestration: resolve, fetch, annotate, score, forecast.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{ForecastResult, Headline, Symbol};
use crate::fetch::MarketDataFetcher;
use crate::forecast::ForecastEngine;
use crate::http_client::HttpClient;
use crate::indicators::IndicatorSet;
use crate::resolver::TickerResolver;
use crate::sentiment::NewsSentimentService;

const INTERNAL_MESSAGE_LIMIT: usize = 80;

/// Hard failures of a pipeline run. Degraded soft inputs (search, news)
/// surface as warnings on the report instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineFailure {
    #[error("no price data for {symbol} after {attempts} attempts: {reason}")]
    DataUnavailable {
        symbol: Symbol,
        attempts: u32,
        reason: String,
    },

    #[error("not enough history for {symbol}: {len} points, need {min}")]
    InsufficientHistory {
        symbol: Symbol,
        len: usize,
        min: usize,
    },

    #[error("internal pipeline error: {message}")]
    Internal { message: String },
}

impl PipelineFailure {
    /// Wrap an unexpected error, truncating long messages.
    pub fn internal(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.len() > INTERNAL_MESSAGE_LIMIT {
            let cut = message
                .char_indices()
                .map(|(index, _)| index)
                .take_while(|&index| index <= INTERNAL_MESSAGE_LIMIT)
                .last()
                .unwrap_or(0);
            message.truncate(cut);
            message.push_str("...");
        }
        Self::Internal { message }
    }
}

/// Full pipeline output for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub forecast: ForecastResult,
    pub headlines: Vec<Headline>,
    /// Degradations encountered along the way, in pipeline order.
    pub warnings: Vec<String>,
}

/// Wires the pipeline components behind one entry point.
pub struct ForecastPipeline {
    resolver: TickerResolver,
    fetcher: MarketDataFetcher,
    sentiment: NewsSentimentService,
    engine: ForecastEngine,
}

impl ForecastPipeline {
    /// Build a pipeline with default component configuration over the
    /// given transport.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            resolver: TickerResolver::new(Arc::clone(&http)),
            fetcher: MarketDataFetcher::new(Arc::clone(&http)),
            sentiment: NewsSentimentService::new(http),
            engine: ForecastEngine::new(),
        }
    }

    pub fn with_components(
        resolver: TickerResolver,
        fetcher: MarketDataFetcher,
        sentiment: NewsSentimentService,
        engine: ForecastEngine,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            sentiment,
            engine,
        }
    }

    /// Run the whole pipeline for a free-text query.
    pub async fn analyze(&self, query: &str) -> Result<AnalysisReport, PipelineFailure> {
        let resolution = self.resolver.resolve(query).await;
        let mut warnings = resolution.warnings;
        let symbol = resolution.symbol;

        let fetch = self.fetcher.fetch(&symbol).await;
        let Some(series) = fetch.series else {
            let reason = fetch
                .warnings
                .last()
                .cloned()
                .unwrap_or_else(|| String::from("unknown"));
            return Err(PipelineFailure::DataUnavailable {
                symbol,
                attempts: fetch.attempts,
                reason,
            });
        };
        // Partial fetch attempts are worth surfacing even on success.
        warnings.extend(fetch.warnings);

        let indicators = IndicatorSet::annotate(&series);

        let sentiment = self.sentiment.score(&symbol).await;
        warnings.extend(sentiment.warnings);

        let forecast = self
            .engine
            .forecast(&series, &indicators, sentiment.mood)
            .map_err(|e| PipelineFailure::InsufficientHistory {
                symbol: series.symbol().clone(),
                len: e.len,
                min: e.min,
            })?;

        Ok(AnalysisReport {
            forecast,
            headlines: sentiment.headlines,
            warnings,
        })
    }

    /// Resolve a query without running the rest of the pipeline.
    pub async fn resolve(&self, query: &str) -> crate::resolver::Resolution {
        self.resolver.resolve(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_message_is_truncated() {
        let long = "x".repeat(300);
        let failure = PipelineFailure::internal(long);
        let PipelineFailure::Internal { message } = failure else {
            panic!("expected internal variant");
        };
        assert!(message.len() <= INTERNAL_MESSAGE_LIMIT + 4);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn short_internal_message_is_untouched() {
        let failure = PipelineFailure::internal("boom");
        assert_eq!(
            failure,
            PipelineFailure::Internal {
                message: String::from("boom")
            }
        );
    }
}
