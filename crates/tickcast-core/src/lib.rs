//! Core library for tickcast, a next-session stock forecast pipeline.
//!
//! The pipeline resolves a free-text query to an exchange symbol, pulls a
//! year of daily OHLCV history with retries, annotates it with SMA and RSI
//! columns, scores recent news headlines, and fits a linear trend that is
//! adjusted by aggregate mood and momentum regime.
//!
//! Hard failures (no price data, too little history) are typed errors;
//! soft inputs such as symbol search and the news feed degrade to
//! defaults with warnings on the report.

pub mod domain;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod http_client;
pub mod indicators;
pub mod pipeline;
pub mod resolver;
pub mod retry;
pub mod sentiment;

pub use domain::{
    ForecastResult, Headline, MomentumState, MoodLabel, MoodScore, PricePoint, PriceSeries,
    Symbol, TradingDate, UtcDateTime, DEFAULT_MARKET_SUFFIX, MARKET_SUFFIXES,
};
pub use error::ValidationError;
pub use fetch::{FetchReport, FetcherConfig, MarketDataFetcher};
pub use forecast::{ForecastEngine, InsufficientData, TrendModel, MIN_SERIES_LEN};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use indicators::{IndicatorSet, RSI_WINDOW, SMA_WINDOW};
pub use pipeline::{AnalysisReport, ForecastPipeline, PipelineFailure};
pub use resolver::{Resolution, ResolverConfig, TickerResolver};
pub use retry::{Backoff, RetryPolicy};
pub use sentiment::{LexiconScorer, NewsSentimentService, SentimentConfig, SentimentReport};
