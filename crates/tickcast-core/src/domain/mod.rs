//! Domain types for the forecast pipeline.
//!
//! Everything here validates at construction time so downstream code can
//! assume well-formed values.

mod dates;
mod models;
mod symbol;

pub use dates::{TradingDate, UtcDateTime};
pub use models::{
    ForecastResult, Headline, MomentumState, MoodLabel, MoodScore, PricePoint, PriceSeries,
};
pub use symbol::{Symbol, DEFAULT_MARKET_SUFFIX, MARKET_SUFFIXES};
