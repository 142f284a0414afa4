//! Next-session price forecast from trend, mood, and momentum.

use thiserror::Error;

use crate::domain::{ForecastResult, MomentumState, MoodScore, PriceSeries};
use crate::indicators::IndicatorSet;

/// Minimum points required before a trend fit is meaningful.
pub const MIN_SERIES_LEN: usize = 10;

/// Assumed daily volatility used to scale the news adjustment.
pub const NEWS_VOLATILITY_FACTOR: f64 = 0.025;

/// Trailing sessions averaged for the confidence band width.
pub const RANGE_WINDOW: usize = 14;

/// Fraction of the recent range used on each side of the band.
pub const RANGE_BAND_FACTOR: f64 = 0.8;

/// The series is too short to fit a trend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("price history has {len} points, need at least {min}")]
pub struct InsufficientData {
    pub len: usize,
    pub min: usize,
}

/// Ordinary least squares line over (day ordinal, close).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    /// Closed-form OLS fit. A degenerate x-variance yields a flat line
    /// through the mean close.
    pub fn fit(ordinals: &[i64], closes: &[f64]) -> Self {
        let n = ordinals.len().min(closes.len());
        if n == 0 {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let xs: Vec<f64> = ordinals.iter().take(n).map(|&x| x as f64).collect();
        let mean_x: f64 = xs.iter().sum::<f64>() / n as f64;
        let mean_y: f64 = closes.iter().take(n).sum::<f64>() / n as f64;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (x, y) in xs.iter().zip(closes) {
            covariance += (x - mean_x) * (y - mean_y);
            variance += (x - mean_x) * (x - mean_x);
        }

        let slope = if variance == 0.0 {
            0.0
        } else {
            covariance / variance
        };
        Self {
            slope,
            intercept: mean_y - slope * mean_x,
        }
    }

    pub fn predict(&self, ordinal: i64) -> f64 {
        self.slope * ordinal as f64 + self.intercept
    }
}

/// Price after the proportional news adjustment.
pub fn news_adjusted(base: f64, mood: MoodScore) -> f64 {
    base + base * mood.value() * NEWS_VOLATILITY_FACTOR
}

/// Price after the momentum regime factor.
pub fn momentum_adjusted(price: f64, state: MomentumState) -> f64 {
    price * state.factor()
}

/// Mean intraday range over the trailing window.
pub fn recent_range(series: &PriceSeries) -> f64 {
    let points = series.points();
    if points.is_empty() {
        return 0.0;
    }
    let window = points.len().min(RANGE_WINDOW);
    let tail = &points[points.len() - window..];
    tail.iter().map(|p| p.range()).sum::<f64>() / window as f64
}

/// Produces the next-session forecast for an annotated series.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForecastEngine;

impl ForecastEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn forecast(
        &self,
        series: &PriceSeries,
        indicators: &IndicatorSet,
        mood: MoodScore,
    ) -> Result<ForecastResult, InsufficientData> {
        if series.len() < MIN_SERIES_LEN {
            return Err(InsufficientData {
                len: series.len(),
                min: MIN_SERIES_LEN,
            });
        }

        let points = series.points();
        let Some(last) = points.last() else {
            return Err(InsufficientData {
                len: 0,
                min: MIN_SERIES_LEN,
            });
        };
        let prev_close = points[points.len() - 2].close;

        let ordinals: Vec<i64> = points.iter().map(|p| p.date.ordinal()).collect();
        let closes = series.closes();
        let model = TrendModel::fit(&ordinals, &closes);

        let target_date = last.date.next_trading_day();
        let base = model.predict(target_date.ordinal());

        let momentum = MomentumState::from_rsi(indicators.latest_rsi());
        let predicted_close = momentum_adjusted(news_adjusted(base, mood), momentum);

        let band = RANGE_BAND_FACTOR * recent_range(series);
        let day_change = last.close - prev_close;

        Ok(ForecastResult {
            symbol: series.symbol().clone(),
            as_of_date: last.date,
            last_close: last.close,
            day_change,
            day_change_pct: day_change / prev_close * 100.0,
            target_date,
            predicted_close,
            predicted_low: predicted_close - band,
            predicted_high: predicted_close + band,
            mood,
            momentum,
            rsi14: indicators.latest_rsi(),
            sma20: indicators.latest_sma(),
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::domain::{PricePoint, Symbol, TradingDate};

    use super::*;

    fn linear_series(start_close: f64, step: f64, days: usize) -> PriceSeries {
        let mut day = TradingDate::new(date!(2024 - 06 - 03));
        let points = (0..days)
            .map(|i| {
                let close = start_close + step * i as f64;
                let point = PricePoint::new(day, close, close + 2.0, close - 2.0, close, 10_000)
                    .expect("valid point");
                day = day.succ();
                point
            })
            .collect();
        PriceSeries::new(Symbol::parse("TCS.NS").expect("valid"), points).expect("ordered")
    }

    #[test]
    fn fit_recovers_exact_line() {
        let ordinals: Vec<i64> = (0..20).collect();
        let closes: Vec<f64> = ordinals.iter().map(|&x| 3.0 * x as f64 + 7.0).collect();
        let model = TrendModel::fit(&ordinals, &closes);

        assert!((model.slope - 3.0).abs() < 1e-9);
        assert!((model.intercept - 7.0).abs() < 1e-9);
        assert!((model.predict(25) - 82.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_fit_is_flat() {
        let ordinals = vec![5, 5, 5];
        let closes = vec![10.0, 12.0, 14.0];
        let model = TrendModel::fit(&ordinals, &closes);

        assert_eq!(model.slope, 0.0);
        assert!((model.predict(5) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn short_series_is_rejected() {
        let series = linear_series(100.0, 1.0, 5);
        let indicators = IndicatorSet::annotate(&series);
        let err = ForecastEngine::new()
            .forecast(&series, &indicators, MoodScore::neutral())
            .expect_err("too short");
        assert_eq!(err, InsufficientData { len: 5, min: 10 });
    }

    #[test]
    fn band_brackets_the_prediction() {
        let series = linear_series(100.0, 0.5, 30);
        let indicators = IndicatorSet::annotate(&series);
        let result = ForecastEngine::new()
            .forecast(&series, &indicators, MoodScore::neutral())
            .expect("forecast");

        assert!(result.predicted_low < result.predicted_close);
        assert!(result.predicted_close < result.predicted_high);
        // Every synthetic session spans 4.0, so the band is 0.8 * 4.0.
        assert!((result.predicted_high - result.predicted_close - 3.2).abs() < 1e-9);
    }

    #[test]
    fn positive_mood_lifts_the_base_prediction() {
        let series = linear_series(100.0, 0.0, 30);
        let indicators = IndicatorSet::annotate(&series);
        let engine = ForecastEngine::new();

        let neutral = engine
            .forecast(&series, &indicators, MoodScore::neutral())
            .expect("forecast");
        let upbeat = engine
            .forecast(&series, &indicators, MoodScore::new(0.8).expect("valid"))
            .expect("forecast");

        assert!(upbeat.predicted_close > neutral.predicted_close);
    }

    #[test]
    fn steady_rally_is_flagged_overbought() {
        let series = linear_series(100.0, 1.0, 30);
        let indicators = IndicatorSet::annotate(&series);
        let result = ForecastEngine::new()
            .forecast(&series, &indicators, MoodScore::neutral())
            .expect("forecast");

        assert_eq!(result.momentum, MomentumState::Overbought);
        // The pullback factor drags the prediction below the raw trend.
        let ordinals: Vec<i64> = series.points().iter().map(|p| p.date.ordinal()).collect();
        let model = TrendModel::fit(&ordinals, &series.closes());
        let raw = model.predict(result.target_date.ordinal());
        assert!(result.predicted_close < raw);
    }

    #[test]
    fn forecast_is_deterministic() {
        let series = linear_series(250.0, -0.75, 40);
        let indicators = IndicatorSet::annotate(&series);
        let engine = ForecastEngine::new();
        let mood = MoodScore::new(-0.2).expect("valid");

        let first = engine.forecast(&series, &indicators, mood).expect("forecast");
        let second = engine.forecast(&series, &indicators, mood).expect("forecast");
        assert_eq!(first, second);
    }
}
