use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, UtcDateTime, ValidationError};

/// One daily OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_positive("open", open)?;
        validate_positive("high", high)?;
        validate_positive("low", low)?;
        validate_positive("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidPriceRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidPriceBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Intraday trading range for the session.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Daily price history for one symbol, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(ValidationError::UnorderedSeries { index: index + 1 });
            }
        }

        Ok(Self { symbol, points })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }
}

/// A scored news headline. The publish timestamp is display context only
/// and may be absent when the feed carried an unparseable date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    pub published_at: Option<UtcDateTime>,
    pub sentiment: f64,
}

impl Headline {
    pub fn new(
        text: impl Into<String>,
        published_at: Option<UtcDateTime>,
        sentiment: f64,
    ) -> Result<Self, ValidationError> {
        if !sentiment.is_finite() || !(-1.0..=1.0).contains(&sentiment) {
            return Err(ValidationError::SentimentOutOfRange { value: sentiment });
        }

        Ok(Self {
            text: text.into(),
            published_at,
            sentiment,
        })
    }
}

/// Display classification of a mood or headline score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Positive,
    Negative,
    Neutral,
}

impl MoodLabel {
    /// ±0.05 dead band around zero, matching headline display semantics.
    pub fn from_score(score: f64) -> Self {
        if score > 0.05 {
            Self::Positive
        } else if score < -0.05 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Aggregate news sentiment in [-1, 1]. Zero is the neutral default when no
/// headlines are available, not an absence marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodScore(f64);

impl MoodScore {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
            return Err(ValidationError::SentimentOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub const fn neutral() -> Self {
        Self(0.0)
    }

    /// Arithmetic mean of headline scores; neutral when there are none.
    pub fn from_headline_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::neutral();
        }
        let sum: f64 = scores.iter().sum();
        Self((sum / scores.len() as f64).clamp(-1.0, 1.0))
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    pub fn label(self) -> MoodLabel {
        MoodLabel::from_score(self.0)
    }
}

impl Default for MoodScore {
    fn default() -> Self {
        Self::neutral()
    }
}

/// RSI-derived momentum regime used to damp or boost the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumState {
    Overbought,
    Oversold,
    Neutral,
}

impl MomentumState {
    pub const OVERBOUGHT_RSI: f64 = 70.0;
    pub const OVERSOLD_RSI: f64 = 30.0;

    /// Classify the latest RSI reading; an undefined reading is neutral.
    pub fn from_rsi(rsi: Option<f64>) -> Self {
        match rsi {
            Some(value) if value > Self::OVERBOUGHT_RSI => Self::Overbought,
            Some(value) if value < Self::OVERSOLD_RSI => Self::Oversold,
            _ => Self::Neutral,
        }
    }

    /// Multiplicative adjustment applied to the sentiment-adjusted price:
    /// overbought expects a pullback, oversold a bounce.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Overbought => 0.99,
            Self::Oversold => 1.01,
            Self::Neutral => 1.0,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Overbought => "Overbought (High Risk)",
            Self::Oversold => "Oversold (Bounce Likely)",
            Self::Neutral => "Neutral",
        }
    }
}

/// Next-session forecast with its confidence band and display context.
///
/// Recomputed on every pipeline run; carries no identity beyond
/// symbol + as-of date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub symbol: Symbol,
    pub as_of_date: TradingDate,
    pub last_close: f64,
    pub day_change: f64,
    pub day_change_pct: f64,
    pub target_date: TradingDate,
    pub predicted_close: f64,
    pub predicted_low: f64,
    pub predicted_high: f64,
    pub mood: MoodScore,
    pub momentum: MomentumState,
    pub rsi14: Option<f64>,
    pub sma20: Option<f64>,
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn day(date: time::Date) -> TradingDate {
        TradingDate::new(date)
    }

    #[test]
    fn rejects_inverted_price_range() {
        let err = PricePoint::new(day(date!(2024 - 01 - 02)), 10.0, 9.0, 11.0, 10.5, 100)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPriceRange));
    }

    #[test]
    fn rejects_close_outside_session_range() {
        let err = PricePoint::new(day(date!(2024 - 01 - 02)), 10.0, 12.0, 9.0, 12.5, 100)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPriceBounds));
    }

    #[test]
    fn rejects_duplicate_series_dates() {
        let symbol = Symbol::parse("TCS.NS").expect("valid");
        let point = PricePoint::new(day(date!(2024 - 01 - 02)), 10.0, 11.0, 9.0, 10.5, 100)
            .expect("valid point");

        let err = PriceSeries::new(symbol, vec![point, point]).expect_err("must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { index: 1 }));
    }

    #[test]
    fn mood_defaults_to_neutral_without_headlines() {
        let mood = MoodScore::from_headline_scores(&[]);
        assert_eq!(mood.value(), 0.0);
        assert_eq!(mood.label(), MoodLabel::Neutral);
    }

    #[test]
    fn mood_is_mean_of_scores() {
        let mood = MoodScore::from_headline_scores(&[0.5, 0.1, -0.3]);
        assert!((mood.value() - 0.1).abs() < 1e-12);
        assert_eq!(mood.label(), MoodLabel::Positive);
    }

    #[test]
    fn momentum_regimes_from_rsi() {
        assert_eq!(MomentumState::from_rsi(Some(75.0)), MomentumState::Overbought);
        assert_eq!(MomentumState::from_rsi(Some(25.0)), MomentumState::Oversold);
        assert_eq!(MomentumState::from_rsi(Some(50.0)), MomentumState::Neutral);
        assert_eq!(MomentumState::from_rsi(None), MomentumState::Neutral);
    }

    #[test]
    fn momentum_factors_match_regimes() {
        assert_eq!(MomentumState::Overbought.factor(), 0.99);
        assert_eq!(MomentumState::Oversold.factor(), 1.01);
        assert_eq!(MomentumState::Neutral.factor(), 1.0);
    }

    #[test]
    fn headline_rejects_out_of_range_sentiment() {
        let ts = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp");
        let err = Headline::new("title", Some(ts), 1.5).expect_err("must fail");
        assert!(matches!(err, ValidationError::SentimentOutOfRange { .. }));
    }
}
