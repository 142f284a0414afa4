//! Rolling technical indicators over a daily price series.

use crate::PriceSeries;

/// Window for the simple moving average of closes.
pub const SMA_WINDOW: usize = 20;

/// Window for the relative strength index.
pub const RSI_WINDOW: usize = 14;

/// Substitute for a zero average loss so the strength ratio stays finite.
pub const RSI_LOSS_EPSILON: f64 = 0.0001;

/// Per-row indicator columns aligned with the source series.
///
/// Leading rows without enough history are back-filled with the first
/// defined value, so on a series of at least `SMA_WINDOW` points every
/// row carries both readings.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    sma20: Vec<Option<f64>>,
    rsi14: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Compute both indicator columns for the series.
    pub fn annotate(series: &PriceSeries) -> Self {
        let closes = series.closes();

        let mut sma20 = rolling_mean(&closes, SMA_WINDOW);
        let mut rsi14 = rsi(&closes, RSI_WINDOW);
        back_fill(&mut sma20);
        back_fill(&mut rsi14);

        Self { sma20, rsi14 }
    }

    pub fn sma20(&self) -> &[Option<f64>] {
        &self.sma20
    }

    pub fn rsi14(&self) -> &[Option<f64>] {
        &self.rsi14
    }

    /// Most recent SMA reading, if any row has one.
    pub fn latest_sma(&self) -> Option<f64> {
        self.sma20.last().copied().flatten()
    }

    /// Most recent RSI reading, if any row has one.
    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi14.last().copied().flatten()
    }
}

/// Trailing mean over `window` values; undefined until the window fills.
fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out[i] = Some(sum / window as f64);
        }
    }
    out
}

/// Wilder-style RSI over trailing simple means of gains and losses.
///
/// The first reading appears once `window` one-day deltas exist, i.e. at
/// row index `window`.
fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() <= window {
        return out;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let gain_means = rolling_mean(&gains, window);
    let loss_means = rolling_mean(&losses, window);

    for (delta_index, (gain, loss)) in gain_means.iter().zip(&loss_means).enumerate() {
        let (Some(gain), Some(loss)) = (gain, loss) else {
            continue;
        };
        let loss = if *loss == 0.0 { RSI_LOSS_EPSILON } else { *loss };
        let rs = gain / loss;
        // Delta k belongs to row k + 1.
        out[delta_index + 1] = Some(100.0 - 100.0 / (1.0 + rs));
    }
    out
}

/// Replace leading `None`s with the first defined value that follows.
fn back_fill(column: &mut [Option<f64>]) {
    let mut next_defined = None;
    for slot in column.iter_mut().rev() {
        match slot {
            Some(value) => next_defined = Some(*value),
            None => *slot = next_defined,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{PricePoint, PriceSeries, Symbol, TradingDate};

    use super::*;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let mut day = TradingDate::new(date!(2024 - 01 - 01));
        let points = closes
            .iter()
            .map(|&close| {
                let low = (close - 1.0).max(close / 2.0);
                let point = PricePoint::new(day, close, close + 1.0, low, close, 1_000)
                    .expect("valid point");
                day = day.succ();
                point
            })
            .collect();
        PriceSeries::new(Symbol::parse("TEST.NS").expect("valid"), points).expect("ordered")
    }

    #[test]
    fn sma_matches_trailing_mean() {
        let closes: Vec<f64> = (1..=25).map(f64::from).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorSet::annotate(&series);

        // Mean of 6..=25 is 15.5.
        assert_eq!(indicators.latest_sma(), Some(15.5));
        // Mean of 1..=20 at the first full window.
        assert_eq!(indicators.sma20()[19], Some(10.5));
    }

    #[test]
    fn back_fill_leaves_no_gaps_on_long_series() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorSet::annotate(&series);

        assert!(indicators.sma20().iter().all(Option::is_some));
        assert!(indicators.rsi14().iter().all(Option::is_some));
        // Leading rows inherit the first computed value.
        assert_eq!(indicators.sma20()[0], indicators.sma20()[19]);
    }

    #[test]
    fn rsi_is_maximal_on_all_gains() {
        let closes: Vec<f64> = (1..=20).map(|i| f64::from(i) * 2.0).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorSet::annotate(&series);

        let rsi = indicators.latest_rsi().expect("defined");
        // Zero losses hit the epsilon floor, so RSI sits just under 100.
        assert!(rsi > 99.0 && rsi <= 100.0);
    }

    #[test]
    fn rsi_stays_within_bounds_on_mixed_series() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + 10.0 * ((i as f64) * 0.7).sin())
            .collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorSet::annotate(&series);

        for reading in indicators.rsi14().iter().flatten() {
            assert!((0.0..=100.0).contains(reading), "rsi out of range: {reading}");
        }
    }

    #[test]
    fn short_series_has_no_defined_rsi() {
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorSet::annotate(&series);

        assert_eq!(indicators.latest_rsi(), None);
        assert_eq!(indicators.latest_sma(), None);
    }
}
