use dashboard_model::{QuoteRecord, VolatilitySummary};
use std::fmt;

/// Day-over-day percentage changes between consecutive closes. The output
/// is one element shorter than the input; the first day has no return.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect()
}

fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

/// Volatility of the return series plus highest/lowest close. Fewer than
/// two records leaves the standard deviation undefined, so the whole
/// summary is reported as an error rather than a degenerate number.
pub fn summarize(history: &[QuoteRecord]) -> Result<VolatilitySummary, VolatilityError> {
    if history.is_empty() {
        return Err(VolatilityError::EmptySeries);
    }
    if history.len() < 2 {
        return Err(VolatilityError::NotEnoughData);
    }

    let closes: Vec<f64> = history.iter().map(|q| q.close).collect();
    let returns = daily_returns(&closes);

    let highest = closes.iter().copied().fold(f64::MIN, f64::max);
    let lowest = closes.iter().copied().fold(f64::MAX, f64::min);

    Ok(VolatilitySummary {
        volatility: sample_std(&returns),
        highest,
        lowest,
    })
}

#[derive(Debug)]
pub enum VolatilityError {
    EmptySeries,
    NotEnoughData,
}

impl fmt::Display for VolatilityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VolatilityError::EmptySeries => write!(f, "Empty series"),
            VolatilityError::NotEnoughData => write!(f, "Not enough data"),
        }
    }
}

impl std::error::Error for VolatilityError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quotes(closes: &[f64]) -> Vec<QuoteRecord> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| QuoteRecord {
                date: NaiveDate::from_ymd_opt(2023, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                open: *c,
                high: *c,
                low: *c,
                close: *c,
                adj_close: *c,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn daily_returns_pass_known_series() {
        let returns = daily_returns(&[100.0, 105.0, 98.0, 101.0]);
        let expected = [5.0, -6.666667, 3.061224];
        assert_eq!(returns.len(), 3);
        for (got, want) in returns.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-3, "got {got}, want {want}");
        }
    }

    #[test]
    fn summarize_pass_known_series() {
        let summary = summarize(&quotes(&[100.0, 105.0, 98.0, 101.0])).unwrap();
        assert!((summary.volatility - 6.251691).abs() < 1e-3);
        assert_eq!(summary.highest, 105.0);
        assert_eq!(summary.lowest, 98.0);
    }

    #[test]
    fn summarize_pass_non_negative() {
        let summary = summarize(&quotes(&[3.0, 1.0, 4.0, 1.0, 5.0])).unwrap();
        assert!(summary.volatility >= 0.0);
    }

    #[test]
    fn summarize_pass_reacts_to_offset() {
        let base = summarize(&quotes(&[100.0, 105.0, 98.0, 101.0])).unwrap();
        let shifted = summarize(&quotes(&[200.0, 205.0, 198.0, 201.0])).unwrap();
        // same absolute moves on a higher level are smaller relative moves
        assert!(shifted.volatility < base.volatility);
    }

    #[test]
    fn summarize_fail_single_record() {
        let err = summarize(&quotes(&[100.0])).unwrap_err();
        assert!(matches!(err, VolatilityError::NotEnoughData));
    }

    #[test]
    fn summarize_fail_empty_series() {
        let err = summarize(&[]).unwrap_err();
        assert!(matches!(err, VolatilityError::EmptySeries));
    }
}
