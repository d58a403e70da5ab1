//! Regression metrics for held-out evaluation and candidate scoring.
//!
//! Error values reported per target channel are root-mean-squared error on
//! the held-out partition; grid search ranks candidates by negated MSE so
//! that higher is better.

/// Mean squared error between predictions and targets.
///
/// Returns 0.0 for empty input. Panics if the slices differ in length,
/// which indicates a bug in the caller's split bookkeeping.
pub fn mse(predictions: &[f64], targets: &[f64]) -> f64 {
    assert_eq!(
        predictions.len(),
        targets.len(),
        "predictions and targets must have equal length"
    );
    if predictions.is_empty() {
        return 0.0;
    }
    let sum: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    sum / predictions.len() as f64
}

/// Root mean squared error between predictions and targets.
pub fn rmse(predictions: &[f64], targets: &[f64]) -> f64 {
    mse(predictions, targets).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mse_perfect_predictions() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(mse(&y, &y), 0.0);
    }

    #[test]
    fn test_mse_known_value() {
        let predictions = [1.0, 2.0, 3.0];
        let targets = [2.0, 2.0, 5.0];
        // (1 + 0 + 4) / 3
        assert_relative_eq!(mse(&predictions, &targets), 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rmse_is_sqrt_of_mse() {
        let predictions = [0.0, 0.0];
        let targets = [3.0, 4.0];
        assert_relative_eq!(rmse(&predictions, &targets), (12.5f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(mse(&[], &[]), 0.0);
        assert_eq!(rmse(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_length_mismatch_panics() {
        mse(&[1.0], &[1.0, 2.0]);
    }
}
