use super::LossFn;

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, ideal: &[f64], actual: &[f64]) -> f64 {
        mse(ideal, actual)
    }
}

/// Computes the mean squared error between `ideal` and `actual`.
///
/// The mean is taken over `actual`, an `ideal` shorter than it counts as zeros for the missing
/// positions. An empty `actual` has no error.
pub fn mse(ideal: &[f64], actual: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.;
    }

    let sum: f64 = actual
        .iter()
        .enumerate()
        .map(|(i, a)| (ideal.get(i).copied().unwrap_or_default() - a).powi(2))
        .sum();

    sum / actual.len() as f64
}
