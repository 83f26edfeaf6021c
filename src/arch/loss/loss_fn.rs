/// Measures how far a network's output is from the expected one.
pub trait LossFn {
    fn loss(&self, ideal: &[f64], actual: &[f64]) -> f64;
}
