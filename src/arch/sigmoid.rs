/// The logistic function, `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + (-x).exp())
}

/// The derivative of the logistic function expressed in terms of its own output.
///
/// # Arguments
/// * `s` - A value already passed through `sigmoid`.
pub fn sigmoid_prime(s: f64) -> f64 {
    (1. - s) * s
}
