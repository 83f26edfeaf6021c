use std::{
    error::Error,
    fmt::{self, Display},
};

use log::debug;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// Errors produced while slicing a series into examples.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetErr {
    /// The series can't fit a single visible + prediction window.
    SeriesTooShort { len: usize, required: usize },
    /// Either the visible or the prediction window has no values.
    EmptyWindow,
}

impl Display for DatasetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetErr::SeriesTooShort { len, required } => write!(
                f,
                "the series has {len} values but a single window needs {required}"
            ),
            DatasetErr::EmptyWindow => {
                write!(f, "the visible and prediction windows can't be empty")
            }
        }
    }
}

impl Error for DatasetErr {}

/// How a series is sliced into examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// The amount of values the network sees.
    pub visible: usize,
    /// The amount of values following the visible ones used to build the target.
    pub prediction: usize,
    /// The move, as a percentage of the last visible value, that counts as going up or down.
    pub threshold_percent: f64,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            visible: 10,
            prediction: 5,
            threshold_percent: 0.4,
        }
    }
}

/// A single training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// The visible window, normalized to `[-0.5, 0.5]`.
    pub inputs: Vec<f64>,
    /// `[down, up, neither]`, exactly one of them is `1.0`.
    pub ideal: Vec<f64>,
}

/// An ordered collection of examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    examples: Vec<Example>,
}

impl Dataset {
    /// Creates a new empty `Dataset`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slides a window over `series`, building one example per start position.
    ///
    /// # Arguments
    /// * `series` - The raw values, in time order.
    /// * `window` - The sizes of the visible and prediction windows and the move threshold.
    ///
    /// # Returns
    /// A dataset with `series.len() - (visible + prediction)` examples.
    ///
    /// # Errors
    /// `DatasetErr::EmptyWindow` if a window is empty, `DatasetErr::SeriesTooShort` if the series
    /// can't fit both windows.
    pub fn from_series(series: &[f64], window: &WindowOptions) -> Result<Self, DatasetErr> {
        let &WindowOptions {
            visible,
            prediction,
            threshold_percent,
        } = window;

        if visible == 0 || prediction == 0 {
            return Err(DatasetErr::EmptyWindow);
        }

        let cell = visible + prediction;
        if series.len() < cell {
            return Err(DatasetErr::SeriesTooShort {
                len: series.len(),
                required: cell,
            });
        }

        let examples: Vec<_> = (0..series.len() - cell)
            .map(|start| {
                let (seen, ahead) = series[start..start + cell].split_at(visible);
                Example {
                    inputs: normalize(seen),
                    ideal: classify(seen[visible - 1], ahead, threshold_percent),
                }
            })
            .collect();

        debug!(
            "sliced {} values into {} examples of {visible}+{prediction}",
            series.len(),
            examples.len()
        );

        Ok(Self { examples })
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn push(&mut self, example: Example) {
        self.examples.push(example);
    }

    /// Shuffles the examples in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.examples.shuffle(rng);
    }
}

/// Maps `values` linearly so that its minimum becomes -0.5 and its maximum 0.5. A flat window
/// maps entirely to -0.5.
fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|v| {
            let scaled = if range == 0. { 0. } else { (v - min) / range };
            scaled - 0.5
        })
        .collect()
}

/// Builds the `[down, up, neither]` target comparing the raw, unnormalized `last` visible value
/// against the extremes of the prediction window.
fn classify(last: f64, ahead: &[f64], threshold_percent: f64) -> Vec<f64> {
    let min = ahead.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ahead.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (down, up) = if last == 0. {
        (false, false)
    } else {
        let percent = last / 100.;
        (
            (last - min) / percent > threshold_percent,
            (last - max) / percent < -threshold_percent,
        )
    };

    [down, up, !down && !up]
        .into_iter()
        .map(f64::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn window(visible: usize, prediction: usize) -> WindowOptions {
        WindowOptions {
            visible,
            prediction,
            ..Default::default()
        }
    }

    #[test]
    fn a_rising_series_yields_up_examples() {
        let dataset = Dataset::from_series(&[1., 2., 3., 4., 5., 6.], &window(3, 2)).unwrap();
        assert_eq!(dataset.len(), 1);

        let example = &dataset.examples()[0];
        assert_eq!(example.inputs, [-0.5, 0., 0.5]);
        assert_eq!(example.ideal, [0., 1., 0.]);
    }

    #[test]
    fn a_falling_series_yields_down_examples() {
        let dataset = Dataset::from_series(&[6., 5., 4., 3., 2., 1.], &window(3, 2)).unwrap();
        assert_eq!(dataset.examples()[0].ideal, [1., 0., 0.]);
    }

    #[test]
    fn a_flat_series_yields_neither() {
        let dataset = Dataset::from_series(&[3.; 8], &window(3, 2)).unwrap();
        assert_eq!(dataset.len(), 3);

        for example in dataset.examples() {
            assert_eq!(example.inputs, [-0.5, -0.5, -0.5]);
            assert_eq!(example.ideal, [0., 0., 1.]);
        }
    }

    #[test]
    fn a_zero_last_value_yields_neither() {
        let dataset = Dataset::from_series(&[1., 0., 5., 9., 9.], &window(2, 2)).unwrap();
        assert_eq!(dataset.examples()[0].ideal, [0., 0., 1.]);
    }

    #[test]
    fn short_series_fail() {
        assert_eq!(
            Dataset::from_series(&[1., 2., 3., 4.], &window(3, 2)),
            Err(DatasetErr::SeriesTooShort {
                len: 4,
                required: 5
            })
        );
    }

    #[test]
    fn a_series_fitting_exactly_one_window_has_no_examples() {
        let dataset = Dataset::from_series(&[1., 2., 3., 4., 5.], &window(3, 2)).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn empty_windows_fail() {
        assert_eq!(
            Dataset::from_series(&[1., 2., 3.], &window(0, 2)),
            Err(DatasetErr::EmptyWindow)
        );
        assert_eq!(
            Dataset::from_series(&[1., 2., 3.], &window(2, 0)),
            Err(DatasetErr::EmptyWindow)
        );
    }

    #[test]
    fn shuffle_keeps_every_example() {
        let series: Vec<f64> = (0..40).map(|i| (i as f64 * 0.7).sin() + 2.).collect();
        let mut dataset = Dataset::from_series(&series, &window(4, 3)).unwrap();
        let original = dataset.clone();
        dataset.shuffle(&mut StdRng::seed_from_u64(42));

        assert_eq!(dataset.len(), original.len());
        for example in original.examples() {
            assert!(dataset.examples().contains(example));
        }
    }
}
