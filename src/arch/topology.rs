use serde::{Deserialize, Serialize};

/// The fixed shapes a network can be built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Input wired straight into output.
    #[default]
    Perceptron,
    /// `middle_layers` middle layers of `middle_neurons` neurons each.
    DeepPerceptron,
    /// A single middle layer acting as a bottleneck.
    AutoEncoder,
    /// A pyramid of middle layers shrinking by one neuron per layer, from `middle_neurons` down
    /// to 2.
    Dcnn,
}

impl Archetype {
    /// Computes the size of every middle layer, in input to output order.
    ///
    /// # Arguments
    /// * `middle_neurons` - The amount of neurons per middle layer, or the pyramid's base.
    /// * `middle_layers` - The amount of middle layers, only read by `DeepPerceptron`.
    pub fn middle_sizes(self, middle_neurons: usize, middle_layers: usize) -> Vec<usize> {
        match self {
            Archetype::Perceptron => Vec::new(),
            Archetype::DeepPerceptron => vec![middle_neurons; middle_layers],
            Archetype::AutoEncoder => vec![middle_neurons],
            Archetype::Dcnn => (2..=middle_neurons).rev().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perceptron_has_no_middle_layers() {
        assert!(Archetype::Perceptron.middle_sizes(5, 3).is_empty());
    }

    #[test]
    fn deep_perceptron_repeats_the_middle_size() {
        assert_eq!(Archetype::DeepPerceptron.middle_sizes(4, 3), [4, 4, 4]);
        assert!(Archetype::DeepPerceptron.middle_sizes(4, 0).is_empty());
    }

    #[test]
    fn auto_encoder_has_a_single_bottleneck() {
        assert_eq!(Archetype::AutoEncoder.middle_sizes(2, 7), [2]);
    }

    #[test]
    fn dcnn_is_a_pyramid_down_to_two() {
        assert_eq!(Archetype::Dcnn.middle_sizes(5, 1), [5, 4, 3, 2]);
        assert!(Archetype::Dcnn.middle_sizes(1, 1).is_empty());
    }
}
