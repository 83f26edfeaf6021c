use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Graph, Neuron, NeuronId, NeuronKind};
use crate::{NetErr, Result};

/// The position of a layer in the network, it decides how the layer learns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Input,
    Middle,
    Output,
}

impl LayerKind {
    fn neuron_kind(self) -> NeuronKind {
        match self {
            LayerKind::Input => NeuronKind::Input,
            LayerKind::Middle => NeuronKind::Middle,
            LayerKind::Output => NeuronKind::Output,
        }
    }
}

/// An ordered group of neurons living in a `Graph`. If the layer has a bias neuron, it is the
/// last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    kind: LayerKind,
    neurons: Vec<NeuronId>,
    bias: bool,
}

impl Layer {
    /// Creates a new `Layer`, adding its neurons to `graph`.
    ///
    /// # Arguments
    /// * `graph` - The arena the neurons are stored in.
    /// * `kind` - The position of the layer in the network.
    /// * `size` - The amount of functional neurons.
    /// * `bias` - The constant a bias neuron emits, `None` for no bias neuron. Output layers
    ///   never get one.
    ///
    /// # Returns
    /// A new `Layer` instance.
    pub fn new(graph: &mut Graph, kind: LayerKind, size: usize, bias: Option<f64>) -> Self {
        let mut neurons: Vec<_> = (0..size)
            .map(|_| graph.add(Neuron::new(kind.neuron_kind())))
            .collect();

        let bias = match bias {
            Some(value) if kind != LayerKind::Output => {
                neurons.push(graph.add(Neuron::bias(value)));
                true
            }
            _ => false,
        };

        Self {
            kind,
            neurons,
            bias,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Every neuron id of this layer, bias included.
    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub fn has_bias(&self) -> bool {
        self.bias
    }

    /// The amount of neurons that can be assigned an input.
    pub fn size(&self) -> usize {
        self.neurons.len() - usize::from(self.bias)
    }

    /// Fully connects this layer to `next`. Must be called before initializing the weights.
    pub fn connect_to(&self, next: &Layer, graph: &mut Graph) {
        for &from in &self.neurons {
            for &to in &next.neurons {
                graph.connect(from, to);
            }
        }
    }

    pub fn initialize_weights<R: Rng + ?Sized>(&self, graph: &mut Graph, rng: &mut R) {
        for &id in &self.neurons {
            graph.initialize_weights(id, rng);
        }
    }

    /// Assigns `values` positionally to the inputs of the first neurons.
    ///
    /// # Errors
    /// `NetErr::SizeMismatch` if there are more values than assignable neurons.
    pub fn set_inputs(&self, graph: &mut Graph, values: &[f64]) -> Result<()> {
        if values.len() > self.size() {
            return Err(NetErr::SizeMismatch {
                what: "input values",
                got: values.len(),
                expected: self.size(),
            });
        }

        for (&id, &value) in self.neurons.iter().zip(values) {
            graph.neuron_mut(id).set_input(value);
        }

        Ok(())
    }

    pub fn clear_inputs(&self, graph: &mut Graph) {
        for &id in &self.neurons {
            graph.clear_input(id);
        }
    }

    pub fn forward(&self, graph: &mut Graph) -> Result<()> {
        for &id in &self.neurons {
            graph.forward(id)?;
        }

        Ok(())
    }

    /// Runs the learning step of every neuron.
    ///
    /// # Arguments
    /// * `graph` - The arena the neurons are stored in.
    /// * `ideal` - The expected outputs, only read by output layers.
    /// * `learning_rate` - The length of the gradient step.
    /// * `momentum` - The fraction of the previous step carried into this one.
    ///
    /// # Errors
    /// `NetErr::SizeMismatch` if this is an output layer and `ideal` doesn't have one value per
    /// neuron, or whatever error the neurons fail with.
    pub fn learn(
        &self,
        graph: &mut Graph,
        ideal: &[f64],
        learning_rate: f64,
        momentum: f64,
    ) -> Result<()> {
        if self.kind != LayerKind::Output {
            for &id in &self.neurons {
                graph.learn(id, 0., learning_rate, momentum)?;
            }

            return Ok(());
        }

        if ideal.len() != self.neurons.len() {
            return Err(NetErr::SizeMismatch {
                what: "ideal values",
                got: ideal.len(),
                expected: self.neurons.len(),
            });
        }

        for (&id, &value) in self.neurons.iter().zip(ideal) {
            graph.learn(id, value, learning_rate, momentum)?;
        }

        Ok(())
    }

    /// The outputs of every neuron, bias included.
    pub fn collect_outputs(&self, graph: &Graph) -> Vec<f64> {
        self.neurons
            .iter()
            .map(|&id| graph.neuron(id).output())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn output_layers_never_get_a_bias_neuron() {
        let mut graph = Graph::new();
        let middle = Layer::new(&mut graph, LayerKind::Middle, 3, Some(1.));
        let output = Layer::new(&mut graph, LayerKind::Output, 2, Some(1.));

        assert_eq!(middle.neurons().len(), 4);
        assert!(graph.neuron(middle.neurons()[3]).is_bias());
        assert_eq!(output.neurons().len(), 2);
        assert!(!output.has_bias());
    }

    #[test]
    fn weights_skip_the_next_layers_bias() {
        let mut graph = Graph::new();
        let input = Layer::new(&mut graph, LayerKind::Input, 2, Some(1.));
        let middle = Layer::new(&mut graph, LayerKind::Middle, 3, Some(1.));
        input.connect_to(&middle, &mut graph);
        input.initialize_weights(&mut graph, &mut StdRng::seed_from_u64(42));

        for &id in input.neurons() {
            assert_eq!(graph.neuron(id).next().len(), 4);
            assert_eq!(graph.neuron(id).weights().len(), 3);
        }
        for &id in middle.neurons() {
            assert_eq!(graph.neuron(id).previous().len(), 3);
        }
    }

    #[test]
    fn set_inputs_fills_positionally() {
        let mut graph = Graph::new();
        let layer = Layer::new(&mut graph, LayerKind::Input, 3, Some(1.));
        layer.set_inputs(&mut graph, &[0.1, 0.2]).unwrap();

        let inputs: Vec<_> = layer
            .neurons()
            .iter()
            .map(|&id| graph.neuron(id).input())
            .collect();
        assert_eq!(inputs, [0.1, 0.2, 0., 1.]);
    }

    #[test]
    fn set_inputs_rejects_writing_into_the_bias() {
        let mut graph = Graph::new();
        let layer = Layer::new(&mut graph, LayerKind::Input, 2, Some(1.));
        let err = layer.set_inputs(&mut graph, &[0.1, 0.2, 0.3]).unwrap_err();

        assert_eq!(
            err,
            NetErr::SizeMismatch {
                what: "input values",
                got: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn output_learning_requires_one_ideal_per_neuron() {
        let mut graph = Graph::new();
        let layer = Layer::new(&mut graph, LayerKind::Output, 3, None);
        assert!(layer.learn(&mut graph, &[1., 0.], 0.7, 0.3).is_err());
        assert!(layer.learn(&mut graph, &[1., 0., 0.], 0.7, 0.3).is_ok());
    }

    #[test]
    fn collect_outputs_includes_the_bias() {
        let mut graph = Graph::new();
        let layer = Layer::new(&mut graph, LayerKind::Middle, 1, Some(1.));
        layer.forward(&mut graph).unwrap();
        assert_eq!(layer.collect_outputs(&graph), [0.5, 1.]);
    }
}
