use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Graph, Layer, LayerKind, NeuronId};
use crate::{NetErr, Result, config::NetworkOptions};

/// A feedforward network: an optional input layer, zero or more middle layers and an optional
/// output layer, wired one after the other.
///
/// Information flows forward on `work` and the deltas flow backward on `learn`. A network must
/// not run two cycles at the same time, a cycle being inject → forward → learn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkDraft")]
pub struct Network {
    options: NetworkOptions,
    graph: Graph,
    input: Option<Layer>,
    middle: Vec<Layer>,
    output: Option<Layer>,
    output_values: Option<Vec<f64>>,
}

impl Network {
    /// Creates a new `Network` with the topology described by `options`.
    ///
    /// The weights start empty, `initialize_weights` must be called before the first cycle.
    ///
    /// # Arguments
    /// * `options` - The configuration of the network, fixed from now on.
    ///
    /// # Returns
    /// A new `Network` instance.
    pub fn new(options: NetworkOptions) -> Self {
        let network = Self::build(options);

        info!(
            "built {:?} network with {} neurons",
            network.options.archetype(),
            network.graph.len()
        );
        debug!(
            "input: {:?}, middle: {:?}, output: {:?}",
            network.input.as_ref().map(Layer::size),
            network.middle.iter().map(Layer::size).collect::<Vec<_>>(),
            network.output.as_ref().map(Layer::size),
        );

        network
    }

    fn build(options: NetworkOptions) -> Self {
        let mut graph = Graph::new();
        let bias = options.bias();

        let input = options
            .use_input_layer()
            .then(|| Layer::new(&mut graph, LayerKind::Input, options.input_neurons(), bias));

        let middle: Vec<_> = options
            .archetype()
            .middle_sizes(options.middle_neurons(), options.middle_layers())
            .into_iter()
            .map(|size| Layer::new(&mut graph, LayerKind::Middle, size, bias))
            .collect();

        let output = options
            .use_output_layer()
            .then(|| Layer::new(&mut graph, LayerKind::Output, options.output_neurons(), bias));

        let chain: Vec<_> = ordered(&input, &middle, &output).collect();
        for pair in chain.windows(2) {
            pair[0].connect_to(pair[1], &mut graph);
        }

        Self {
            options,
            graph,
            input,
            middle,
            output,
            output_values: None,
        }
    }

    pub fn options(&self) -> &NetworkOptions {
        &self.options
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn input_layer(&self) -> Option<&Layer> {
        self.input.as_ref()
    }

    pub fn middle_layers(&self) -> &[Layer] {
        &self.middle
    }

    pub fn output_layer(&self) -> Option<&Layer> {
        self.output.as_ref()
    }

    /// Every layer, from input to output.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        ordered(&self.input, &self.middle, &self.output)
    }

    /// The outputs of the last forward pass, `None` before the first one or if the network has
    /// no output layer.
    pub fn output(&self) -> Option<&[f64]> {
        self.output_values.as_deref()
    }

    /// Re-randomizes every weight in the network.
    pub fn initialize_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Self {
            graph,
            input,
            middle,
            output,
            ..
        } = self;

        for layer in ordered(input, middle, output) {
            layer.initialize_weights(graph, rng);
        }
    }

    /// Installs an explicit weight vector on a neuron.
    ///
    /// # Errors
    /// `NetErr::SizeMismatch` if the vector doesn't have one value per weighted target.
    pub fn set_weights(&mut self, id: NeuronId, weights: Vec<f64>) -> Result<()> {
        self.graph.set_weights(id, weights)
    }

    /// Runs a full forward cycle: injects the inputs, forwards every layer in order, captures
    /// the output and clears the accumulated inputs.
    ///
    /// # Arguments
    /// * `inputs` - The values for the input layer, if any.
    ///
    /// # Errors
    /// `NetErr::SizeMismatch` if there are more inputs than input neurons,
    /// `NetErr::UninitializedWeights` if the weights were never initialized.
    pub fn work(&mut self, inputs: Option<&[f64]>) -> Result<()> {
        let Self {
            graph,
            input,
            middle,
            output,
            output_values,
            ..
        } = self;

        if let Some(values) = inputs {
            match input.as_ref() {
                Some(layer) => layer.set_inputs(graph, values)?,
                None => warn!("the network has no input layer, ignoring {} inputs", values.len()),
            }
        }

        for layer in ordered(input, middle, output) {
            layer.forward(graph)?;
        }

        if let Some(layer) = output.as_ref() {
            *output_values = Some(layer.collect_outputs(graph));
        }

        for layer in ordered(input, middle, output) {
            layer.clear_inputs(graph);
        }

        Ok(())
    }

    /// Runs the backward pass from output to input, updating every weight.
    ///
    /// Each layer reads the deltas of the one after it, so the layers learn strictly in reverse
    /// order.
    ///
    /// # Arguments
    /// * `ideal` - The expected outputs. Without them the output layer is skipped.
    ///
    /// # Errors
    /// `NetErr::SizeMismatch` if `ideal` doesn't have one value per output neuron.
    pub fn learn(&mut self, ideal: Option<&[f64]>) -> Result<()> {
        let learning_rate = self.options.learning_rate();
        let momentum = self.options.momentum();

        if let (Some(layer), Some(ideal)) = (&self.output, ideal) {
            layer.learn(&mut self.graph, ideal, learning_rate, momentum)?;
        }

        for layer in self.middle.iter().rev() {
            layer.learn(&mut self.graph, &[], learning_rate, momentum)?;
        }

        if let Some(layer) = &self.input {
            layer.learn(&mut self.graph, &[], learning_rate, momentum)?;
        }

        Ok(())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new(NetworkOptions::default())
    }
}

/// The unchecked shape of a `Network` as read from a file.
#[derive(Deserialize)]
struct NetworkDraft {
    options: NetworkOptions,
    graph: Graph,
    input: Option<Layer>,
    middle: Vec<Layer>,
    output: Option<Layer>,
    output_values: Option<Vec<f64>>,
}

impl TryFrom<NetworkDraft> for Network {
    type Error = NetErr;

    /// Accepts the draft only if its layers and wiring are exactly the ones its options build
    /// and every weight vector is either empty or fits its neuron's weighted targets.
    fn try_from(draft: NetworkDraft) -> Result<Self> {
        let expected = Network::build(draft.options.clone());
        let corrupted = |msg: String| -> Result<Self> { Err(NetErr::CorruptedNetwork(msg)) };

        if draft.input != expected.input
            || draft.middle != expected.middle
            || draft.output != expected.output
        {
            return corrupted("the layers don't match the options".into());
        }

        if draft.graph.len() != expected.graph.len() {
            return corrupted(format!(
                "expected {} neurons, found {}",
                expected.graph.len(),
                draft.graph.len()
            ));
        }

        for id in 0..expected.graph.len() {
            let (got, want) = (draft.graph.neuron(id), expected.graph.neuron(id));
            if got.kind() != want.kind()
                || got.next() != want.next()
                || got.previous() != want.previous()
            {
                return corrupted(format!("neuron {id} isn't wired as its options describe"));
            }

            let slots = expected.graph.weighted_targets(id).count();
            let weights = got.weights().len();
            if (weights != 0 && weights != slots) || got.last_weight_deltas().len() > slots {
                return corrupted(format!(
                    "neuron {id} has {weights} weights for {slots} weighted targets"
                ));
            }
        }

        if let (Some(values), Some(layer)) = (&draft.output_values, &expected.output) {
            if values.len() != layer.neurons().len() {
                return corrupted("the stored output doesn't fit the output layer".into());
            }
        }

        Ok(Self {
            options: draft.options,
            graph: draft.graph,
            input: draft.input,
            middle: draft.middle,
            output: draft.output,
            output_values: draft.output_values,
        })
    }
}

fn ordered<'a>(
    input: &'a Option<Layer>,
    middle: &'a [Layer],
    output: &'a Option<Layer>,
) -> impl Iterator<Item = &'a Layer> {
    input.iter().chain(middle).chain(output.iter())
}
