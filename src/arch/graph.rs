use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Neuron, NeuronId, NeuronKind};
use crate::{NetErr, Result};

/// The arena every neuron of a network lives in.
///
/// Neurons reference each other through their `NeuronId`, so the whole graph can be cloned and
/// serialized without caring about reference cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    neurons: Vec<Neuron>,
}

impl Graph {
    /// Creates a new empty `Graph`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a neuron into the arena.
    ///
    /// # Returns
    /// The id the neuron can be addressed with from now on.
    pub fn add(&mut self, neuron: Neuron) -> NeuronId {
        self.neurons.push(neuron);
        self.neurons.len() - 1
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// # Panics
    /// If `id` wasn't handed out by this graph.
    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id]
    }

    pub(super) fn neuron_mut(&mut self, id: NeuronId) -> &mut Neuron {
        &mut self.neurons[id]
    }

    /// Adds a directed edge between two neurons.
    pub fn connect(&mut self, from: NeuronId, to: NeuronId) {
        self.neurons[from].link_next(to);
        self.neurons[to].link_previous(from);
    }

    /// The outbound neighbours of `id` that own a weight slot, in weight order.
    pub fn weighted_targets(&self, id: NeuronId) -> impl Iterator<Item = NeuronId> + '_ {
        self.neurons[id]
            .next()
            .iter()
            .copied()
            .filter(|&target| !self.neurons[target].is_bias())
    }

    /// Reseeds the weights of a neuron, one per weighted target, uniformly from `[-0.5, 0.5)`.
    ///
    /// The previous weight deltas are left untouched.
    pub fn initialize_weights<R: Rng + ?Sized>(&mut self, id: NeuronId, rng: &mut R) {
        let weights = self
            .weighted_targets(id)
            .map(|_| rng.random::<f64>() - 0.5)
            .collect();

        self.neurons[id].set_weights(weights);
    }

    /// Replaces the weights of a neuron.
    ///
    /// # Errors
    /// `NetErr::UnknownNeuron` if `id` isn't in the graph, `NetErr::SizeMismatch` if `weights`
    /// doesn't have one value per weighted target.
    pub fn set_weights(&mut self, id: NeuronId, weights: Vec<f64>) -> Result<()> {
        if id >= self.neurons.len() {
            return Err(NetErr::UnknownNeuron {
                neuron: id,
                len: self.neurons.len(),
            });
        }

        let expected = self.weighted_targets(id).count();
        if weights.len() != expected {
            return Err(NetErr::SizeMismatch {
                what: "weights",
                got: weights.len(),
                expected,
            });
        }

        self.neurons[id].set_weights(weights);
        Ok(())
    }

    /// Resets the accumulated input of a neuron.
    pub fn clear_input(&mut self, id: NeuronId) {
        self.neurons[id].clear_input();
    }

    /// Activates a neuron and accumulates its weighted signal into every weighted target.
    ///
    /// # Errors
    /// `NetErr::UninitializedWeights` if the weights don't match the wiring.
    pub fn forward(&mut self, id: NeuronId) -> Result<()> {
        let targets = self.checked_targets(id)?;

        let neuron = &mut self.neurons[id];
        neuron.activate();
        let signal = neuron.signal();

        for (slot, target) in targets.into_iter().enumerate() {
            let weight = self.neurons[id].weights()[slot];
            self.neurons[target].add_input(weight * signal);
        }

        Ok(())
    }

    /// Computes the delta of a neuron and, unless it is an output neuron, updates its weights.
    ///
    /// Non-output neurons read the deltas of their targets, so the downstream layer must have
    /// learned already.
    ///
    /// # Arguments
    /// * `id` - The neuron.
    /// * `ideal` - The expected output, only read by output neurons.
    /// * `learning_rate` - The length of the gradient step.
    /// * `momentum` - The fraction of the previous step carried into this one.
    ///
    /// # Errors
    /// `NetErr::UninitializedWeights` if the weights don't match the wiring.
    pub fn learn(
        &mut self,
        id: NeuronId,
        ideal: f64,
        learning_rate: f64,
        momentum: f64,
    ) -> Result<()> {
        if self.neurons[id].kind() == NeuronKind::Output {
            self.neurons[id].learn_ideal(ideal);
            return Ok(());
        }

        let deltas: Vec<f64> = self
            .checked_targets(id)?
            .into_iter()
            .map(|target| self.neurons[target].delta())
            .collect();

        let neuron = &mut self.neurons[id];
        let sum: f64 = neuron.weights().iter().zip(&deltas).map(|(w, d)| w * d).sum();
        let delta = sum * neuron.derivative();
        neuron.set_delta(delta);
        neuron.update_weights(&deltas, learning_rate, momentum);

        Ok(())
    }

    fn checked_targets(&self, id: NeuronId) -> Result<Vec<NeuronId>> {
        let targets: Vec<_> = self.weighted_targets(id).collect();
        let got = self.neurons[id].weights().len();

        if got != targets.len() {
            return Err(NetErr::UninitializedWeights {
                neuron: id,
                got,
                expected: targets.len(),
            });
        }

        Ok(targets)
    }
}
