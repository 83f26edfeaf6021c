use serde::{Deserialize, Serialize};

use super::sigmoid::{sigmoid, sigmoid_prime};

/// A stable index into the network's neuron arena.
pub type NeuronId = usize;

/// The role a neuron plays, it decides how the neuron activates and learns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuronKind {
    Input,
    Middle,
    Output,
    Bias,
}

/// A single unit of the network.
///
/// The neuron only knows its neighbours by id, the `Graph` that owns it resolves them. The i-th
/// weight belongs to the i-th non-bias neuron found while walking `next` in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    kind: NeuronKind,
    input: f64,
    output: f64,
    delta: f64,
    /// The input this neuron returns to when cleared, non-zero only for bias neurons.
    resting_input: f64,
    next: Vec<NeuronId>,
    previous: Vec<NeuronId>,
    weights: Vec<f64>,
    last_weight_deltas: Vec<f64>,
}

impl Neuron {
    /// Creates a new functional `Neuron`.
    ///
    /// # Arguments
    /// * `kind` - The role of the neuron.
    ///
    /// # Returns
    /// A new unconnected `Neuron` with every scalar at zero.
    pub fn new(kind: NeuronKind) -> Self {
        Self {
            kind,
            input: 0.,
            output: 0.,
            delta: 0.,
            resting_input: 0.,
            next: Vec::new(),
            previous: Vec::new(),
            weights: Vec::new(),
            last_weight_deltas: Vec::new(),
        }
    }

    /// Creates a new bias `Neuron` that constantly emits `value`.
    pub fn bias(value: f64) -> Self {
        Self {
            input: value,
            resting_input: value,
            ..Self::new(NeuronKind::Bias)
        }
    }

    pub fn kind(&self) -> NeuronKind {
        self.kind
    }

    pub fn is_bias(&self) -> bool {
        self.kind == NeuronKind::Bias
    }

    pub fn input(&self) -> f64 {
        self.input
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn last_weight_deltas(&self) -> &[f64] {
        &self.last_weight_deltas
    }

    pub fn next(&self) -> &[NeuronId] {
        &self.next
    }

    pub fn previous(&self) -> &[NeuronId] {
        &self.previous
    }

    pub(super) fn set_input(&mut self, value: f64) {
        self.input = value;
    }

    pub(super) fn add_input(&mut self, value: f64) {
        self.input += value;
    }

    pub(super) fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }

    pub(super) fn set_weights(&mut self, weights: Vec<f64>) {
        self.weights = weights;
    }

    pub(super) fn link_next(&mut self, id: NeuronId) {
        self.next.push(id);
    }

    pub(super) fn link_previous(&mut self, id: NeuronId) {
        self.previous.push(id);
    }

    /// Resets the accumulated input, a bias neuron goes back to its constant value.
    pub fn clear_input(&mut self) {
        self.input = self.resting_input;
    }

    /// Computes the output from the accumulated input. Bias neurons pass their input through.
    pub fn activate(&mut self) {
        self.output = match self.kind {
            NeuronKind::Bias => self.input,
            _ => sigmoid(self.input),
        };
    }

    /// The value this neuron multiplies its weights with, both when sending a signal forward and
    /// when computing the gradient of its weights.
    pub fn signal(&self) -> f64 {
        match self.kind {
            NeuronKind::Bias => self.resting_input,
            _ => self.output,
        }
    }

    /// The derivative of the activation at the current output.
    pub fn derivative(&self) -> f64 {
        match self.kind {
            NeuronKind::Bias => 1.,
            _ => sigmoid_prime(self.output),
        }
    }

    /// Computes the delta of an output neuron from its ideal value.
    pub fn learn_ideal(&mut self, ideal: f64) {
        self.delta = (ideal - self.output) * self.derivative();
    }

    /// Updates every outbound weight using the deltas of the neurons they point to.
    ///
    /// The momentum term is skipped for a weight that was never updated before.
    ///
    /// # Arguments
    /// * `deltas` - The downstream deltas, aligned with `weights`.
    /// * `learning_rate` - The length of the gradient step.
    /// * `momentum` - The fraction of the previous step carried into this one.
    pub fn update_weights(&mut self, deltas: &[f64], learning_rate: f64, momentum: f64) {
        let signal = self.signal();

        for (i, (w, d)) in self.weights.iter_mut().zip(deltas).enumerate() {
            let gradient = signal * d;
            let carried = self
                .last_weight_deltas
                .get(i)
                .map_or(0., |last| momentum * last);

            let step = learning_rate * gradient + carried;
            *w += step;

            match self.last_weight_deltas.get_mut(i) {
                Some(last) => *last = step,
                None => self.last_weight_deltas.push(step),
            }
        }
    }
}
