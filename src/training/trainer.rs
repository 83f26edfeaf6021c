use std::num::NonZeroUsize;

use log::{debug, info};
use rand::Rng;

use crate::{
    Result,
    arch::{Network, loss::LossFn},
    dataset::Dataset,
};

/// Trains a `Network` on a `Dataset`, one example at a time.
pub struct Trainer<L: LossFn, R: Rng> {
    network: Network,
    dataset: Dataset,
    loss_fn: L,
    epochs: NonZeroUsize,
    rng: R,
}

impl<L: LossFn, R: Rng> Trainer<L, R> {
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `network` - The network that will be trained, its weights must be initialized.
    /// * `dataset` - The examples the network will be trained with.
    /// * `epochs` - The amount of passes over the whole dataset per `train` call.
    /// * `loss_fn` - Measures the difference between the network's output and the ideal one.
    /// * `rng` - Shuffles the dataset before every epoch.
    pub fn new(
        network: Network,
        dataset: Dataset,
        epochs: NonZeroUsize,
        loss_fn: L,
        rng: R,
    ) -> Self {
        Self {
            network,
            dataset,
            loss_fn,
            epochs,
            rng,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Performs `epochs` epochs of training. Every example runs a full inject → forward → learn
    /// cycle.
    ///
    /// # Returns
    /// The mean loss of every epoch, measured before each example is learned.
    ///
    /// # Errors
    /// Whatever the network fails with, usually a sizing error between the examples and the
    /// network's topology.
    pub fn train(&mut self) -> Result<Vec<f64>> {
        let epochs = self.epochs.get();
        let mut losses = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            self.dataset.shuffle(&mut self.rng);

            let mut total = 0.;
            for example in self.dataset.examples() {
                self.network.work(Some(&example.inputs))?;
                let actual = self.network.output().unwrap_or_default();
                total += self.loss_fn.loss(&example.ideal, actual);
                self.network.learn(Some(&example.ideal))?;
            }

            let loss = mean(total, self.dataset.len());
            debug!("epoch {epoch}: loss {loss}");
            losses.push(loss);
        }

        info!(
            "trained {epochs} epochs, final loss {}",
            losses.last().copied().unwrap_or_default()
        );

        Ok(losses)
    }

    /// Measures the mean loss over `dataset` without learning from it.
    ///
    /// # Errors
    /// Whatever the network fails with.
    pub fn evaluate(&mut self, dataset: &Dataset) -> Result<f64> {
        let mut total = 0.;
        for example in dataset.examples() {
            self.network.work(Some(&example.inputs))?;
            let actual = self.network.output().unwrap_or_default();
            total += self.loss_fn.loss(&example.ideal, actual);
        }

        Ok(mean(total, dataset.len()))
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 { 0. } else { total / count as f64 }
}
