mod graph;
mod layer;
pub mod loss;
mod network;
mod neuron;
pub mod sigmoid;
mod topology;

pub use graph::Graph;
pub use layer::{Layer, LayerKind};
pub use network::Network;
pub use neuron::{Neuron, NeuronId, NeuronKind};
pub use topology::Archetype;
