use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::{arch::NeuronId, dataset::DatasetErr};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, NetErr>;

/// The crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum NetErr {
    /// A configuration value is out of its valid range.
    InvalidOption {
        option: &'static str,
        reason: &'static str,
    },
    /// A configuration document couldn't be read or parsed.
    Config(String),
    /// A supplied vector doesn't fit the layer or neuron it was given to.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A neuron's weight vector doesn't match its wired outbound edges.
    UninitializedWeights {
        neuron: NeuronId,
        got: usize,
        expected: usize,
    },
    /// A neuron id that doesn't belong to the graph.
    UnknownNeuron { neuron: NeuronId, len: usize },
    /// A saved network whose state doesn't match its own options.
    CorruptedNetwork(String),
    Dataset(DatasetErr),
}

impl Display for NetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetErr::InvalidOption { option, reason } => {
                write!(f, "invalid option {option}: {reason}")
            }
            NetErr::Config(msg) => write!(f, "invalid config: {msg}"),
            NetErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            NetErr::UninitializedWeights {
                neuron,
                got,
                expected,
            } => write!(
                f,
                "neuron {neuron} has {got} weights but {expected} outbound edges, \
                 were the weights initialized after wiring?"
            ),
            NetErr::UnknownNeuron { neuron, len } => {
                write!(f, "there's no neuron {neuron} in a graph of {len} neurons")
            }
            NetErr::CorruptedNetwork(msg) => write!(f, "corrupted network: {msg}"),
            NetErr::Dataset(e) => write!(f, "dataset error: {e}"),
        }
    }
}

impl Error for NetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetErr::Dataset(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DatasetErr> for NetErr {
    fn from(value: DatasetErr) -> Self {
        Self::Dataset(value)
    }
}
