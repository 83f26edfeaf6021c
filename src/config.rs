use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

pub use crate::arch::Archetype;
use crate::{NetErr, Result};

const COUNT_REASON: &str = "count of neurons can't be less than 1";

/// Everything needed to build a `Network`.
///
/// Every setter validates its value, an invalid one is rejected with
/// `NetErr::InvalidOption` and the previous value is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionsDraft")]
pub struct NetworkOptions {
    archetype: Archetype,
    input_neurons: usize,
    middle_neurons: usize,
    output_neurons: usize,
    middle_layers: usize,
    use_bias: bool,
    use_input_layer: bool,
    use_output_layer: bool,
    learning_rate: f64,
    momentum: f64,
    bias_value: f64,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            archetype: Archetype::Perceptron,
            input_neurons: 1,
            middle_neurons: 1,
            output_neurons: 1,
            middle_layers: 1,
            use_bias: true,
            use_input_layer: true,
            use_output_layer: true,
            learning_rate: 0.7,
            momentum: 0.3,
            bias_value: 1.,
        }
    }
}

impl NetworkOptions {
    /// Creates a new `NetworkOptions` with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON document. Missing fields take their default value.
    ///
    /// # Errors
    /// `NetErr::Config` if the document is malformed, `NetErr::InvalidOption` if a value is out
    /// of range.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let draft: OptionsDraft = serde_json::from_str(content)
            .map_err(|e| NetErr::Config(format!("invalid JSON: {e}")))?;

        Self::try_from(draft)
    }

    /// Reads and parses options from a JSON file.
    ///
    /// # Errors
    /// Same as `from_json_str`, plus `NetErr::Config` if the file can't be read.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| NetErr::Config(format!("cannot read '{}': {e}", path.display())))?;

        Self::from_json_str(&content)
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn input_neurons(&self) -> usize {
        self.input_neurons
    }

    pub fn middle_neurons(&self) -> usize {
        self.middle_neurons
    }

    pub fn output_neurons(&self) -> usize {
        self.output_neurons
    }

    pub fn middle_layers(&self) -> usize {
        self.middle_layers
    }

    pub fn use_bias(&self) -> bool {
        self.use_bias
    }

    pub fn use_input_layer(&self) -> bool {
        self.use_input_layer
    }

    pub fn use_output_layer(&self) -> bool {
        self.use_output_layer
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn bias_value(&self) -> f64 {
        self.bias_value
    }

    /// The constant bias neurons emit, or `None` if the network has no bias neurons.
    pub fn bias(&self) -> Option<f64> {
        self.use_bias.then_some(self.bias_value)
    }

    pub fn set_archetype(&mut self, archetype: Archetype) -> &mut Self {
        self.archetype = archetype;
        self
    }

    pub fn set_input_neurons(&mut self, count: usize) -> Result<&mut Self> {
        self.input_neurons = non_zero("input_neurons", count)?;
        Ok(self)
    }

    pub fn set_middle_neurons(&mut self, count: usize) -> Result<&mut Self> {
        self.middle_neurons = non_zero("middle_neurons", count)?;
        Ok(self)
    }

    pub fn set_output_neurons(&mut self, count: usize) -> Result<&mut Self> {
        self.output_neurons = non_zero("output_neurons", count)?;
        Ok(self)
    }

    pub fn set_middle_layers(&mut self, count: usize) -> &mut Self {
        self.middle_layers = count;
        self
    }

    pub fn set_use_bias(&mut self, use_bias: bool) -> &mut Self {
        self.use_bias = use_bias;
        self
    }

    pub fn set_use_input_layer(&mut self, use_input_layer: bool) -> &mut Self {
        self.use_input_layer = use_input_layer;
        self
    }

    pub fn set_use_output_layer(&mut self, use_output_layer: bool) -> &mut Self {
        self.use_output_layer = use_output_layer;
        self
    }

    /// # Errors
    /// `NetErr::InvalidOption` unless `0 < learning_rate <= 1`.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<&mut Self> {
        if !(learning_rate > 0. && learning_rate <= 1.) {
            return Err(NetErr::InvalidOption {
                option: "learning_rate",
                reason: "must be in (0, 1]",
            });
        }

        self.learning_rate = learning_rate;
        Ok(self)
    }

    /// # Errors
    /// `NetErr::InvalidOption` unless `0 < momentum < 1`.
    pub fn set_momentum(&mut self, momentum: f64) -> Result<&mut Self> {
        if !(momentum > 0. && momentum < 1.) {
            return Err(NetErr::InvalidOption {
                option: "momentum",
                reason: "must be in (0, 1)",
            });
        }

        self.momentum = momentum;
        Ok(self)
    }

    /// # Errors
    /// `NetErr::InvalidOption` if `value` is not finite.
    pub fn set_bias_value(&mut self, value: f64) -> Result<&mut Self> {
        if !value.is_finite() {
            return Err(NetErr::InvalidOption {
                option: "bias_value",
                reason: "must be finite",
            });
        }

        self.bias_value = value;
        Ok(self)
    }
}

fn non_zero(option: &'static str, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(NetErr::InvalidOption {
            option,
            reason: COUNT_REASON,
        });
    }

    Ok(count)
}

fn non_negative(option: &'static str, count: i64, reason: &'static str) -> Result<usize> {
    usize::try_from(count).map_err(|_| NetErr::InvalidOption { option, reason })
}

/// The unvalidated shape of `NetworkOptions` as read from a file.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct OptionsDraft {
    archetype: Archetype,
    input_neurons: i64,
    middle_neurons: i64,
    output_neurons: i64,
    middle_layers: i64,
    use_bias: bool,
    use_input_layer: bool,
    use_output_layer: bool,
    learning_rate: f64,
    momentum: f64,
    bias_value: f64,
}

impl Default for OptionsDraft {
    fn default() -> Self {
        let defaults = NetworkOptions::default();

        Self {
            archetype: defaults.archetype,
            input_neurons: defaults.input_neurons as i64,
            middle_neurons: defaults.middle_neurons as i64,
            output_neurons: defaults.output_neurons as i64,
            middle_layers: defaults.middle_layers as i64,
            use_bias: defaults.use_bias,
            use_input_layer: defaults.use_input_layer,
            use_output_layer: defaults.use_output_layer,
            learning_rate: defaults.learning_rate,
            momentum: defaults.momentum,
            bias_value: defaults.bias_value,
        }
    }
}

impl TryFrom<OptionsDraft> for NetworkOptions {
    type Error = NetErr;

    fn try_from(draft: OptionsDraft) -> Result<Self> {
        let input_neurons = non_negative("input_neurons", draft.input_neurons, COUNT_REASON)?;
        let middle_neurons = non_negative("middle_neurons", draft.middle_neurons, COUNT_REASON)?;
        let output_neurons = non_negative("output_neurons", draft.output_neurons, COUNT_REASON)?;
        let middle_layers = non_negative(
            "middle_layers",
            draft.middle_layers,
            "count of middle layers can't be negative",
        )?;

        let mut options = NetworkOptions::default();
        options
            .set_archetype(draft.archetype)
            .set_input_neurons(input_neurons)?
            .set_middle_neurons(middle_neurons)?
            .set_output_neurons(output_neurons)?
            .set_middle_layers(middle_layers)
            .set_use_bias(draft.use_bias)
            .set_use_input_layer(draft.use_input_layer)
            .set_use_output_layer(draft.use_output_layer)
            .set_learning_rate(draft.learning_rate)?
            .set_momentum(draft.momentum)?
            .set_bias_value(draft.bias_value)?;

        Ok(options)
    }
}
