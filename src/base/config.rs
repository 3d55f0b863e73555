use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the configuration in which the adapter reports the stresses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressConfiguration {
    /// PK2, reference micro-stress Σ and reference higher-order stress M
    Reference,

    /// Cauchy stress σ, micro-stress s and higher-order stress m
    Current,
}

/// Holds options for the boundary adapter
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Configuration of the reported stresses and Jacobians
    pub output: StressConfiguration,
}

impl Settings {
    /// Allocates a new instance
    pub fn new() -> Self {
        Settings {
            output: StressConfiguration::Reference,
        }
    }

    /// Sets the configuration of the reported stresses
    pub fn set_output(&mut self, output: StressConfiguration) -> &mut Self {
        self.output = output;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output = {:?}", self.output)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
