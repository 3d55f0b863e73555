//! Makes available common structures needed to evaluate the model
//!
//! You may write `use micromorph::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{MicroError, Mode, ParamMicromorphic, SampleParams, SampleStates, Settings, StressConfiguration};
pub use crate::base::{Tangents, Ten2, Ten3, Values};
pub use crate::boundary::{evaluate_model, evaluate_model_with_jacobians, ModelInput, ModelResponse};
pub use crate::material::{linear_elasticity, linear_elasticity_reference, map_stresses_to_current, reference_stresses};
pub use crate::material::ElasticTensors;
