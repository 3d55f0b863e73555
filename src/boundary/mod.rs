//! Implements the adapter between a host finite element solver and the material model

mod evaluate_model;
mod model_input;
pub use crate::boundary::evaluate_model::*;
pub use crate::boundary::model_input::*;
