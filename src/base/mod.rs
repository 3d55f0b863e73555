//! Implements the base structures: tensors, Jacobians, errors, and parameters

mod config;
mod error;
mod jacobian;
mod mode;
mod parameters;
mod samples;
mod tensors;
pub use crate::base::config::*;
pub use crate::base::error::*;
pub use crate::base::jacobian::*;
pub use crate::base::mode::*;
pub use crate::base::parameters::*;
pub use crate::base::samples::*;
pub use crate::base::tensors::*;

#[cfg(test)]
mod testing;
#[cfg(test)]
pub(crate) use crate::base::testing::*;
