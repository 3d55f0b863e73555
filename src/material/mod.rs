//! Implements the quadratic micromorphic linear elasticity model

mod energy_terms;
mod fundamental;
mod isotropic;
mod kinematics;
mod linear_elasticity;
mod push_forward;
mod reference_stress;
pub use crate::material::energy_terms::*;
pub use crate::material::fundamental::*;
pub use crate::material::isotropic::*;
pub use crate::material::kinematics::*;
pub use crate::material::linear_elasticity::*;
pub use crate::material::push_forward::*;
pub use crate::material::reference_stress::*;
