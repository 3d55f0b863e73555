//! Micromorph - quadratic micromorphic linear elasticity
//!
//! This crate evaluates the reference (S, Σ, M) and current (σ, s, m) stresses of
//! a micromorphic continuum whose free energy is quadratic in the strain measures
//!
//! ```text
//! E = ½(C - I),   ℰ = Ψ - I,   Γ = Fᵀ ∇χ
//! ```
//!
//! Every operation is a single function generic over [base::Mode]: with
//! [base::Values] only the stresses are computed, and with [base::Tangents] the
//! consistent Jacobians are computed as well.
//!
//! # Example
//!
//! ```
//! use micromorph::prelude::*;
//!
//! let tensors = ElasticTensors::new(&SampleParams::param_micromorphic()).unwrap();
//! let grad_u = SampleStates::grad_u();
//! let phi = SampleStates::phi();
//! let grad_phi = SampleStates::grad_phi();
//! let res = linear_elasticity::<Tangents>(&grad_u, &phi, &grad_phi, &tensors).unwrap();
//! assert_eq!(res.deriv.d_cauchy_d_grad_u.dims(), (9, 9));
//! assert_eq!(res.deriv.d_higher_d_grad_phi.dims(), (27, 27));
//! ```

pub mod base;
pub mod boundary;
pub mod material;
pub mod prelude;
