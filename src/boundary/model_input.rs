use crate::base::{ParamMicromorphic, SampleStates, DIM, SIZE2};
use serde::{Deserialize, Serialize};

/// Holds the data a host solver provides at one integration point
///
/// Only the material parameters and the current kinematic state enter the
/// (stateless) model. The time span, the previous kinematic state, the state
/// variables and the additional degrees of freedom are accepted and left untouched.
/// The additional terms and their Jacobians belong to coupled physics and are
/// handed back to the host unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Current time and time increment
    #[serde(default)]
    pub time: [f64; 2],

    /// Flat material parameters `[2, λ, μ, 5, η, τ, κ, ν, σ, 11, τ₁…τ₁₁, 2, τ, σ]`
    pub fparams: Vec<f64>,

    /// Current displacement gradient ∂uᵢ/∂Xⱼ
    pub current_grad_u: [[f64; DIM]; DIM],

    /// Current micro-displacement φ (row-major)
    pub current_phi: [f64; SIZE2],

    /// Current gradient of the micro-displacement (row `3i+j` holds ∂φᵢⱼ/∂Xₖ)
    pub current_grad_phi: [[f64; DIM]; SIZE2],

    /// Previous displacement gradient
    #[serde(default)]
    pub previous_grad_u: [[f64; DIM]; DIM],

    /// Previous micro-displacement
    #[serde(default)]
    pub previous_phi: [f64; SIZE2],

    /// Previous gradient of the micro-displacement
    #[serde(default)]
    pub previous_grad_phi: [[f64; DIM]; SIZE2],

    /// State variables
    #[serde(default)]
    pub state_variables: Vec<f64>,

    /// Current values of additional degrees of freedom (coupled physics)
    #[serde(default)]
    pub current_additional_dofs: Vec<f64>,

    /// Previous values of additional degrees of freedom
    #[serde(default)]
    pub previous_additional_dofs: Vec<f64>,

    /// Current gradients of the additional degrees of freedom (one row per dof)
    #[serde(default)]
    pub current_additional_grad_dofs: Vec<Vec<f64>>,

    /// Previous gradients of the additional degrees of freedom
    #[serde(default)]
    pub previous_additional_grad_dofs: Vec<Vec<f64>>,

    /// Additional residual terms of coupled physics
    #[serde(default)]
    pub additional_terms: Vec<Vec<f64>>,

    /// Jacobians of the additional terms
    #[serde(default)]
    pub additional_jacobians: Vec<Vec<Vec<f64>>>,
}

impl ModelInput {
    /// Allocates a new instance at the undeformed state
    pub fn new(fparams: Vec<f64>) -> Self {
        ModelInput {
            time: [0.0, 0.0],
            fparams,
            current_grad_u: [[0.0; DIM]; DIM],
            current_phi: [0.0; SIZE2],
            current_grad_phi: [[0.0; DIM]; SIZE2],
            previous_grad_u: [[0.0; DIM]; DIM],
            previous_phi: [0.0; SIZE2],
            previous_grad_phi: [[0.0; DIM]; SIZE2],
            state_variables: Vec::new(),
            current_additional_dofs: Vec::new(),
            previous_additional_dofs: Vec::new(),
            current_additional_grad_dofs: Vec::new(),
            previous_additional_grad_dofs: Vec::new(),
            additional_terms: Vec::new(),
            additional_jacobians: Vec::new(),
        }
    }

    /// Allocates a new instance from named moduli
    pub fn from_param(param: &ParamMicromorphic) -> Self {
        ModelInput::new(param.to_flat())
    }

    /// Sets the current kinematic state
    pub fn set_state(
        &mut self,
        grad_u: &[[f64; DIM]; DIM],
        phi: &[f64; SIZE2],
        grad_phi: &[[f64; DIM]; SIZE2],
    ) -> &mut Self {
        self.current_grad_u = *grad_u;
        self.current_phi = *phi;
        self.current_grad_phi = *grad_phi;
        self
    }

    /// Returns a sample input with the sample moduli and the sample state
    pub fn sample(param: &ParamMicromorphic) -> Self {
        let mut input = ModelInput::from_param(param);
        input.set_state(&SampleStates::grad_u(), &SampleStates::phi(), &SampleStates::grad_phi());
        input
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
