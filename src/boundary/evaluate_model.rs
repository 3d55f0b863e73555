use super::ModelInput;
use crate::base::{to_rows, MicroError, Settings, StressConfiguration, Tangents, Values, Within, SIZE2, SIZE3};
use crate::material::{linear_elasticity, linear_elasticity_reference, ElasticTensors};
use serde::Serialize;

/// Status code of a successful evaluation
pub const STATUS_SUCCESS: i32 = 1;

/// Status code of a recoverable failure (e.g., the host may cut the time step)
///
/// Negative codes are reserved for fatal conditions.
pub const STATUS_RECOVERABLE: i32 = 0;

/// Holds the stresses reported to the host solver
///
/// With [StressConfiguration::Reference] the fields hold (S, Σ, M); with
/// [StressConfiguration::Current] they hold (σ, s, m).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelOutput {
    /// Configuration of the stresses (and Jacobians)
    pub configuration: StressConfiguration,

    /// Second-order stress (9)
    pub stress: Vec<f64>,

    /// Symmetric micro-stress (9)
    pub micro_stress: Vec<f64>,

    /// Higher-order stress (27)
    pub higher_order_stress: Vec<f64>,

    /// Host data returned unchanged
    #[serde(flatten)]
    pub pass_through: PassThrough,

    /// Jacobians (only computed on request)
    pub jacobians: Option<ModelJacobians>,
}

/// Holds the host data the model hands back untouched, on success and on failure
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PassThrough {
    /// State variables
    pub state_variables: Vec<f64>,

    /// Additional residual terms of coupled physics
    pub additional_terms: Vec<Vec<f64>>,

    /// Jacobians of the additional terms
    pub additional_jacobians: Vec<Vec<Vec<f64>>>,
}

impl PassThrough {
    /// Copies the pass-through slots of the input
    pub fn new(input: &ModelInput) -> Self {
        PassThrough {
            state_variables: input.state_variables.clone(),
            additional_terms: input.additional_terms.clone(),
            additional_jacobians: input.additional_jacobians.clone(),
        }
    }
}

/// Holds the Jacobians of the reported stresses as nested rows (stress length × input length)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelJacobians {
    pub d_stress_d_grad_u: Vec<Vec<f64>>,
    pub d_stress_d_phi: Vec<Vec<f64>>,
    pub d_stress_d_grad_phi: Vec<Vec<f64>>,
    pub d_micro_stress_d_grad_u: Vec<Vec<f64>>,
    pub d_micro_stress_d_phi: Vec<Vec<f64>>,
    pub d_micro_stress_d_grad_phi: Vec<Vec<f64>>,
    pub d_higher_order_stress_d_grad_u: Vec<Vec<f64>>,
    pub d_higher_order_stress_d_phi: Vec<Vec<f64>>,
    pub d_higher_order_stress_d_grad_phi: Vec<Vec<f64>>,
}

/// Holds the outcome of an evaluation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ModelResponse {
    /// The stresses were computed
    Success(ModelOutput),

    /// The evaluation failed; the message holds the whole error chain
    Failure { message: String, pass_through: PassThrough },
}

impl ModelResponse {
    /// Returns the status code expected by the host solver
    pub fn code(&self) -> i32 {
        match self {
            ModelResponse::Success(_) => STATUS_SUCCESS,
            ModelResponse::Failure { .. } => STATUS_RECOVERABLE,
        }
    }

    /// Returns the message (empty on success)
    pub fn message(&self) -> &str {
        match self {
            ModelResponse::Success(_) => "",
            ModelResponse::Failure { message, .. } => message,
        }
    }

    /// Returns the host data handed back by the model
    pub fn pass_through(&self) -> &PassThrough {
        match self {
            ModelResponse::Success(output) => &output.pass_through,
            ModelResponse::Failure { pass_through, .. } => pass_through,
        }
    }

    /// Returns the output, if successful
    pub fn output(&self) -> Option<&ModelOutput> {
        match self {
            ModelResponse::Success(output) => Some(output),
            ModelResponse::Failure { .. } => None,
        }
    }
}

/// Evaluates the stresses
pub fn evaluate_model(input: &ModelInput, settings: &Settings) -> ModelResponse {
    respond(input, settings, false)
}

/// Evaluates the stresses and their Jacobians with respect to ∇u, φ and ∇φ
pub fn evaluate_model_with_jacobians(input: &ModelInput, settings: &Settings) -> ModelResponse {
    respond(input, settings, true)
}

/// Converts the result of an evaluation into a response and logs the outcome
fn respond(input: &ModelInput, settings: &Settings, with_jacobians: bool) -> ModelResponse {
    tracing::debug!(
        "evaluating micromorphic linear elasticity: time={:?}, {}, jacobians={}",
        input.time,
        settings,
        with_jacobians
    );
    match evaluate(input, settings, with_jacobians) {
        Ok(output) => {
            tracing::debug!("evaluation succeeded");
            ModelResponse::Success(output)
        }
        Err(err) => {
            tracing::warn!("evaluation failed: {}", err);
            ModelResponse::Failure {
                message: format!("{}", err),
                pass_through: PassThrough::new(input),
            }
        }
    }
}

/// Runs the model in the requested configuration and mode
fn evaluate(input: &ModelInput, settings: &Settings, with_jacobians: bool) -> Result<ModelOutput, MicroError> {
    const STAGE: &str = "evaluate model";
    let tensors = ElasticTensors::from_flat(&input.fparams).within(STAGE)?;
    let (gu, p, gp) = (&input.current_grad_u, &input.current_phi, &input.current_grad_phi);
    let (stresses, jacobians) = match (settings.output, with_jacobians) {
        (StressConfiguration::Reference, false) => {
            let r = linear_elasticity_reference::<Values>(gu, p, gp, &tensors).within(STAGE)?;
            ((r.pk2, r.micro_stress, r.higher_order_stress), None)
        }
        (StressConfiguration::Reference, true) => {
            let r = linear_elasticity_reference::<Tangents>(gu, p, gp, &tensors).within(STAGE)?;
            let d = r.deriv;
            let jacobians = ModelJacobians {
                d_stress_d_grad_u: to_rows(&d.d_pk2_d_grad_u),
                d_stress_d_phi: to_rows(&d.d_pk2_d_phi),
                d_stress_d_grad_phi: to_rows(&d.d_pk2_d_grad_phi),
                d_micro_stress_d_grad_u: to_rows(&d.d_micro_d_grad_u),
                d_micro_stress_d_phi: to_rows(&d.d_micro_d_phi),
                d_micro_stress_d_grad_phi: to_rows(&d.d_micro_d_grad_phi),
                d_higher_order_stress_d_grad_u: to_rows(&d.d_higher_d_grad_u),
                d_higher_order_stress_d_phi: vec![vec![0.0; SIZE2]; SIZE3],
                d_higher_order_stress_d_grad_phi: to_rows(&d.d_higher_d_grad_phi),
            };
            ((r.pk2, r.micro_stress, r.higher_order_stress), Some(jacobians))
        }
        (StressConfiguration::Current, false) => {
            let r = linear_elasticity::<Values>(gu, p, gp, &tensors).within(STAGE)?;
            ((r.cauchy, r.micro_stress, r.higher_order_stress), None)
        }
        (StressConfiguration::Current, true) => {
            let r = linear_elasticity::<Tangents>(gu, p, gp, &tensors).within(STAGE)?;
            let d = r.deriv;
            let jacobians = ModelJacobians {
                d_stress_d_grad_u: to_rows(&d.d_cauchy_d_grad_u),
                d_stress_d_phi: to_rows(&d.d_cauchy_d_phi),
                d_stress_d_grad_phi: to_rows(&d.d_cauchy_d_grad_phi),
                d_micro_stress_d_grad_u: to_rows(&d.d_micro_d_grad_u),
                d_micro_stress_d_phi: to_rows(&d.d_micro_d_phi),
                d_micro_stress_d_grad_phi: to_rows(&d.d_micro_d_grad_phi),
                d_higher_order_stress_d_grad_u: to_rows(&d.d_higher_d_grad_u),
                d_higher_order_stress_d_phi: to_rows(&d.d_higher_d_phi),
                d_higher_order_stress_d_grad_phi: to_rows(&d.d_higher_d_grad_phi),
            };
            ((r.cauchy, r.micro_stress, r.higher_order_stress), Some(jacobians))
        }
    };
    let (stress, micro_stress, higher_order_stress) = stresses;
    Ok(ModelOutput {
        configuration: settings.output,
        stress: stress.as_slice().to_vec(),
        micro_stress: micro_stress.as_slice().to_vec(),
        higher_order_stress: higher_order_stress.as_slice().to_vec(),
        pass_through: PassThrough::new(input),
        jacobians,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
