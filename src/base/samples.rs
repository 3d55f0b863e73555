use super::{ParamMicromorphic, DIM, SIZE2};

/// Holds samples of material parameters
pub struct SampleParams {}

/// Holds samples of kinematic states (displacement and micro-displacement gradients)
pub struct SampleStates {}

impl SampleParams {
    /// Returns sample parameters for a micromorphic material
    pub fn param_micromorphic() -> ParamMicromorphic {
        ParamMicromorphic {
            lambda: 2.0,
            mu: 1.5,
            eta: 1.2,
            tau: 0.8,
            kappa: 0.6,
            nu: 0.5,
            sigma: 0.4,
            taus: vec![0.5, 0.4, 0.3, 0.25, 0.2, 0.15, 0.12, 0.1, 0.08, 0.06, 0.04],
            tau_d: 0.3,
            sigma_d: 0.2,
        }
    }
}

impl SampleStates {
    /// Returns a displacement gradient ∇u with stretch, shear and rotation
    pub fn grad_u() -> [[f64; DIM]; DIM] {
        [
            [0.020, -0.010, 0.015],
            [0.030, -0.012, 0.008],
            [-0.005, 0.011, 0.025],
        ]
    }

    /// Returns a micro-displacement φ (row-major 3×3)
    pub fn phi() -> [f64; SIZE2] {
        [0.012, 0.004, -0.007, -0.003, 0.018, 0.006, 0.009, -0.002, -0.011]
    }

    /// Returns a gradient of the micro-displacement ∇φ (9×3)
    pub fn grad_phi() -> [[f64; DIM]; SIZE2] {
        [
            [0.010, -0.004, 0.002],
            [0.003, 0.007, -0.001],
            [-0.006, 0.002, 0.005],
            [0.001, -0.008, 0.004],
            [0.009, 0.003, -0.002],
            [-0.004, 0.006, 0.001],
            [0.002, -0.001, 0.008],
            [0.005, 0.004, -0.003],
            [-0.007, 0.002, 0.006],
        ]
    }
}
