use crate::base::{i2, MicroError, Mode, Ten2, Ten3, DIM, SIZE2, SIZE3};
use russell_lab::Matrix;

/// Holds the fundamental deformation measures F, χ and ∇χ
pub struct FundamentalMeasures<M: Mode> {
    /// Deformation gradient F = I + ∇u (9)
    pub deformation_gradient: Ten2,

    /// Micro-deformation χ = I + φ (9)
    pub micro_deformation: Ten2,

    /// Gradient of the micro-deformation ∇χ (27)
    pub gradient_micro_deformation: Ten3,

    /// Derivatives with respect to ∇u, φ and ∇φ
    pub deriv: M::Slot<FundamentalMeasuresDeriv>,
}

/// Holds the (structurally trivial) derivatives of the fundamental measures
pub struct FundamentalMeasuresDeriv {
    /// ∂F/∂∇u (9×9)
    pub d_f_d_grad_u: Matrix,

    /// ∂χ/∂φ (9×9)
    pub d_chi_d_phi: Matrix,

    /// ∂∇χ/∂∇φ (27×27)
    pub d_grad_chi_d_grad_phi: Matrix,
}

/// Assembles F, χ and ∇χ from the displacement and micro-displacement gradients
///
/// ```text
/// Fᵢⱼ = δᵢⱼ + ∂uᵢ/∂Xⱼ
/// χᵢⱼ = δᵢⱼ + φᵢⱼ
/// ∇χᵢⱼₖ = ∂φᵢⱼ/∂Xₖ
/// ```
///
/// `phi` holds the row-major components of φ and row `3i+j` of `grad_phi`
/// holds the gradient of φᵢⱼ.
pub fn assemble_fundamental_measures<M: Mode>(
    grad_u: &[[f64; DIM]; DIM],
    phi: &[f64; SIZE2],
    grad_phi: &[[f64; DIM]; SIZE2],
) -> Result<FundamentalMeasures<M>, MicroError> {
    let deformation_gradient = Ten2::identity() + Ten2::from_matrix(grad_u);
    let micro_deformation = Ten2::identity() + Ten2::from_array(*phi);
    let mut gradient_micro_deformation = Ten3::new();
    for i in 0..DIM {
        for j in 0..DIM {
            for k in 0..DIM {
                gradient_micro_deformation.set(i, j, k, grad_phi[i2(i, j)][k]);
            }
        }
    }
    let deriv = M::compute(|| {
        Ok(FundamentalMeasuresDeriv {
            d_f_d_grad_u: Matrix::identity(SIZE2),
            d_chi_d_phi: Matrix::identity(SIZE2),
            d_grad_chi_d_grad_phi: Matrix::identity(SIZE3),
        })
    })?;
    Ok(FundamentalMeasures {
        deformation_gradient,
        micro_deformation,
        gradient_micro_deformation,
        deriv,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
