use crate::base::{delta, i2, i3, MicroError, Mode, Ten2, Ten3, DIM, SIZE2, SIZE3};
use russell_lab::Matrix;

/// Holds the derived deformation measures C, Ψ and Γ
pub struct DeformationMeasures<M: Mode> {
    /// Right Cauchy-Green tensor C = Fᵀ F (9)
    pub right_cauchy_green: Ten2,

    /// Micro-deformation measure Ψ = Fᵀ χ (9)
    pub psi: Ten2,

    /// Micro-gradient measure Γ = Fᵀ ∇χ (27)
    pub gamma: Ten3,

    /// Derivatives with respect to F, χ and ∇χ
    pub deriv: M::Slot<DeformationMeasuresDeriv>,
}

/// Holds the derivatives of the derived deformation measures
pub struct DeformationMeasuresDeriv {
    /// ∂C/∂F (9×9)
    pub d_rcg_d_f: Matrix,

    /// ∂Ψ/∂F (9×9)
    pub d_psi_d_f: Matrix,

    /// ∂Ψ/∂χ (9×9)
    pub d_psi_d_chi: Matrix,

    /// ∂Γ/∂F (27×9)
    pub d_gamma_d_f: Matrix,

    /// ∂Γ/∂∇χ (27×27)
    pub d_gamma_d_grad_chi: Matrix,
}

/// Holds a pull-back product C⁻¹·X (X = Ψ or Γ)
pub struct InvRcgProduct<T, M: Mode> {
    /// The product C⁻¹·X
    pub value: T,

    /// Derivatives with respect to C and X
    pub deriv: M::Slot<InvRcgProductDeriv>,
}

/// Holds the derivatives of a pull-back product C⁻¹·X
pub struct InvRcgProductDeriv {
    /// ∂(C⁻¹X)/∂C
    pub d_d_rcg: Matrix,

    /// ∂(C⁻¹X)/∂X
    pub d_d_x: Matrix,
}

/// Computes C, Ψ and Γ by contracting the first index of F with F, χ and ∇χ
///
/// ```text
/// C_IJ  = F_iI F_iJ
/// Ψ_IJ  = F_iI χ_iJ
/// Γ_IJK = F_iI ∇χ_iJK
/// ```
pub fn compute_deformation_measures<M: Mode>(
    deformation_gradient: &Ten2,
    micro_deformation: &Ten2,
    gradient_micro_deformation: &Ten3,
) -> Result<DeformationMeasures<M>, MicroError> {
    let ff = deformation_gradient;
    let chi = micro_deformation;
    let grad_chi = gradient_micro_deformation;
    let mut rcg = Ten2::new();
    let mut psi = Ten2::new();
    let mut gamma = Ten3::new();
    for ii in 0..DIM {
        for jj in 0..DIM {
            let mut c_ij = 0.0;
            let mut psi_ij = 0.0;
            for i in 0..DIM {
                c_ij += ff.get(i, ii) * ff.get(i, jj);
                psi_ij += ff.get(i, ii) * chi.get(i, jj);
            }
            rcg.set(ii, jj, c_ij);
            psi.set(ii, jj, psi_ij);
            for kk in 0..DIM {
                let mut g = 0.0;
                for i in 0..DIM {
                    g += ff.get(i, ii) * grad_chi.get(i, jj, kk);
                }
                gamma.set(ii, jj, kk, g);
            }
        }
    }
    let deriv = M::compute(|| {
        let mut d_rcg_d_f = Matrix::new(SIZE2, SIZE2);
        let mut d_psi_d_f = Matrix::new(SIZE2, SIZE2);
        let mut d_psi_d_chi = Matrix::new(SIZE2, SIZE2);
        let mut d_gamma_d_f = Matrix::new(SIZE3, SIZE2);
        let mut d_gamma_d_grad_chi = Matrix::new(SIZE3, SIZE3);
        for ii in 0..DIM {
            for jj in 0..DIM {
                for k in 0..DIM {
                    for kk in 0..DIM {
                        // ∂C_IJ/∂F_kK = δ_IK F_kJ + F_kI δ_JK
                        d_rcg_d_f.set(
                            i2(ii, jj),
                            i2(k, kk),
                            delta(ii, kk) * ff.get(k, jj) + ff.get(k, ii) * delta(jj, kk),
                        );
                        // ∂Ψ_IJ/∂F_kK = δ_IK χ_kJ
                        d_psi_d_f.set(i2(ii, jj), i2(k, kk), delta(ii, kk) * chi.get(k, jj));
                        // ∂Ψ_IJ/∂χ_kK = F_kI δ_JK
                        d_psi_d_chi.set(i2(ii, jj), i2(k, kk), ff.get(k, ii) * delta(jj, kk));
                    }
                }
                for kk in 0..DIM {
                    for l in 0..DIM {
                        // ∂Γ_IJK/∂F_lL = δ_IL ∇χ_lJK
                        d_gamma_d_f.set(i3(ii, jj, kk), i2(l, ii), grad_chi.get(l, jj, kk));
                        // ∂Γ_IJK/∂∇χ_lLM = F_lI δ_JL δ_KM
                        d_gamma_d_grad_chi.set(i3(ii, jj, kk), i3(l, jj, kk), ff.get(l, ii));
                    }
                }
            }
        }
        Ok(DeformationMeasuresDeriv {
            d_rcg_d_f,
            d_psi_d_f,
            d_psi_d_chi,
            d_gamma_d_f,
            d_gamma_d_grad_chi,
        })
    })?;
    Ok(DeformationMeasures {
        right_cauchy_green: rcg,
        psi,
        gamma,
        deriv,
    })
}

/// Computes C⁻¹Ψ given C⁻¹ (the caller performs the inversion)
///
/// ```text
/// (C⁻¹Ψ)_IJ = C⁻¹_IK Ψ_KJ
/// ∂(C⁻¹Ψ)_IJ/∂C_AB = -C⁻¹_IA (C⁻¹Ψ)_BJ
/// ∂(C⁻¹Ψ)_IJ/∂Ψ_AB = C⁻¹_IA δ_BJ
/// ```
pub fn compute_inv_rcg_psi<M: Mode>(inv_rcg: &Ten2, psi: &Ten2) -> Result<InvRcgProduct<Ten2, M>, MicroError> {
    let mut value = Ten2::new();
    for ii in 0..DIM {
        for jj in 0..DIM {
            let mut sum = 0.0;
            for kk in 0..DIM {
                sum += inv_rcg.get(ii, kk) * psi.get(kk, jj);
            }
            value.set(ii, jj, sum);
        }
    }
    let deriv = M::compute(|| {
        let mut d_d_rcg = Matrix::new(SIZE2, SIZE2);
        let mut d_d_x = Matrix::new(SIZE2, SIZE2);
        for ii in 0..DIM {
            for jj in 0..DIM {
                for a in 0..DIM {
                    for b in 0..DIM {
                        d_d_rcg.set(i2(ii, jj), i2(a, b), -inv_rcg.get(ii, a) * value.get(b, jj));
                        d_d_x.set(i2(ii, jj), i2(a, b), inv_rcg.get(ii, a) * delta(b, jj));
                    }
                }
            }
        }
        Ok(InvRcgProductDeriv { d_d_rcg, d_d_x })
    })?;
    Ok(InvRcgProduct { value, deriv })
}

/// Computes C⁻¹Γ given C⁻¹ (the caller performs the inversion)
///
/// ```text
/// (C⁻¹Γ)_IJK = C⁻¹_IL Γ_LJK
/// ∂(C⁻¹Γ)_IJK/∂C_AB = -C⁻¹_IA (C⁻¹Γ)_BJK
/// ∂(C⁻¹Γ)_IJK/∂Γ_ABC = C⁻¹_IA δ_JB δ_KC
/// ```
pub fn compute_inv_rcg_gamma<M: Mode>(inv_rcg: &Ten2, gamma: &Ten3) -> Result<InvRcgProduct<Ten3, M>, MicroError> {
    let mut value = Ten3::new();
    for ii in 0..DIM {
        for jj in 0..DIM {
            for kk in 0..DIM {
                let mut sum = 0.0;
                for ll in 0..DIM {
                    sum += inv_rcg.get(ii, ll) * gamma.get(ll, jj, kk);
                }
                value.set(ii, jj, kk, sum);
            }
        }
    }
    let deriv = M::compute(|| {
        let mut d_d_rcg = Matrix::new(SIZE3, SIZE2);
        let mut d_d_x = Matrix::new(SIZE3, SIZE3);
        for ii in 0..DIM {
            for jj in 0..DIM {
                for kk in 0..DIM {
                    for a in 0..DIM {
                        for b in 0..DIM {
                            d_d_rcg.set(i3(ii, jj, kk), i2(a, b), -inv_rcg.get(ii, a) * value.get(b, jj, kk));
                        }
                        d_d_x.set(i3(ii, jj, kk), i3(a, jj, kk), inv_rcg.get(ii, a));
                    }
                }
            }
        }
        Ok(InvRcgProductDeriv { d_d_rcg, d_d_x })
    })?;
    Ok(InvRcgProduct { value, deriv })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
