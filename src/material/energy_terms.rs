use crate::base::{delta, i2, i3, MicroError, Mode, Ten2, Ten3, Ten4, Ten6, DIM, SIZE2, SIZE3};
use russell_lab::Matrix;

/// Holds Term1 = A:E + D:ℰ
pub struct Term1<M: Mode> {
    pub value: Ten2,
    pub deriv: M::Slot<Term1Deriv>,
}

/// Holds the derivatives of Term1
pub struct Term1Deriv {
    /// ∂Term1/∂E (9×9)
    pub d_d_green_lagrange: Matrix,

    /// ∂Term1/∂ℰ (9×9)
    pub d_d_micro_strain: Matrix,
}

/// Holds Term2 = (B:ℰ + Dᵀ:E)·(C⁻¹Ψ)ᵀ
pub struct Term2<M: Mode> {
    pub value: Ten2,
    pub deriv: M::Slot<Term2Deriv>,
}

/// Holds the derivatives of Term2
pub struct Term2Deriv {
    /// ∂Term2/∂E (9×9)
    pub d_d_green_lagrange: Matrix,

    /// ∂Term2/∂ℰ (9×9)
    pub d_d_micro_strain: Matrix,

    /// ∂Term2/∂(C⁻¹Ψ) (9×9)
    pub d_d_inv_rcg_psi: Matrix,
}

/// Holds the reference higher-order stress M = C⋮Γ
pub struct HigherOrderStress<M: Mode> {
    pub value: Ten3,

    /// ∂M/∂Γ (27×27)
    pub deriv: M::Slot<Matrix>,
}

/// Holds Term3 = M⋅⋅(C⁻¹Γ)
pub struct Term3<M: Mode> {
    pub value: Ten2,
    pub deriv: M::Slot<Term3Deriv>,
}

/// Holds the derivatives of Term3
pub struct Term3Deriv {
    /// ∂Term3/∂(C⁻¹Γ) (9×27)
    pub d_d_inv_rcg_gamma: Matrix,

    /// ∂Term3/∂M (9×27)
    pub d_d_higher_order: Matrix,
}

/// Computes the first stress term
///
/// ```text
/// Term1_IJ = A_IJKL E_KL + D_IJKL ℰ_KL
/// ```
///
/// where E = ½(C - I) is the Green-Lagrange strain and ℰ = Ψ - I is the micro-strain.
pub fn linear_elastic_term1<M: Mode>(
    green_lagrange: &Ten2,
    micro_strain: &Ten2,
    a: &Ten4,
    d: &Ten4,
) -> Result<Term1<M>, MicroError> {
    let value = a.ddot(green_lagrange) + d.ddot(micro_strain);
    let deriv = M::compute(|| {
        Ok(Term1Deriv {
            d_d_green_lagrange: a.as_matrix(),
            d_d_micro_strain: d.as_matrix(),
        })
    })?;
    Ok(Term1 { value, deriv })
}

/// Computes the second stress term
///
/// ```text
/// Term2_IJ = (B_IQKL ℰ_KL + E_KL D_KLIQ) (C⁻¹Ψ)_JQ
/// ```
pub fn linear_elastic_term2<M: Mode>(
    green_lagrange: &Ten2,
    micro_strain: &Ten2,
    inv_rcg_psi: &Ten2,
    b: &Ten4,
    d: &Ten4,
) -> Result<Term2<M>, MicroError> {
    // left_IQ = B_IQKL ℰ_KL + E_KL D_KLIQ
    let mut left = b.ddot(micro_strain);
    for ii in 0..DIM {
        for q in 0..DIM {
            let mut sum = 0.0;
            for k in 0..DIM {
                for l in 0..DIM {
                    sum += green_lagrange.get(k, l) * d.get(k, l, ii, q);
                }
            }
            left.set(ii, q, left.get(ii, q) + sum);
        }
    }
    let mut value = Ten2::new();
    for ii in 0..DIM {
        for jj in 0..DIM {
            let mut sum = 0.0;
            for q in 0..DIM {
                sum += left.get(ii, q) * inv_rcg_psi.get(jj, q);
            }
            value.set(ii, jj, sum);
        }
    }
    let deriv = M::compute(|| {
        let mut d_d_green_lagrange = Matrix::new(SIZE2, SIZE2);
        let mut d_d_micro_strain = Matrix::new(SIZE2, SIZE2);
        let mut d_d_inv_rcg_psi = Matrix::new(SIZE2, SIZE2);
        for ii in 0..DIM {
            for jj in 0..DIM {
                for aa in 0..DIM {
                    for bb in 0..DIM {
                        let mut de = 0.0;
                        let mut dm = 0.0;
                        for q in 0..DIM {
                            de += d.get(aa, bb, ii, q) * inv_rcg_psi.get(jj, q);
                            dm += b.get(ii, q, aa, bb) * inv_rcg_psi.get(jj, q);
                        }
                        d_d_green_lagrange.set(i2(ii, jj), i2(aa, bb), de);
                        d_d_micro_strain.set(i2(ii, jj), i2(aa, bb), dm);
                        d_d_inv_rcg_psi.set(i2(ii, jj), i2(aa, bb), delta(jj, aa) * left.get(ii, bb));
                    }
                }
            }
        }
        Ok(Term2Deriv {
            d_d_green_lagrange,
            d_d_micro_strain,
            d_d_inv_rcg_psi,
        })
    })?;
    Ok(Term2 { value, deriv })
}

/// Computes the reference higher-order stress
///
/// ```text
/// M_IJK = C_JKILMN Γ_LMN
/// ```
pub fn reference_higher_order_stress<M: Mode>(gamma: &Ten3, c: &Ten6) -> Result<HigherOrderStress<M>, MicroError> {
    let mut value = Ten3::new();
    for ii in 0..DIM {
        for jj in 0..DIM {
            for kk in 0..DIM {
                let mut sum = 0.0;
                for l in 0..DIM {
                    for m in 0..DIM {
                        for n in 0..DIM {
                            sum += c.get(jj, kk, ii, l, m, n) * gamma.get(l, m, n);
                        }
                    }
                }
                value.set(ii, jj, kk, sum);
            }
        }
    }
    let deriv = M::compute(|| {
        let mut d_d_gamma = Matrix::new(SIZE3, SIZE3);
        for ii in 0..DIM {
            for jj in 0..DIM {
                for kk in 0..DIM {
                    for l in 0..DIM {
                        for m in 0..DIM {
                            for n in 0..DIM {
                                d_d_gamma.set(i3(ii, jj, kk), i3(l, m, n), c.get(jj, kk, ii, l, m, n));
                            }
                        }
                    }
                }
            }
        }
        Ok(d_d_gamma)
    })?;
    Ok(HigherOrderStress { value, deriv })
}

/// Computes the third stress term
///
/// ```text
/// Term3_IJ = M_IQR (C⁻¹Γ)_JQR
/// ```
pub fn linear_elastic_term3<M: Mode>(
    inv_rcg_gamma: &Ten3,
    higher_order_stress: &Ten3,
) -> Result<Term3<M>, MicroError> {
    let mm = higher_order_stress;
    let mut value = Ten2::new();
    for ii in 0..DIM {
        for jj in 0..DIM {
            let mut sum = 0.0;
            for q in 0..DIM {
                for r in 0..DIM {
                    sum += mm.get(ii, q, r) * inv_rcg_gamma.get(jj, q, r);
                }
            }
            value.set(ii, jj, sum);
        }
    }
    let deriv = M::compute(|| {
        let mut d_d_inv_rcg_gamma = Matrix::new(SIZE2, SIZE3);
        let mut d_d_higher_order = Matrix::new(SIZE2, SIZE3);
        for ii in 0..DIM {
            for jj in 0..DIM {
                for bb in 0..DIM {
                    for cc in 0..DIM {
                        // ∂Term3_IJ/∂(C⁻¹Γ)_ABC = δ_JA M_IBC
                        d_d_inv_rcg_gamma.set(i2(ii, jj), i3(jj, bb, cc), mm.get(ii, bb, cc));
                        // ∂Term3_IJ/∂M_ABC = δ_IA (C⁻¹Γ)_JBC
                        d_d_higher_order.set(i2(ii, jj), i3(ii, bb, cc), inv_rcg_gamma.get(jj, bb, cc));
                    }
                }
            }
        }
        Ok(Term3Deriv {
            d_d_inv_rcg_gamma,
            d_d_higher_order,
        })
    })?;
    Ok(Term3 { value, deriv })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
