use crate::base::{delta, i2, i3, MicroError, Mode, Ten2, Ten3, Within, DIM, SIZE2, SIZE3};
use russell_lab::Matrix;

/// Holds the current-configuration stresses
pub struct CurrentStresses<D, M: Mode> {
    /// Cauchy stress σ (9)
    pub cauchy: Ten2,

    /// Current (symmetric) micro-stress s (9)
    pub micro_stress: Ten2,

    /// Current higher-order stress m (27)
    pub higher_order_stress: Ten3,

    /// Derivatives
    pub deriv: M::Slot<D>,
}

/// Holds the derivatives of the push-forward operation
pub struct PushForwardDeriv {
    /// ∂σ/∂F (9×9)
    pub d_cauchy_d_f: Matrix,

    /// ∂σ/∂S (9×9)
    pub d_cauchy_d_pk2: Matrix,

    /// ∂s/∂F (9×9)
    pub d_micro_d_f: Matrix,

    /// ∂s/∂Σ (9×9)
    pub d_micro_d_reference_micro: Matrix,

    /// ∂m/∂F (27×9)
    pub d_higher_d_f: Matrix,

    /// ∂m/∂χ (27×9)
    pub d_higher_d_chi: Matrix,

    /// ∂m/∂M (27×27)
    pub d_higher_d_reference_higher: Matrix,
}

/// Returns (1/J) F T Fᵀ
fn push_forward_second_order(ff: &Ten2, inv_det: f64, tt: &Ten2) -> Ten2 {
    let mut res = Ten2::new();
    for i in 0..DIM {
        for j in 0..DIM {
            let mut sum = 0.0;
            for ii in 0..DIM {
                for jj in 0..DIM {
                    sum += ff.get(i, ii) * tt.get(ii, jj) * ff.get(j, jj);
                }
            }
            res.set(i, j, inv_det * sum);
        }
    }
    res
}

/// Returns ∂t/∂F and ∂t/∂T for t = (1/J) F T Fᵀ
fn push_forward_second_order_deriv(
    ff: &Ten2,
    inv_ff: &Ten2,
    inv_det: f64,
    tt: &Ten2,
    pushed: &Ten2,
) -> (Matrix, Matrix) {
    // tft_Kj = T_KJ F_jJ and ft_iK = F_iI T_IK
    let mut tft = Ten2::new();
    let mut ft = Ten2::new();
    for a in 0..DIM {
        for b in 0..DIM {
            let (mut s1, mut s2) = (0.0, 0.0);
            for c in 0..DIM {
                s1 += tt.get(a, c) * ff.get(b, c);
                s2 += ff.get(a, c) * tt.get(c, b);
            }
            tft.set(a, b, s1);
            ft.set(a, b, s2);
        }
    }
    let mut d_d_f = Matrix::new(SIZE2, SIZE2);
    let mut d_d_t = Matrix::new(SIZE2, SIZE2);
    for i in 0..DIM {
        for j in 0..DIM {
            for k in 0..DIM {
                for kk in 0..DIM {
                    let value = -pushed.get(i, j) * inv_ff.get(kk, k)
                        + inv_det * (delta(i, k) * tft.get(kk, j) + ft.get(i, kk) * delta(j, k));
                    d_d_f.set(i2(i, j), i2(k, kk), value);
                    d_d_t.set(i2(i, j), i2(k, kk), inv_det * ff.get(i, k) * ff.get(j, kk));
                }
            }
        }
    }
    (d_d_f, d_d_t)
}

/// Maps the reference stresses to the current configuration
///
/// ```text
/// σ_ij  = (1/J) F_iI S_IJ F_jJ
/// s_ij  = (1/J) F_iI Σ_IJ F_jJ
/// m_ijk = (1/J) F_iI F_jJ χ_kK M_IJK
/// ```
///
/// with J = det(F). A non-positive J yields [MicroError::NonInvertibleDeformation].
pub fn map_stresses_to_current<M: Mode>(
    deformation_gradient: &Ten2,
    micro_deformation: &Ten2,
    pk2: &Ten2,
    reference_micro_stress: &Ten2,
    reference_higher_order_stress: &Ten3,
) -> Result<CurrentStresses<PushForwardDeriv, M>, MicroError> {
    const STAGE: &str = "push-forward";
    let ff = deformation_gradient;
    let chi = micro_deformation;
    let mm = reference_higher_order_stress;
    let det = ff.determinant();
    if !(det > 0.0) {
        return Err(MicroError::NonInvertibleDeformation { det }.within(STAGE));
    }
    let inv_det = 1.0 / det;

    let cauchy = push_forward_second_order(ff, inv_det, pk2);
    let micro_stress = push_forward_second_order(ff, inv_det, reference_micro_stress);

    // m_ijk
    let mut higher_order_stress = Ten3::new();
    for i in 0..DIM {
        for j in 0..DIM {
            for k in 0..DIM {
                let mut sum = 0.0;
                for ii in 0..DIM {
                    for jj in 0..DIM {
                        for kk in 0..DIM {
                            sum += ff.get(i, ii) * ff.get(j, jj) * chi.get(k, kk) * mm.get(ii, jj, kk);
                        }
                    }
                }
                higher_order_stress.set(i, j, k, inv_det * sum);
            }
        }
    }

    let deriv = M::compute(|| {
        let inv_ff = ff.inverse("deformation gradient")?;
        let (d_cauchy_d_f, d_cauchy_d_pk2) = push_forward_second_order_deriv(ff, &inv_ff, inv_det, pk2, &cauchy);
        let (d_micro_d_f, d_micro_d_reference_micro) =
            push_forward_second_order_deriv(ff, &inv_ff, inv_det, reference_micro_stress, &micro_stress);

        // partially mapped higher-order stress:
        // p1_Ljk = F_jJ χ_kK M_LJK
        // p2_iLk = F_iI χ_kK M_ILK
        // q_ijL  = F_iI F_jJ M_IJL
        let mut p1 = Ten3::new();
        let mut p2 = Ten3::new();
        let mut q = Ten3::new();
        for a in 0..DIM {
            for b in 0..DIM {
                for c in 0..DIM {
                    let (mut s1, mut s2, mut s3) = (0.0, 0.0, 0.0);
                    for x in 0..DIM {
                        for y in 0..DIM {
                            s1 += ff.get(b, x) * chi.get(c, y) * mm.get(a, x, y);
                            s2 += ff.get(a, x) * chi.get(c, y) * mm.get(x, b, y);
                            s3 += ff.get(a, x) * ff.get(b, y) * mm.get(x, y, c);
                        }
                    }
                    p1.set(a, b, c, s1);
                    p2.set(a, b, c, s2);
                    q.set(a, b, c, s3);
                }
            }
        }

        let mut d_higher_d_f = Matrix::new(SIZE3, SIZE2);
        let mut d_higher_d_chi = Matrix::new(SIZE3, SIZE2);
        let mut d_higher_d_reference_higher = Matrix::new(SIZE3, SIZE3);
        for i in 0..DIM {
            for j in 0..DIM {
                for k in 0..DIM {
                    let row = i3(i, j, k);
                    for l in 0..DIM {
                        for ll in 0..DIM {
                            let value = -higher_order_stress.get(i, j, k) * inv_ff.get(ll, l)
                                + inv_det * (delta(i, l) * p1.get(ll, j, k) + delta(j, l) * p2.get(i, ll, k));
                            d_higher_d_f.set(row, i2(l, ll), value);
                            d_higher_d_chi.set(row, i2(l, ll), inv_det * delta(k, l) * q.get(i, j, ll));
                            for n in 0..DIM {
                                d_higher_d_reference_higher.set(
                                    row,
                                    i3(l, ll, n),
                                    inv_det * ff.get(i, l) * ff.get(j, ll) * chi.get(k, n),
                                );
                            }
                        }
                    }
                }
            }
        }
        Ok(PushForwardDeriv {
            d_cauchy_d_f,
            d_cauchy_d_pk2,
            d_micro_d_f,
            d_micro_d_reference_micro,
            d_higher_d_f,
            d_higher_d_chi,
            d_higher_d_reference_higher,
        })
    })
    .within(STAGE)?;

    Ok(CurrentStresses {
        cauchy,
        micro_stress,
        higher_order_stress,
        deriv,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
