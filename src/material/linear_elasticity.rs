use super::{assemble_fundamental_measures, map_stresses_to_current, reference_stresses};
use super::{CurrentStresses, ElasticTensors, ReferenceStresses};
use crate::base::{chain, sum, MicroError, Mode, Within, DIM, SIZE2};
use russell_lab::Matrix;

/// Holds the Jacobians of the current-configuration stresses with respect to ∇u, φ and ∇φ
pub struct StressJacobians {
    /// ∂σ/∂∇u (9×9)
    pub d_cauchy_d_grad_u: Matrix,

    /// ∂σ/∂φ (9×9)
    pub d_cauchy_d_phi: Matrix,

    /// ∂σ/∂∇φ (9×27)
    pub d_cauchy_d_grad_phi: Matrix,

    /// ∂s/∂∇u (9×9)
    pub d_micro_d_grad_u: Matrix,

    /// ∂s/∂φ (9×9)
    pub d_micro_d_phi: Matrix,

    /// ∂s/∂∇φ (9×27)
    pub d_micro_d_grad_phi: Matrix,

    /// ∂m/∂∇u (27×9)
    pub d_higher_d_grad_u: Matrix,

    /// ∂m/∂φ (27×9)
    pub d_higher_d_phi: Matrix,

    /// ∂m/∂∇φ (27×27)
    pub d_higher_d_grad_phi: Matrix,
}

/// Evaluates the quadratic micromorphic linear elasticity model
///
/// Runs the pipeline
///
/// ```text
/// (∇u, φ, ∇φ) → (F, χ, ∇χ) → (C, Ψ, Γ) → (S, Σ, M) → (σ, s, m)
/// ```
///
/// and, with [crate::base::Tangents], chains every intermediate Jacobian into
/// the derivatives of (σ, s, m) with respect to (∇u, φ, ∇φ).
///
/// The first failing stage aborts the evaluation; no stresses are returned in that case.
pub fn linear_elasticity<M: Mode>(
    grad_u: &[[f64; DIM]; DIM],
    phi: &[f64; SIZE2],
    grad_phi: &[[f64; DIM]; SIZE2],
    tensors: &ElasticTensors,
) -> Result<CurrentStresses<StressJacobians, M>, MicroError> {
    const STAGE: &str = "linear elasticity";
    let fundamental = assemble_fundamental_measures::<M>(grad_u, phi, grad_phi).within(STAGE)?;
    let ff = &fundamental.deformation_gradient;
    let chi = &fundamental.micro_deformation;
    let grad_chi = &fundamental.gradient_micro_deformation;
    let reference = reference_stresses::<M>(ff, chi, grad_chi, tensors).within(STAGE)?;
    let current = map_stresses_to_current::<M>(
        ff,
        chi,
        &reference.pk2,
        &reference.micro_stress,
        &reference.higher_order_stress,
    )
    .within(STAGE)?;

    let upstream = M::zip(fundamental.deriv, reference.deriv);
    let deriv = M::then(M::zip(upstream, current.deriv), |((df, dr), dp)| {
        // with respect to F, χ and ∇χ
        let d_cauchy_d_f = sum(&dp.d_cauchy_d_f, &chain(&dp.d_cauchy_d_pk2, &dr.d_pk2_d_f)?)?;
        let d_cauchy_d_chi = chain(&dp.d_cauchy_d_pk2, &dr.d_pk2_d_chi)?;
        let d_cauchy_d_grad_chi = chain(&dp.d_cauchy_d_pk2, &dr.d_pk2_d_grad_chi)?;
        let d_micro_d_f = sum(&dp.d_micro_d_f, &chain(&dp.d_micro_d_reference_micro, &dr.d_micro_d_f)?)?;
        let d_micro_d_chi = chain(&dp.d_micro_d_reference_micro, &dr.d_micro_d_chi)?;
        let d_micro_d_grad_chi = chain(&dp.d_micro_d_reference_micro, &dr.d_micro_d_grad_chi)?;
        let d_higher_d_f = sum(&dp.d_higher_d_f, &chain(&dp.d_higher_d_reference_higher, &dr.d_higher_d_f)?)?;
        let d_higher_d_grad_chi = chain(&dp.d_higher_d_reference_higher, &dr.d_higher_d_grad_chi)?;

        // with respect to ∇u, φ and ∇φ
        Ok(StressJacobians {
            d_cauchy_d_grad_u: chain(&d_cauchy_d_f, &df.d_f_d_grad_u)?,
            d_cauchy_d_phi: chain(&d_cauchy_d_chi, &df.d_chi_d_phi)?,
            d_cauchy_d_grad_phi: chain(&d_cauchy_d_grad_chi, &df.d_grad_chi_d_grad_phi)?,
            d_micro_d_grad_u: chain(&d_micro_d_f, &df.d_f_d_grad_u)?,
            d_micro_d_phi: chain(&d_micro_d_chi, &df.d_chi_d_phi)?,
            d_micro_d_grad_phi: chain(&d_micro_d_grad_chi, &df.d_grad_chi_d_grad_phi)?,
            d_higher_d_grad_u: chain(&d_higher_d_f, &df.d_f_d_grad_u)?,
            d_higher_d_phi: chain(&dp.d_higher_d_chi, &df.d_chi_d_phi)?,
            d_higher_d_grad_phi: chain(&d_higher_d_grad_chi, &df.d_grad_chi_d_grad_phi)?,
        })
    })
    .within(STAGE)?;

    Ok(CurrentStresses {
        cauchy: current.cauchy,
        micro_stress: current.micro_stress,
        higher_order_stress: current.higher_order_stress,
        deriv,
    })
}

/// Holds the Jacobians of the reference-configuration stresses with respect to ∇u, φ and ∇φ
///
/// M does not depend on φ; thus ∂M/∂φ is not stored.
pub struct ReferenceStressJacobians {
    /// ∂S/∂∇u (9×9)
    pub d_pk2_d_grad_u: Matrix,

    /// ∂S/∂φ (9×9)
    pub d_pk2_d_phi: Matrix,

    /// ∂S/∂∇φ (9×27)
    pub d_pk2_d_grad_phi: Matrix,

    /// ∂Σ/∂∇u (9×9)
    pub d_micro_d_grad_u: Matrix,

    /// ∂Σ/∂φ (9×9)
    pub d_micro_d_phi: Matrix,

    /// ∂Σ/∂∇φ (9×27)
    pub d_micro_d_grad_phi: Matrix,

    /// ∂M/∂∇u (27×9)
    pub d_higher_d_grad_u: Matrix,

    /// ∂M/∂∇φ (27×27)
    pub d_higher_d_grad_phi: Matrix,
}

/// Evaluates the reference-configuration stresses (S, Σ, M) from (∇u, φ, ∇φ)
pub fn linear_elasticity_reference<M: Mode>(
    grad_u: &[[f64; DIM]; DIM],
    phi: &[f64; SIZE2],
    grad_phi: &[[f64; DIM]; SIZE2],
    tensors: &ElasticTensors,
) -> Result<ReferenceStresses<ReferenceStressJacobians, M>, MicroError> {
    const STAGE: &str = "linear elasticity (reference)";
    let fundamental = assemble_fundamental_measures::<M>(grad_u, phi, grad_phi).within(STAGE)?;
    let reference = reference_stresses::<M>(
        &fundamental.deformation_gradient,
        &fundamental.micro_deformation,
        &fundamental.gradient_micro_deformation,
        tensors,
    )
    .within(STAGE)?;
    let deriv = M::then(M::zip(fundamental.deriv, reference.deriv), |(df, dr)| {
        Ok(ReferenceStressJacobians {
            d_pk2_d_grad_u: chain(&dr.d_pk2_d_f, &df.d_f_d_grad_u)?,
            d_pk2_d_phi: chain(&dr.d_pk2_d_chi, &df.d_chi_d_phi)?,
            d_pk2_d_grad_phi: chain(&dr.d_pk2_d_grad_chi, &df.d_grad_chi_d_grad_phi)?,
            d_micro_d_grad_u: chain(&dr.d_micro_d_f, &df.d_f_d_grad_u)?,
            d_micro_d_phi: chain(&dr.d_micro_d_chi, &df.d_chi_d_phi)?,
            d_micro_d_grad_phi: chain(&dr.d_micro_d_grad_chi, &df.d_grad_chi_d_grad_phi)?,
            d_higher_d_grad_u: chain(&dr.d_higher_d_f, &df.d_f_d_grad_u)?,
            d_higher_d_grad_phi: chain(&dr.d_higher_d_grad_chi, &df.d_grad_chi_d_grad_phi)?,
        })
    })
    .within(STAGE)?;
    Ok(ReferenceStresses {
        pk2: reference.pk2,
        micro_stress: reference.micro_stress,
        higher_order_stress: reference.higher_order_stress,
        deriv,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{linear_elasticity, linear_elasticity_reference};
    use crate::base::{assert_jacobian, ErrorKind, RandomStates, SampleParams, SampleStates, Tangents, Values};
    use crate::material::{
        assemble_fundamental_measures, map_stresses_to_current, reference_stresses, ElasticTensors,
    };
    use russell_lab::approx_eq;

    fn tensors() -> ElasticTensors {
        ElasticTensors::new(&SampleParams::param_micromorphic()).unwrap()
    }

    fn to_grad_u(x: &[f64]) -> [[f64; 3]; 3] {
        let mut res = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                res[i][j] = x[3 * i + j];
            }
        }
        res
    }

    fn to_phi(x: &[f64]) -> [f64; 9] {
        let mut res = [0.0; 9];
        res.copy_from_slice(x);
        res
    }

    fn to_grad_phi(x: &[f64]) -> [[f64; 3]; 9] {
        let mut res = [[0.0; 3]; 9];
        for a in 0..9 {
            for k in 0..3 {
                res[a][k] = x[3 * a + k];
            }
        }
        res
    }

    /// Returns the sample state followed by seeded random states near the undeformed configuration
    fn states() -> Vec<([[f64; 3]; 3], [f64; 9], [[f64; 3]; 9])> {
        let mut res = vec![(SampleStates::grad_u(), SampleStates::phi(), SampleStates::grad_phi())];
        let mut rnd = RandomStates::new(2024);
        for _ in 0..4 {
            let gu = to_grad_u(rnd.small_ten2(0.05).as_slice());
            let p = to_phi(rnd.small_ten2(0.05).as_slice());
            let gp = to_grad_phi(rnd.small_ten3(0.02).as_slice());
            res.push((gu, p, gp));
        }
        res
    }

    #[test]
    fn zero_strain_gives_zero_stresses() {
        let tt = tensors();
        let res = linear_elasticity::<Values>(&[[0.0; 3]; 3], &[0.0; 9], &[[0.0; 3]; 9], &tt).unwrap();
        assert!(res.cauchy.as_slice().iter().all(|v| *v == 0.0));
        assert!(res.micro_stress.as_slice().iter().all(|v| *v == 0.0));
        assert!(res.higher_order_stress.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn values_and_tangents_agree() {
        let tt = tensors();
        let (gu, p, gp) = (SampleStates::grad_u(), SampleStates::phi(), SampleStates::grad_phi());
        let a = linear_elasticity::<Values>(&gu, &p, &gp, &tt).unwrap();
        let b = linear_elasticity::<Tangents>(&gu, &p, &gp, &tt).unwrap();
        assert_eq!(a.cauchy, b.cauchy);
        assert_eq!(a.micro_stress, b.micro_stress);
        assert_eq!(a.higher_order_stress, b.higher_order_stress);
    }

    #[test]
    fn pipeline_matches_stage_by_stage_evaluation() {
        let tt = tensors();
        let (gu, p, gp) = (SampleStates::grad_u(), SampleStates::phi(), SampleStates::grad_phi());
        let res = linear_elasticity::<Values>(&gu, &p, &gp, &tt).unwrap();
        let fm = assemble_fundamental_measures::<Values>(&gu, &p, &gp).unwrap();
        let (ff, chi, gchi) = (fm.deformation_gradient, fm.micro_deformation, fm.gradient_micro_deformation);
        let rs = reference_stresses::<Values>(&ff, &chi, &gchi, &tt).unwrap();
        let cs = map_stresses_to_current::<Values>(&ff, &chi, &rs.pk2, &rs.micro_stress, &rs.higher_order_stress)
            .unwrap();
        for a in 0..9 {
            approx_eq(res.cauchy.as_slice()[a], cs.cauchy.as_slice()[a], 1e-14);
            approx_eq(res.micro_stress.as_slice()[a], cs.micro_stress.as_slice()[a], 1e-14);
        }
        for a in 0..27 {
            approx_eq(res.higher_order_stress.as_slice()[a], cs.higher_order_stress.as_slice()[a], 1e-14);
        }
        let rr = linear_elasticity_reference::<Values>(&gu, &p, &gp, &tt).unwrap();
        assert_eq!(rr.pk2, rs.pk2);
        assert_eq!(rr.micro_stress, rs.micro_stress);
        assert_eq!(rr.higher_order_stress, rs.higher_order_stress);
    }

    #[test]
    fn reflection_is_captured() {
        // F = diag(1, 1, -1): C = I is invertible but J = -1
        let tt = tensors();
        let mut gu = [[0.0; 3]; 3];
        gu[2][2] = -2.0;
        let res = linear_elasticity::<Tangents>(&gu, &[0.0; 9], &[[0.0; 3]; 9], &tt);
        let err = res.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NonInvertibleDeformation);
        assert_eq!(err.trace(), &["linear elasticity", "push-forward"]);
    }

    #[test]
    fn current_jacobians_work() {
        let tt = tensors();
        for (gu, p, gp) in states() {
            check_current_jacobians(&tt, gu, p, gp);
        }
    }

    fn check_current_jacobians(tt: &ElasticTensors, gu: [[f64; 3]; 3], p: [f64; 9], gp: [[f64; 3]; 9]) {
        let res = linear_elasticity::<Tangents>(&gu, &p, &gp, tt).unwrap();
        let d = &res.deriv;
        let xu: Vec<f64> = gu.iter().flatten().copied().collect();
        let xp = p.to_vec();
        let xg: Vec<f64> = gp.iter().flatten().copied().collect();

        let eval = |u: &[[f64; 3]; 3], ph: &[f64; 9], g: &[[f64; 3]; 9]| {
            let r = linear_elasticity::<Values>(u, ph, g, tt).unwrap();
            let mut out = r.cauchy.as_slice().to_vec();
            out.extend_from_slice(r.micro_stress.as_slice());
            out.extend_from_slice(r.higher_order_stress.as_slice());
            out
        };

        assert_jacobian("dσ/d∇u", &d.d_cauchy_d_grad_u, &xu, |x| eval(&to_grad_u(x), &p, &gp)[0..9].to_vec());
        assert_jacobian("dσ/dφ", &d.d_cauchy_d_phi, &xp, |x| eval(&gu, &to_phi(x), &gp)[0..9].to_vec());
        assert_jacobian("dσ/d∇φ", &d.d_cauchy_d_grad_phi, &xg, |x| {
            eval(&gu, &p, &to_grad_phi(x))[0..9].to_vec()
        });
        assert_jacobian("ds/d∇u", &d.d_micro_d_grad_u, &xu, |x| eval(&to_grad_u(x), &p, &gp)[9..18].to_vec());
        assert_jacobian("ds/dφ", &d.d_micro_d_phi, &xp, |x| eval(&gu, &to_phi(x), &gp)[9..18].to_vec());
        assert_jacobian("ds/d∇φ", &d.d_micro_d_grad_phi, &xg, |x| {
            eval(&gu, &p, &to_grad_phi(x))[9..18].to_vec()
        });
        assert_jacobian("dm/d∇u", &d.d_higher_d_grad_u, &xu, |x| {
            eval(&to_grad_u(x), &p, &gp)[18..45].to_vec()
        });
        assert_jacobian("dm/dφ", &d.d_higher_d_phi, &xp, |x| eval(&gu, &to_phi(x), &gp)[18..45].to_vec());
        assert_jacobian("dm/d∇φ", &d.d_higher_d_grad_phi, &xg, |x| {
            eval(&gu, &p, &to_grad_phi(x))[18..45].to_vec()
        });
    }

    #[test]
    fn reference_jacobians_work() {
        let tt = tensors();
        for (gu, p, gp) in states() {
            check_reference_jacobians(&tt, gu, p, gp);
        }
    }

    fn check_reference_jacobians(tt: &ElasticTensors, gu: [[f64; 3]; 3], p: [f64; 9], gp: [[f64; 3]; 9]) {
        let res = linear_elasticity_reference::<Tangents>(&gu, &p, &gp, tt).unwrap();
        let d = &res.deriv;
        let xu: Vec<f64> = gu.iter().flatten().copied().collect();
        let xp = p.to_vec();
        let xg: Vec<f64> = gp.iter().flatten().copied().collect();

        let eval = |u: &[[f64; 3]; 3], ph: &[f64; 9], g: &[[f64; 3]; 9]| {
            let r = linear_elasticity_reference::<Values>(u, ph, g, tt).unwrap();
            let mut out = r.pk2.as_slice().to_vec();
            out.extend_from_slice(r.micro_stress.as_slice());
            out.extend_from_slice(r.higher_order_stress.as_slice());
            out
        };

        assert_jacobian("dS/d∇u", &d.d_pk2_d_grad_u, &xu, |x| eval(&to_grad_u(x), &p, &gp)[0..9].to_vec());
        assert_jacobian("dS/dφ", &d.d_pk2_d_phi, &xp, |x| eval(&gu, &to_phi(x), &gp)[0..9].to_vec());
        assert_jacobian("dS/d∇φ", &d.d_pk2_d_grad_phi, &xg, |x| eval(&gu, &p, &to_grad_phi(x))[0..9].to_vec());
        assert_jacobian("dΣ/d∇u", &d.d_micro_d_grad_u, &xu, |x| eval(&to_grad_u(x), &p, &gp)[9..18].to_vec());
        assert_jacobian("dΣ/dφ", &d.d_micro_d_phi, &xp, |x| eval(&gu, &to_phi(x), &gp)[9..18].to_vec());
        assert_jacobian("dΣ/d∇φ", &d.d_micro_d_grad_phi, &xg, |x| {
            eval(&gu, &p, &to_grad_phi(x))[9..18].to_vec()
        });
        assert_jacobian("dM/d∇u", &d.d_higher_d_grad_u, &xu, |x| {
            eval(&to_grad_u(x), &p, &gp)[18..45].to_vec()
        });
        assert_jacobian("dM/d∇φ", &d.d_higher_d_grad_phi, &xg, |x| {
            eval(&gu, &p, &to_grad_phi(x))[18..45].to_vec()
        });
    }
}
