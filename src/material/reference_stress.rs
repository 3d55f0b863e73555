use super::{
    compute_deformation_measures, compute_inv_rcg_gamma, compute_inv_rcg_psi, linear_elastic_term1,
    linear_elastic_term2, linear_elastic_term3, reference_higher_order_stress, ElasticTensors,
};
use crate::base::{chain, chain_sum, scaled, sum, transpose_rows, MicroError, Mode, Ten2, Ten3, Within};
use crate::base::{SIZE2, SIZE3};
use russell_lab::Matrix;

/// Holds the reference-configuration stresses
pub struct ReferenceStresses<D, M: Mode> {
    /// Second Piola-Kirchhoff stress S (9)
    pub pk2: Ten2,

    /// Reference (symmetric) micro-stress Σ (9)
    pub micro_stress: Ten2,

    /// Reference higher-order stress M (27)
    pub higher_order_stress: Ten3,

    /// Derivatives (with respect to F, χ, ∇χ or to C, Ψ, Γ)
    pub deriv: M::Slot<D>,
}

/// Holds the derivatives of the reference stresses with respect to C, Ψ and Γ
pub struct MeasuresStressDeriv {
    /// ∂S/∂C (9×9)
    pub d_pk2_d_rcg: Matrix,

    /// ∂S/∂Ψ (9×9)
    pub d_pk2_d_psi: Matrix,

    /// ∂S/∂Γ (9×27)
    pub d_pk2_d_gamma: Matrix,

    /// ∂Σ/∂C (9×9)
    pub d_micro_d_rcg: Matrix,

    /// ∂Σ/∂Ψ (9×9)
    pub d_micro_d_psi: Matrix,

    /// ∂Σ/∂Γ (9×27)
    pub d_micro_d_gamma: Matrix,

    /// ∂M/∂Γ (27×27)
    pub d_higher_d_gamma: Matrix,
}

/// Holds the derivatives of the reference stresses with respect to F, χ and ∇χ
///
/// M does not depend on χ; thus ∂M/∂χ is not stored.
pub struct ReferenceStressDeriv {
    /// ∂S/∂F (9×9)
    pub d_pk2_d_f: Matrix,

    /// ∂S/∂χ (9×9)
    pub d_pk2_d_chi: Matrix,

    /// ∂S/∂∇χ (9×27)
    pub d_pk2_d_grad_chi: Matrix,

    /// ∂Σ/∂F (9×9)
    pub d_micro_d_f: Matrix,

    /// ∂Σ/∂χ (9×9)
    pub d_micro_d_chi: Matrix,

    /// ∂Σ/∂∇χ (9×27)
    pub d_micro_d_grad_chi: Matrix,

    /// ∂M/∂F (27×9)
    pub d_higher_d_f: Matrix,

    /// ∂M/∂∇χ (27×27)
    pub d_higher_d_grad_chi: Matrix,
}

/// Returns ∂Σ/∂x = ∂Term1/∂x + ∂X/∂x + ∂Xᵀ/∂x with X = Term2 + Term3
fn micro_stress_jacobian(d_term1: &Matrix, d_term23: &Matrix) -> Result<Matrix, MicroError> {
    sum(d_term1, &sum(d_term23, &transpose_rows(d_term23))?)
}

/// Computes the reference stresses from the derived deformation measures C, Ψ and Γ
///
/// ```text
/// S = Term1 + Term2 + Term3
/// Σ = Term1 + 2 sym(Term2 + Term3)
/// M_IJK = C_JKILMN Γ_LMN
/// ```
///
/// C is inverted here; a singular C yields [MicroError::SingularTensor].
pub fn reference_stresses_from_measures<M: Mode>(
    right_cauchy_green: &Ten2,
    psi: &Ten2,
    gamma: &Ten3,
    tensors: &ElasticTensors,
) -> Result<ReferenceStresses<MeasuresStressDeriv, M>, MicroError> {
    const STAGE: &str = "reference stresses from measures";
    let inv_rcg = right_cauchy_green.inverse("right Cauchy-Green tensor").within(STAGE)?;
    let identity = Ten2::identity();
    let green_lagrange = (*right_cauchy_green - identity) * 0.5;
    let micro_strain = *psi - identity;

    // pull-back products
    let inv_rcg_psi = compute_inv_rcg_psi::<M>(&inv_rcg, psi).within(STAGE)?;
    let inv_rcg_gamma = compute_inv_rcg_gamma::<M>(&inv_rcg, gamma).within(STAGE)?;

    // stress terms
    let (a, b, c, d) = (&tensors.a, &tensors.b, &tensors.c, &tensors.d);
    let term1 = linear_elastic_term1::<M>(&green_lagrange, &micro_strain, a, d).within(STAGE)?;
    let term2 = linear_elastic_term2::<M>(&green_lagrange, &micro_strain, &inv_rcg_psi.value, b, d).within(STAGE)?;
    let higher = reference_higher_order_stress::<M>(gamma, c).within(STAGE)?;
    let term3 = linear_elastic_term3::<M>(&inv_rcg_gamma.value, &higher.value).within(STAGE)?;

    // stresses
    let term23 = term2.value + term3.value;
    let pk2 = term1.value + term23;
    let micro_stress = term1.value + term23.symmetric() * 2.0;

    // derivatives
    let products = M::zip(inv_rcg_psi.deriv, inv_rcg_gamma.deriv);
    let terms = M::zip(M::zip(term1.deriv, term2.deriv), M::zip(higher.deriv, term3.deriv));
    let deriv = M::then(M::zip(products, terms), |((dp, dg), ((d1, d2), (dm, d3)))| {
        // E = ½(C - I) and ℰ = Ψ - I
        let d1_d_rcg = scaled(&d1.d_d_green_lagrange, 0.5);
        let d2_d_rcg = chain_sum(&[
            (&d2.d_d_green_lagrange, &scaled(&Matrix::identity(SIZE2), 0.5)),
            (&d2.d_d_inv_rcg_psi, &dp.d_d_rcg),
        ])?;
        let d3_d_rcg = chain(&d3.d_d_inv_rcg_gamma, &dg.d_d_rcg)?;
        let d2_d_psi = sum(&d2.d_d_micro_strain, &chain(&d2.d_d_inv_rcg_psi, &dp.d_d_x)?)?;
        let d3_d_gamma = chain_sum(&[(&d3.d_d_inv_rcg_gamma, &dg.d_d_x), (&d3.d_d_higher_order, &dm)])?;
        let d23_d_rcg = sum(&d2_d_rcg, &d3_d_rcg)?;
        let zero_d_gamma = Matrix::new(SIZE2, SIZE3);
        Ok(MeasuresStressDeriv {
            d_pk2_d_rcg: sum(&d1_d_rcg, &d23_d_rcg)?,
            d_pk2_d_psi: sum(&d1.d_d_micro_strain, &d2_d_psi)?,
            d_pk2_d_gamma: d3_d_gamma.clone(),
            d_micro_d_rcg: micro_stress_jacobian(&d1_d_rcg, &d23_d_rcg)?,
            d_micro_d_psi: micro_stress_jacobian(&d1.d_d_micro_strain, &d2_d_psi)?,
            d_micro_d_gamma: micro_stress_jacobian(&zero_d_gamma, &d3_d_gamma)?,
            d_higher_d_gamma: dm,
        })
    })
    .within(STAGE)?;
    Ok(ReferenceStresses {
        pk2,
        micro_stress,
        higher_order_stress: higher.value,
        deriv,
    })
}

/// Computes the reference stresses from the fundamental deformation measures F, χ and ∇χ
///
/// This function computes C, Ψ and Γ and then calls [reference_stresses_from_measures];
/// both functions thus return identical stresses for consistent inputs.
pub fn reference_stresses<M: Mode>(
    deformation_gradient: &Ten2,
    micro_deformation: &Ten2,
    gradient_micro_deformation: &Ten3,
    tensors: &ElasticTensors,
) -> Result<ReferenceStresses<ReferenceStressDeriv, M>, MicroError> {
    const STAGE: &str = "reference stresses";
    let measures = compute_deformation_measures::<M>(deformation_gradient, micro_deformation, gradient_micro_deformation)
        .within(STAGE)?;
    let stresses =
        reference_stresses_from_measures::<M>(&measures.right_cauchy_green, &measures.psi, &measures.gamma, tensors)
            .within(STAGE)?;
    let deriv = M::then(M::zip(measures.deriv, stresses.deriv), |(dk, ds)| {
        Ok(ReferenceStressDeriv {
            d_pk2_d_f: chain_sum(&[
                (&ds.d_pk2_d_rcg, &dk.d_rcg_d_f),
                (&ds.d_pk2_d_psi, &dk.d_psi_d_f),
                (&ds.d_pk2_d_gamma, &dk.d_gamma_d_f),
            ])?,
            d_pk2_d_chi: chain(&ds.d_pk2_d_psi, &dk.d_psi_d_chi)?,
            d_pk2_d_grad_chi: chain(&ds.d_pk2_d_gamma, &dk.d_gamma_d_grad_chi)?,
            d_micro_d_f: chain_sum(&[
                (&ds.d_micro_d_rcg, &dk.d_rcg_d_f),
                (&ds.d_micro_d_psi, &dk.d_psi_d_f),
                (&ds.d_micro_d_gamma, &dk.d_gamma_d_f),
            ])?,
            d_micro_d_chi: chain(&ds.d_micro_d_psi, &dk.d_psi_d_chi)?,
            d_micro_d_grad_chi: chain(&ds.d_micro_d_gamma, &dk.d_gamma_d_grad_chi)?,
            d_higher_d_f: chain(&ds.d_higher_d_gamma, &dk.d_gamma_d_f)?,
            d_higher_d_grad_chi: chain(&ds.d_higher_d_gamma, &dk.d_gamma_d_grad_chi)?,
        })
    })
    .within(STAGE)?;
    Ok(ReferenceStresses {
        pk2: stresses.pk2,
        micro_stress: stresses.micro_stress,
        higher_order_stress: stresses.higher_order_stress,
        deriv,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{reference_stresses, reference_stresses_from_measures};
    use crate::base::{assert_jacobian, ErrorKind, RandomStates, SampleParams, Tangents, Ten2, Ten3, Values};
    use crate::material::{compute_deformation_measures, ElasticTensors};

    fn tensors() -> ElasticTensors {
        ElasticTensors::new(&SampleParams::param_micromorphic()).unwrap()
    }

    fn concat(pk2: &Ten2, micro: &Ten2, higher: &Ten3) -> Vec<f64> {
        let mut res = pk2.as_slice().to_vec();
        res.extend_from_slice(micro.as_slice());
        res.extend_from_slice(higher.as_slice());
        res
    }

    #[test]
    fn zero_strain_gives_zero_stresses() {
        let tt = tensors();
        let id = Ten2::identity();
        let res = reference_stresses::<Values>(&id, &id, &Ten3::new(), &tt).unwrap();
        assert!(res.pk2.as_slice().iter().all(|v| *v == 0.0));
        assert!(res.micro_stress.as_slice().iter().all(|v| *v == 0.0));
        assert!(res.higher_order_stress.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn micro_stress_is_symmetric() {
        let tt = tensors();
        let mut rnd = RandomStates::new(5);
        let ff = rnd.near_identity(0.1);
        let chi = rnd.near_identity(0.1);
        let grad_chi = rnd.small_ten3(0.05);
        let res = reference_stresses::<Values>(&ff, &chi, &grad_chi, &tt).unwrap();
        let sig = res.micro_stress;
        for i in 0..3 {
            for j in 0..3 {
                russell_lab::approx_eq(sig.get(i, j), sig.get(j, i), 1e-15);
            }
        }
    }

    #[test]
    fn both_entry_points_agree() {
        let tt = tensors();
        let mut rnd = RandomStates::new(6);
        let ff = rnd.near_identity(0.1);
        let chi = rnd.near_identity(0.1);
        let grad_chi = rnd.small_ten3(0.05);
        let raw = reference_stresses::<Tangents>(&ff, &chi, &grad_chi, &tt).unwrap();
        let raw_values = reference_stresses::<Values>(&ff, &chi, &grad_chi, &tt).unwrap();
        let mm = compute_deformation_measures::<Values>(&ff, &chi, &grad_chi).unwrap();
        let derived =
            reference_stresses_from_measures::<Values>(&mm.right_cauchy_green, &mm.psi, &mm.gamma, &tt).unwrap();
        assert_eq!(raw.pk2, derived.pk2);
        assert_eq!(raw.micro_stress, derived.micro_stress);
        assert_eq!(raw.higher_order_stress, derived.higher_order_stress);
        assert_eq!(raw.pk2, raw_values.pk2);
        assert_eq!(raw.micro_stress, raw_values.micro_stress);
        assert_eq!(raw.higher_order_stress, raw_values.higher_order_stress);
    }

    #[test]
    fn singular_rcg_is_captured() {
        let tt = tensors();
        let mut rcg = Ten2::identity();
        rcg.set(2, 2, 0.0);
        let id = Ten2::identity();
        let err = reference_stresses_from_measures::<Values>(&rcg, &id, &Ten3::new(), &tt).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::SingularTensor);
        assert_eq!(err.trace(), &["reference stresses from measures"]);
    }

    #[test]
    fn derived_measures_derivatives_work() {
        let tt = tensors();
        let mut rnd = RandomStates::new(9);
        let ff = rnd.near_identity(0.1);
        let chi = rnd.near_identity(0.1);
        let grad_chi = rnd.small_ten3(0.05);
        let mm = compute_deformation_measures::<Values>(&ff, &chi, &grad_chi).unwrap();
        let (rcg, psi, gamma) = (mm.right_cauchy_green, mm.psi, mm.gamma);
        let res = reference_stresses_from_measures::<Tangents>(&rcg, &psi, &gamma, &tt).unwrap();
        let d = &res.deriv;

        let eval = |c: &Ten2, p: &Ten2, g: &Ten3| reference_stresses_from_measures::<Values>(c, p, g, &tt).unwrap();
        let t2 = |x: &[f64]| Ten2::from_slice("x", x).unwrap();
        let t3 = |x: &[f64]| Ten3::from_slice("x", x).unwrap();

        assert_jacobian("dS/dC", &d.d_pk2_d_rcg, rcg.as_slice(), |x| {
            eval(&t2(x), &psi, &gamma).pk2.as_slice().to_vec()
        });
        assert_jacobian("dS/dΨ", &d.d_pk2_d_psi, psi.as_slice(), |x| {
            eval(&rcg, &t2(x), &gamma).pk2.as_slice().to_vec()
        });
        assert_jacobian("dS/dΓ", &d.d_pk2_d_gamma, gamma.as_slice(), |x| {
            eval(&rcg, &psi, &t3(x)).pk2.as_slice().to_vec()
        });
        assert_jacobian("dΣ/dC", &d.d_micro_d_rcg, rcg.as_slice(), |x| {
            eval(&t2(x), &psi, &gamma).micro_stress.as_slice().to_vec()
        });
        assert_jacobian("dΣ/dΨ", &d.d_micro_d_psi, psi.as_slice(), |x| {
            eval(&rcg, &t2(x), &gamma).micro_stress.as_slice().to_vec()
        });
        assert_jacobian("dΣ/dΓ", &d.d_micro_d_gamma, gamma.as_slice(), |x| {
            eval(&rcg, &psi, &t3(x)).micro_stress.as_slice().to_vec()
        });
        assert_jacobian("dM/dΓ", &d.d_higher_d_gamma, gamma.as_slice(), |x| {
            eval(&rcg, &psi, &t3(x)).higher_order_stress.as_slice().to_vec()
        });
    }

    #[test]
    fn fundamental_measures_derivatives_work() {
        let tt = tensors();
        let mut rnd = RandomStates::new(10);
        let ff = rnd.near_identity(0.1);
        let chi = rnd.near_identity(0.1);
        let grad_chi = rnd.small_ten3(0.05);
        let res = reference_stresses::<Tangents>(&ff, &chi, &grad_chi, &tt).unwrap();
        let d = &res.deriv;

        let eval = |f: &Ten2, c: &Ten2, g: &Ten3| {
            let r = reference_stresses::<Values>(f, c, g, &tt).unwrap();
            concat(&r.pk2, &r.micro_stress, &r.higher_order_stress)
        };
        let t2 = |x: &[f64]| Ten2::from_slice("x", x).unwrap();
        let t3 = |x: &[f64]| Ten3::from_slice("x", x).unwrap();

        assert_jacobian("dS/dF", &d.d_pk2_d_f, ff.as_slice(), |x| eval(&t2(x), &chi, &grad_chi)[0..9].to_vec());
        assert_jacobian("dS/dχ", &d.d_pk2_d_chi, chi.as_slice(), |x| eval(&ff, &t2(x), &grad_chi)[0..9].to_vec());
        assert_jacobian("dS/d∇χ", &d.d_pk2_d_grad_chi, grad_chi.as_slice(), |x| {
            eval(&ff, &chi, &t3(x))[0..9].to_vec()
        });
        assert_jacobian("dΣ/dF", &d.d_micro_d_f, ff.as_slice(), |x| {
            eval(&t2(x), &chi, &grad_chi)[9..18].to_vec()
        });
        assert_jacobian("dΣ/dχ", &d.d_micro_d_chi, chi.as_slice(), |x| {
            eval(&ff, &t2(x), &grad_chi)[9..18].to_vec()
        });
        assert_jacobian("dΣ/d∇χ", &d.d_micro_d_grad_chi, grad_chi.as_slice(), |x| {
            eval(&ff, &chi, &t3(x))[9..18].to_vec()
        });
        assert_jacobian("dM/dF", &d.d_higher_d_f, ff.as_slice(), |x| {
            eval(&t2(x), &chi, &grad_chi)[18..45].to_vec()
        });
        assert_jacobian("dM/d∇χ", &d.d_higher_d_grad_chi, grad_chi.as_slice(), |x| {
            eval(&ff, &chi, &t3(x))[18..45].to_vec()
        });
    }
}
