use crate::base::{delta, MicroError, ParamMicromorphic, Ten4, Ten6, Within, DIM, N_PARAM_C};

/// Holds the four elasticity tensors of the quadratic micromorphic model
///
/// These tensors are independent of the deformation state; they are built
/// once and then shared (by reference) by all evaluations.
#[derive(Clone, Debug, PartialEq)]
pub struct ElasticTensors {
    /// Couples E with E (81)
    pub a: Ten4,

    /// Couples ℰ with ℰ (81)
    pub b: Ten4,

    /// Couples Γ with Γ (729)
    pub c: Ten6,

    /// Couples E with ℰ (81)
    pub d: Ten4,
}

impl ElasticTensors {
    /// Forms the isotropic tensors from the named moduli
    pub fn new(param: &ParamMicromorphic) -> Result<Self, MicroError> {
        Ok(ElasticTensors {
            a: form_isotropic_a(param.lambda, param.mu),
            b: form_isotropic_b(param.eta, param.tau, param.kappa, param.nu, param.sigma),
            c: form_isotropic_c(&param.taus).within("form elastic tensors")?,
            d: form_isotropic_d(param.tau_d, param.sigma_d),
        })
    }

    /// Forms the isotropic tensors from the flat parameter vector of the host solver
    ///
    /// See [ParamMicromorphic::from_flat] for the layout.
    pub fn from_flat(fparams: &[f64]) -> Result<Self, MicroError> {
        let param = ParamMicromorphic::from_flat(fparams).within("extract material parameters")?;
        ElasticTensors::new(&param)
    }
}

/// Forms the isotropic A tensor
///
/// ```text
/// A_KLMN = λ δ_KL δ_MN + μ (δ_KM δ_LN + δ_KN δ_LM)
/// ```
pub fn form_isotropic_a(lambda: f64, mu: f64) -> Ten4 {
    let mut a = Ten4::new();
    for k in 0..DIM {
        for l in 0..DIM {
            for m in 0..DIM {
                for n in 0..DIM {
                    let value = lambda * delta(k, l) * delta(m, n)
                        + mu * (delta(k, m) * delta(l, n) + delta(k, n) * delta(l, m));
                    a.set(k, l, m, n, value);
                }
            }
        }
    }
    a
}

/// Forms the isotropic B tensor
///
/// ```text
/// B_KLMN = (η - τ) δ_KL δ_MN + κ δ_KM δ_LN + ν δ_KN δ_LM
///        - σ (δ_KM δ_LN + δ_KN δ_LM)
/// ```
pub fn form_isotropic_b(eta: f64, tau: f64, kappa: f64, nu: f64, sigma: f64) -> Ten4 {
    let mut b = Ten4::new();
    for k in 0..DIM {
        for l in 0..DIM {
            for m in 0..DIM {
                for n in 0..DIM {
                    let value = (eta - tau) * delta(k, l) * delta(m, n)
                        + kappa * delta(k, m) * delta(l, n)
                        + nu * delta(k, n) * delta(l, m)
                        - sigma * (delta(k, m) * delta(l, n) + delta(k, n) * delta(l, m));
                    b.set(k, l, m, n, value);
                }
            }
        }
    }
    b
}

/// Forms the isotropic C tensor from the eleven moduli τ₁ … τ₁₁
///
/// ```text
/// C_KLMNPQ = τ₁ (δ_KL δ_MN δ_PQ + δ_KQ δ_LM δ_NP)
///          + τ₂ (δ_KL δ_MP δ_NQ + δ_KM δ_LQ δ_NP)
///          + τ₃ δ_KL δ_MQ δ_NP
///          + τ₄ δ_KN δ_LM δ_PQ
///          + τ₅ (δ_KM δ_LN δ_PQ + δ_KP δ_LM δ_NQ)
///          + τ₆ δ_KM δ_LP δ_NQ
///          + τ₇ δ_KN δ_LP δ_MQ
///          + τ₈ (δ_KP δ_LQ δ_MN + δ_KQ δ_LN δ_MP)
///          + τ₉ δ_KN δ_LQ δ_MP
///          + τ₁₀ δ_KP δ_LN δ_MQ
///          + τ₁₁ δ_KQ δ_LP δ_MN
/// ```
pub fn form_isotropic_c(taus: &[f64]) -> Result<Ten6, MicroError> {
    if taus.len() != N_PARAM_C {
        return Err(MicroError::InvalidParameterCount {
            what: "C parameters",
            expected: N_PARAM_C,
            found: taus.len(),
        });
    }
    let t = taus;
    let mut c = Ten6::new();
    for k in 0..DIM {
        for l in 0..DIM {
            for m in 0..DIM {
                for n in 0..DIM {
                    for p in 0..DIM {
                        for q in 0..DIM {
                            let d = delta;
                            let value = t[0] * (d(k, l) * d(m, n) * d(p, q) + d(k, q) * d(l, m) * d(n, p))
                                + t[1] * (d(k, l) * d(m, p) * d(n, q) + d(k, m) * d(l, q) * d(n, p))
                                + t[2] * d(k, l) * d(m, q) * d(n, p)
                                + t[3] * d(k, n) * d(l, m) * d(p, q)
                                + t[4] * (d(k, m) * d(l, n) * d(p, q) + d(k, p) * d(l, m) * d(n, q))
                                + t[5] * d(k, m) * d(l, p) * d(n, q)
                                + t[6] * d(k, n) * d(l, p) * d(m, q)
                                + t[7] * (d(k, p) * d(l, q) * d(m, n) + d(k, q) * d(l, n) * d(m, p))
                                + t[8] * d(k, n) * d(l, q) * d(m, p)
                                + t[9] * d(k, p) * d(l, n) * d(m, q)
                                + t[10] * d(k, q) * d(l, p) * d(m, n);
                            c.set(k, l, m, n, p, q, value);
                        }
                    }
                }
            }
        }
    }
    Ok(c)
}

/// Forms the isotropic D tensor
///
/// ```text
/// D_KLMN = τ δ_KL δ_MN + σ (δ_KM δ_LN + δ_KN δ_LM)
/// ```
pub fn form_isotropic_d(tau: f64, sigma: f64) -> Ten4 {
    form_isotropic_a(tau, sigma)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
