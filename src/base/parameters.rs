use super::MicroError;
use serde::{Deserialize, Serialize};

/// Number of moduli defining the A tensor (λ, μ)
pub const N_PARAM_A: usize = 2;

/// Number of moduli defining the B tensor (η, τ, κ, ν, σ)
pub const N_PARAM_B: usize = 5;

/// Number of moduli defining the C tensor (τ₁ … τ₁₁)
pub const N_PARAM_C: usize = 11;

/// Number of moduli defining the D tensor (τ, σ)
pub const N_PARAM_D: usize = 2;

/// Holds the moduli of the isotropic quadratic micromorphic elasticity model
///
/// The free energy is
///
/// ```text
/// ρψ = ½ E:A:E + ½ ℰ:B:ℰ + ½ Γ⋮C⋮Γ + E:D:ℰ
/// ```
///
/// where E is the Green-Lagrange strain, ℰ = Ψ - I is the micro-strain and Γ
/// is the third-order micro-deformation gradient measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamMicromorphic {
    /// Lamé's λ (A tensor)
    pub lambda: f64,

    /// Lamé's μ (A tensor)
    pub mu: f64,

    /// η (B tensor)
    pub eta: f64,

    /// τ (B tensor)
    pub tau: f64,

    /// κ (B tensor)
    pub kappa: f64,

    /// ν (B tensor)
    pub nu: f64,

    /// σ (B tensor)
    pub sigma: f64,

    /// τ₁ … τ₁₁ (C tensor)
    pub taus: Vec<f64>,

    /// τ (D tensor)
    pub tau_d: f64,

    /// σ (D tensor)
    pub sigma_d: f64,
}

impl ParamMicromorphic {
    /// Reads the parameters from the flat (count-prefixed) layout of the host solver
    ///
    /// ```text
    /// [2, λ, μ, 5, η, τ, κ, ν, σ, 11, τ₁, …, τ₁₁, 2, τ_D, σ_D]
    /// ```
    ///
    /// Each count must equal the number of moduli of its group and the vector
    /// must end exactly after the D group.
    pub fn from_flat(fparams: &[f64]) -> Result<Self, MicroError> {
        let mut reader = GroupReader { data: fparams, pos: 0 };
        let a = reader.group("A parameters", N_PARAM_A)?;
        let b = reader.group("B parameters", N_PARAM_B)?;
        let c = reader.group("C parameters", N_PARAM_C)?;
        let d = reader.group("D parameters", N_PARAM_D)?;
        if reader.pos != fparams.len() {
            return Err(MicroError::InvalidParameterCount {
                what: "material parameter vector",
                expected: reader.pos,
                found: fparams.len(),
            });
        }
        Ok(ParamMicromorphic {
            lambda: a[0],
            mu: a[1],
            eta: b[0],
            tau: b[1],
            kappa: b[2],
            nu: b[3],
            sigma: b[4],
            taus: c.to_vec(),
            tau_d: d[0],
            sigma_d: d[1],
        })
    }

    /// Writes the parameters into the flat (count-prefixed) layout of the host solver
    pub fn to_flat(&self) -> Vec<f64> {
        let mut res = Vec::with_capacity(4 + N_PARAM_A + N_PARAM_B + self.taus.len() + N_PARAM_D);
        res.extend_from_slice(&[N_PARAM_A as f64, self.lambda, self.mu]);
        res.extend_from_slice(&[N_PARAM_B as f64, self.eta, self.tau, self.kappa, self.nu, self.sigma]);
        res.push(self.taus.len() as f64);
        res.extend_from_slice(&self.taus);
        res.extend_from_slice(&[N_PARAM_D as f64, self.tau_d, self.sigma_d]);
        res
    }
}

/// Reads count-prefixed groups from a flat vector
struct GroupReader<'a> {
    data: &'a [f64],
    pos: usize,
}

impl<'a> GroupReader<'a> {
    fn group(&mut self, what: &'static str, expected: usize) -> Result<&'a [f64], MicroError> {
        let count = match self.data.get(self.pos) {
            Some(v) => *v,
            None => {
                return Err(MicroError::InvalidParameterCount {
                    what,
                    expected,
                    found: 0,
                })
            }
        };
        if count < 0.0 || count.fract() != 0.0 || count as usize != expected {
            return Err(MicroError::InvalidParameterCount {
                what,
                expected,
                found: if count < 0.0 { 0 } else { count as usize },
            });
        }
        let start = self.pos + 1;
        let end = start + expected;
        if end > self.data.len() {
            return Err(MicroError::InvalidParameterCount {
                what,
                expected,
                found: self.data.len() - start,
            });
        }
        self.pos = end;
        Ok(&self.data[start..end])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
