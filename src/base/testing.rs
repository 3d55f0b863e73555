use super::{Ten2, Ten3, SIZE2, SIZE3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use russell_lab::{approx_eq, Matrix};

/// Perturbation for central differences
pub(crate) const PERTURBATION: f64 = 1e-6;

/// Relative tolerance when comparing analytical and numerical Jacobians
pub(crate) const JACOBIAN_TOLERANCE: f64 = 1e-4;

/// Absolute tolerance for Jacobian components that vanish (round-off of the differences)
pub(crate) const JACOBIAN_NOISE_FLOOR: f64 = 1e-8;

/// Checks that two matrices have the same dimensions and (absolutely) close components
pub(crate) fn assert_matrix_close(a: &Matrix, b: &Matrix, tol: f64) {
    assert_eq!(a.dims(), b.dims());
    let (m, n) = a.dims();
    for i in 0..m {
        for j in 0..n {
            approx_eq(a.get(i, j), b.get(i, j), tol);
        }
    }
}

/// Checks that two slices are (absolutely) close
pub(crate) fn assert_slice_close(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        approx_eq(*x, *y, tol);
    }
}

/// Computes ∂f/∂x with central differences
///
/// ```text
/// ∂fᵢ/∂xⱼ ≈ (fᵢ(x + h eⱼ) - fᵢ(x - h eⱼ)) / 2h
/// ```
pub(crate) fn numerical_jacobian<F>(x: &[f64], mut f: F) -> Matrix
where
    F: FnMut(&[f64]) -> Vec<f64>,
{
    let n = x.len();
    let m = f(x).len();
    let mut jac = Matrix::new(m, n);
    let mut xx = x.to_vec();
    for j in 0..n {
        xx[j] = x[j] + PERTURBATION;
        let fp = f(&xx);
        xx[j] = x[j] - PERTURBATION;
        let fm = f(&xx);
        xx[j] = x[j];
        for i in 0..m {
            jac.set(i, j, (fp[i] - fm[i]) / (2.0 * PERTURBATION));
        }
    }
    jac
}

/// Checks an analytical Jacobian against central differences
///
/// Each component must satisfy |analytical - numerical| ≤ 1e-4 |numerical| + 1e-8.
pub(crate) fn assert_jacobian<F>(name: &str, analytical: &Matrix, x: &[f64], f: F)
where
    F: FnMut(&[f64]) -> Vec<f64>,
{
    let numerical = numerical_jacobian(x, f);
    assert_eq!(analytical.dims(), numerical.dims(), "{}: wrong dimensions", name);
    let (m, n) = numerical.dims();
    for i in 0..m {
        for j in 0..n {
            let ana = analytical.get(i, j);
            let num = numerical.get(i, j);
            assert!(
                (ana - num).abs() <= JACOBIAN_TOLERANCE * num.abs() + JACOBIAN_NOISE_FLOOR,
                "{}[{},{}]: analytical = {:?}, numerical = {:?}",
                name,
                i,
                j,
                ana,
                num
            );
        }
    }
}

/// Generates random kinematic states near the undeformed configuration
pub(crate) struct RandomStates {
    rng: StdRng,
}

impl RandomStates {
    /// Allocates a new generator with a fixed seed
    pub(crate) fn new(seed: u64) -> Self {
        RandomStates {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns I + δ with |δᵢⱼ| ≤ amplitude
    pub(crate) fn near_identity(&mut self, amplitude: f64) -> Ten2 {
        let mut data = [0.0; SIZE2];
        for v in data.iter_mut() {
            *v = self.rng.gen_range(-amplitude..amplitude);
        }
        Ten2::identity() + Ten2::from_array(data)
    }

    /// Returns a third-order tensor with |Tᵢⱼₖ| ≤ amplitude
    pub(crate) fn small_ten3(&mut self, amplitude: f64) -> Ten3 {
        let mut data = [0.0; SIZE3];
        for v in data.iter_mut() {
            *v = self.rng.gen_range(-amplitude..amplitude);
        }
        Ten3::from_array(data)
    }

    /// Returns a second-order tensor with |Tᵢⱼ| ≤ amplitude
    pub(crate) fn small_ten2(&mut self, amplitude: f64) -> Ten2 {
        let mut data = [0.0; SIZE2];
        for v in data.iter_mut() {
            *v = self.rng.gen_range(-amplitude..amplitude);
        }
        Ten2::from_array(data)
    }
}
