use super::MicroError;
use russell_lab::{mat_add, mat_mat_mul, Matrix};

/// Returns the chain-rule product a·b
///
/// ```text
/// ∂y/∂x = ∂y/∂z · ∂z/∂x
/// ```
pub fn chain(a: &Matrix, b: &Matrix) -> Result<Matrix, MicroError> {
    let (m, k) = a.dims();
    let (kb, n) = b.dims();
    if k != kb {
        return Err(MicroError::DimensionMismatch {
            what: "jacobian product",
            expected: k,
            found: kb,
        });
    }
    let mut c = Matrix::new(m, n);
    mat_mat_mul(&mut c, 1.0, a, b, 0.0).map_err(|_| MicroError::DimensionMismatch {
        what: "jacobian product",
        expected: k,
        found: kb,
    })?;
    Ok(c)
}

/// Returns the sum of several chain-rule products Σ aᵢ·bᵢ
pub fn chain_sum(pairs: &[(&Matrix, &Matrix)]) -> Result<Matrix, MicroError> {
    let mut total: Option<Matrix> = None;
    for (a, b) in pairs {
        let term = chain(a, b)?;
        total = Some(match total {
            None => term,
            Some(acc) => sum(&acc, &term)?,
        });
    }
    total.ok_or(MicroError::DimensionMismatch {
        what: "jacobian sum",
        expected: 1,
        found: 0,
    })
}

/// Returns a + b
pub fn sum(a: &Matrix, b: &Matrix) -> Result<Matrix, MicroError> {
    let (m, n) = a.dims();
    if b.dims() != (m, n) {
        return Err(MicroError::DimensionMismatch {
            what: "jacobian sum",
            expected: m * n,
            found: b.nrow() * b.ncol(),
        });
    }
    let mut c = Matrix::new(m, n);
    mat_add(&mut c, 1.0, a, 1.0, b).map_err(|_| MicroError::DimensionMismatch {
        what: "jacobian sum",
        expected: m * n,
        found: b.nrow() * b.ncol(),
    })?;
    Ok(c)
}

/// Returns a·s (scaled copy)
pub fn scaled(a: &Matrix, s: f64) -> Matrix {
    let (m, n) = a.dims();
    let mut c = Matrix::new(m, n);
    for i in 0..m {
        for j in 0..n {
            c.set(i, j, s * a.get(i, j));
        }
    }
    c
}

/// Returns the Jacobian of the transpose of a second-order tensor valued function
///
/// Given ∂Y/∂x, computes ∂(Yᵀ)/∂x by swapping the rows (i,j) and (j,i).
pub fn transpose_rows(a: &Matrix) -> Matrix {
    let (m, n) = a.dims();
    let mut c = Matrix::new(m, n);
    for i in 0..3 {
        for j in 0..3 {
            for col in 0..n {
                c.set(3 * i + j, col, a.get(3 * j + i, col));
            }
        }
    }
    c
}

/// Converts a Jacobian into nested rows (stress length × input length)
pub fn to_rows(a: &Matrix) -> Vec<Vec<f64>> {
    let (m, n) = a.dims();
    (0..m).map(|i| (0..n).map(|j| a.get(i, j)).collect()).collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
