use super::MicroError;
use russell_lab::{mat_inverse, Matrix};
use std::ops::{Add, Index, Mul, Sub};

/// Space dimension
pub const DIM: usize = 3;

/// Number of components of a second-order tensor
pub const SIZE2: usize = 9;

/// Number of components of a third-order tensor
pub const SIZE3: usize = 27;

/// Number of components of a fourth-order tensor
pub const SIZE4: usize = 81;

/// Number of components of a sixth-order tensor
pub const SIZE6: usize = 729;

/// Returns the row-major position of T[i][j]
#[inline]
pub fn i2(i: usize, j: usize) -> usize {
    DIM * i + j
}

/// Returns the row-major position of T[i][j][k]
#[inline]
pub fn i3(i: usize, j: usize, k: usize) -> usize {
    DIM * DIM * i + DIM * j + k
}

/// Returns the row-major position of T[i][j][k][l]
#[inline]
pub fn i4(i: usize, j: usize, k: usize, l: usize) -> usize {
    SIZE2 * i2(i, j) + i2(k, l)
}

/// Returns the row-major position of T[i][j][k][l][m][n]
#[inline]
pub fn i6(i: usize, j: usize, k: usize, l: usize, m: usize, n: usize) -> usize {
    SIZE3 * i3(i, j, k) + i3(l, m, n)
}

/// Returns the Kronecker delta δᵢⱼ
#[inline]
pub fn delta(i: usize, j: usize) -> f64 {
    if i == j {
        1.0
    } else {
        0.0
    }
}

fn check_len(what: &'static str, data: &[f64], expected: usize) -> Result<(), MicroError> {
    if data.len() != expected {
        return Err(MicroError::DimensionMismatch {
            what,
            expected,
            found: data.len(),
        });
    }
    Ok(())
}

/// Implements a second-order tensor in 3D with row-major storage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ten2 {
    data: [f64; SIZE2],
}

/// Implements a third-order tensor in 3D with row-major storage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ten3 {
    data: [f64; SIZE3],
}

/// Implements a fourth-order tensor in 3D with row-major storage
#[derive(Clone, Debug, PartialEq)]
pub struct Ten4 {
    data: Box<[f64; SIZE4]>,
}

/// Implements a sixth-order tensor in 3D with row-major storage
#[derive(Clone, Debug, PartialEq)]
pub struct Ten6 {
    data: Box<[f64; SIZE6]>,
}

impl Ten2 {
    /// Allocates a zero tensor
    pub fn new() -> Self {
        Ten2 { data: [0.0; SIZE2] }
    }

    /// Returns the identity tensor
    pub fn identity() -> Self {
        let mut t = Ten2::new();
        for i in 0..DIM {
            t.data[i2(i, i)] = 1.0;
        }
        t
    }

    /// Creates a tensor from its row-major components
    pub fn from_array(data: [f64; SIZE2]) -> Self {
        Ten2 { data }
    }

    /// Creates a tensor from a 3×3 array
    pub fn from_matrix(mat: &[[f64; DIM]; DIM]) -> Self {
        let mut t = Ten2::new();
        for i in 0..DIM {
            for j in 0..DIM {
                t.data[i2(i, j)] = mat[i][j];
            }
        }
        t
    }

    /// Creates a tensor from a flat slice (row-major)
    pub fn from_slice(what: &'static str, data: &[f64]) -> Result<Self, MicroError> {
        check_len(what, data, SIZE2)?;
        let mut t = Ten2::new();
        t.data.copy_from_slice(data);
        Ok(t)
    }

    /// Returns the row-major components
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns T[i][j]
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i2(i, j)]
    }

    /// Sets T[i][j]
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i2(i, j)] = value;
    }

    /// Returns the transpose Tᵀ
    pub fn transpose(&self) -> Self {
        let mut t = Ten2::new();
        for i in 0..DIM {
            for j in 0..DIM {
                t.data[i2(i, j)] = self.data[i2(j, i)];
            }
        }
        t
    }

    /// Returns the symmetric part ½(T + Tᵀ)
    pub fn symmetric(&self) -> Self {
        (*self + self.transpose()) * 0.5
    }

    /// Returns the determinant
    pub fn determinant(&self) -> f64 {
        let a = &self.data;
        a[0] * (a[4] * a[8] - a[5] * a[7]) - a[1] * (a[3] * a[8] - a[5] * a[6]) + a[2] * (a[3] * a[7] - a[4] * a[6])
    }

    /// Returns the inverse tensor
    ///
    /// The inversion is performed by [russell_lab::mat_inverse]; its failure
    /// is reported as [MicroError::SingularTensor].
    pub fn inverse(&self, what: &'static str) -> Result<Self, MicroError> {
        let a = self.as_matrix();
        let mut ai = Matrix::new(DIM, DIM);
        mat_inverse(&mut ai, &a).map_err(|reason| MicroError::SingularTensor { what, reason })?;
        let mut t = Ten2::new();
        for i in 0..DIM {
            for j in 0..DIM {
                t.data[i2(i, j)] = ai.get(i, j);
            }
        }
        if t.data.iter().any(|v| !v.is_finite()) {
            return Err(MicroError::SingularTensor {
                what,
                reason: "the inverse has non-finite components",
            });
        }
        Ok(t)
    }

    /// Returns the 3×3 matrix representation
    pub fn as_matrix(&self) -> Matrix {
        let mut mat = Matrix::new(DIM, DIM);
        for i in 0..DIM {
            for j in 0..DIM {
                mat.set(i, j, self.data[i2(i, j)]);
            }
        }
        mat
    }
}

impl Ten3 {
    /// Allocates a zero tensor
    pub fn new() -> Self {
        Ten3 { data: [0.0; SIZE3] }
    }

    /// Creates a tensor from its row-major components
    pub fn from_array(data: [f64; SIZE3]) -> Self {
        Ten3 { data }
    }

    /// Creates a tensor from a flat slice (row-major)
    pub fn from_slice(what: &'static str, data: &[f64]) -> Result<Self, MicroError> {
        check_len(what, data, SIZE3)?;
        let mut t = Ten3::new();
        t.data.copy_from_slice(data);
        Ok(t)
    }

    /// Returns the row-major components
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns T[i][j][k]
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[i3(i, j, k)]
    }

    /// Sets T[i][j][k]
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        self.data[i3(i, j, k)] = value;
    }
}

impl Ten4 {
    /// Allocates a zero tensor
    pub fn new() -> Self {
        Ten4 {
            data: Box::new([0.0; SIZE4]),
        }
    }

    /// Creates a tensor from a flat slice (row-major)
    pub fn from_slice(what: &'static str, data: &[f64]) -> Result<Self, MicroError> {
        check_len(what, data, SIZE4)?;
        let mut t = Ten4::new();
        t.data.copy_from_slice(data);
        Ok(t)
    }

    /// Returns the row-major components
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Returns T[i][j][k][l]
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.data[i4(i, j, k, l)]
    }

    /// Sets T[i][j][k][l]
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, l: usize, value: f64) {
        self.data[i4(i, j, k, l)] = value;
    }

    /// Returns the double contraction T:X, i.e., Tᵢⱼₖₗ Xₖₗ
    pub fn ddot(&self, x: &Ten2) -> Ten2 {
        let mut res = Ten2::new();
        for a in 0..SIZE2 {
            let row = &self.data[SIZE2 * a..SIZE2 * (a + 1)];
            res.data[a] = row.iter().zip(x.data.iter()).map(|(t, v)| t * v).sum();
        }
        res
    }

    /// Returns the 9×9 matrix with rows (i,j) and columns (k,l)
    pub fn as_matrix(&self) -> Matrix {
        let mut mat = Matrix::new(SIZE2, SIZE2);
        for a in 0..SIZE2 {
            for b in 0..SIZE2 {
                mat.set(a, b, self.data[SIZE2 * a + b]);
            }
        }
        mat
    }
}

impl Ten6 {
    /// Allocates a zero tensor
    pub fn new() -> Self {
        Ten6 {
            data: Box::new([0.0; SIZE6]),
        }
    }

    /// Creates a tensor from a flat slice (row-major)
    pub fn from_slice(what: &'static str, data: &[f64]) -> Result<Self, MicroError> {
        check_len(what, data, SIZE6)?;
        let mut t = Ten6::new();
        t.data.copy_from_slice(data);
        Ok(t)
    }

    /// Returns the row-major components
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Returns T[i][j][k][l][m][n]
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize, l: usize, m: usize, n: usize) -> f64 {
        self.data[i6(i, j, k, l, m, n)]
    }

    /// Sets T[i][j][k][l][m][n]
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, l: usize, m: usize, n: usize, value: f64) {
        self.data[i6(i, j, k, l, m, n)] = value;
    }

    /// Returns the 27×27 matrix with rows (i,j,k) and columns (l,m,n)
    pub fn as_matrix(&self) -> Matrix {
        let mut mat = Matrix::new(SIZE3, SIZE3);
        for a in 0..SIZE3 {
            for b in 0..SIZE3 {
                mat.set(a, b, self.data[SIZE3 * a + b]);
            }
        }
        mat
    }
}

impl Default for Ten2 {
    fn default() -> Self {
        Ten2::new()
    }
}

impl Default for Ten3 {
    fn default() -> Self {
        Ten3::new()
    }
}

impl Default for Ten4 {
    fn default() -> Self {
        Ten4::new()
    }
}

impl Default for Ten6 {
    fn default() -> Self {
        Ten6::new()
    }
}

impl Index<(usize, usize)> for Ten2 {
    type Output = f64;
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i2(i, j)]
    }
}

impl Index<(usize, usize, usize)> for Ten3 {
    type Output = f64;
    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f64 {
        &self.data[i3(i, j, k)]
    }
}

impl Add for Ten2 {
    type Output = Ten2;
    fn add(mut self, rhs: Ten2) -> Ten2 {
        self.data.iter_mut().zip(rhs.data.iter()).for_each(|(a, b)| *a += b);
        self
    }
}

impl Sub for Ten2 {
    type Output = Ten2;
    fn sub(mut self, rhs: Ten2) -> Ten2 {
        self.data.iter_mut().zip(rhs.data.iter()).for_each(|(a, b)| *a -= b);
        self
    }
}

impl Mul<f64> for Ten2 {
    type Output = Ten2;
    fn mul(mut self, alpha: f64) -> Ten2 {
        self.data.iter_mut().for_each(|a| *a *= alpha);
        self
    }
}

impl Add for Ten3 {
    type Output = Ten3;
    fn add(mut self, rhs: Ten3) -> Ten3 {
        self.data.iter_mut().zip(rhs.data.iter()).for_each(|(a, b)| *a += b);
        self
    }
}

impl Mul<f64> for Ten3 {
    type Output = Ten3;
    fn mul(mut self, alpha: f64) -> Ten3 {
        self.data.iter_mut().for_each(|a| *a *= alpha);
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
