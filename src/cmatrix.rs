use std::ops::{Add, Div, Mul, Sub};

use crate::complex::{Complex, C_ONE, C_ZERO};

/// Row-major complex 2x2 matrix, acting on a forward/backward wave-amplitude
/// pair. May be singular; see `inv` for the degenerate policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CMatrix22 {
    pub t00: Complex,
    pub t01: Complex,
    pub t10: Complex,
    pub t11: Complex,
}

/// Eigen-decomposition of a `CMatrix22`: eigenvalues `l1`, `l2` with
/// matching eigenvectors `e1`, `e2`.
#[derive(Copy, Clone, Debug)]
pub struct EigenPair {
    pub l1: Complex,
    pub l2: Complex,
    pub e1: [Complex; 2],
    pub e2: [Complex; 2],
}

impl CMatrix22 {
    pub fn new(t00: Complex, t01: Complex, t10: Complex, t11: Complex) -> Self {
        CMatrix22 { t00, t01, t10, t11 }
    }

    pub fn identity() -> Self {
        CMatrix22::new(C_ONE, C_ZERO, C_ZERO, C_ONE)
    }

    pub fn zero() -> Self {
        CMatrix22::new(C_ZERO, C_ZERO, C_ZERO, C_ZERO)
    }

    pub fn one() -> Self {
        CMatrix22::new(C_ONE, C_ONE, C_ONE, C_ONE)
    }

    pub fn det(self) -> Complex {
        self.t00 * self.t11 - self.t01 * self.t10
    }

    /// Inverse with a total-function policy: a singular matrix inverts to the
    /// zero matrix (the reciprocal determinant is taken as zero). Not a
    /// pseudo-inverse.
    pub fn inv(self) -> Self {
        let d = self.det();
        let det = if d.modulus_sqrd() != 0.0 { 1.0 / d } else { C_ZERO };
        CMatrix22::new(
            det * self.t11,
            -(det * self.t01),
            -(det * self.t10),
            det * self.t00,
        )
    }

    /// Element-wise principal-branch power.
    pub fn powf(self, p: f32) -> Self {
        CMatrix22::new(
            self.t00.powf(p),
            self.t01.powf(p),
            self.t10.powf(p),
            self.t11.powf(p),
        )
    }

    pub fn mul_vec(self, v: [Complex; 2]) -> [Complex; 2] {
        [
            self.t00 * v[0] + self.t01 * v[1],
            self.t10 * v[0] + self.t11 * v[1],
        ]
    }

    /// Roots of the characteristic quadratic, via the complex principal-branch
    /// square root of the discriminant.
    pub fn eigen_val(self) -> (Complex, Complex) {
        let t = self.t00 + self.t11;
        let d = self.t00 * self.t11 - self.t01 * self.t10;

        let x = t;
        let y = (t.powf(2.0) - 4.0 * d).sqrt();

        ((x + y) * 0.5, (x - y) * 0.5)
    }

    /// Eigenvectors for the given eigenvalues. The case order matters: the
    /// `t10` form is tried before the `t01` form, and an exactly diagonal
    /// matrix falls back to the standard basis.
    pub fn eigen_vec(self, l1: Complex, l2: Complex) -> ([Complex; 2], [Complex; 2]) {
        let b = self.t01.modulus_sqrd();
        let c = self.t10.modulus_sqrd();

        if c != 0.0 {
            ([l1 - self.t11, self.t10], [l2 - self.t11, self.t10])
        } else if b != 0.0 {
            ([self.t01, l1 - self.t00], [self.t01, l2 - self.t00])
        } else {
            ([C_ONE, C_ZERO], [C_ZERO, C_ONE])
        }
    }

    pub fn eigen(self) -> EigenPair {
        let (l1, l2) = self.eigen_val();
        let (e1, e2) = self.eigen_vec(l1, l2);
        EigenPair { l1, l2, e1, e2 }
    }

    /// Returns `(D, P)` with `D` the diagonal eigenvalue matrix and `P` the
    /// eigenvector columns, so that `m * P = P * D`. Invert `P` separately if
    /// the `P * D * P^-1` form is needed.
    pub fn diag(self) -> (CMatrix22, CMatrix22) {
        let EigenPair { l1, l2, e1, e2 } = self.eigen();

        let p = CMatrix22::new(e1[0], e2[0], e1[1], e2[1]);
        let d = CMatrix22::new(l1, C_ZERO, C_ZERO, l2);

        (d, p)
    }
}

impl Mul for CMatrix22 {
    type Output = CMatrix22;
    fn mul(self, m: CMatrix22) -> CMatrix22 {
        CMatrix22::new(
            self.t00 * m.t00 + self.t01 * m.t10,
            self.t00 * m.t01 + self.t01 * m.t11,
            self.t10 * m.t00 + self.t11 * m.t10,
            self.t10 * m.t01 + self.t11 * m.t11,
        )
    }
}

impl Mul<Complex> for CMatrix22 {
    type Output = CMatrix22;
    fn mul(self, s: Complex) -> CMatrix22 {
        CMatrix22::new(s * self.t00, s * self.t01, s * self.t10, s * self.t11)
    }
}

impl Mul<CMatrix22> for Complex {
    type Output = CMatrix22;
    fn mul(self, m: CMatrix22) -> CMatrix22 {
        m * self
    }
}

impl Div for CMatrix22 {
    type Output = CMatrix22;
    fn div(self, m: CMatrix22) -> CMatrix22 {
        self * m.inv()
    }
}

impl Div<CMatrix22> for Complex {
    type Output = CMatrix22;
    fn div(self, m: CMatrix22) -> CMatrix22 {
        CMatrix22::new(self / m.t00, self / m.t01, self / m.t10, self / m.t11)
    }
}

impl Div<Complex> for CMatrix22 {
    type Output = CMatrix22;
    fn div(self, s: Complex) -> CMatrix22 {
        CMatrix22::new(self.t00 / s, self.t01 / s, self.t10 / s, self.t11 / s)
    }
}

impl Add for CMatrix22 {
    type Output = CMatrix22;
    fn add(self, m: CMatrix22) -> CMatrix22 {
        CMatrix22::new(
            self.t00 + m.t00,
            self.t01 + m.t01,
            self.t10 + m.t10,
            self.t11 + m.t11,
        )
    }
}

impl Add<Complex> for CMatrix22 {
    type Output = CMatrix22;
    fn add(self, s: Complex) -> CMatrix22 {
        CMatrix22::new(self.t00 + s, self.t01 + s, self.t10 + s, self.t11 + s)
    }
}

impl Add<CMatrix22> for Complex {
    type Output = CMatrix22;
    fn add(self, m: CMatrix22) -> CMatrix22 {
        m + self
    }
}

impl Sub for CMatrix22 {
    type Output = CMatrix22;
    fn sub(self, m: CMatrix22) -> CMatrix22 {
        CMatrix22::new(
            self.t00 - m.t00,
            self.t01 - m.t01,
            self.t10 - m.t10,
            self.t11 - m.t11,
        )
    }
}

impl Sub<Complex> for CMatrix22 {
    type Output = CMatrix22;
    fn sub(self, s: Complex) -> CMatrix22 {
        CMatrix22::new(self.t00 - s, self.t01 - s, self.t10 - s, self.t11 - s)
    }
}

impl Sub<CMatrix22> for Complex {
    type Output = CMatrix22;
    fn sub(self, m: CMatrix22) -> CMatrix22 {
        CMatrix22::new(self - m.t00, self - m.t01, self - m.t10, self - m.t11)
    }
}
