use std::ops::{Add, Div, Mul, Neg, Sub};

/// Complex scalar in rectangular form. All arithmetic returns new values.
///
/// `sqrt` and `powf` use the principal branch: the angle comes from `atan2`
/// with range (-pi, pi]. Downstream phase composition in the transfer-matrix
/// model depends on this branch choice, so don't swap in an alternative root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Complex {
    pub re: f32,
    pub im: f32,
}

pub const C_ZERO: Complex = Complex { re: 0.0, im: 0.0 };
pub const C_ONE: Complex = Complex { re: 1.0, im: 0.0 };
pub const C_I: Complex = Complex { re: 0.0, im: 1.0 };

impl Complex {
    pub fn new(re: f32, im: f32) -> Self {
        Complex { re, im }
    }

    pub fn conjugate(self) -> Self {
        Complex::new(self.re, -self.im)
    }

    pub fn modulus(self) -> f32 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    pub fn modulus_sqrd(self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    /// Principal-branch real power, via polar form.
    pub fn powf(self, p: f32) -> Self {
        let rn = self.modulus().powf(p);
        let theta = self.im.atan2(self.re) * p;
        Complex::new(rn * theta.cos(), rn * theta.sin())
    }

    pub fn powi(self, p: i32) -> Self {
        self.powf(p as f32)
    }

    /// Principal-branch square root.
    pub fn sqrt(self) -> Self {
        self.powf(0.5)
    }

    pub fn exp(self) -> Self {
        let x = self.re.exp();
        Complex::new(x * self.im.cos(), x * self.im.sin())
    }
}

impl From<f32> for Complex {
    fn from(s: f32) -> Self {
        Complex::new(s, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }
}

impl Add<f32> for Complex {
    type Output = Complex;
    fn add(self, s: f32) -> Complex {
        Complex::new(self.re + s, self.im)
    }
}

impl Add<Complex> for f32 {
    type Output = Complex;
    fn add(self, c: Complex) -> Complex {
        Complex::new(c.re + self, c.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, other: Complex) -> Complex {
        Complex::new(self.re - other.re, self.im - other.im)
    }
}

impl Sub<f32> for Complex {
    type Output = Complex;
    fn sub(self, s: f32) -> Complex {
        Complex::new(self.re - s, self.im)
    }
}

impl Sub<Complex> for f32 {
    type Output = Complex;
    fn sub(self, c: Complex) -> Complex {
        Complex::new(self - c.re, -c.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    // three-multiplication form
    fn mul(self, other: Complex) -> Complex {
        let s1 = self.re * other.re;
        let s2 = self.im * other.im;
        let s3 = (self.re + self.im) * (other.re + other.im);
        Complex::new(s1 - s2, s3 - s1 - s2)
    }
}

impl Mul<f32> for Complex {
    type Output = Complex;
    fn mul(self, s: f32) -> Complex {
        Complex::new(s * self.re, s * self.im)
    }
}

impl Mul<Complex> for f32 {
    type Output = Complex;
    fn mul(self, c: Complex) -> Complex {
        Complex::new(self * c.re, self * c.im)
    }
}

impl Div for Complex {
    type Output = Complex;
    // precondition: other has nonzero modulus
    fn div(self, other: Complex) -> Complex {
        let s1 = self.re * other.re;
        let s2 = self.im * other.im;
        let s3 = (self.re + self.im) * (other.re - other.im);
        let denom = other.re * other.re + other.im * other.im;
        Complex::new((s1 + s2) / denom, (s3 - s1 + s2) / denom)
    }
}

impl Div<Complex> for f32 {
    type Output = Complex;
    fn div(self, c: Complex) -> Complex {
        Complex::new(self, 0.0) / c
    }
}

impl Div<f32> for Complex {
    type Output = Complex;
    fn div(self, s: f32) -> Complex {
        self * (1.0 / s)
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;

    fn approx(a: Complex, b: Complex, eps: f32) -> bool {
        (a.re - b.re).abs() < eps && (a.im - b.im).abs() < eps
    }

    #[test]
    fn test_mul_div_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..1000 {
            let c = Complex::new(rng.gen::<f32>() * 4.0 - 2.0, rng.gen::<f32>() * 4.0 - 2.0);
            if c.modulus_sqrd() < 1e-6 {
                continue;
            }
            let recip = 1.0 / c;
            assert!(approx(c * recip, C_ONE, 1e-5), "{:?}", c);
        }
    }

    #[test]
    fn test_conjugate_involution() {
        let c = Complex::new(0.3, -1.7);
        assert_eq!(c.conjugate().conjugate(), c);
        assert!((c.modulus() * c.modulus() - c.modulus_sqrd()).abs() < 1e-6);
    }

    #[test]
    fn test_sqrt_principal_branch() {
        // sqrt(-1) = +i on the principal branch, since atan2(0, -1) = pi
        let c = Complex::new(-1.0, 0.0);
        assert!(approx(c.sqrt(), C_I, 1e-6));
        // sqrt of a positive real stays on the positive real axis
        let r = Complex::new(4.0, 0.0).sqrt();
        assert!(approx(r, Complex::new(2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_sqrt_squares_back() {
        let mut rng = thread_rng();
        for _ in 0..1000 {
            let c = Complex::new(rng.gen::<f32>() * 4.0 - 2.0, rng.gen::<f32>() * 4.0 - 2.0);
            let s = c.sqrt();
            assert!(approx(s * s, c, 1e-4), "{:?} {:?}", c, s);
        }
    }

    #[test]
    fn test_exp() {
        // e^{i pi} = -1
        let c = (C_I * std::f32::consts::PI).exp();
        assert!(approx(c, Complex::new(-1.0, 0.0), 1e-6));
        let e = Complex::new(1.0, 0.0).exp();
        assert!((e.re - std::f32::consts::E).abs() < 1e-6 && e.im == 0.0);
    }

    #[test]
    fn test_powi_matches_repeated_mul() {
        let c = Complex::new(0.8, 0.6);
        assert!(approx(c.powi(3), c * c * c, 1e-5));
    }

    #[test]
    fn test_scalar_ops_both_orders() {
        let c = Complex::new(1.0, 2.0);
        assert_eq!(2.0 * c, c * 2.0);
        assert_eq!(1.0 + c, c + 1.0);
        assert_eq!(2.0 - c, -(c - 2.0));
        assert!(approx(6.0 / Complex::new(3.0, 0.0), Complex::new(2.0, 0.0), 1e-6));
    }
}
