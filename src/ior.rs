use crate::complex::Complex;
use crate::spectral::RgbFit;
use crate::Vector3;

/// RGB-parameterized complex index of refraction. Artists author `n`
/// (refractive) and `k` (extinction) as two colors; the optical model pulls
/// true per-wavelength complex values out of them through the RGB-to-spectrum
/// fit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ior {
    pub n: Vector3<f32>,
    pub k: Vector3<f32>,
}

impl Ior {
    pub fn new(n: Vector3<f32>, k: Vector3<f32>) -> Self {
        Ior { n, k }
    }

    /// Wavelength-independent material, e.g. plain glass or air.
    pub fn constant(n: f32, k: f32) -> Self {
        Ior {
            n: Vector3::new(n, n, n),
            k: Vector3::new(k, k, k),
        }
    }

    pub fn sample(self, lambda: f32, fit: RgbFit) -> Complex {
        let n = fit.eval(lambda, self.n);
        let k = fit.eval(lambda, self.k);
        Complex::new(n, k)
    }
}
