use crate::{Matrix3, Vector3, LAMBDA_MAX, LAMBDA_MIN, LAMBDA_SAMPLES};

pub const CIE_Y_INTEGRAL: f32 = 106.856895;
pub const CIE_Y_D65_INTEGRAL: f32 = 98.89001;

/// D65 white point tristimulus, normalized against the fitted curves.
pub fn cie_d65() -> Vector3<f32> {
    Vector3::new(0.87773937, 0.92347876, 1.0055102)
}

/// Normalized gaussian pdf.
fn gaussian(x: f32, mu: f32, sigma: f32) -> f32 {
    1.0 / (sigma * (2.0 * std::f32::consts::PI).sqrt())
        * (-(x - mu) * (x - mu) / (2.0 * sigma * sigma)).exp()
}

/// Gaussian in peak-height form.
fn gauss(x: f32, a: f32, b: f32, c: f32) -> f32 {
    let t = (x - b) / c;
    a * (-t * t).exp()
}

fn sigmoidal4(x: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    d + (a - d) / (1.0 + (x / c).powf(b))
}

fn sigmoidal3(x: f32, a: f32, b: f32, c: f32) -> f32 {
    a / (1.0 + (-b * (x - c)).exp())
}

/// Color-matching-function fit. Two constant sets survive from different
/// generations of the shader; both stay selectable. Each carries the Y
/// integral its normalization was fitted against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CmfFit {
    /// CIE 1931, one pdf-form gaussian per lobe.
    Gaussian1931,
    /// D65-weighted multi-gaussian fit, piecewise in x.
    GaussianD65,
}

pub const CMF_FIT: CmfFit = CmfFit::GaussianD65;

impl CmfFit {
    pub fn y_integral(self) -> f32 {
        match self {
            CmfFit::Gaussian1931 => CIE_Y_INTEGRAL,
            CmfFit::GaussianD65 => CIE_Y_D65_INTEGRAL,
        }
    }

    /// Stochastic-average-to-tristimulus normalization for `LAMBDA_SAMPLES`
    /// samples over the full range.
    pub fn scale(self) -> f32 {
        (LAMBDA_MAX - LAMBDA_MIN) / (LAMBDA_SAMPLES as f32 * self.y_integral())
    }

    pub fn eval(self, l: f32) -> Vector3<f32> {
        match self {
            CmfFit::Gaussian1931 => {
                Vector3::new(
                    8233.3080 * gaussian(l, 593.94946, 34.00)
                        + 1891.2652 * gaussian(l, 448.8951, 18.7851),
                    10522.6505 * gaussian(l, 555.3855, 40.7979),
                    11254.7819 * gaussian(l, 452.9834, 21.5712),
                ) / 100.0
            }
            CmfFit::GaussianD65 => {
                let x = if l < 500.0 {
                    gauss(l, 0.3762, 449.0573, 27.0226)
                } else {
                    gauss(l, 0.8981, 596.7094, 44.6502) + gauss(l, 0.1214, 549.8165, 23.7826)
                };
                let y = gauss(l, 14.0421, 540.7364, 21.3541)
                    + gauss(l, -13.8573, 540.8008, 21.2394)
                    + gauss(l, 0.8341, 559.4890, 60.2144);
                let z = gauss(l, 43.1393, 449.6270, 21.3703)
                    + gauss(l, 0.4729, 469.7765, 38.1569)
                    + gauss(l, -41.5637, 449.6359, 21.1548);
                Vector3::new(x, y, z)
            }
        }
    }
}

pub fn xyz_to_rgb(xyz: Vector3<f32>) -> Vector3<f32> {
    #[rustfmt::skip]
    let m = Matrix3::new(
         3.2404542, -1.5371385, -0.4985314,
        -0.9692660,  1.8760108,  0.0415560,
         0.0556434, -0.2040259,  1.0572252,
    );
    m * xyz
}

pub fn rgb_to_xyz(rgb: Vector3<f32>) -> Vector3<f32> {
    #[rustfmt::skip]
    let m = Matrix3::new(
        0.4124564, 0.3575761, 0.1804375,
        0.2126720, 0.7151522, 0.0721750,
        0.0193339, 0.1191920, 0.9503041,
    );
    m * rgb
}

pub fn spec_to_xyz(
    spec: &[f32; LAMBDA_SAMPLES],
    lambdas: &[f32; LAMBDA_SAMPLES],
    fit: CmfFit,
) -> Vector3<f32> {
    let mut xyz = Vector3::new(0.0, 0.0, 0.0);
    for (value, lambda) in spec.iter().zip(lambdas.iter()) {
        xyz += fit.eval(*lambda) * *value;
    }
    xyz * fit.scale()
}

pub fn spec_to_rgb(
    spec: &[f32; LAMBDA_SAMPLES],
    lambdas: &[f32; LAMBDA_SAMPLES],
    fit: CmfFit,
) -> Vector3<f32> {
    xyz_to_rgb(spec_to_xyz(spec, lambdas, fit))
}

/// Spectral-locus color of a single wavelength.
pub fn lambda_to_rgb(lambda: f32, fit: CmfFit) -> Vector3<f32> {
    xyz_to_rgb(fit.eval(lambda))
}

/// RGB-to-reflectance reconstruction strategy. An approximate, non-unique
/// inverse of spectral integration; convenient upsampling, not exact recovery.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RgbFit {
    /// Burns' fast sigmoid basis fit.
    /// http://scottburns.us/fast-rgb-to-spectrum-conversion-for-reflectances/
    Burns,
    /// Constant/cosine/sine basis solved against the CIE matrix.
    Fourier,
}

pub const RGB_FIT: RgbFit = RgbFit::Burns;

impl RgbFit {
    pub fn eval(self, lambda: f32, rgb: Vector3<f32>) -> f32 {
        match self {
            RgbFit::Burns => {
                let r = if lambda > 560.0 {
                    sigmoidal4(lambda, 0.0144, 135.0296, 590.4639, 0.9761)
                } else {
                    sigmoidal4(lambda, 0.0289, 38.6766, 454.7233, 0.0062)
                };
                let g = if lambda < 545.0 {
                    sigmoidal4(lambda, 0.0123, 63.3450, 488.7451, 0.9711)
                } else {
                    sigmoidal4(lambda, 0.0127, -116.3503, 590.4987, 0.9699)
                };
                let b = if lambda < 500.0 {
                    sigmoidal3(lambda, 0.9622, -0.1542, 489.6339)
                } else {
                    sigmoidal4(lambda, 0.0122, -37.0407, 405.3482, 344.2237)
                };
                rgb.dot(&Vector3::new(r, g, b))
            }
            RgbFit::Fourier => fourier_basis_eval(lambda, rgb_to_xyz(rgb)),
        }
    }
}

/// Fourier-basis reconstruction: three-term basis (1, cos, sin) over the
/// sampled range, weighted by the fitted moment matrix, floored to stay
/// non-negative.
fn fourier_basis_eval(lambda: f32, xyz: Vector3<f32>) -> f32 {
    let x = 1.0 / (LAMBDA_MAX - LAMBDA_MIN);
    let t = 2.0 * std::f32::consts::PI * (lambda - LAMBDA_MIN) * x;
    let basis = Vector3::new(1.0, t.cos(), t.sin());

    #[rustfmt::skip]
    let m = Matrix3::new(
         0.01771023, -0.01157347, 0.00377552,
         0.01275868, -0.01898111, 0.00627120,
        -0.02633400,  0.02201364, 0.00310862,
    );
    let moments = m * xyz;

    moments.dot(&basis).max(1e-6) * CIE_Y_INTEGRAL
}

/// Projection to 2d chromaticity. Precondition: at least one tristimulus
/// component non-zero.
pub fn xyz_coords(xyz: Vector3<f32>) -> Vector3<f32> {
    let denom = xyz.x + xyz.y + xyz.z;
    Vector3::new(xyz.x / denom, xyz.y / denom, 0.0)
}

pub fn lambda_coords(lambda: f32, fit: CmfFit) -> Vector3<f32> {
    xyz_coords(fit.eval(lambda))
}
