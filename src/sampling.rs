use crate::{Vector3, LAMBDA_MAX, LAMBDA_MIN, LAMBDA_SAMPLES};

/// Source of uniform draws in [0, 1), keyed on a spatial point. Deterministic
/// in the point: the same point always yields the same draw, which keeps
/// wavelength sampling restartable per shading point. The host renderer
/// supplies its own; `Hash13` is the bundled default.
pub trait NoiseSource {
    fn uniform(&self, p: Vector3<f32>) -> f32;
}

/// Low-bias 3d->1d spatial hash (the common shadertoy hash13 construction).
#[derive(Copy, Clone, Debug, Default)]
pub struct Hash13;

fn fract(x: f32) -> f32 {
    x - x.floor()
}

impl NoiseSource for Hash13 {
    fn uniform(&self, p: Vector3<f32>) -> f32 {
        let mut p = Vector3::new(fract(p.x * 0.1031), fract(p.y * 0.1031), fract(p.z * 0.1031));
        let d = p.dot(&Vector3::new(p.z + 31.32, p.y + 31.32, p.x + 31.32));
        p += Vector3::new(d, d, d);
        fract((p.x + p.y) * p.z)
    }
}

pub fn rand_range<N: NoiseSource>(start: f32, end: f32, p: Vector3<f32>, noise: &N) -> f32 {
    (end - start) * noise.uniform(p) + start
}

/// Wavelength sample generation strategies, sharing one signature.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LambdaStrategy {
    /// One uniform draw spread into evenly offset, wrapped samples. Even
    /// spectral coverage from a single random number.
    Hero,
    /// Independent uniform draws, decorrelated by an index offset on the
    /// hash point.
    Uniform,
    /// Deterministic evenly spaced grid, for precomputation and inspection.
    Fixed,
}

pub const LAMBDA_STRATEGY: LambdaStrategy = LambdaStrategy::Hero;

pub fn lambda_hero<N: NoiseSource>(p: Vector3<f32>, noise: &N) -> [f32; LAMBDA_SAMPLES] {
    let lambda_r = LAMBDA_MAX - LAMBDA_MIN;
    let lambda_h = rand_range(LAMBDA_MIN, LAMBDA_MAX, p, noise);
    let mut samples = [0.0f32; LAMBDA_SAMPLES];
    for (i, s) in samples.iter_mut().enumerate() {
        let x = lambda_h - LAMBDA_MIN + (i as f32 / LAMBDA_SAMPLES as f32) * lambda_r;
        *s = x % lambda_r + LAMBDA_MIN;
    }
    samples
}

pub fn lambda_uniform<N: NoiseSource>(p: Vector3<f32>, noise: &N) -> [f32; LAMBDA_SAMPLES] {
    let mut samples = [0.0f32; LAMBDA_SAMPLES];
    for (i, s) in samples.iter_mut().enumerate() {
        let offset = Vector3::new(i as f32, i as f32, i as f32);
        *s = rand_range(LAMBDA_MIN, LAMBDA_MAX, p + offset, noise);
    }
    samples
}

pub fn lambda_fixed() -> [f32; LAMBDA_SAMPLES] {
    let step = (LAMBDA_MAX - LAMBDA_MIN) / LAMBDA_SAMPLES as f32;
    let mut samples = [0.0f32; LAMBDA_SAMPLES];
    for (i, s) in samples.iter_mut().enumerate() {
        *s = LAMBDA_MIN + i as f32 * step;
    }
    samples
}

pub fn gen_lambda_samples<N: NoiseSource>(
    strategy: LambdaStrategy,
    p: Vector3<f32>,
    noise: &N,
) -> [f32; LAMBDA_SAMPLES] {
    match strategy {
        LambdaStrategy::Hero => lambda_hero(p, noise),
        LambdaStrategy::Uniform => lambda_uniform(p, noise),
        LambdaStrategy::Fixed => lambda_fixed(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_hero_in_range_and_distinct() {
        let mut rng = thread_rng();
        for _ in 0..200 {
            let p = Vector3::new(rng.gen::<f32>() * 100.0, rng.gen::<f32>() * 100.0, rng.gen());
            let samples = lambda_hero(p, &Hash13);
            for (i, a) in samples.iter().enumerate() {
                assert!(LAMBDA_MIN <= *a && *a <= LAMBDA_MAX, "{}", a);
                for b in samples.iter().skip(i + 1) {
                    assert!((a - b).abs() > 1e-3, "{:?}", samples);
                }
            }
        }
    }

    #[test]
    fn test_hero_deterministic() {
        let p = Vector3::new(17.0, 3.5, -2.25);
        assert_eq!(lambda_hero(p, &Hash13), lambda_hero(p, &Hash13));
    }

    #[test]
    fn test_uniform_decorrelated() {
        let p = Vector3::new(5.0, 1.0, 9.0);
        let samples = lambda_uniform(p, &Hash13);
        let distinct = samples
            .iter()
            .filter(|a| (**a - samples[0]).abs() > 1e-3)
            .count();
        assert!(distinct > LAMBDA_SAMPLES / 2, "{:?}", samples);
        for s in samples.iter() {
            assert!(LAMBDA_MIN <= *s && *s <= LAMBDA_MAX);
        }
    }

    #[test]
    fn test_fixed_grid() {
        let samples = lambda_fixed();
        assert_eq!(samples[0], LAMBDA_MIN);
        let step = (LAMBDA_MAX - LAMBDA_MIN) / LAMBDA_SAMPLES as f32;
        for w in samples.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-3);
        }
    }
}
