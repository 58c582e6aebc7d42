//! Seeded 2D coherent noise layered into an octave-normalized fractal sum.
//!
//! A generator takes a copy of its [`NoiseConfig`] when it is built. Editing
//! the caller's config afterwards has no effect on that generator.

use ::noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};

/// Smallest positive `f64` (the subnormal `Number.MIN_VALUE`); `scale` is
/// floored to it so coordinates are never divided by zero.
pub const MIN_SCALE: f64 = 4.940_656_458_412_465_4e-324;

/// Largest coordinate magnitude passed to the base noise. OpenSimplex turns
/// lattice coordinates into `isize`, which is only 32 bits on wasm32.
pub const MAX_COORDINATE: f64 = 1_073_741_824.0;

/// A scalar elevation field over the plane.
pub trait HeightField {
    fn height(&self, x: f64, y: f64) -> f64;
}

impl<F> HeightField for F
where
    F: Fn(f64, f64) -> f64,
{
    fn height(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub amplitude: f64,
    pub frequency: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub scale: f64,
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            octaves: 1,
            persistence: 0.5,
            scale: 1.0,
            seed: 0,
        }
    }
}

impl NoiseConfig {
    /// Copy with `octaves >= 1` and `scale >= MIN_SCALE` (NaN scale included).
    pub fn clamped(&self) -> Self {
        Self {
            octaves: self.octaves.max(1),
            scale: clamp_scale(self.scale),
            ..*self
        }
    }
}

pub(crate) fn clamp_scale(scale: f64) -> f64 {
    if scale >= MIN_SCALE {
        scale
    } else {
        MIN_SCALE
    }
}

/// `base` at `(x, y)`, or 0 for a point that is not finite or lies beyond
/// [`MAX_COORDINATE`]. A tiny `scale` pushes every point but the origin there.
pub(crate) fn sample_base<N>(base: &N, x: f64, y: f64) -> f64
where
    N: NoiseFn<f64, 2> + ?Sized,
{
    if x.abs() <= MAX_COORDINATE && y.abs() <= MAX_COORDINATE {
        base.get([x, y])
    } else {
        0.0
    }
}

/// Octave-normalized fractal noise.
///
/// Octave `i` contributes `amplitude * persistence^i * base(x * f_i, y * f_i)`
/// with `f_i = frequency * 2^i`, after the input has been divided by `scale`.
/// The sum is divided by `2 - 2^(1 - octaves)`, the total weight of the
/// octaves at the default persistence of one half.
#[derive(Debug, Clone)]
pub struct NoiseGenerator<N = OpenSimplex> {
    config: NoiseConfig,
    normalization: f64,
    base: N,
}

impl NoiseGenerator<OpenSimplex> {
    pub fn new(config: &NoiseConfig) -> Self {
        Self::with_base(config, OpenSimplex::new(config.seed))
    }
}

impl<N> NoiseGenerator<N>
where
    N: NoiseFn<f64, 2>,
{
    /// Builds the generator over a caller-supplied base noise; `config.seed`
    /// is only used by [`NoiseGenerator::new`].
    pub fn with_base(config: &NoiseConfig, base: N) -> Self {
        let config = config.clamped();
        let normalization = 2.0 - 2f64.powi(1 - config.octaves.min(i32::MAX as u32) as i32);
        Self {
            config,
            normalization,
            base,
        }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let NoiseConfig {
            amplitude,
            frequency,
            octaves,
            persistence,
            scale,
            ..
        } = self.config;

        let (x, y) = (x / scale, y / scale);
        let mut value = 0.0;
        let mut weight = amplitude;
        let mut f = frequency;
        for _ in 0..octaves {
            value += weight * sample_base(&self.base, x * f, y * f);
            weight *= persistence;
            f *= 2.0;
        }
        value / self.normalization
    }
}

impl<N> HeightField for NoiseGenerator<N>
where
    N: NoiseFn<f64, 2>,
{
    fn height(&self, x: f64, y: f64) -> f64 {
        self.sample(x, y)
    }
}

/// Convenience for `NoiseGenerator::new`.
pub fn create_generator(config: &NoiseConfig) -> NoiseGenerator {
    NoiseGenerator::new(config)
}
