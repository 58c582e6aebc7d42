use ::noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};

use super::noise::{clamp_scale, sample_base, HeightField};

/// Remapping applied to each base noise sample before it is summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    #[default]
    None,
    /// `2|n| - 1`
    Billowy,
    /// `2(1 - |n|) - 1`
    Ridged,
}

impl NoiseKind {
    pub fn remap(self, n: f64) -> f64 {
        match self {
            NoiseKind::None => n,
            NoiseKind::Billowy => 2.0 * n.abs() - 1.0,
            NoiseKind::Ridged => 2.0 * (1.0 - n.abs()) - 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmConfig {
    /// Amplitude of the first octave.
    pub amplitude: f64,
    /// Amplitude multiplier between successive octaves.
    pub gain: f64,
    pub octaves: u32,
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    pub scale: f64,
    pub seed: u32,
    pub kind: NoiseKind,
}

impl Default for FbmConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            gain: 1.0,
            octaves: 1,
            frequency: 1.0,
            lacunarity: 2.0,
            scale: 1.0,
            seed: 0,
            kind: NoiseKind::None,
        }
    }
}

/// Fractional Brownian motion: an unnormalized sum of octaves where octave
/// `i` samples `base(x * frequency_i / scale, y * frequency_i / scale)`.
#[derive(Debug, Clone)]
pub struct FractionalBrownianMotion<N = OpenSimplex> {
    config: FbmConfig,
    base: N,
}

impl FractionalBrownianMotion<OpenSimplex> {
    pub fn new(config: &FbmConfig) -> Self {
        Self::with_base(config, OpenSimplex::new(config.seed))
    }
}

impl<N> FractionalBrownianMotion<N>
where
    N: NoiseFn<f64, 2>,
{
    pub fn with_base(config: &FbmConfig, base: N) -> Self {
        let config = FbmConfig {
            octaves: config.octaves.max(1),
            scale: clamp_scale(config.scale),
            ..*config
        };
        Self { config, base }
    }

    pub fn config(&self) -> &FbmConfig {
        &self.config
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let FbmConfig {
            mut amplitude,
            gain,
            octaves,
            mut frequency,
            lacunarity,
            scale,
            kind,
            ..
        } = self.config;

        let mut sum = 0.0;
        for _ in 0..octaves {
            let n = sample_base(&self.base, x * frequency / scale, y * frequency / scale);
            sum += amplitude * kind.remap(n);
            amplitude *= gain;
            frequency *= lacunarity;
        }
        sum
    }
}

impl<N> HeightField for FractionalBrownianMotion<N>
where
    N: NoiseFn<f64, 2>,
{
    fn height(&self, x: f64, y: f64) -> f64 {
        self.sample(x, y)
    }
}
