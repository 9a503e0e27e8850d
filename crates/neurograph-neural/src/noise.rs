// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Additive noise sources
//!
//! A [`NoiseSource`] is attached to an update rule (injected into the net
//! input before the nonlinearity) or handed to weight randomization. Samples
//! are drawn from a caller-owned RNG stream, which is what keeps runs
//! reproducible: the engine gives every node and link its own seeded stream,
//! so the draw sequence of one entity never depends on another.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{require_finite, Result};
use crate::ParameterError;

/// Distribution of an additive noise term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoiseSource {
    /// Uniform draw from `[low, high]`.
    Uniform { low: f64, high: f64 },
    /// Gaussian draw with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
}

impl NoiseSource {
    /// Uniform noise centered on zero, `[-magnitude, magnitude]`.
    pub fn uniform_symmetric(magnitude: f64) -> Self {
        NoiseSource::Uniform {
            low: -magnitude,
            high: magnitude,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            NoiseSource::Uniform { low, high } => {
                require_finite("noise low", low)?;
                require_finite("noise high", high)?;
                if low <= high {
                    Ok(())
                } else {
                    Err(ParameterError::EmptyRange {
                        name: "noise range",
                        lower: low,
                        upper: high,
                    })
                }
            }
            NoiseSource::Normal { mean, std_dev } => {
                require_finite("noise mean", mean)?;
                require_finite("noise std dev", std_dev)?;
                if std_dev >= 0.0 {
                    Ok(())
                } else {
                    Err(ParameterError::Negative {
                        name: "noise std dev",
                        value: std_dev,
                    })
                }
            }
        }
    }

    /// Draws one sample. Parameters are assumed validated.
    pub fn sample(&self, rng: &mut StdRng) -> f64 {
        match *self {
            NoiseSource::Uniform { low, high } => rng.gen_range(low..=high),
            NoiseSource::Normal { mean, std_dev } => match Normal::new(mean, std_dev) {
                Ok(dist) => dist.sample(rng),
                Err(_) => mean,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn uniform_stays_in_range() {
        let noise = NoiseSource::Uniform {
            low: -0.25,
            high: 0.5,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = noise.sample(&mut rng);
            assert!((-0.25..=0.5).contains(&x));
        }
    }

    #[test]
    fn normal_matches_moments_roughly() {
        let noise = NoiseSource::Normal {
            mean: 2.0,
            std_dev: 0.5,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mean = (0..n).map(|_| noise.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.02);
    }

    #[test]
    fn identical_streams_sample_identically() {
        let noise = NoiseSource::uniform_symmetric(1.0);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(noise.sample(&mut a), noise.sample(&mut b));
        }
    }

    #[test]
    fn zero_width_sources_are_valid() {
        let flat = NoiseSource::Uniform { low: 0.3, high: 0.3 };
        assert!(flat.validate().is_ok());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(flat.sample(&mut rng), 0.3);

        let point = NoiseSource::Normal {
            mean: -1.0,
            std_dev: 0.0,
        };
        assert!(point.validate().is_ok());
        assert_eq!(point.sample(&mut rng), -1.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(NoiseSource::Uniform { low: 1.0, high: 0.0 }.validate().is_err());
        assert!(NoiseSource::Normal {
            mean: f64::NAN,
            std_dev: 1.0
        }
        .validate()
        .is_err());
        assert!(NoiseSource::Normal {
            mean: 0.0,
            std_dev: -0.1
        }
        .validate()
        .is_err());
    }

    #[test]
    fn serde_round_trip() {
        let noise = NoiseSource::Normal {
            mean: 0.0,
            std_dev: 0.1,
        };
        let json = serde_json::to_string(&noise).unwrap();
        assert_eq!(serde_json::from_str::<NoiseSource>(&json).unwrap(), noise);
    }
}
