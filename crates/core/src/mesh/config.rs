//! Mesh construction parameters
//!
//! The span fraction `s ∈ [0, 1]` runs tip to tip with mid-span at `s = 0.5`.
//! A [`MeshConfig`] names how stations are distributed along it, how chord
//! varies, and how the unit-span wing is placed and scaled in wing-fixed axes.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{AeroError, Result};

/// Spanwise station distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpacingPolicy {
    /// Evenly spaced panels with stations at panel centres: `s_i = (i + ½)/N`
    Uniform,
    /// Clustered toward the tips: `s_i = sin²(θ_i/2)` with `θ_i = π(i + ½)/N`
    Cosine,
    /// User-supplied span fractions (length N, strictly inside (0, 1), strictly increasing)
    Explicit(Vec<f64>),
}

/// Spanwise chord distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChordPolicy {
    /// Constant chord
    Uniform(f64),
    /// `c = c_ref · sqrt(1 − (2s − 1)²)`, zero at the tips
    Elliptical(f64),
    /// User-supplied chord per station (length N, all positive)
    Explicit(Vec<f64>),
}

/// Configuration for building a [`SpanwiseMesh`](super::SpanwiseMesh)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Number of span stations (N ≥ 2)
    pub stations: usize,

    /// Spanwise spacing policy
    pub spacing: SpacingPolicy,

    /// Chord policy
    pub chord: ChordPolicy,

    /// Streamwise (x) offset of the lifting line
    pub x_offset: f64,

    /// Vertical (z) offset of the lifting line
    pub z_offset: f64,

    /// Geometric scale: span length in output units. Chords scale with it.
    pub scale: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            stations: 40,
            spacing: SpacingPolicy::Cosine,
            chord: ChordPolicy::Elliptical(0.1),
            x_offset: 0.0,
            z_offset: 0.0,
            scale: 1.0,
        }
    }
}

impl MeshConfig {
    /// Elliptical planform with cosine spacing, the well-conditioned default
    #[must_use]
    pub fn elliptical(stations: usize, root_chord: f64) -> Self {
        Self {
            stations,
            chord: ChordPolicy::Elliptical(root_chord),
            ..Default::default()
        }
    }

    /// Rectangular planform (constant chord) with the given spacing
    #[must_use]
    pub fn rectangular(stations: usize, chord: f64, spacing: SpacingPolicy) -> Self {
        Self {
            stations,
            spacing,
            chord: ChordPolicy::Uniform(chord),
            ..Default::default()
        }
    }

    /// Resolve the spacing policy into N span fractions
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] when N < 2, or when an explicit
    /// array has the wrong length, is not strictly inside (0, 1), or is not
    /// strictly increasing. A station on a span edge would sit on its own
    /// outer panel boundary.
    pub fn span_fractions(&self) -> Result<Vec<f64>> {
        let n = self.stations;
        if n < 2 {
            return Err(AeroError::config(
                "stations",
                format!("need at least 2 stations, got {n}"),
            ));
        }

        let fractions: Vec<f64> = match &self.spacing {
            SpacingPolicy::Uniform => (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect(),
            SpacingPolicy::Cosine => (0..n)
                .map(|i| {
                    let half_theta = 0.5 * PI * (i as f64 + 0.5) / n as f64;
                    half_theta.sin().powi(2)
                })
                .collect(),
            SpacingPolicy::Explicit(values) => {
                if values.len() != n {
                    return Err(AeroError::config(
                        "spacing",
                        format!("expected {n} span fractions, got {}", values.len()),
                    ));
                }
                if let Some(bad) = values
                    .iter()
                    .find(|s| !s.is_finite() || **s <= 0.0 || **s >= 1.0)
                {
                    return Err(AeroError::config(
                        "spacing",
                        format!("span fraction {bad} must lie strictly inside (0, 1)"),
                    ));
                }
                values.clone()
            }
        };

        if let Some(i) = (1..n).find(|&i| fractions[i] <= fractions[i - 1]) {
            return Err(AeroError::config(
                "spacing",
                format!(
                    "span fractions must be strictly increasing (station {i}: {} after {})",
                    fractions[i],
                    fractions[i - 1]
                ),
            ));
        }

        Ok(fractions)
    }

    /// Resolve the chord policy at the given span fractions (before scaling)
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] for a wrong-length explicit array or
    /// any non-positive or non-finite chord.
    pub fn chords(&self, fractions: &[f64]) -> Result<Vec<f64>> {
        let chords: Vec<f64> = match &self.chord {
            ChordPolicy::Uniform(c) => vec![*c; fractions.len()],
            ChordPolicy::Elliptical(c_ref) => fractions
                .iter()
                .map(|s| {
                    let eta = 2.0 * s - 1.0;
                    c_ref * (1.0 - eta * eta).max(0.0).sqrt()
                })
                .collect(),
            ChordPolicy::Explicit(values) => {
                if values.len() != fractions.len() {
                    return Err(AeroError::config(
                        "chord",
                        format!(
                            "expected {} chord values, got {}",
                            fractions.len(),
                            values.len()
                        ),
                    ));
                }
                values.clone()
            }
        };

        if let Some((i, c)) = chords
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c <= 0.0)
        {
            return Err(AeroError::config(
                "chord",
                format!("chord at station {i} must be positive, got {c}"),
            ));
        }

        Ok(chords)
    }

    /// Check the placement parameters
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] for a non-positive scale or non-finite offsets.
    pub fn validate_placement(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(AeroError::config(
                "scale",
                format!("must be finite and positive, got {}", self.scale),
            ));
        }
        if !self.x_offset.is_finite() || !self.z_offset.is_finite() {
            return Err(AeroError::config("offset", "offsets must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_fractions_are_panel_centres() {
        let config = MeshConfig::rectangular(4, 0.1, SpacingPolicy::Uniform);
        let s = config.span_fractions().unwrap();
        assert_eq!(s, vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn test_cosine_fractions_never_touch_tips() {
        let config = MeshConfig::elliptical(7, 0.1);
        let s = config.span_fractions().unwrap();
        assert!(s[0] > 0.0);
        assert!(s[6] < 1.0);
        assert!((s[3] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_elliptical_chord_peaks_at_mid_span() {
        let config = MeshConfig::elliptical(5, 0.2);
        let s = config.span_fractions().unwrap();
        let c = config.chords(&s).unwrap();
        assert!((c[2] - 0.2).abs() < 1e-12);
        assert!(c[0] < c[1] && c[1] < c[2]);
    }

    #[test]
    fn test_station_on_span_edge_is_rejected() {
        for fractions in [vec![0.0, 0.5, 0.9], vec![0.1, 0.5, 1.0]] {
            let config = MeshConfig {
                stations: 3,
                spacing: SpacingPolicy::Explicit(fractions),
                chord: ChordPolicy::Uniform(0.1),
                ..Default::default()
            };
            assert!(matches!(
                config.span_fractions(),
                Err(AeroError::InvalidConfig {
                    parameter: "spacing",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_elliptical_chord_vanishes_at_tips() {
        let config = MeshConfig::elliptical(3, 0.1);
        assert!(matches!(
            config.chords(&[0.0, 0.5, 1.0]),
            Err(AeroError::InvalidConfig {
                parameter: "chord",
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_spacing_must_increase() {
        let config = MeshConfig {
            stations: 3,
            spacing: SpacingPolicy::Explicit(vec![0.2, 0.2, 0.8]),
            ..Default::default()
        };
        assert!(config.span_fractions().is_err());
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let config = MeshConfig {
            scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate_placement().is_err());
    }
}
