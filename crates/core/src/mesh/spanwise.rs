//! Spanwise station mesh with derived panel boundaries
//!
//! A [`SpanwiseMesh`] is an immutable value: station positions, chords, and the
//! panel boundaries derived from them are computed once in the constructor.
//! Any geometry change goes through a new mesh, so the boundaries can never be
//! stale relative to the stations.
//!
//! # Panel boundaries
//!
//! ```text
//!   r_minus[i]        r[i]        r_plus[i] = r_minus[i+1]
//!       |--------------x---------------|
//! ```
//!
//! Interior boundaries are midpoints between neighbouring stations. The two
//! outer boundaries are extrapolated by half of the adjacent gap; builder meshes
//! then clamp them to the nominal span edges so the panels tile `[0, scale]`.

use nalgebra::{DVector, Matrix3xX};
use serde::Serialize;
use tracing::debug;

use super::config::MeshConfig;
use crate::core_types::Vec3;
use crate::error::{AeroError, Result};

/// Ordered span stations with chord, panel boundaries, and quadrature weights
#[derive(Debug, Clone, Serialize)]
pub struct SpanwiseMesh {
    /// Station positions, one column per station
    points: Matrix3xX<f64>,

    /// Inboard ("minus") panel boundary of each station
    r_minus: Matrix3xX<f64>,

    /// Outboard ("plus") panel boundary of each station
    r_plus: Matrix3xX<f64>,

    /// Unit spanwise tangent of each panel, projected onto the y-z plane
    tangents: Matrix3xX<f64>,

    /// Local chord at each station
    chord: DVector<f64>,

    /// Lateral (y-z) panel width, the quadrature weight of each station
    panel_length: DVector<f64>,

    /// Unit-amplitude elliptical loading shape at each station
    elliptic_reference: DVector<f64>,
}

impl SpanwiseMesh {
    /// Build a planar mesh from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] when the station count, spacing,
    /// chord, or placement parameters are invalid.
    pub fn build(config: &MeshConfig) -> Result<Self> {
        config.validate_placement()?;
        let fractions = config.span_fractions()?;
        let chords = config.chords(&fractions)?;

        let points: Vec<Vec3> = fractions
            .iter()
            .map(|s| Vec3::new(config.x_offset, config.scale * s, config.z_offset))
            .collect();
        let scaled_chords: Vec<f64> = chords.iter().map(|c| c * config.scale).collect();

        let mesh = Self::assemble(&points, &scaled_chords, Some((0.0, config.scale)));
        debug!(
            "Built spanwise mesh: {} stations, span={:.4}, area={:.5}",
            mesh.len(),
            mesh.span(),
            mesh.area()
        );
        Ok(mesh)
    }

    /// Build a mesh from explicit station positions and chords
    ///
    /// Stations may leave the z = const plane (dihedral, winglets) but their
    /// spanwise coordinate must be strictly increasing. End boundaries are
    /// extrapolated without clamping.
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] for fewer than two stations,
    /// mismatched lengths, non-finite coordinates, non-positive chords, or
    /// non-monotonic y.
    pub fn from_stations(points: &[Vec3], chords: &[f64]) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(AeroError::config(
                "stations",
                format!("need at least 2 stations, got {n}"),
            ));
        }
        if chords.len() != n {
            return Err(AeroError::config(
                "chord",
                format!("expected {n} chord values, got {}", chords.len()),
            ));
        }
        if points.iter().any(|p| !p.iter().all(|v| v.is_finite())) {
            return Err(AeroError::config(
                "stations",
                "station coordinates must be finite",
            ));
        }
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
        if let Some(i) = (1..n).find(|&i| points[i].y <= points[i - 1].y) {
            return Err(AeroError::config(
                "stations",
                format!("spanwise coordinate must be strictly increasing at station {i}"),
            ));
        }

        Ok(Self::assemble(points, chords, None))
    }

    /// Derive boundaries, tangents, and weights. Inputs are already validated.
    fn assemble(points: &[Vec3], chords: &[f64], clamp_y: Option<(f64, f64)>) -> Self {
        let n = points.len();

        let mut minus: Vec<Vec3> = Vec::with_capacity(n);
        let mut plus: Vec<Vec3> = Vec::with_capacity(n);
        for i in 0..n {
            let lo = if i == 0 {
                points[0] - (points[1] - points[0]) * 0.5
            } else {
                (points[i - 1] + points[i]) * 0.5
            };
            let hi = if i == n - 1 {
                points[n - 1] + (points[n - 1] - points[n - 2]) * 0.5
            } else {
                (points[i] + points[i + 1]) * 0.5
            };
            minus.push(lo);
            plus.push(hi);
        }

        if let Some((y_min, y_max)) = clamp_y {
            minus[0].y = minus[0].y.max(y_min);
            plus[n - 1].y = plus[n - 1].y.min(y_max);
        }

        let mut tangents = Vec::with_capacity(n);
        let mut widths = Vec::with_capacity(n);
        for (lo, hi) in minus.iter().zip(&plus) {
            let lateral = Vec3::new(0.0, hi.y - lo.y, hi.z - lo.z);
            let width = lateral.norm();
            widths.push(width);
            tangents.push(lateral / width);
        }

        let y_lo = minus[0].y;
        let extent = plus[n - 1].y - y_lo;
        let reference: Vec<f64> = points
            .iter()
            .map(|p| {
                let eta = 2.0 * (p.y - y_lo) / extent - 1.0;
                (1.0 - eta * eta).max(0.0).sqrt()
            })
            .collect();

        Self {
            points: Matrix3xX::from_columns(points),
            r_minus: Matrix3xX::from_columns(&minus),
            r_plus: Matrix3xX::from_columns(&plus),
            tangents: Matrix3xX::from_columns(&tangents),
            chord: DVector::from_column_slice(chords),
            panel_length: DVector::from_vec(widths),
            elliptic_reference: DVector::from_vec(reference),
        }
    }

    /// Number of stations
    #[must_use]
    pub fn len(&self) -> usize {
        self.chord.len()
    }

    /// Always false: a mesh has at least two stations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chord.is_empty()
    }

    /// Station positions as columns
    #[must_use]
    pub fn points(&self) -> &Matrix3xX<f64> {
        &self.points
    }

    /// Position of station `i`
    #[must_use]
    pub fn point(&self, i: usize) -> Vec3 {
        self.points.column(i).into_owned()
    }

    /// Inboard panel boundaries as columns
    #[must_use]
    pub fn r_minus(&self) -> &Matrix3xX<f64> {
        &self.r_minus
    }

    /// Outboard panel boundaries as columns
    #[must_use]
    pub fn r_plus(&self) -> &Matrix3xX<f64> {
        &self.r_plus
    }

    /// Unit lateral tangents of each panel
    #[must_use]
    pub fn tangents(&self) -> &Matrix3xX<f64> {
        &self.tangents
    }

    /// Local chords
    #[must_use]
    pub fn chords(&self) -> &DVector<f64> {
        &self.chord
    }

    /// Quadrature weights (lateral panel widths)
    #[must_use]
    pub fn panel_lengths(&self) -> &DVector<f64> {
        &self.panel_length
    }

    /// Unit-amplitude elliptical loading shape, for plotting and validation only
    #[must_use]
    pub fn elliptic_reference(&self) -> &DVector<f64> {
        &self.elliptic_reference
    }

    /// Spanwise (y) extent covered by the panels
    #[must_use]
    pub fn span(&self) -> f64 {
        self.r_plus[(1, self.len() - 1)] - self.r_minus[(1, 0)]
    }

    /// Total lateral arclength of the lifting line (sum of panel widths)
    #[must_use]
    pub fn total_arclength(&self) -> f64 {
        self.panel_length.sum()
    }

    /// Planform area: Σ chord · weight
    #[must_use]
    pub fn area(&self) -> f64 {
        self.chord.dot(&self.panel_length)
    }

    /// Mean geometric chord
    #[must_use]
    pub fn mean_chord(&self) -> f64 {
        self.area() / self.span()
    }

    /// Aspect ratio `b²/S`; equals `1/Σ(chord·weight)` for a unit span
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let span = self.span();
        span * span / self.area()
    }
}
