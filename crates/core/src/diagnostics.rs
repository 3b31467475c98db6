//! Read-only snapshots for plotting and inspection
//!
//! Nothing here feeds back into a solve. [`SpanwiseDistribution`] collects
//! the per-station arrays of a solved [`LiftingLine`] and
//! [`planform_outline`] traces the wing outline of a mesh.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core_types::Vec3;
use crate::error::Result;
use crate::mesh::SpanwiseMesh;
use crate::solver::LiftingLine;

/// Per-station state of a solved lifting line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanwiseDistribution {
    /// Spanwise station coordinate
    pub y: Vec<f64>,
    /// Local chord
    pub chord: Vec<f64>,
    /// Circulation
    pub kappa: Vec<f64>,
    /// Induced normal velocity
    pub upwash: Vec<f64>,
    /// Local section lift coefficient, `−2κ/c`
    pub local_lift_coefficient: Vec<f64>,
    /// Elliptical circulation carrying the same total lift, `−4L/(π·b) · ref`
    pub elliptic_kappa: Vec<f64>,
}

impl SpanwiseDistribution {
    /// Capture the distribution of a solved lifting line
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`](crate::AeroError::NotSolved) before any solve.
    pub fn capture(solver: &LiftingLine) -> Result<Self> {
        let lift = solver.total_lift()?;
        let mesh = solver.mesh();
        let peak = -4.0 * lift / (PI * mesh.span());

        let y = mesh.points().row(1).iter().copied().collect();
        let chord: Vec<f64> = mesh.chords().iter().copied().collect();
        let kappa: Vec<f64> = solver.kappa().iter().copied().collect();
        let local_lift_coefficient = kappa
            .iter()
            .zip(&chord)
            .map(|(k, c)| -2.0 * k / c)
            .collect();

        Ok(Self {
            y,
            chord,
            kappa,
            upwash: solver.upwash().iter().copied().collect(),
            local_lift_coefficient,
            elliptic_kappa: mesh.elliptic_reference().iter().map(|r| peak * r).collect(),
        })
    }

    /// Number of stations
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// True when no stations were captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Largest absolute deviation of `kappa` from the elliptical reference
    #[must_use]
    pub fn max_elliptic_deviation(&self) -> f64 {
        self.kappa
            .iter()
            .zip(&self.elliptic_kappa)
            .map(|(k, e)| (k - e).abs())
            .fold(0.0, f64::max)
    }
}

/// Closed planform outline: leading edge tip to tip, then trailing edge back
///
/// The lifting line sits at quarter chord, so the leading edge is at
/// `x − c/4` and the trailing edge at `x + 3c/4`. The first point is repeated
/// at the end to close the polyline.
#[must_use]
pub fn planform_outline(mesh: &SpanwiseMesh) -> Vec<Vec3> {
    let n = mesh.len();
    let mut outline = Vec::with_capacity(2 * n + 1);

    for i in 0..n {
        let p = mesh.point(i);
        let c = mesh.chords()[i];
        outline.push(Vec3::new(p.x - 0.25 * c, p.y, p.z));
    }
    for i in (0..n).rev() {
        let p = mesh.point(i);
        let c = mesh.chords()[i];
        outline.push(Vec3::new(p.x + 0.75 * c, p.y, p.z));
    }
    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }
    outline
}
