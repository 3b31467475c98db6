//! Spanwise quadrature of the circulation state into aerodynamic coefficients
//!
//! Every quantity is a weighted sum over stations with the panel width as the
//! weight, recomputed from the current state on each call.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

use super::lifting_line::LiftingLine;
use crate::error::{AeroError, Result};
use crate::mesh::SpanwiseMesh;

/// Lift per unit dynamic pressure and unit speed: `−Σ κ·w`
pub(crate) fn lift_sum(mesh: &SpanwiseMesh, kappa: &DVector<f64>) -> f64 {
    -kappa.dot(mesh.panel_lengths())
}

/// Induced drag in the same units: `Σ κ·upwash·w`
pub(crate) fn drag_sum(mesh: &SpanwiseMesh, kappa: &DVector<f64>, upwash: &DVector<f64>) -> f64 {
    kappa.component_mul(upwash).dot(mesh.panel_lengths())
}

/// Snapshot of every integrated quantity after a solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficients {
    /// CL = −2Σκw / S
    pub lift_coefficient: f64,
    /// CDi = 2Σκ·upwash·w / S
    pub induced_drag_coefficient: f64,
    /// b² / S
    pub aspect_ratio: f64,
    /// L = −Σκw
    pub lift: f64,
    /// D = Σκ·upwash·w
    pub induced_drag: f64,
    /// CL² / (π·AR·CDi), `None` when the induced drag is zero
    pub span_efficiency: Option<f64>,
    /// 2L² / (π·D·arclength²), `None` when the induced drag is zero
    pub span_efficiency_arclength: Option<f64>,
}

impl LiftingLine {
    fn require_solved(&self) -> Result<()> {
        if self.is_solved() {
            Ok(())
        } else {
            Err(AeroError::NotSolved)
        }
    }

    fn require_drag(&self, coefficient: &'static str, drag: f64) -> Result<()> {
        if drag.abs() < f64::MIN_POSITIVE {
            warn!(
                "{} requested with zero induced drag (mode={:?})",
                coefficient,
                self.solve_mode()
            );
            return Err(AeroError::undefined(coefficient, "induced drag is zero"));
        }
        Ok(())
    }

    /// Total lift `−Σ κ·w`
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve.
    pub fn total_lift(&self) -> Result<f64> {
        self.require_solved()?;
        Ok(lift_sum(self.mesh(), self.kappa()))
    }

    /// Total induced drag `Σ κ·upwash·w`
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve.
    pub fn total_drag(&self) -> Result<f64> {
        self.require_solved()?;
        Ok(drag_sum(self.mesh(), self.kappa(), self.upwash()))
    }

    /// Lift coefficient `−2Σκw / Σcw`
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve.
    pub fn lift_coefficient(&self) -> Result<f64> {
        Ok(2.0 * self.total_lift()? / self.mesh().area())
    }

    /// Induced-drag coefficient `2Σκ·upwash·w / Σcw`
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve.
    pub fn induced_drag_coefficient(&self) -> Result<f64> {
        Ok(2.0 * self.total_drag()? / self.mesh().area())
    }

    /// Aspect ratio `b²/S`
    ///
    /// A pure mesh property, but it follows the same contract as the other
    /// coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve.
    pub fn aspect_ratio(&self) -> Result<f64> {
        self.require_solved()?;
        Ok(self.mesh().aspect_ratio())
    }

    /// Planform-normalized span efficiency `CL² / (π·AR·CDi)`
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve and
    /// [`AeroError::UndefinedCoefficient`] when the induced drag is zero.
    pub fn span_efficiency(&self) -> Result<f64> {
        let cl = self.lift_coefficient()?;
        let cdi = self.induced_drag_coefficient()?;
        self.require_drag("span efficiency", cdi)?;
        Ok(cl * cl / (PI * self.mesh().aspect_ratio() * cdi))
    }

    /// Arclength-normalized span efficiency `2L² / (π·D·s²)`
    ///
    /// Uses the total lateral arclength `s` in place of the span, which is the
    /// meaningful reference for non-planar lines (dihedral, winglets).
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve and
    /// [`AeroError::UndefinedCoefficient`] when the induced drag is zero.
    pub fn span_efficiency_arclength(&self) -> Result<f64> {
        let lift = self.total_lift()?;
        let drag = self.total_drag()?;
        self.require_drag("arclength span efficiency", drag)?;
        let arclength = self.mesh().total_arclength();
        Ok(2.0 * lift * lift / (PI * drag * arclength * arclength))
    }

    /// Every coefficient at once
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::NotSolved`] before any solve. Undefined
    /// efficiencies are reported as `None` rather than as errors.
    pub fn coefficients(&self) -> Result<AeroCoefficients> {
        Ok(AeroCoefficients {
            lift_coefficient: self.lift_coefficient()?,
            induced_drag_coefficient: self.induced_drag_coefficient()?,
            aspect_ratio: self.aspect_ratio()?,
            lift: self.total_lift()?,
            induced_drag: self.total_drag()?,
            span_efficiency: self.span_efficiency().ok(),
            span_efficiency_arclength: self.span_efficiency_arclength().ok(),
        })
    }
}
