//! Lifting-line circulation solver
//!
//! [`LiftingLine`] owns one [`SpanwiseMesh`] together with the circulation
//! state solved on it. The self-influence matrix is assembled once per mesh;
//! installing a different mesh goes through [`LiftingLine::reconfigure`],
//! which rebuilds everything and resets the state to unsolved.
//!
//! # Sign convention
//!
//! `kappa` is negative for positive lift: total lift is `−Σ κ·w`, and the
//! uncoupled solve gives `κ = −π·c·α` at every station.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info};

use super::coefficients::lift_sum;
use super::kernel::self_influence_matrix;
use crate::core_types::Radians;
use crate::error::{AeroError, Result};
use crate::mesh::{MeshConfig, SpanwiseMesh};

/// How spanwise stations are coupled in a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolveMode {
    /// Full trailing-vortex coupling through the influence matrix
    #[default]
    Coupled,
    /// Independent 2D thin-airfoil response per station, zero upwash
    Uncoupled,
}

impl std::fmt::Display for SolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveMode::Coupled => write!(f, "coupled"),
            SolveMode::Uncoupled => write!(f, "uncoupled"),
        }
    }
}

/// Finite-wing circulation solver over a spanwise station mesh
#[derive(Debug, Clone)]
pub struct LiftingLine {
    mesh: SpanwiseMesh,

    /// Self-influence matrix K of `mesh`
    influence: DMatrix<f64>,

    /// Circulation strength per station
    kappa: DVector<f64>,

    /// Induced normal velocity per station, `K · kappa`
    upwash: DVector<f64>,

    /// Mode and angle of attack of the last successful solve
    last_solve: Option<(SolveMode, Radians)>,
}

impl LiftingLine {
    /// Build the mesh described by `config` and an unsolved solver on it
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] if the mesh cannot be built.
    pub fn new(config: &MeshConfig) -> Result<Self> {
        let mesh = SpanwiseMesh::build(config)?;
        let solver = Self::from_mesh(mesh);
        info!(
            "Lifting line ready: {} stations, span={:.3}, AR={:.3}",
            solver.mesh.len(),
            solver.mesh.span(),
            solver.mesh.aspect_ratio()
        );
        Ok(solver)
    }

    /// Wrap an already built mesh (for example one from
    /// [`SpanwiseMesh::from_stations`])
    #[must_use]
    pub fn from_mesh(mesh: SpanwiseMesh) -> Self {
        let n = mesh.len();
        let influence = self_influence_matrix(&mesh);
        Self {
            mesh,
            influence,
            kappa: DVector::zeros(n),
            upwash: DVector::zeros(n),
            last_solve: None,
        }
    }

    /// Replace the mesh with one built from `config`
    ///
    /// This is a full rebuild: the influence matrix is reassembled and the
    /// circulation state returns to zero and unsolved. On error the solver is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] if the new mesh cannot be built.
    pub fn reconfigure(&mut self, config: &MeshConfig) -> Result<()> {
        let mesh = SpanwiseMesh::build(config)?;
        info!(
            "Reconfiguring lifting line: {} -> {} stations",
            self.mesh.len(),
            mesh.len()
        );
        *self = Self::from_mesh(mesh);
        Ok(())
    }

    /// Coupled solve at a uniform angle of attack
    ///
    /// Solves `(−K − diag(1/(π·c))) · κ = α` by dense LU, then sets
    /// `upwash = K · κ`.
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::SingularSystem`] if the LU solve fails or yields a
    /// non-finite circulation, and [`AeroError::InvalidFlightCondition`] for a
    /// non-finite angle. The previous state is kept on error.
    pub fn solve(&mut self, alpha: Radians) -> Result<()> {
        self.solve_with(SolveMode::Coupled, alpha)
    }

    /// Uncoupled solve: `κ = −π·c·α` per station and zero upwash
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for a non-finite angle.
    pub fn solve_no_wash(&mut self, alpha: Radians) -> Result<()> {
        self.solve_with(SolveMode::Uncoupled, alpha)
    }

    /// Solve in the given mode
    ///
    /// # Errors
    ///
    /// See [`solve`](Self::solve) and [`solve_no_wash`](Self::solve_no_wash).
    pub fn solve_with(&mut self, mode: SolveMode, alpha: Radians) -> Result<()> {
        let (kappa, upwash) = self.circulation(mode, alpha)?;
        self.kappa = kappa;
        self.upwash = upwash;
        self.last_solve = Some((mode, alpha));

        debug!(
            "Solved {} lifting line: {} stations, alpha={}, CL={:.5}",
            mode,
            self.mesh.len(),
            alpha.to_degrees(),
            2.0 * lift_sum(&self.mesh, &self.kappa) / self.mesh.area()
        );
        Ok(())
    }

    /// Lift-curve slope `dCL/dα` (per radian) in the given mode
    ///
    /// The system is linear in α, so this is the lift coefficient of a unit
    /// angle solve. The current state is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::SingularSystem`] if the coupled system is singular.
    pub fn lift_curve_slope(&self, mode: SolveMode) -> Result<f64> {
        let (kappa, _) = self.circulation(mode, Radians::new(1.0))?;
        Ok(2.0 * lift_sum(&self.mesh, &kappa) / self.mesh.area())
    }

    /// Solve at the angle of attack that produces `target_cl`
    ///
    /// # Returns
    ///
    /// The angle of attack used for the solve
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::UndefinedCoefficient`] when the lift-curve slope is
    /// zero or non-finite, [`AeroError::InvalidFlightCondition`] for a
    /// non-finite target, and any error of the underlying solve.
    pub fn solve_for_lift_coefficient(
        &mut self,
        target_cl: f64,
        mode: SolveMode,
    ) -> Result<Radians> {
        if !target_cl.is_finite() {
            return Err(AeroError::flight(
                "target_cl",
                format!("must be finite, got {target_cl}"),
            ));
        }
        let slope = self.lift_curve_slope(mode)?;
        if !slope.is_finite() || slope.abs() < f64::MIN_POSITIVE {
            return Err(AeroError::undefined(
                "lift curve slope",
                format!("slope {slope} cannot be inverted"),
            ));
        }
        let alpha = Radians::new(target_cl / slope);
        self.solve_with(mode, alpha)?;
        Ok(alpha)
    }

    /// Circulation and upwash for a solve, without touching the state
    fn circulation(
        &self,
        mode: SolveMode,
        alpha: Radians,
    ) -> Result<(DVector<f64>, DVector<f64>)> {
        if !alpha.is_finite() {
            return Err(AeroError::flight(
                "alpha",
                format!("angle of attack must be finite, got {}", *alpha),
            ));
        }
        let n = self.mesh.len();
        let chords = self.mesh.chords();

        match mode {
            SolveMode::Uncoupled => {
                let kappa = chords.map(|c| -PI * c * *alpha);
                Ok((kappa, DVector::zeros(n)))
            }
            SolveMode::Coupled => {
                let mut system = -self.influence.clone();
                for (i, c) in chords.iter().enumerate() {
                    system[(i, i)] -= 1.0 / (PI * c);
                }
                let rhs = DVector::from_element(n, *alpha);

                let kappa = system
                    .lu()
                    .solve(&rhs)
                    .filter(|k| k.iter().all(|v| v.is_finite()))
                    .ok_or(AeroError::SingularSystem { stations: n })?;
                let upwash = &self.influence * &kappa;
                Ok((kappa, upwash))
            }
        }
    }

    /// The mesh this solver owns
    #[must_use]
    pub fn mesh(&self) -> &SpanwiseMesh {
        &self.mesh
    }

    /// Self-influence matrix of the current mesh
    #[must_use]
    pub fn influence(&self) -> &DMatrix<f64> {
        &self.influence
    }

    /// Circulation per station (zeros before any solve)
    #[must_use]
    pub fn kappa(&self) -> &DVector<f64> {
        &self.kappa
    }

    /// Induced normal velocity per station (zeros before any coupled solve)
    #[must_use]
    pub fn upwash(&self) -> &DVector<f64> {
        &self.upwash
    }

    /// Whether a solve has populated the circulation state
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.last_solve.is_some()
    }

    /// Mode of the last successful solve
    #[must_use]
    pub fn solve_mode(&self) -> Option<SolveMode> {
        self.last_solve.map(|(mode, _)| mode)
    }

    /// Angle of attack of the last successful solve
    #[must_use]
    pub fn alpha(&self) -> Option<Radians> {
        self.last_solve.map(|(_, alpha)| alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Degrees;
    use crate::mesh::SpacingPolicy;
    use approx::assert_relative_eq;

    fn elliptical(n: usize) -> LiftingLine {
        LiftingLine::new(&MeshConfig::elliptical(n, 0.1)).unwrap()
    }

    #[test]
    fn test_new_solver_is_unsolved() {
        let solver = elliptical(10);
        assert!(!solver.is_solved());
        assert!(solver.kappa().iter().all(|k| *k == 0.0));
        assert!(solver.upwash().iter().all(|w| *w == 0.0));
        assert_eq!(solver.influence().shape(), (10, 10));
    }

    #[test]
    fn test_uncoupled_solve_is_thin_airfoil() {
        let mut solver =
            LiftingLine::new(&MeshConfig::rectangular(8, 0.2, SpacingPolicy::Uniform)).unwrap();
        let alpha = Degrees::new(3.0).to_radians();
        solver.solve_no_wash(alpha).unwrap();
        for k in solver.kappa().iter() {
            assert_relative_eq!(*k, -PI * 0.2 * *alpha, epsilon = 1e-15);
        }
        assert!(solver.upwash().iter().all(|w| *w == 0.0));
        assert_eq!(solver.solve_mode(), Some(SolveMode::Uncoupled));
    }

    #[test]
    fn test_coupled_circulation_is_negative_for_positive_alpha() {
        let mut solver = elliptical(20);
        solver.solve(Degrees::new(4.0).to_radians()).unwrap();
        assert!(solver.kappa().iter().all(|k| *k < 0.0));
        // Trailing vortices reduce the effective incidence
        let uncoupled = -PI * solver.mesh().chords()[10] * 4f64.to_radians();
        assert!(solver.kappa()[10] > uncoupled);
    }

    #[test]
    fn test_residual_of_coupled_solve_is_small() {
        let mut solver = elliptical(24);
        let alpha = Radians::new(0.05);
        solver.solve(alpha).unwrap();
        let n = solver.mesh().len();
        for i in 0..n {
            let c = solver.mesh().chords()[i];
            let lhs = -solver.upwash()[i] - solver.kappa()[i] / (PI * c);
            assert_relative_eq!(lhs, 0.05, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_failed_reconfigure_keeps_state() {
        let mut solver = elliptical(12);
        solver.solve(Radians::new(0.05)).unwrap();
        let bad = MeshConfig {
            stations: 1,
            ..MeshConfig::default()
        };
        assert!(solver.reconfigure(&bad).is_err());
        assert!(solver.is_solved());
        assert_eq!(solver.mesh().len(), 12);
    }

    #[test]
    fn test_reconfigure_resets_state() {
        let mut solver = elliptical(12);
        solver.solve(Radians::new(0.05)).unwrap();
        solver.reconfigure(&MeshConfig::elliptical(16, 0.1)).unwrap();
        assert!(!solver.is_solved());
        assert_eq!(solver.kappa().len(), 16);
        assert_eq!(solver.influence().shape(), (16, 16));
    }

    #[test]
    fn test_singular_system_keeps_previous_state() {
        let mut solver = elliptical(10);
        solver.solve(Radians::new(0.05)).unwrap();
        let (kappa, upwash) = (solver.kappa().clone(), solver.upwash().clone());

        // Cancels the 1/(πc) diagonal exactly, leaving a zero system matrix
        let chords = solver.mesh().chords().clone();
        solver.influence = -DMatrix::from_diagonal(&chords.map(|c| 1.0 / (PI * c)));

        let err = solver.solve(Radians::new(0.08)).unwrap_err();
        assert_eq!(err, AeroError::SingularSystem { stations: 10 });
        assert!(solver.lift_curve_slope(SolveMode::Coupled).is_err());
        assert_eq!(solver.kappa(), &kappa);
        assert_eq!(solver.upwash(), &upwash);
        assert!(solver.is_solved());
        assert_eq!(solver.alpha(), Some(Radians::new(0.05)));

        // The uncoupled path never touches the system matrix
        solver.solve_no_wash(Radians::new(0.08)).unwrap();
        assert_eq!(solver.solve_mode(), Some(SolveMode::Uncoupled));
    }

    #[test]
    fn test_non_finite_alpha_is_rejected() {
        let mut solver = elliptical(8);
        let err = solver.solve(Radians::new(f64::NAN)).unwrap_err();
        assert!(matches!(
            err,
            AeroError::InvalidFlightCondition {
                parameter: "alpha",
                ..
            }
        ));
        assert!(!solver.is_solved());
    }

    #[test]
    fn test_target_lift_solve_hits_target() {
        let mut solver = elliptical(40);
        let alpha = solver
            .solve_for_lift_coefficient(0.5, SolveMode::Coupled)
            .unwrap();
        assert_eq!(solver.alpha(), Some(alpha));
        let cl = 2.0 * lift_sum(solver.mesh(), solver.kappa()) / solver.mesh().area();
        assert_relative_eq!(cl, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_uncoupled_lift_slope_is_two_pi() {
        let solver =
            LiftingLine::new(&MeshConfig::rectangular(10, 0.1, SpacingPolicy::Uniform)).unwrap();
        let slope = solver.lift_curve_slope(SolveMode::Uncoupled).unwrap();
        assert_relative_eq!(slope, 2.0 * PI, epsilon = 1e-12);
        assert!(!solver.is_solved());
    }
}
