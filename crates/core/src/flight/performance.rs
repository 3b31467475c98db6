//! Steady flight performance of a wing sized in physical units
//!
//! The wing is a [`LiftingLine`] whose mesh `scale` is the physical span in
//! metres, so its planform area is the reference area. For each flight point
//! the lift coefficient needed to carry the weight component normal to the
//! flight path is solved for exactly, and the induced drag of that solve is
//! added to the zero-lift drag.
//!
//! # Climb condition
//!
//! ```text
//! CL = W·cos φ / (q·S)
//! D  = q·S·(CD0 + CDi)
//! a point is flyable when  T(V) ≥ D + W·sin φ
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::airfoil::{AirfoilSection, ProfileDragCache, ProfileDragSource};
use crate::core_types::{KgPerCubicMeter, MetersPerSecond, Newtons, PascalSeconds, Radians};
use crate::error::{AeroError, Result};
use crate::flight::conditions::{positive, FlowConditions};
use crate::flight::propulsion::LinearThrust;
use crate::solver::{LiftingLine, SolveMode};

/// Aircraft-level inputs for drag and climb calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceModel {
    /// Aircraft weight
    pub weight: Newtons,

    /// Additional drag area `D/q` in m² (fuselage, gear, ...)
    pub extra_drag_area: f64,

    /// Zero-lift profile drag coefficient of the wing section
    pub profile_cd0: f64,

    /// Speed range swept by the climb envelope
    pub speed_limits: (MetersPerSecond, MetersPerSecond),

    /// Flight-path angle range swept by the climb envelope
    pub climb_angle_limits: (Radians, Radians),

    /// Available thrust
    pub thrust: LinearThrust,
}

impl Default for PerformanceModel {
    fn default() -> Self {
        Self {
            weight: Newtons::new(1.0),
            extra_drag_area: 0.0,
            profile_cd0: 0.0,
            speed_limits: (MetersPerSecond::new(25.0), MetersPerSecond::new(100.0)),
            climb_angle_limits: (
                Radians::new(-std::f64::consts::FRAC_PI_2),
                Radians::new(std::f64::consts::FRAC_PI_2),
            ),
            thrust: LinearThrust::default(),
        }
    }
}

/// One sampled flight point of a climb envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimbPoint {
    /// Airspeed
    pub speed: MetersPerSecond,
    /// Flight-path angle, positive climbing
    pub climb_angle: Radians,
    /// Available thrust
    pub thrust: Newtons,
    /// Aerodynamic drag at this point
    pub drag: Newtons,
}

impl ClimbPoint {
    /// Vertical speed `V·sin φ`
    #[must_use]
    pub fn climb_rate(&self) -> MetersPerSecond {
        MetersPerSecond::new(*self.speed * self.climb_angle.sin())
    }
}

/// Flyable and unflyable points of a speed × climb-angle sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimbEnvelope {
    /// Points where thrust covers drag plus the weight component along the path
    pub succeeded: Vec<ClimbPoint>,
    /// Points where it does not
    pub failed: Vec<ClimbPoint>,
}

impl ClimbEnvelope {
    /// Best vertical speed over the flyable points, `None` if there are none
    #[must_use]
    pub fn max_climb_rate(&self) -> Option<MetersPerSecond> {
        self.succeeded.iter().map(ClimbPoint::climb_rate).max()
    }
}

fn linspace(lo: f64, hi: f64, samples: usize) -> impl Iterator<Item = f64> {
    let step = (hi - lo) / (samples - 1) as f64;
    (0..samples).map(move |i| lo + step * i as f64)
}

impl PerformanceModel {
    /// Resolve `profile_cd0` for `section` through a drag cache
    ///
    /// # Errors
    ///
    /// Propagates the cache's lookup error.
    pub fn with_profile_drag<S: ProfileDragSource>(
        mut self,
        cache: &mut ProfileDragCache<S>,
        section: &AirfoilSection,
    ) -> Result<Self> {
        self.profile_cd0 = cache.get(section)?;
        Ok(self)
    }

    /// Check weight, drag terms, limits, and the thrust model
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        positive("weight", *self.weight)?;
        if !self.extra_drag_area.is_finite() || self.extra_drag_area < 0.0 {
            return Err(AeroError::flight(
                "extra_drag_area",
                format!("must be non-negative, got {}", self.extra_drag_area),
            ));
        }
        if !self.profile_cd0.is_finite() || self.profile_cd0 < 0.0 {
            return Err(AeroError::flight(
                "profile_cd0",
                format!("must be non-negative, got {}", self.profile_cd0),
            ));
        }
        let (v_lo, v_hi) = self.speed_limits;
        positive("speed_limits", *v_lo)?;
        if !v_hi.is_finite() || v_hi < v_lo {
            return Err(AeroError::flight(
                "speed_limits",
                format!("upper limit {v_hi} is below lower limit {v_lo}"),
            ));
        }
        let (phi_lo, phi_hi) = self.climb_angle_limits;
        if !phi_lo.is_finite() || !phi_hi.is_finite() || *phi_hi < *phi_lo {
            return Err(AeroError::flight(
                "climb_angle_limits",
                format!("invalid range {phi_lo} to {phi_hi}"),
            ));
        }
        self.thrust.validate()
    }

    /// Zero-lift drag coefficient referenced to `wing_area`
    #[must_use]
    pub fn zero_lift_drag_coefficient(&self, wing_area: f64) -> f64 {
        self.profile_cd0 + self.extra_drag_area / wing_area
    }

    /// Total drag at the given flight condition and flight-path angle
    ///
    /// Leaves `wing` solved at the lift coefficient of this flight point.
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for invalid conditions or
    /// model values, and any solve error.
    pub fn drag(
        &self,
        wing: &mut LiftingLine,
        conditions: &FlowConditions,
        climb_angle: Radians,
    ) -> Result<Newtons> {
        conditions.validate()?;
        positive("weight", *self.weight)?;

        let q = conditions.dynamic_pressure();
        let area = wing.mesh().area();
        let cl = *self.weight * climb_angle.cos() / (*q * area);
        wing.solve_for_lift_coefficient(cl, SolveMode::Coupled)?;
        let cdi = wing.induced_drag_coefficient()?;

        Ok(q * (area * (self.zero_lift_drag_coefficient(area) + cdi)))
    }

    /// Sweep `samples` speeds × `samples` climb angles at the given density
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for fewer than two
    /// samples or invalid model values, and any solve error.
    pub fn climb_envelope(
        &self,
        wing: &mut LiftingLine,
        density: KgPerCubicMeter,
        samples: usize,
    ) -> Result<ClimbEnvelope> {
        self.validate()?;
        if samples < 2 {
            return Err(AeroError::flight(
                "samples",
                format!("need at least 2 samples per axis, got {samples}"),
            ));
        }

        let (v_lo, v_hi) = self.speed_limits;
        let (phi_lo, phi_hi) = self.climb_angle_limits;
        let mut envelope = ClimbEnvelope::default();
        let ambient = FlowConditions::new(density, v_lo, PascalSeconds::SEA_LEVEL_AIR)?;

        for v in linspace(*v_lo, *v_hi, samples) {
            let speed = MetersPerSecond::new(v);
            let conditions = ambient.at_speed(speed)?;
            let thrust = self.thrust.thrust(speed);

            for phi in linspace(*phi_lo, *phi_hi, samples) {
                let climb_angle = Radians::new(phi);
                let drag = self.drag(wing, &conditions, climb_angle)?;
                let required = drag + self.weight * climb_angle.sin();
                debug!(
                    "Climb point V={} phi={}: thrust={} required={}",
                    speed,
                    climb_angle.to_degrees(),
                    thrust,
                    required
                );

                let point = ClimbPoint {
                    speed,
                    climb_angle,
                    thrust,
                    drag,
                };
                if thrust >= required {
                    envelope.succeeded.push(point);
                } else {
                    envelope.failed.push(point);
                }
            }
        }

        info!(
            "Climb envelope: {} flyable, {} unflyable points",
            envelope.succeeded.len(),
            envelope.failed.len()
        );
        Ok(envelope)
    }

    /// Best vertical speed over the climb envelope
    ///
    /// # Errors
    ///
    /// See [`climb_envelope`](Self::climb_envelope).
    pub fn max_climb_rate(
        &self,
        wing: &mut LiftingLine,
        density: KgPerCubicMeter,
        samples: usize,
    ) -> Result<Option<MetersPerSecond>> {
        Ok(self
            .climb_envelope(wing, density, samples)?
            .max_climb_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshConfig;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn wing() -> LiftingLine {
        let config = MeshConfig {
            scale: 2.0,
            ..MeshConfig::elliptical(60, 0.1)
        };
        LiftingLine::new(&config).unwrap()
    }

    fn model() -> PerformanceModel {
        PerformanceModel {
            weight: Newtons::new(10.0),
            profile_cd0: 0.01,
            speed_limits: (MetersPerSecond::new(10.0), MetersPerSecond::new(30.0)),
            climb_angle_limits: (Radians::new(-0.5), Radians::new(0.5)),
            thrust: LinearThrust {
                static_thrust: Newtons::new(5.0),
                thrust_at_max: Newtons::new(1.0),
                max_speed: MetersPerSecond::new(30.0),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_level_drag_matches_parabolic_polar() {
        let mut wing = wing();
        let model = model();
        let flow = FlowConditions::sea_level(MetersPerSecond::new(15.0)).unwrap();
        let drag = model.drag(&mut wing, &flow, Radians::new(0.0)).unwrap();

        let q = *flow.dynamic_pressure();
        let area = wing.mesh().area();
        let ar = wing.mesh().aspect_ratio();
        let cl = 10.0 / (q * area);
        let expected = q * area * (0.01 + cl * cl / (PI * ar));
        assert_relative_eq!(*drag, expected, max_relative = 0.01);
        assert_relative_eq!(wing.lift_coefficient().unwrap(), cl, max_relative = 1e-10);
    }

    #[test]
    fn test_extra_drag_area_adds_q_times_area() {
        let mut wing = wing();
        let flow = FlowConditions::sea_level(MetersPerSecond::new(20.0)).unwrap();
        let clean = model().drag(&mut wing, &flow, Radians::new(0.0)).unwrap();
        let draggy = PerformanceModel {
            extra_drag_area: 0.01,
            ..model()
        }
        .drag(&mut wing, &flow, Radians::new(0.0))
        .unwrap();
        let q = *flow.dynamic_pressure();
        assert_relative_eq!(*draggy - *clean, q * 0.01, max_relative = 1e-10);
    }

    #[test]
    fn test_envelope_splits_points() {
        let mut wing = wing();
        let envelope = model()
            .climb_envelope(&mut wing, KgPerCubicMeter::SEA_LEVEL_AIR, 5)
            .unwrap();
        assert_eq!(envelope.succeeded.len() + envelope.failed.len(), 25);
        assert!(!envelope.succeeded.is_empty());
        assert!(!envelope.failed.is_empty());
        // Descending at the steepest angle is always flyable with positive thrust
        assert!(envelope
            .succeeded
            .iter()
            .any(|p| *p.climb_angle < -0.49));
        let best = envelope.max_climb_rate().unwrap();
        assert!(*best > 0.0);
    }

    #[test]
    fn test_no_thrust_means_no_climb() {
        let mut wing = wing();
        let gliding = PerformanceModel {
            climb_angle_limits: (Radians::new(0.0), Radians::new(0.3)),
            thrust: LinearThrust {
                static_thrust: Newtons::new(0.0),
                thrust_at_max: Newtons::new(0.0),
                max_speed: MetersPerSecond::new(30.0),
            },
            ..model()
        };
        let rate = gliding
            .max_climb_rate(&mut wing, KgPerCubicMeter::SEA_LEVEL_AIR, 3)
            .unwrap();
        assert_eq!(rate, None);
    }

    #[test]
    fn test_single_sample_is_rejected() {
        let mut wing = wing();
        assert!(model()
            .climb_envelope(&mut wing, KgPerCubicMeter::SEA_LEVEL_AIR, 1)
            .is_err());
    }
}
