//! Propulsion model

use serde::{Deserialize, Serialize};

use crate::core_types::{MetersPerSecond, Newtons};
use crate::error::{AeroError, Result};
use crate::flight::conditions::positive;

/// Thrust that varies linearly from its static value to its value at top speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearThrust {
    /// Thrust at zero airspeed
    pub static_thrust: Newtons,
    /// Thrust at `max_speed`
    pub thrust_at_max: Newtons,
    /// Speed at which `thrust_at_max` applies
    pub max_speed: MetersPerSecond,
}

impl Default for LinearThrust {
    fn default() -> Self {
        Self {
            static_thrust: Newtons::new(1.0),
            thrust_at_max: Newtons::new(1.0),
            max_speed: MetersPerSecond::new(1.0),
        }
    }
}

impl LinearThrust {
    /// Check that the reference speed is usable
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for a non-positive
    /// `max_speed` or non-finite thrust values.
    pub fn validate(&self) -> Result<()> {
        positive("max_speed", *self.max_speed)?;
        if !self.static_thrust.is_finite() || !self.thrust_at_max.is_finite() {
            return Err(AeroError::flight("thrust", "thrust values must be finite"));
        }
        Ok(())
    }

    /// Available thrust at `speed`
    ///
    /// Extrapolates past `max_speed` along the same line.
    #[must_use]
    pub fn thrust(&self, speed: MetersPerSecond) -> Newtons {
        let slope = (*self.thrust_at_max - *self.static_thrust) / *self.max_speed;
        Newtons::new(*self.static_thrust + slope * *speed)
    }
}
