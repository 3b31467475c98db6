//! Ambient flow values passed explicitly into performance calculations

use serde::{Deserialize, Serialize};

use crate::core_types::{KgPerCubicMeter, Meters, MetersPerSecond, PascalSeconds, Pascals};
use crate::error::{AeroError, Result};

/// Freestream density, speed, and dynamic viscosity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowConditions {
    /// Air density
    pub density: KgPerCubicMeter,
    /// True airspeed
    pub speed: MetersPerSecond,
    /// Dynamic viscosity
    pub viscosity: PascalSeconds,
}

impl FlowConditions {
    /// Validated flow conditions
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] if any value is
    /// non-positive or non-finite.
    pub fn new(
        density: KgPerCubicMeter,
        speed: MetersPerSecond,
        viscosity: PascalSeconds,
    ) -> Result<Self> {
        let conditions = Self {
            density,
            speed,
            viscosity,
        };
        conditions.validate()?;
        Ok(conditions)
    }

    /// Standard sea-level air at the given speed
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for a non-positive speed.
    pub fn sea_level(speed: MetersPerSecond) -> Result<Self> {
        Self::new(
            KgPerCubicMeter::SEA_LEVEL_AIR,
            speed,
            PascalSeconds::SEA_LEVEL_AIR,
        )
    }

    /// Same air at a different speed
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for a non-positive speed.
    pub fn at_speed(&self, speed: MetersPerSecond) -> Result<Self> {
        Self::new(self.density, speed, self.viscosity)
    }

    /// Check that every value is positive and finite
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        positive("density", *self.density)?;
        positive("speed", *self.speed)?;
        positive("viscosity", *self.viscosity)
    }

    /// Dynamic pressure `½ρV²`
    #[must_use]
    pub fn dynamic_pressure(&self) -> Pascals {
        Pascals::new(0.5 * *self.density * *self.speed * *self.speed)
    }

    /// Chord Reynolds number `ρVc/μ`, rounded to the nearest thousand
    ///
    /// Rounding keeps nearby flight conditions on the same profile-drag cache
    /// entry.
    #[must_use]
    pub fn reynolds(&self, chord: Meters) -> f64 {
        let re = *self.density * *self.speed * *chord / *self.viscosity;
        (re / 1000.0).round() * 1000.0
    }
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AeroError::flight(
            parameter,
            format!("must be positive and finite, got {value}"),
        ))
    }
}
