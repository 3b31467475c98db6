//! Error type shared by the mesh builder, solver, and performance layers

/// Errors produced by mesh construction, the linear solve, coefficient queries,
/// and the airfoil/performance helpers
#[derive(Debug, Clone, PartialEq)]
pub enum AeroError {
    /// Invalid mesh or section configuration (raised at build time, never clamped)
    InvalidConfig {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What was wrong with it
        message: String,
    },
    /// The dense circulation system could not be solved
    SingularSystem {
        /// Number of span stations in the failed system
        stations: usize,
    },
    /// A coefficient was queried before any solve populated the circulation
    NotSolved,
    /// A coefficient is mathematically undefined for the current state
    UndefinedCoefficient {
        /// Coefficient that was requested
        coefficient: &'static str,
        /// Why it is undefined
        reason: String,
    },
    /// The profile-drag source has no data for an airfoil
    UnknownAirfoil {
        /// Airfoil identifier used as the lookup key
        identifier: String,
    },
    /// Non-physical ambient or performance input
    InvalidFlightCondition {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What was wrong with it
        message: String,
    },
}

impl AeroError {
    pub(crate) fn config(parameter: &'static str, message: impl Into<String>) -> Self {
        AeroError::InvalidConfig {
            parameter,
            message: message.into(),
        }
    }

    pub(crate) fn undefined(coefficient: &'static str, reason: impl Into<String>) -> Self {
        AeroError::UndefinedCoefficient {
            coefficient,
            reason: reason.into(),
        }
    }

    pub(crate) fn flight(parameter: &'static str, message: impl Into<String>) -> Self {
        AeroError::InvalidFlightCondition {
            parameter,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AeroError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AeroError::InvalidConfig { parameter, message } => {
                write!(f, "Invalid configuration for '{parameter}': {message}")
            }
            AeroError::SingularSystem { stations } => {
                write!(f, "Circulation system with {stations} stations is singular")
            }
            AeroError::NotSolved => write!(f, "No solve has been performed yet"),
            AeroError::UndefinedCoefficient {
                coefficient,
                reason,
            } => write!(f, "{coefficient} is undefined: {reason}"),
            AeroError::UnknownAirfoil { identifier } => {
                write!(f, "No profile drag data for airfoil '{identifier}'")
            }
            AeroError::InvalidFlightCondition { parameter, message } => {
                write!(f, "Invalid flight condition '{parameter}': {message}")
            }
        }
    }
}

impl std::error::Error for AeroError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AeroError>;
