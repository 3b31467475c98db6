//! Flight conditions, propulsion, and steady-flight performance
//!
//! Ambient values are always passed in explicitly; nothing here reaches back
//! into a shared vehicle or atmosphere object.

mod conditions;
mod performance;
mod propulsion;

pub use conditions::FlowConditions;
pub use performance::{ClimbEnvelope, ClimbPoint, PerformanceModel};
pub use propulsion::LinearThrust;
