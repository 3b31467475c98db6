//! Lifting-Line Aerodynamics Core Library
//!
//! A discretized finite-wing solver: it builds a spanwise station mesh,
//! solves a dense linear system for the bound circulation at every station,
//! and integrates lift, induced drag, and span efficiency from the result.
//!
//! ## Modules
//!
//! - [`mesh`]: spacing and chord policies, immutable [`SpanwiseMesh`]
//! - [`solver`]: influence kernel, [`LiftingLine`], coefficient accessors
//! - [`diagnostics`]: read-only distributions and planform outlines
//! - [`airfoil`]: airfoil sections and the profile-drag cache
//! - [`flight`]: flow conditions, thrust, drag and climb performance
//!
//! ## Example
//!
//! ```rust
//! use liftline_core::{Degrees, LiftingLine, MeshConfig};
//!
//! let mut wing = LiftingLine::new(&MeshConfig::default()).unwrap();
//! wing.solve(Degrees::new(5.0).to_radians()).unwrap();
//! let coefficients = wing.coefficients().unwrap();
//! assert!(coefficients.lift_coefficient > 0.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Geometry and numerics
pub mod mesh;
pub mod solver;

// Collaborators built on the solver
pub mod airfoil;
pub mod diagnostics;
pub mod flight;

// Re-export core types
pub use core_types::{
    Degrees, KgPerCubicMeter, Meters, MetersPerSecond, Newtons, PascalSeconds, Pascals, Radians,
    Vec3,
};
pub use error::{AeroError, Result};

// Re-export solver types
pub use mesh::{ChordPolicy, MeshConfig, SpacingPolicy, SpanwiseMesh};
pub use solver::{AeroCoefficients, LiftingLine, SolveMode};

// Re-export collaborators
pub use airfoil::{
    AirfoilSection, ProfileDragCache, ProfileDragSource, SectionDescriptor, TabulatedProfileDrag,
};
pub use diagnostics::{planform_outline, SpanwiseDistribution};
pub use flight::{ClimbEnvelope, ClimbPoint, FlowConditions, LinearThrust, PerformanceModel};
