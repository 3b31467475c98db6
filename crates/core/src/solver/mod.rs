//! Lifting-line solver module
//!
//! This module turns a [`SpanwiseMesh`](crate::mesh::SpanwiseMesh) into a
//! circulation distribution and the integrated coefficients derived from it.
//!
//! # Pipeline
//!
//! 1. [`kernel`] evaluates the trailing-vortex influence of every station at
//!    arbitrary query points
//! 2. [`LiftingLine`] assembles `(−K − diag(1/(π·c))) · κ = α` and solves it
//!    densely, or skips the coupling entirely in [`SolveMode::Uncoupled`]
//! 3. The coefficient accessors on [`LiftingLine`] reduce `κ` and the upwash to
//!    CL, CDi, aspect ratio, forces, and span efficiency
//!
//! # Example
//!
//! ```rust
//! use liftline_core::core_types::Degrees;
//! use liftline_core::mesh::MeshConfig;
//! use liftline_core::solver::LiftingLine;
//!
//! let mut wing = LiftingLine::new(&MeshConfig::elliptical(60, 0.1)).unwrap();
//! wing.solve(Degrees::new(4.0).to_radians()).unwrap();
//! let e = wing.span_efficiency().unwrap();
//! assert!((e - 1.0).abs() < 0.05);
//! ```

mod coefficients;
pub mod kernel;
#[allow(clippy::module_name_repetitions)]
mod lifting_line;

pub use coefficients::AeroCoefficients;
pub use kernel::{influence_matrix, self_influence_matrix, vertical_influence_matrix};
pub use lifting_line::{LiftingLine, SolveMode};
