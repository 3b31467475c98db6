//! Spanwise mesh construction
//!
//! [`MeshConfig`] describes station count, spacing, chord distribution, and
//! placement; [`SpanwiseMesh::build`] turns it into an immutable mesh with
//! panel boundaries and quadrature weights. Reconfiguring a solver always
//! builds a fresh mesh.

mod config;
mod spanwise;

pub use config::{ChordPolicy, MeshConfig, SpacingPolicy};
pub use spanwise::SpanwiseMesh;
