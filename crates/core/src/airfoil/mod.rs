//! Airfoil sections and profile-drag lookup

mod drag_cache;
mod section;

pub use drag_cache::{ProfileDragCache, ProfileDragSource, TabulatedProfileDrag};
pub use section::{AirfoilSection, SectionDescriptor};
