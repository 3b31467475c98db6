//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for station positions, panel boundaries, and tangents.
///
/// Wing-fixed axes: x streamwise (downstream positive), y spanwise,
/// z vertical. This is a simple alias for `nalgebra::Vector3<f64>`.
pub type Vec3 = Vector3<f64>;
