//! Influence kernel for the trailing-vortex system
//!
//! Each station carries a horseshoe vortex bounded by its `r_minus` and
//! `r_plus` panel boundaries, with trailing legs running downstream (+x) to
//! infinity. For a query point `P` with local lateral tangent `t`, the normal
//! velocity induced by the leg leaving boundary `X`, per unit circulation, is
//!
//! ```text
//! ρ  = (P.y − X.y, P.z − X.z)        lateral offset from the leg
//! d  = |ρ|,  dx = P.x − X.x
//! g(P, X) = (1 + sin(atan(dx / d))) · (ρ · t) / d²
//! ```
//!
//! The `1 + sin(atan(dx/d))` factor saturates the semi-infinite vortex formula:
//! it is 1 on the bound line, tends to 2 far downstream and to 0 far upstream,
//! which accounts for swept trailing legs. The plus and minus legs turn in
//! opposite senses, so station `j` contributes
//! `(g(P, r_minus[j]) − g(P, r_plus[j])) / 4π`.
//!
//! Offsets inside the vortex core are dropped rather than evaluated; on a valid
//! mesh this never happens at station positions.

use nalgebra::{DMatrix, Matrix3xX};
use std::f64::consts::PI;

use crate::core_types::Vec3;
use crate::mesh::SpanwiseMesh;

/// Vortex-core radius relative to the span
pub const CORE_RADIUS_FRACTION: f64 = 1e-12;

/// Normal velocity per unit circulation from one semi-infinite trailing leg
#[inline]
fn trailing_leg(point: &Vec3, tangent: &Vec3, boundary: &Vec3, core_sq: f64) -> f64 {
    let dx = point.x - boundary.x;
    let ry = point.y - boundary.y;
    let rz = point.z - boundary.z;
    let d_sq = ry * ry + rz * rz;
    if d_sq <= core_sq {
        return 0.0;
    }
    let d = d_sq.sqrt();
    let sweep = (dx / d).atan().sin();
    (1.0 + sweep) * (ry * tangent.y + rz * tangent.z) / d_sq
}

fn columns(matrix: &Matrix3xX<f64>) -> Vec<Vec3> {
    matrix
        .column_iter()
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect()
}

/// Influence matrix of the mesh's horseshoe vortices at arbitrary query points
///
/// # Arguments
///
/// * `mesh` - Mesh whose panel boundaries define the vortex system
/// * `points` - M query points, one per column
/// * `tangents` - Lateral unit tangent at each query point; the returned
///   velocity component is along `x̂ × t`
///
/// # Returns
///
/// M×N matrix whose `(i, j)` entry is the normal velocity at point `i` per unit
/// circulation of station `j`
///
/// # Panics
///
/// Panics if `points` and `tangents` have different column counts.
#[must_use]
pub fn influence_matrix(
    mesh: &SpanwiseMesh,
    points: &Matrix3xX<f64>,
    tangents: &Matrix3xX<f64>,
) -> DMatrix<f64> {
    assert_eq!(
        points.ncols(),
        tangents.ncols(),
        "one tangent is required per query point"
    );

    let query = columns(points);
    let normals = columns(tangents);
    let minus = columns(mesh.r_minus());
    let plus = columns(mesh.r_plus());

    let core = CORE_RADIUS_FRACTION * mesh.span();
    let core_sq = core * core;
    let inv_4pi = 1.0 / (4.0 * PI);

    DMatrix::from_fn(query.len(), minus.len(), |i, j| {
        let p = &query[i];
        let t = &normals[i];
        (trailing_leg(p, t, &minus[j], core_sq) - trailing_leg(p, t, &plus[j], core_sq)) * inv_4pi
    })
}

/// Influence matrix for vertical (z) induced velocity at arbitrary points
///
/// Equivalent to [`influence_matrix`] with every tangent along +y.
#[must_use]
pub fn vertical_influence_matrix(mesh: &SpanwiseMesh, points: &Matrix3xX<f64>) -> DMatrix<f64> {
    let tangents = Matrix3xX::from_fn(points.ncols(), |row, _| if row == 1 { 1.0 } else { 0.0 });
    influence_matrix(mesh, points, &tangents)
}

/// Self-influence matrix: every station queried at its own position
#[must_use]
pub fn self_influence_matrix(mesh: &SpanwiseMesh) -> DMatrix<f64> {
    influence_matrix(mesh, mesh.points(), mesh.tangents())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshConfig, SpacingPolicy};
    use approx::assert_relative_eq;

    fn two_station_mesh() -> SpanwiseMesh {
        SpanwiseMesh::build(&MeshConfig::rectangular(2, 0.1, SpacingPolicy::Uniform)).unwrap()
    }

    #[test]
    fn test_isolated_horseshoe_matches_classical_formula() {
        // Station 0 spans y ∈ [0, 0.5] with its control point at y = 0.25
        let mesh = two_station_mesh();
        let k = self_influence_matrix(&mesh);
        let h = 0.25;
        assert_relative_eq!(k[(0, 0)], 1.0 / (2.0 * PI * h), epsilon = 1e-12);
    }

    #[test]
    fn test_far_downstream_doubles_the_bound_line_value() {
        let mesh = two_station_mesh();
        let near = Matrix3xX::from_column_slice(&[0.0, 0.25, 0.0]);
        let far = Matrix3xX::from_column_slice(&[1e9, 0.25, 0.0]);
        let k_near = vertical_influence_matrix(&mesh, &near);
        let k_far = vertical_influence_matrix(&mesh, &far);
        assert_relative_eq!(k_far[(0, 0)], 2.0 * k_near[(0, 0)], max_relative = 1e-6);
    }

    #[test]
    fn test_far_upstream_vanishes() {
        let mesh = two_station_mesh();
        let ahead = Matrix3xX::from_column_slice(&[-1e9, 0.25, 0.0]);
        let k = vertical_influence_matrix(&mesh, &ahead);
        assert!(k[(0, 0)].abs() < 1e-9);
    }

    #[test]
    fn test_query_on_trailing_leg_stays_finite() {
        let mesh = two_station_mesh();
        let on_boundary = Matrix3xX::from_column_slice(&[0.0, 0.5, 0.0]);
        let k = vertical_influence_matrix(&mesh, &on_boundary);
        assert!(k.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_matrix_shape_is_queries_by_stations() {
        let mesh = SpanwiseMesh::build(&MeshConfig::elliptical(9, 0.1)).unwrap();
        let queries = Matrix3xX::from_fn(4, |row, col| {
            if row == 1 {
                0.2 * col as f64 + 0.1
            } else {
                0.0
            }
        });
        let k = vertical_influence_matrix(&mesh, &queries);
        assert_eq!(k.shape(), (4, 9));
    }

    #[test]
    fn test_vertical_matches_self_influence_on_planar_mesh() {
        let mesh = SpanwiseMesh::build(&MeshConfig::elliptical(12, 0.1)).unwrap();
        let a = self_influence_matrix(&mesh);
        let b = vertical_influence_matrix(&mesh, mesh.points());
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
}
