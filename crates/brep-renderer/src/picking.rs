//! Ray picking against displayed triangles
//!
//! Picking runs on the CPU copy of each shape's triangles, so it works
//! without reading anything back from the GPU.

use glam::Vec3;

/// Parallel rays and hits behind this distance are ignored.
const PICK_EPSILON: f32 = 1.0e-7;

/// Ray-triangle intersection (Möller-Trumbore).
///
/// Triangles are hit from either side, matching the two-sided face shading.
///
/// # Returns
///
/// * `Some(t)` - Ray parameter of the hit, `ray_origin + ray_dir * t`.
/// * `None` - The ray misses the triangle or the triangle is behind it.
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    [a, b, c]: [Vec3; 3],
) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray_dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PICK_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > PICK_EPSILON).then_some(t)
}

/// Closest hit over a set of triangles.
pub fn ray_triangles_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    triangles: &[[Vec3; 3]],
) -> Option<f32> {
    triangles
        .iter()
        .filter_map(|tri| ray_triangle_intersection(ray_origin, ray_dir, *tri))
        .min_by(f32::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [[Vec3; 3]; 2] = [
        [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
        [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
    ];

    #[test]
    fn test_ray_hits_triangle_from_both_sides() {
        let down = ray_triangle_intersection(Vec3::new(0.7, 0.2, 5.0), -Vec3::Z, SQUARE[0]);
        assert!((down.unwrap() - 5.0).abs() < 1e-5);

        let up = ray_triangle_intersection(Vec3::new(0.7, 0.2, -2.0), Vec3::Z, SQUARE[0]);
        assert!((up.unwrap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_triangle() {
        // Inside the square but in the other triangle
        assert!(ray_triangle_intersection(Vec3::new(0.2, 0.7, 5.0), -Vec3::Z, SQUARE[0]).is_none());
        // Pointing away
        assert!(ray_triangle_intersection(Vec3::new(0.7, 0.2, 5.0), Vec3::Z, SQUARE[0]).is_none());
        // Parallel to the plane
        assert!(ray_triangle_intersection(Vec3::new(-1.0, 0.2, 0.0), Vec3::X, SQUARE[0]).is_none());
    }

    #[test]
    fn test_closest_triangle_wins() {
        let lifted: Vec<[Vec3; 3]> = SQUARE
            .iter()
            .map(|tri| tri.map(|v| v + Vec3::Z * 3.0))
            .chain(SQUARE)
            .collect();
        let t = ray_triangles_intersection(Vec3::new(0.2, 0.7, 10.0), -Vec3::Z, &lifted);
        assert!((t.unwrap() - 7.0).abs() < 1e-5);
        assert!(ray_triangles_intersection(Vec3::new(2.0, 2.0, 10.0), -Vec3::Z, &lifted).is_none());
    }
}
