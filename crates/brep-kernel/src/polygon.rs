//! Planar polygon helpers shared by face construction, sewing and tessellation

use glam::DVec3;

/// Area-weighted normal of a closed polygon (Newell's method)
///
/// The length of the result is twice the polygon area; the direction follows
/// the right-hand rule over the vertex order.
pub fn newell_normal(points: &[DVec3]) -> DVec3 {
    let n = points.len();
    (0..n).fold(DVec3::ZERO, |acc, i| {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc + DVec3::new(
            (a.y - b.y) * (a.z + b.z),
            (a.z - b.z) * (a.x + b.x),
            (a.x - b.x) * (a.y + b.y),
        )
    })
}

/// Largest axis-aligned extent of a point set
pub fn extent(points: &[DVec3]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let (min, max) = points
        .iter()
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
    (max - min).max_element()
}

/// Largest distance of any point from the best-fit plane
///
/// Returns `None` when the points do not span a plane.
pub fn planarity_deviation(points: &[DVec3]) -> Option<f64> {
    let normal = newell_normal(points).try_normalize()?;
    let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    Some(
        points
            .iter()
            .map(|p| (*p - centroid).dot(normal).abs())
            .fold(0.0, f64::max),
    )
}

/// Signed volume of the cone from the origin to a planar oriented loop
///
/// Exact for concave loops: the base area comes from the Newell normal and
/// the height from any point on the plane.
pub fn cone_volume(points: &[DVec3]) -> f64 {
    match points.first() {
        Some(base) => newell_normal(points).dot(*base) / 6.0,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_newell_normal_follows_winding() {
        let square = unit_square();
        let n = newell_normal(&square);
        assert_relative_eq!(n.z, 2.0);
        assert_relative_eq!(n.x, 0.0);

        let reversed: Vec<_> = square.iter().rev().copied().collect();
        assert_relative_eq!(newell_normal(&reversed).z, -2.0);
    }

    #[test]
    fn test_planarity() {
        assert_relative_eq!(planarity_deviation(&unit_square()).unwrap(), 0.0);

        let mut warped = unit_square();
        warped[2].z = 0.5;
        assert!(planarity_deviation(&warped).unwrap() > 0.1);

        let collinear = vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0];
        assert!(planarity_deviation(&collinear).is_none());
    }

    #[test]
    fn test_cone_volume() {
        // Top of a unit cube seen from the origin: a pyramid of volume 1/3
        let top: Vec<_> = unit_square().iter().map(|p| *p + DVec3::Z).collect();
        assert_relative_eq!(cone_volume(&top), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(extent(&top), 1.0);

        // L-shaped loop of area 3 lifted to z = 1
        let ell: Vec<_> = [(2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0), (0.0, 0.0), (2.0, 0.0)]
            .iter()
            .map(|&(x, y)| DVec3::new(x, y, 1.0))
            .collect();
        assert_relative_eq!(newell_normal(&ell).z, 6.0, epsilon = 1e-12);
        assert_relative_eq!(cone_volume(&ell), 1.0, epsilon = 1e-12);
        assert_eq!(cone_volume(&[]), 0.0);
    }
}
