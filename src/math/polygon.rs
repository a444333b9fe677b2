//! Planar convex polygon helpers used by the cell kernel.
//!
//! Polygons are vertex loops in 3D. Unless stated otherwise a polygon is
//! expected to be planar and convex, wound counter-clockwise when viewed from
//! the tip of its normal.

use super::{Plane, Point3, Side, Vector3, TOLERANCE};

/// Points closer than this (mm) are merged when building loops.
const MERGE_DISTANCE: f64 = 1e-7;

/// Result of splitting a polygon by a plane.
#[derive(Debug, Default, Clone)]
pub struct PolygonSplit {
    /// Part on the front side (includes vertices on the plane).
    pub front: Vec<Point3>,
    /// Part on the back side (includes vertices on the plane).
    pub back: Vec<Point3>,
    /// Vertices and edge crossings lying on the plane.
    pub on_plane: Vec<Point3>,
}

/// Area of a planar polygon measured about `normal`.
#[must_use]
pub fn polygon_area(vertices: &[Point3], normal: &Vector3) -> f64 {
    signed_area(vertices, normal).abs()
}

/// Signed area; positive when the loop is counter-clockwise about `normal`.
#[must_use]
pub fn signed_area(vertices: &[Point3], normal: &Vector3) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let n = vertices.len();
    let mut sum = Vector3::zeros();
    for i in 0..n {
        let a = vertices[i].coords;
        let b = vertices[(i + 1) % n].coords;
        sum += a.cross(&b);
    }
    0.5 * normal.dot(&sum)
}

/// Splits a convex polygon by a plane (Sutherland-Hodgman on both sides).
#[must_use]
pub fn split_polygon(vertices: &[Point3], plane: &Plane) -> PolygonSplit {
    let mut split = PolygonSplit::default();
    let n = vertices.len();
    if n == 0 {
        return split;
    }

    let distances: Vec<f64> = vertices.iter().map(|v| plane.signed_distance(v)).collect();
    let sides: Vec<Side> = distances.iter().map(|&d| Side::of_distance(d)).collect();

    for i in 0..n {
        let j = (i + 1) % n;
        let a = vertices[i];
        match sides[i] {
            Side::Front => split.front.push(a),
            Side::Back => split.back.push(a),
            Side::On => {
                split.front.push(a);
                split.back.push(a);
                split.on_plane.push(a);
            }
        }

        if matches!(
            (sides[i], sides[j]),
            (Side::Front, Side::Back) | (Side::Back, Side::Front)
        ) {
            let t = distances[i] / (distances[i] - distances[j]);
            let crossing = a + (vertices[j] - a) * t;
            split.front.push(crossing);
            split.back.push(crossing);
            split.on_plane.push(crossing);
        }
    }

    split.front = dedup_loop(split.front);
    split.back = dedup_loop(split.back);
    split
}

/// Removes consecutive (and wrap-around) duplicate vertices from a loop.
#[must_use]
pub fn dedup_loop(mut vertices: Vec<Point3>) -> Vec<Point3> {
    vertices.dedup_by(|a, b| (*a - *b).norm() < MERGE_DISTANCE);
    while vertices.len() > 1 {
        let (first, last) = (vertices[0], vertices[vertices.len() - 1]);
        if (first - last).norm() < MERGE_DISTANCE {
            vertices.pop();
        } else {
            break;
        }
    }
    vertices
}

/// Builds a convex loop from an unordered point cloud lying in a plane.
///
/// Duplicates are merged and the result is wound counter-clockwise about
/// `normal`. Returns an empty vector when fewer than three distinct points
/// remain.
#[must_use]
pub fn order_around(points: &[Point3], normal: &Vector3) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if unique.iter().all(|q| (p - q).norm() >= MERGE_DISTANCE) {
            unique.push(*p);
        }
    }
    if unique.len() < 3 {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let centroid = Point3::from(
        unique.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / unique.len() as f64,
    );
    let u = any_perpendicular(normal);
    let v = normal.cross(&u);

    let mut keyed: Vec<(f64, Point3)> = unique
        .into_iter()
        .map(|p| {
            let d = p - centroid;
            (d.dot(&v).atan2(d.dot(&u)), p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Area of the intersection of two coplanar convex polygons.
///
/// `subject_normal` is the normal the area is measured about; `clip_normal`
/// is the normal of the clip polygon (it may face the opposite way).
#[must_use]
pub fn overlap_area(
    subject: &[Point3],
    subject_normal: &Vector3,
    clip: &[Point3],
    clip_normal: &Vector3,
) -> f64 {
    if subject.len() < 3 || clip.len() < 3 {
        return 0.0;
    }

    // Edge normals below point inward only for a counter-clockwise loop.
    let winding = if signed_area(clip, clip_normal) < 0.0 {
        -1.0
    } else {
        1.0
    };

    let mut remaining = subject.to_vec();
    let m = clip.len();
    for i in 0..m {
        let start = clip[i];
        let edge = clip[(i + 1) % m] - start;
        if edge.norm() < TOLERANCE {
            continue;
        }
        let inward = clip_normal.cross(&edge) * winding;
        let Ok(half_space) = Plane::from_point_normal(&start, &inward) else {
            continue;
        };
        remaining = split_polygon(&remaining, &half_space).front;
        if remaining.len() < 3 {
            return 0.0;
        }
    }
    polygon_area(&remaining, subject_normal)
}

/// Some unit vector perpendicular to `normal`.
#[must_use]
pub fn any_perpendicular(normal: &Vector3) -> Vector3 {
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normal.cross(&helper).normalize()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point3> {
        vec![
            p(x0, y0, 0.0),
            p(x0 + size, y0, 0.0),
            p(x0 + size, y0 + size, 0.0),
            p(x0, y0 + size, 0.0),
        ]
    }

    #[test]
    fn square_area() {
        let sq = square(0.0, 0.0, 2.0);
        assert_relative_eq!(signed_area(&sq, &Vector3::z()), 4.0);
        assert_relative_eq!(signed_area(&sq, &-Vector3::z()), -4.0);
        assert_relative_eq!(polygon_area(&sq, &-Vector3::z()), 4.0);
    }

    #[test]
    fn split_through_middle() {
        let sq = square(0.0, 0.0, 2.0);
        let plane = Plane::from_point_normal(&p(0.5, 0.0, 0.0), &Vector3::x()).unwrap();
        let split = split_polygon(&sq, &plane);
        assert_relative_eq!(polygon_area(&split.front, &Vector3::z()), 3.0, epsilon = 1e-12);
        assert_relative_eq!(polygon_area(&split.back, &Vector3::z()), 1.0, epsilon = 1e-12);
        assert_eq!(split.on_plane.len(), 2);
    }

    #[test]
    fn split_along_edge_keeps_everything_in_front() {
        let sq = square(0.0, 0.0, 2.0);
        let plane = Plane::from_point_normal(&p(0.0, 0.0, 0.0), &Vector3::x()).unwrap();
        let split = split_polygon(&sq, &plane);
        assert_eq!(split.front.len(), 4);
        assert!(split.back.len() < 3);
    }

    #[test]
    fn order_around_restores_loop() {
        let sq = square(0.0, 0.0, 1.0);
        let shuffled = vec![sq[2], sq[0], sq[3], sq[1], sq[0]];
        let ordered = order_around(&shuffled, &Vector3::z());
        assert_eq!(ordered.len(), 4);
        assert_relative_eq!(signed_area(&ordered, &Vector3::z()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn overlap_of_offset_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let area = overlap_area(&a, &Vector3::z(), &b, &Vector3::z());
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn overlap_with_reversed_clip_loop() {
        let a = square(0.0, 0.0, 2.0);
        let mut b = square(0.5, 0.0, 1.0);
        b.reverse();
        let area = overlap_area(&a, &Vector3::z(), &b, &-Vector3::z());
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn disjoint_squares_do_not_overlap() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(3.0, 0.0, 1.0);
        assert_relative_eq!(overlap_area(&a, &Vector3::z(), &b, &Vector3::z()), 0.0);
    }
}
