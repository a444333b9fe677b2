use crate::math::polygon::{dedup_loop, order_around, polygon_area, split_polygon};
use crate::math::{Isometry3, Plane, Point3, Side, SLIVER_TOLERANCE};

/// A planar convex face of a cell, wound counter-clockwise about its
/// outward normal.
#[derive(Debug, Clone)]
pub struct CellFace {
    /// Boundary loop.
    pub vertices: Vec<Point3>,
    /// Supporting plane; its normal points out of the cell.
    pub plane: Plane,
}

impl CellFace {
    #[must_use]
    pub fn new(vertices: Vec<Point3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices, self.plane.normal())
    }
}

/// Where a cell lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSide {
    /// Every vertex is in front of or on the plane.
    Front,
    /// Every vertex is behind or on the plane.
    Back,
    /// The plane cuts through the cell.
    Straddle,
}

/// A closed convex polyhedron described by its faces.
///
/// Solids are stored as collections of cells with pairwise-disjoint
/// interiors; boolean union only ever adds cells that do not overlap the
/// ones already present.
#[derive(Debug, Clone)]
pub struct ConvexCell {
    faces: Vec<CellFace>,
}

impl ConvexCell {
    /// Creates a cell from closed, outward-facing faces.
    #[must_use]
    pub fn from_faces(faces: Vec<CellFace>) -> Self {
        Self { faces }
    }

    /// Axis-aligned box between two corners. Corners must be ordered
    /// (`min < max` on every axis).
    #[must_use]
    pub fn cuboid(min: Point3, max: Point3) -> Self {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);

        let loops = [
            // -Z
            [p(x0, y0, z0), p(x0, y1, z0), p(x1, y1, z0), p(x1, y0, z0)],
            // +Z
            [p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)],
            // -Y
            [p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)],
            // +Y
            [p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1), p(x1, y1, z0)],
            // -X
            [p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1), p(x0, y1, z0)],
            // +X
            [p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)],
        ];

        let faces = loops
            .into_iter()
            .filter_map(|corners| {
                let normal = (corners[1] - corners[0]).cross(&(corners[2] - corners[1]));
                Plane::from_point_normal(&corners[0], &normal)
                    .ok()
                    .map(|plane| CellFace::new(corners.to_vec(), plane))
            })
            .collect();
        Self { faces }
    }

    #[must_use]
    pub fn faces(&self) -> &[CellFace] {
        &self.faces
    }

    /// Iterates over face vertices. Shared corners appear once per face.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.faces.iter().flat_map(|f| f.vertices.iter())
    }

    /// Enclosed volume, from the divergence theorem:
    /// `V = 1/3 * sum(offset_f * area_f)`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|f| f.plane.offset() * f.area())
            .sum::<f64>()
            / 3.0
    }

    /// Sum of face areas, ignoring any neighbours.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.faces.iter().map(CellFace::area).sum()
    }

    /// Axis-aligned bounds as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Point3, Point3) {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in self.vertices() {
            min = min.inf(v);
            max = max.sup(v);
        }
        (min, max)
    }

    /// Moves the cell rigidly.
    pub fn transform(&mut self, iso: &Isometry3) {
        for face in &mut self.faces {
            for v in &mut face.vertices {
                *v = iso * *v;
            }
            face.plane = face.plane.transformed(iso);
        }
    }

    #[must_use]
    pub fn classify(&self, plane: &Plane) -> CellSide {
        let mut front = false;
        let mut back = false;
        for v in self.vertices() {
            match plane.side(v) {
                Side::Front => front = true,
                Side::Back => back = true,
                Side::On => {}
            }
            if front && back {
                return CellSide::Straddle;
            }
        }
        if back {
            CellSide::Back
        } else {
            CellSide::Front
        }
    }

    /// Cuts the cell in two, returning `(front, back)` pieces. Either piece is
    /// `None` when it would be empty or a sliver.
    #[must_use]
    pub fn split(&self, plane: &Plane) -> (Option<Self>, Option<Self>) {
        match self.classify(plane) {
            CellSide::Front => return (Some(self.clone()), None),
            CellSide::Back => return (None, Some(self.clone())),
            CellSide::Straddle => {}
        }

        let mut front_faces = Vec::with_capacity(self.faces.len() + 1);
        let mut back_faces = Vec::with_capacity(self.faces.len() + 1);
        let mut section = Vec::new();

        for face in &self.faces {
            let split = split_polygon(&face.vertices, plane);
            section.extend(split.on_plane);
            push_face(&mut front_faces, split.front, face.plane);
            push_face(&mut back_faces, split.back, face.plane);
        }

        let cap = order_around(&section, plane.normal());
        if cap.len() >= 3 {
            let mut reversed = cap.clone();
            reversed.reverse();
            push_face(&mut front_faces, reversed, plane.flipped());
            push_face(&mut back_faces, cap, *plane);
        }

        (Self::non_sliver(front_faces), Self::non_sliver(back_faces))
    }

    fn non_sliver(faces: Vec<CellFace>) -> Option<Self> {
        if faces.len() < 4 {
            return None;
        }
        let cell = Self { faces };
        (cell.volume() > SLIVER_TOLERANCE).then_some(cell)
    }
}

fn push_face(faces: &mut Vec<CellFace>, vertices: Vec<Point3>, plane: Plane) {
    let vertices = dedup_loop(vertices);
    if vertices.len() < 3 {
        return;
    }
    let face = CellFace::new(vertices, plane);
    if face.area() > SLIVER_TOLERANCE {
        faces.push(face);
    }
}
