use crate::math::TOLERANCE;
use crate::topology::{CellSide, ConvexCell};

/// Computes `piece - cutter` for two convex cells.
///
/// The piece is peeled against each face plane of the cutter in turn: the
/// part in front of a plane is outside the cutter and is kept, the part
/// behind it carries on to the next plane. Whatever is left after the last
/// plane lies inside the cutter and is dropped. Every returned cell is convex
/// and the returned cells do not overlap each other.
pub(crate) fn subtract_convex(piece: &ConvexCell, cutter: &ConvexCell) -> Vec<ConvexCell> {
    if !bounds_overlap(piece, cutter) {
        return vec![piece.clone()];
    }

    let mut outside = Vec::new();
    let mut rest = piece.clone();
    for face in cutter.faces() {
        match rest.classify(&face.plane) {
            CellSide::Front => {
                outside.push(rest);
                return outside;
            }
            CellSide::Back => {}
            CellSide::Straddle => {
                let (front, back) = rest.split(&face.plane);
                outside.extend(front);
                match back {
                    Some(back) => rest = back,
                    None => return outside,
                }
            }
        }
    }
    outside
}

fn bounds_overlap(a: &ConvexCell, b: &ConvexCell) -> bool {
    let (a_min, a_max) = a.bounds();
    let (b_min, b_max) = b.bounds();
    (0..3).all(|i| a_min[i] < b_max[i] - TOLERANCE && b_min[i] < a_max[i] - TOLERANCE)
}
