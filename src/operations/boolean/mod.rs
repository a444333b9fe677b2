mod subtract;
mod union;

pub(crate) use subtract::subtract_convex;
pub use union::{fuse_cells, Union};
