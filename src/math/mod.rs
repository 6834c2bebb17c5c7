//! Nested multi-dimensional array types.
//!
//! `MultiDimArray` is a vector of vectors of ... of scalars, tagged at
//! construction time as a leaf (scalars) or a node (sub-arrays).
//! `NestedList` is its list-of-lists interchange form.
pub mod mda;
pub mod nested;
pub mod shape;

pub use mda::{Element, ElementMut, MultiDimArray};
pub use nested::NestedList;
pub use shape::Iter;
