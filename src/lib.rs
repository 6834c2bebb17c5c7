//! redeem-mda: nested multi-dimensional arrays for small dense tables.
//!
//! This crate represents rectangular tables (for instance the conditional
//! probability tables of a small Bayesian network) as nested vectors, and
//! provides the five core operations on them: reading dimensions, indexed
//! reads and in-place writes, and conversion to and from a nested-list
//! interchange form. Both forms serialize with serde as plain nested
//! sequences.
pub mod error;
pub mod math;
pub mod ops;

pub use error::{MdaError, Result};
pub use math::{Element, ElementMut, MultiDimArray, NestedList};
pub use ops::{array_dimensions, array_ref, array_set, array_to_list, list_to_array};
