//! The core array operations as free functions.
use crate::error::Result;
use crate::math::{Element, MultiDimArray, NestedList};

/// Per-axis dimensions of `array`, outermost first.
///
/// Walks from the root inward along element 0 of every level, so a
/// rectangular array of depth `D` yields exactly `D` lengths. Jagged input
/// is not detected: the result only describes the path through index 0.
///
/// # Example
///
/// ```
/// use redeem_mda::{array_dimensions, MultiDimArray};
///
/// let table = MultiDimArray::<f64>::zeros(&[2, 3, 3]).unwrap();
/// assert_eq!(array_dimensions(&table), vec![2, 3, 3]);
/// ```
pub fn array_dimensions<T>(array: &MultiDimArray<T>) -> Vec<usize> {
    array.dimensions()
}

/// Read the element at `indices`.
///
/// One index is consumed per level. With as many indices as the array has
/// levels the result is a scalar; with fewer it is the sub-array reached
/// (an empty index list returns `array` itself).
///
/// # Errors
///
/// `MdaError::OutOfRange` when an index exceeds its level's length.
pub fn array_ref<'a, T>(array: &'a MultiDimArray<T>, indices: &[usize]) -> Result<Element<'a, T>> {
    array.get(indices)
}

/// Overwrite the scalar at `indices` with `value`, in place.
///
/// Every holder of the `&mut` borrow observes the write; nothing is copied.
///
/// # Errors
///
/// * `MdaError::InvalidIndexDepth` when a leaf is reached with indices left over.
/// * `MdaError::PartialIndex` when indices run out above the leaf level.
/// * `MdaError::OutOfRange` when an index exceeds its level's length.
pub fn array_set<T>(array: &mut MultiDimArray<T>, value: T, indices: &[usize]) -> Result<()> {
    array.set(value, indices)
}

/// Convert a nested list into an array.
///
/// Each level is a leaf when its first element is a scalar, and a node
/// otherwise. An empty list becomes an empty leaf. Siblings must agree with
/// element 0 on scalar vs list; lengths are not compared (see
/// [`list_to_array_checked`]).
///
/// # Errors
///
/// `MdaError::MalformedInput` for a bare scalar or mixed scalar/list siblings.
pub fn list_to_array<T: Clone>(list: &NestedList<T>) -> Result<MultiDimArray<T>> {
    let array = MultiDimArray::try_from(list.clone())?;
    log::debug!("Converted nested list to array of dimensions {:?}", array.dimensions());
    Ok(array)
}

/// Like [`list_to_array`], but also rejects jagged input.
pub fn list_to_array_checked<T: Clone>(list: &NestedList<T>) -> Result<MultiDimArray<T>> {
    let array = list_to_array(list)?;
    array.validate_rectangular()?;
    Ok(array)
}

/// Convert an array into its nested-list form.
///
/// An empty container (leaf or node) becomes an empty list. This is the
/// inverse of [`list_to_array`] for rectangular input.
pub fn array_to_list<T: Clone>(array: &MultiDimArray<T>) -> NestedList<T> {
    NestedList::from(array)
}
