//! Shape construction, flattening and validation for [`MultiDimArray`].
//!
//! Arrays built here are always rectangular. Arrays built by hand or from
//! nested lists are only assumed to be; `validate_rectangular` checks it.
use std::slice;

use num_traits::Zero;

use crate::error::{MdaError, Result};
use crate::math::mda::MultiDimArray;

impl<T> MultiDimArray<T> {
    /// Build an array of `shape` from a row-major buffer.
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        if shape.is_empty() {
            return Err(MdaError::InvalidShape {
                shape: shape.to_vec(),
                reason: "at least one axis is required",
            });
        }
        let expected = checked_len(shape)?;
        if data.len() != expected {
            return Err(MdaError::ShapeMismatch {
                shape: shape.to_vec(),
                len: data.len(),
            });
        }
        let mut values = data.into_iter();
        Ok(build(shape, &mut values))
    }

    /// Number of scalars, assuming the array is rectangular.
    pub fn num_elements(&self) -> usize {
        self.dimensions().iter().product()
    }

    /// Iterate over scalars in row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        match self {
            MultiDimArray::Leaf(values) => Iter {
                stack: Vec::new(),
                leaf: values.iter(),
            },
            MultiDimArray::Node(children) => Iter {
                stack: vec![children.iter()],
                leaf: <&[T]>::default().iter(),
            },
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn mapv<U, F>(&self, mut f: F) -> MultiDimArray<U>
    where
        F: FnMut(&T) -> U,
    {
        self.map_with(&mut f)
    }

    fn map_with<U, F>(&self, f: &mut F) -> MultiDimArray<U>
    where
        F: FnMut(&T) -> U,
    {
        match self {
            MultiDimArray::Leaf(values) => {
                MultiDimArray::Leaf(values.iter().map(|v| f(v)).collect())
            }
            MultiDimArray::Node(children) => MultiDimArray::Node(
                children.iter().map(|child| child.map_with(&mut *f)).collect(),
            ),
        }
    }

    /// Check that every sibling shares the shape of child 0 and return the dimensions.
    pub fn validate_rectangular(&self) -> Result<Vec<usize>> {
        let dims = self.dimensions();
        check_level(self, &dims, 0)?;
        Ok(dims)
    }
}

impl<T: Clone> MultiDimArray<T> {
    pub fn from_elem(shape: &[usize], value: T) -> Result<Self> {
        let len = checked_len(shape)?;
        let fits = len
            .checked_mul(std::mem::size_of::<T>())
            .map_or(false, |bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(MdaError::InvalidShape {
                shape: shape.to_vec(),
                reason: "shape too large to allocate",
            });
        }
        Self::from_shape_vec(shape, vec![value; len])
    }
}

impl<T: Clone + Zero> MultiDimArray<T> {
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::from_elem(shape, T::zero())
    }
}

impl MultiDimArray<f64> {
    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Sum of each leaf row, in row-major order.
    pub fn leaf_sums(&self) -> Vec<f64> {
        let mut sums = Vec::new();
        collect_leaf_sums(self, &mut sums);
        sums
    }

    /// True when every leaf row sums to one within `tolerance`, as in a
    /// conditional probability table.
    pub fn is_normalized_along_last_axis(&self, tolerance: f64) -> bool {
        self.leaf_sums()
            .iter()
            .all(|s| (s - 1.0).abs() <= tolerance)
    }
}

fn collect_leaf_sums(array: &MultiDimArray<f64>, sums: &mut Vec<f64>) {
    match array {
        MultiDimArray::Leaf(values) => sums.push(values.iter().sum()),
        MultiDimArray::Node(children) => {
            for child in children {
                collect_leaf_sums(child, sums);
            }
        }
    }
}

fn checked_len(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| MdaError::InvalidShape {
            shape: shape.to_vec(),
            reason: "shape size overflows usize",
        })
}

// A zero-length axis ends the nesting: the empty container is always an empty leaf.
fn build<T>(shape: &[usize], values: &mut std::vec::IntoIter<T>) -> MultiDimArray<T> {
    match shape {
        [] | [0, ..] => MultiDimArray::Leaf(Vec::new()),
        [len] => MultiDimArray::Leaf(values.by_ref().take(*len).collect()),
        [len, rest @ ..] => {
            MultiDimArray::Node((0..*len).map(|_| build(rest, values)).collect())
        }
    }
}

fn check_level<T>(array: &MultiDimArray<T>, dims: &[usize], axis: usize) -> Result<()> {
    let expected = match dims.get(axis) {
        Some(&len) => len,
        None => {
            return Err(MdaError::malformed(format!(
                "nesting deeper than {} axes",
                dims.len()
            )))
        }
    };
    let is_last_axis = axis + 1 == dims.len();

    match array {
        MultiDimArray::Leaf(values) => {
            if !is_last_axis {
                return Err(MdaError::malformed(format!(
                    "axis {}: found scalars where sub-arrays were expected",
                    axis
                )));
            }
            if values.len() != expected {
                return Err(MdaError::malformed(format!(
                    "axis {}: length {} differs from {}",
                    axis,
                    values.len(),
                    expected
                )));
            }
            Ok(())
        }
        MultiDimArray::Node(children) => {
            if children.len() != expected {
                return Err(MdaError::malformed(format!(
                    "axis {}: length {} differs from {}",
                    axis,
                    children.len(),
                    expected
                )));
            }
            if is_last_axis && !children.is_empty() {
                return Err(MdaError::malformed(format!(
                    "axis {}: found sub-arrays where scalars were expected",
                    axis
                )));
            }
            for child in children {
                check_level(child, dims, axis + 1)?;
            }
            Ok(())
        }
    }
}

/// Row-major iterator over the scalars of a [`MultiDimArray`].
pub struct Iter<'a, T> {
    stack: Vec<slice::Iter<'a, MultiDimArray<T>>>,
    leaf: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.leaf.next() {
                return Some(value);
            }
            match self.stack.last_mut()?.next() {
                Some(MultiDimArray::Leaf(values)) => self.leaf = values.iter(),
                Some(MultiDimArray::Node(children)) => self.stack.push(children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_shape_vec_builds_row_major() {
        let a = MultiDimArray::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
        assert_eq!(
            a,
            MultiDimArray::node(vec![
                MultiDimArray::leaf(vec![1, 2]),
                MultiDimArray::leaf(vec![3, 4]),
            ])
        );
    }

    #[test]
    fn iter_skips_empty_nodes() {
        let a = MultiDimArray::node(vec![
            MultiDimArray::node(vec![]),
            MultiDimArray::node(vec![MultiDimArray::leaf(vec![7, 8])]),
        ]);
        assert_eq!(a.to_vec(), vec![7, 8]);
    }

    #[test]
    fn zero_length_axis_builds_empty_leaves() {
        let a: MultiDimArray<i32> = MultiDimArray::from_shape_vec(&[2, 0, 3], vec![]).unwrap();
        assert_eq!(
            a,
            MultiDimArray::Node(vec![MultiDimArray::Leaf(vec![]), MultiDimArray::Leaf(vec![])])
        );
        assert_eq!(a.dimensions(), vec![2, 0]);
    }

    #[test]
    fn checked_len_detects_overflow() {
        assert_eq!(checked_len(&[2, 3, 4]).unwrap(), 24);
        assert!(checked_len(&[usize::MAX, 2]).is_err());
    }

    #[test]
    fn validate_flags_mixed_leaf_and_node() {
        let a = MultiDimArray::node(vec![
            MultiDimArray::node(vec![MultiDimArray::leaf(vec![1])]),
            MultiDimArray::leaf(vec![2]),
        ]);
        assert!(a.validate_rectangular().is_err());
    }
}
