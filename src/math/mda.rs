use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{MdaError, Result};
use crate::math::nested::NestedList;

/// A rectangular multi-dimensional array stored as nested vectors.
///
/// The innermost level is a `Leaf` holding scalars; every outer level is a
/// `Node` whose children share the same shape. Rectangularity is a
/// precondition, not something the accessors check: `dimensions` and `depth`
/// only follow child 0 at each level. Use
/// [`validate_rectangular`](MultiDimArray::validate_rectangular) when the
/// input is untrusted.
///
/// An empty container has no shape below it, so an empty `Leaf` and an empty
/// `Node` compare equal; constructors in this crate always produce the leaf.
///
/// Serializes as its nested-list form, e.g. `[[0.1, 0.9], [0.4, 0.6]]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "NestedList<T>", into = "NestedList<T>")]
#[serde(bound(serialize = "T: Clone + Serialize"))]
pub enum MultiDimArray<T> {
    Leaf(Vec<T>),
    Node(Vec<MultiDimArray<T>>),
}

/// A value reached by indexing: either a scalar or a sub-array.
#[derive(Debug, PartialEq)]
pub enum Element<'a, T> {
    Scalar(&'a T),
    Array(&'a MultiDimArray<T>),
}

impl<'a, T> Clone for Element<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Element<'a, T> {}

impl<'a, T> Element<'a, T> {
    pub fn as_scalar(&self) -> Option<&'a T> {
        match *self {
            Element::Scalar(value) => Some(value),
            Element::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&'a MultiDimArray<T>> {
        match *self {
            Element::Scalar(_) => None,
            Element::Array(array) => Some(array),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Element::Scalar(_))
    }
}

/// Mutable counterpart of [`Element`].
#[derive(Debug)]
pub enum ElementMut<'a, T> {
    Scalar(&'a mut T),
    Array(&'a mut MultiDimArray<T>),
}

impl<'a, T> ElementMut<'a, T> {
    pub fn into_scalar(self) -> Option<&'a mut T> {
        match self {
            ElementMut::Scalar(value) => Some(value),
            ElementMut::Array(_) => None,
        }
    }

    pub fn into_array(self) -> Option<&'a mut MultiDimArray<T>> {
        match self {
            ElementMut::Scalar(_) => None,
            ElementMut::Array(array) => Some(array),
        }
    }
}

impl<T> MultiDimArray<T> {
    pub fn leaf(values: Vec<T>) -> Self {
        MultiDimArray::Leaf(values)
    }

    /// Build a node from sub-arrays. No children gives an empty leaf.
    pub fn node(children: Vec<MultiDimArray<T>>) -> Self {
        if children.is_empty() {
            MultiDimArray::Leaf(Vec::new())
        } else {
            MultiDimArray::Node(children)
        }
    }

    /// Length of the outermost level.
    pub fn len(&self) -> usize {
        match self {
            MultiDimArray::Leaf(values) => values.len(),
            MultiDimArray::Node(children) => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MultiDimArray::Leaf(_))
    }

    /// Number of levels, counted along child 0. An empty node counts as one level.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let MultiDimArray::Node(children) = current {
            match children.first() {
                Some(first) => {
                    depth += 1;
                    current = first;
                }
                None => break,
            }
        }
        depth
    }

    /// Per-axis lengths, outermost first, read along child 0 at every level.
    pub fn dimensions(&self) -> Vec<usize> {
        let mut dims = Vec::new();
        let mut current = self;
        loop {
            match current {
                MultiDimArray::Leaf(values) => {
                    dims.push(values.len());
                    break;
                }
                MultiDimArray::Node(children) => {
                    dims.push(children.len());
                    match children.first() {
                        Some(first) => current = first,
                        None => break,
                    }
                }
            }
        }
        dims
    }

    /// Descend one level per index and return whatever is reached.
    ///
    /// Fewer indices than levels yield a sub-array; an empty index list
    /// yields the whole array. Indices left over once a scalar is reached
    /// are ignored.
    pub fn get(&self, indices: &[usize]) -> Result<Element<'_, T>> {
        log::trace!("Read element at {:?}", indices);
        let mut current = self;
        for (axis, &index) in indices.iter().enumerate() {
            match current {
                MultiDimArray::Leaf(values) => {
                    let value = values.get(index).ok_or(MdaError::OutOfRange {
                        axis,
                        index,
                        len: values.len(),
                    })?;
                    if axis + 1 < indices.len() {
                        log::warn!(
                            "Ignoring {} indices past the leaf level in {:?}",
                            indices.len() - axis - 1,
                            indices
                        );
                    }
                    return Ok(Element::Scalar(value));
                }
                MultiDimArray::Node(children) => {
                    current = children.get(index).ok_or(MdaError::OutOfRange {
                        axis,
                        index,
                        len: children.len(),
                    })?;
                }
            }
        }
        Ok(Element::Array(current))
    }

    /// Mutable variant of [`get`](MultiDimArray::get) with the same descent rules.
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<ElementMut<'_, T>> {
        log::trace!("Borrow element at {:?} mutably", indices);
        let mut current = self;
        for (axis, &index) in indices.iter().enumerate() {
            match current {
                MultiDimArray::Leaf(values) => {
                    let len = values.len();
                    let value = values
                        .get_mut(index)
                        .ok_or(MdaError::OutOfRange { axis, index, len })?;
                    return Ok(ElementMut::Scalar(value));
                }
                MultiDimArray::Node(children) => {
                    let len = children.len();
                    current = children
                        .get_mut(index)
                        .ok_or(MdaError::OutOfRange { axis, index, len })?;
                }
            }
        }
        Ok(ElementMut::Array(current))
    }

    /// Overwrite the scalar at `indices` in place.
    ///
    /// `indices` must have exactly one entry per level. Reaching a leaf with
    /// indices to spare is `InvalidIndexDepth`; running out of indices above
    /// the leaf level is `PartialIndex`. On error the array is untouched.
    pub fn set(&mut self, value: T, indices: &[usize]) -> Result<()> {
        let depth = self.depth();
        let (&last, prefix) = indices
            .split_last()
            .ok_or(MdaError::PartialIndex { depth, got: 0 })?;

        let mut current = self;
        for (axis, &index) in prefix.iter().enumerate() {
            match current {
                MultiDimArray::Leaf(_) => {
                    return Err(MdaError::InvalidIndexDepth {
                        depth,
                        got: indices.len(),
                    });
                }
                MultiDimArray::Node(children) => {
                    let len = children.len();
                    current = children
                        .get_mut(index)
                        .ok_or(MdaError::OutOfRange { axis, index, len })?;
                }
            }
        }

        match current {
            MultiDimArray::Leaf(values) => {
                let len = values.len();
                let slot = values.get_mut(last).ok_or(MdaError::OutOfRange {
                    axis: prefix.len(),
                    index: last,
                    len,
                })?;
                *slot = value;
                log::trace!("Set element at {:?}", indices);
                Ok(())
            }
            MultiDimArray::Node(_) => Err(MdaError::PartialIndex {
                depth,
                got: indices.len(),
            }),
        }
    }

    fn scalar_at(&self, indices: &[usize]) -> &T {
        match self.get(indices) {
            Ok(Element::Scalar(value)) => value,
            Ok(Element::Array(_)) => {
                panic!("index {:?} selects a sub-array, not a scalar", indices)
            }
            Err(err) => panic!("{}", err),
        }
    }

    fn scalar_at_mut(&mut self, indices: &[usize]) -> &mut T {
        match self.get_mut(indices) {
            Ok(ElementMut::Scalar(value)) => value,
            Ok(ElementMut::Array(_)) => {
                panic!("index {:?} selects a sub-array, not a scalar", indices)
            }
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> Index<&[usize]> for MultiDimArray<T> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &Self::Output {
        self.scalar_at(indices)
    }
}

impl<T> IndexMut<&[usize]> for MultiDimArray<T> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut Self::Output {
        self.scalar_at_mut(indices)
    }
}

impl<T, const N: usize> Index<[usize; N]> for MultiDimArray<T> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &Self::Output {
        self.scalar_at(&indices)
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for MultiDimArray<T> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut Self::Output {
        self.scalar_at_mut(&indices)
    }
}

impl<T: PartialEq> PartialEq for MultiDimArray<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MultiDimArray::Leaf(lhs), MultiDimArray::Leaf(rhs)) => lhs == rhs,
            (MultiDimArray::Node(lhs), MultiDimArray::Node(rhs)) => lhs == rhs,
            (lhs, rhs) => lhs.is_empty() && rhs.is_empty(),
        }
    }
}

impl<T> From<Vec<T>> for MultiDimArray<T> {
    fn from(values: Vec<T>) -> Self {
        MultiDimArray::Leaf(values)
    }
}

impl<T> FromIterator<T> for MultiDimArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MultiDimArray::Leaf(iter.into_iter().collect())
    }
}

impl<T: fmt::Display> fmt::Display for MultiDimArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        match self {
            MultiDimArray::Leaf(values) => {
                for (idx, value) in values.iter().enumerate() {
                    write!(f, "{}", value)?;
                    if idx + 1 != values.len() {
                        write!(f, ", ")?;
                    }
                }
            }
            MultiDimArray::Node(children) => {
                for (idx, child) in children.iter().enumerate() {
                    write!(f, "{}", child)?;
                    if idx + 1 != children.len() {
                        write!(f, ", ")?;
                    }
                }
            }
        }
        write!(f, "]")
    }
}
