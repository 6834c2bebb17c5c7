use serde::{Deserialize, Serialize};

use crate::error::{MdaError, Result};
use crate::math::mda::MultiDimArray;

/// List-of-lists interchange form of a [`MultiDimArray`].
///
/// Untagged on the wire, so JSON numbers are scalars and JSON arrays are lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedList<T> {
    Scalar(T),
    List(Vec<NestedList<T>>),
}

impl<T> NestedList<T> {
    pub fn scalar(value: T) -> Self {
        NestedList::Scalar(value)
    }

    pub fn list(items: Vec<NestedList<T>>) -> Self {
        NestedList::List(items)
    }

    /// Build a two-level list from rows of scalars.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        NestedList::List(rows.into_iter().map(NestedList::from).collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, NestedList::Scalar(_))
    }

    pub fn as_list(&self) -> Option<&[NestedList<T>]> {
        match self {
            NestedList::Scalar(_) => None,
            NestedList::List(items) => Some(items),
        }
    }
}

impl<T> From<Vec<T>> for NestedList<T> {
    fn from(values: Vec<T>) -> Self {
        NestedList::List(values.into_iter().map(NestedList::Scalar).collect())
    }
}

impl<T> TryFrom<NestedList<T>> for MultiDimArray<T> {
    type Error = MdaError;

    fn try_from(list: NestedList<T>) -> Result<Self> {
        match list {
            NestedList::List(items) => build_level(items, 0),
            NestedList::Scalar(_) => Err(MdaError::malformed(
                "expected a sequence at the top level, found a scalar",
            )),
        }
    }
}

// Leaf vs node is decided by element 0 only; siblings are expected to agree.
fn build_level<T>(items: Vec<NestedList<T>>, axis: usize) -> Result<MultiDimArray<T>> {
    let is_leaf_level = !matches!(items.first(), Some(NestedList::List(_)));

    if is_leaf_level {
        let values = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                NestedList::Scalar(value) => Ok(value),
                NestedList::List(_) => Err(MdaError::malformed(format!(
                    "axis {}: element {} is a sequence but element 0 is a scalar",
                    axis, idx
                ))),
            })
            .collect::<Result<Vec<T>>>()?;
        Ok(MultiDimArray::Leaf(values))
    } else {
        let children = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                NestedList::List(inner) => build_level(inner, axis + 1),
                NestedList::Scalar(_) => Err(MdaError::malformed(format!(
                    "axis {}: element {} is a scalar but element 0 is a sequence",
                    axis, idx
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiDimArray::Node(children))
    }
}

impl<T> From<MultiDimArray<T>> for NestedList<T> {
    fn from(array: MultiDimArray<T>) -> Self {
        match array {
            MultiDimArray::Leaf(values) => NestedList::from(values),
            MultiDimArray::Node(children) => {
                NestedList::List(children.into_iter().map(NestedList::from).collect())
            }
        }
    }
}

impl<T: Clone> From<&MultiDimArray<T>> for NestedList<T> {
    fn from(array: &MultiDimArray<T>) -> Self {
        match array {
            MultiDimArray::Leaf(values) => {
                NestedList::List(values.iter().cloned().map(NestedList::Scalar).collect())
            }
            MultiDimArray::Node(children) => {
                NestedList::List(children.iter().map(NestedList::from).collect())
            }
        }
    }
}
