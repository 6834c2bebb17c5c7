//! Integration tests for shape construction, flattening and probability helpers.

use redeem_mda::{MdaError, MultiDimArray};

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn from_shape_vec_and_dimensions() {
    let a = MultiDimArray::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(a.dimensions(), vec![2, 3]);
    assert_eq!(a.num_elements(), 6);
    assert_eq!(a[[1, 2]], 6);
}

#[test]
fn from_shape_vec_length_mismatch_errors() {
    let err = MultiDimArray::from_shape_vec(&[2, 3], vec![1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err,
        MdaError::ShapeMismatch {
            shape: vec![2, 3],
            len: 3
        }
    );
}

#[test]
fn from_shape_vec_requires_an_axis() {
    let err = MultiDimArray::from_shape_vec(&[], vec![1.0]).unwrap_err();
    assert!(matches!(err, MdaError::InvalidShape { .. }));
}

#[test]
fn from_shape_vec_overflowing_shape_errors() {
    let err = MultiDimArray::<f64>::from_shape_vec(&[usize::MAX, 2], vec![0.1, 0.9]).unwrap_err();
    assert_eq!(
        err,
        MdaError::InvalidShape {
            shape: vec![usize::MAX, 2],
            reason: "shape size overflows usize"
        }
    );
}

#[test]
fn from_elem_overflowing_shape_errors() {
    assert!(matches!(
        MultiDimArray::from_elem(&[usize::MAX, usize::MAX], 0.5),
        Err(MdaError::InvalidShape { .. })
    ));
    assert!(matches!(
        MultiDimArray::<f64>::zeros(&[usize::MAX / 2, 1]),
        Err(MdaError::InvalidShape { .. })
    ));
}

#[test]
fn zero_length_axis_has_no_elements() {
    let a = MultiDimArray::<f64>::zeros(&[3, 0, 2]).unwrap();
    assert_eq!(a.dimensions(), vec![3, 0]);
    assert!(a.to_vec().is_empty());
}

#[test]
fn from_elem_and_zeros() {
    let a = MultiDimArray::from_elem(&[2, 2], 0.25).unwrap();
    assert_eq!(a.to_vec(), vec![0.25; 4]);

    let z: MultiDimArray<f32> = MultiDimArray::zeros(&[3, 1, 2]).unwrap();
    assert_eq!(z.dimensions(), vec![3, 1, 2]);
    assert!(z.iter().all(|v| *v == 0.0));
}

// ---------------------------------------------------------------------------
// Flattening and mapping
// ---------------------------------------------------------------------------

#[test]
fn to_vec_is_row_major() {
    let data: Vec<i32> = (0..12).collect();
    let a = MultiDimArray::from_shape_vec(&[2, 3, 2], data.clone()).unwrap();
    assert_eq!(a.to_vec(), data);
    assert_eq!(a[[1, 0, 1]], 7);
}

#[test]
fn mapv_preserves_shape() {
    let a = MultiDimArray::from_shape_vec(&[2, 2], vec![1.0f64, 2.0, 3.0, 4.0]).unwrap();
    let doubled = a.mapv(|x| x * 2.0);
    assert_eq!(doubled.dimensions(), vec![2, 2]);
    assert_eq!(doubled.to_vec(), vec![2.0, 4.0, 6.0, 8.0]);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_rectangular() {
    let a = MultiDimArray::<u8>::zeros(&[2, 3, 4]).unwrap();
    assert_eq!(a.validate_rectangular().unwrap(), vec![2, 3, 4]);
}

#[test]
fn validate_rejects_jagged_leaf() {
    let a = MultiDimArray::node(vec![
        MultiDimArray::leaf(vec![1, 2]),
        MultiDimArray::leaf(vec![3]),
    ]);
    assert!(matches!(
        a.validate_rectangular(),
        Err(MdaError::MalformedInput { .. })
    ));
}

#[test]
fn validate_rejects_extra_nesting() {
    let a = MultiDimArray::node(vec![
        MultiDimArray::leaf(vec![1]),
        MultiDimArray::node(vec![MultiDimArray::leaf(vec![2])]),
    ]);
    assert!(a.validate_rectangular().is_err());
}

// ---------------------------------------------------------------------------
// Probability tables
// ---------------------------------------------------------------------------

#[test]
fn normalized_table_rows_sum_to_one() {
    let cpt = MultiDimArray::from_shape_vec(&[2, 2], vec![0.3, 0.7, 0.9, 0.1]).unwrap();
    assert!(cpt.is_normalized_along_last_axis(1e-9));
    assert!((cpt.sum() - 2.0).abs() < 1e-12);
    assert_eq!(cpt.leaf_sums().len(), 2);
}

#[test]
fn unnormalized_table_is_detected() {
    let cpt = MultiDimArray::from_shape_vec(&[2, 2], vec![0.3, 0.6, 0.9, 0.1]).unwrap();
    assert!(!cpt.is_normalized_along_last_axis(1e-6));
}
