use crate::error::{Error, Result};
use ndarray::Array2;

/// Check that every row has the same length and return that length.
///
/// A ragged row set is not a matrix; reject it before handing anything to a
/// numeric routine.
pub(crate) fn rectangular_width(data: &[Vec<f32>]) -> Result<usize> {
    let expected = data[0].len();
    for row in data {
        if row.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: row.len(),
            });
        }
    }
    Ok(expected)
}

/// Copy a validated row set into a dense `ndarray` matrix.
pub(crate) fn to_array2(data: &[Vec<f32>], width: usize) -> Array2<f32> {
    let mut flat = Vec::with_capacity(data.len() * width);
    for row in data {
        flat.extend_from_slice(row);
    }
    // Shape is consistent by construction after `rectangular_width`.
    Array2::from_shape_vec((data.len(), width), flat).expect("validated shape")
}
