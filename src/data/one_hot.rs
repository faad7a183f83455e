use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Encodes integer class labels as an N×`n_classes` one-hot matrix.
///
/// Fails with `InvalidLabel` on the first label outside `[0, n_classes)`.
pub fn encode(labels: &[u8], n_classes: usize) -> Result<Matrix> {
    let mut one_hot = Matrix::zeros(labels.len(), n_classes);
    for (i, &label) in labels.iter().enumerate() {
        let class = label as usize;
        if class >= n_classes {
            return Err(NetError::InvalidLabel { index: i, label, n_classes });
        }
        one_hot.data[i][class] = 1.0;
    }
    Ok(one_hot)
}
