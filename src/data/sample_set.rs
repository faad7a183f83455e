use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::one_hot;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Number of digit classes.
pub const N_CLASSES: usize = 10;

/// Images, their one-hot targets and their integer labels, kept row-aligned.
///
/// Fields are only reachable through read-only accessors; the only way to
/// reorder samples is `permute`/`shuffle`, which move all three together.
///
/// ```compile_fail
/// use digit_mlp::{Matrix, SampleSet};
///
/// let mut set = SampleSet::new(Matrix::zeros(2, 1), vec![0, 1]).unwrap();
/// set.labels.reverse();
/// ```
#[derive(Debug, Clone)]
pub struct SampleSet {
    images: Matrix,
    targets: Matrix,
    labels: Vec<u8>,
}

/// One mini-batch, copied out of a `SampleSet`.
#[derive(Debug, Clone)]
pub struct Batch {
    pub inputs: Matrix,
    pub targets: Matrix,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.inputs.rows
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.rows == 0
    }
}

impl SampleSet {
    /// Builds a sample set, deriving the one-hot targets from `labels`.
    pub fn new(images: Matrix, labels: Vec<u8>) -> Result<SampleSet> {
        if images.rows != labels.len() {
            return Err(NetError::MalformedArchive(format!(
                "{} images but {} labels",
                images.rows,
                labels.len()
            )));
        }
        let targets = one_hot::encode(&labels, N_CLASSES)?;
        Ok(SampleSet { images, targets, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// N × input_size pixel matrix.
    pub fn images(&self) -> &Matrix {
        &self.images
    }

    /// N × `N_CLASSES` one-hot matrix.
    pub fn targets(&self) -> &Matrix {
        &self.targets
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn input_size(&self) -> usize {
        self.images.cols
    }

    /// Reorders every sample so that new row `i` is old row `permutation[i]`.
    ///
    /// Panics if `permutation` does not have one entry per sample.
    pub fn permute(&mut self, permutation: &[usize]) {
        assert_eq!(
            permutation.len(),
            self.len(),
            "permutation length must equal the sample count"
        );
        self.images = self.images.select_rows(permutation);
        self.targets = self.targets.select_rows(permutation);
        self.labels = permutation.iter().map(|&i| self.labels[i]).collect();
    }

    /// Draws a uniform permutation from `rng` and applies it.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);
        self.permute(&indices);
    }

    pub fn batch(&self, range: Range<usize>) -> Batch {
        Batch {
            inputs: self.images.slice_rows(range.clone()),
            targets: self.targets.slice_rows(range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    /// Each image row carries its own label as a marker value.
    fn tagged_set(n: usize) -> SampleSet {
        let labels: Vec<u8> = (0..n).map(|i| (i % 10) as u8).collect();
        let images = Matrix::from_data(
            (0..n).map(|i| vec![i as f64, labels[i] as f64]).collect(),
        );
        SampleSet::new(images, labels).unwrap()
    }

    #[test]
    fn shuffle_keeps_images_targets_and_labels_aligned() {
        let mut set = tagged_set(50);
        set.shuffle(&mut StdRng::seed_from_u64(3));

        let order: Vec<usize> = set.images.data.iter().map(|r| r[0] as usize).collect();
        assert_ne!(order, (0..50).collect::<Vec<_>>());

        for i in 0..set.len() {
            let label = set.labels[i];
            assert_eq!(set.images.data[i][1], label as f64);
            assert_eq!(set.targets.data[i][label as usize], 1.0);
        }
    }

    #[test]
    fn permute_is_a_bijection() {
        let mut set = tagged_set(5);
        set.permute(&[4, 2, 0, 1, 3]);
        let ids: Vec<f64> = set.images.data.iter().map(|r| r[0]).collect();
        assert_eq!(ids, vec![4.0, 2.0, 0.0, 1.0, 3.0]);
        assert_eq!(set.labels, vec![4, 2, 0, 1, 3]);
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let images = Matrix::zeros(3, 4);
        assert!(SampleSet::new(images, vec![1, 2]).is_err());
    }

    #[test]
    fn accessors_reflect_the_permuted_order() {
        let mut set = tagged_set(4);
        set.permute(&[3, 2, 1, 0]);
        assert_eq!(set.labels(), &[3u8, 2, 1, 0]);
        for (i, &label) in set.labels().iter().enumerate() {
            assert_eq!(set.images().data[i][1], label as f64);
            assert_eq!(set.targets().data[i][label as usize], 1.0);
        }
    }

    #[test]
    fn batch_copies_the_requested_rows() {
        let set = tagged_set(10);
        let batch = set.batch(8..10);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.inputs.data[0][0], 8.0);
        assert_eq!(batch.targets.data[1][9], 1.0);
    }
}
