pub mod idx;
pub mod one_hot;
pub mod sample_set;

pub use idx::load_mnist_gz;
pub use sample_set::{Batch, SampleSet, N_CLASSES};
