pub mod error;
pub mod math;
pub mod activation;
pub mod data;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use data::sample_set::SampleSet;
pub use layers::dense::Layer;
pub use network::network::{ForwardPass, Gradients, Network};
pub use loss::cross_entropy::CrossEntropyLoss;
pub use optim::sgd::Sgd;
pub use train::{train_loop, train_network, EpochStats, TrainConfig};
