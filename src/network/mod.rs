pub mod network;
pub mod weights;

pub use network::{ForwardPass, Gradients, Network};
pub use weights::WeightsFile;
