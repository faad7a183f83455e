use std::fmt;

use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy over all samples seen in this epoch's batches.
    pub train_loss: f64,
    /// Accuracy over the full training set after the epoch, as a fraction in [0, 1].
    pub train_accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    pub fn accuracy_percent(&self) -> f64 {
        self.train_accuracy * 100.0
    }
}

/// The per-epoch progress line: `Epoch <n>: <accuracy>%` with two decimals.
impl fmt::Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Epoch {}: {:.2}%", self.epoch, self.accuracy_percent())
    }
}
