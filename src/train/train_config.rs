use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Hyperparameters for a training run.
///
/// # Fields
/// - `hidden_size`: neurons in the hidden layer
/// - `learning_rate`: SGD step size
/// - `epochs`: total number of full passes over the training data
/// - `batch_size`: samples per mini-batch; the last batch may be shorter
/// - `seed`: seeds the one RNG used for initialization and shuffling
///
/// Missing fields in a JSON config fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            hidden_size: 128,
            learning_rate: 0.05,
            epochs: 5,
            batch_size: 64,
            seed: 42,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hidden_size == 0 {
            return Err(NetError::InvalidConfig("hidden_size must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(NetError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.epochs == 0 {
            return Err(NetError::InvalidConfig("epochs must be at least 1".into()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetError::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Reads a config from JSON and validates it.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let reader = BufReader::new(File::open(path)?);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_run() {
        let c = TrainConfig::default();
        assert_eq!(c.hidden_size, 128);
        assert_eq!(c.learning_rate, 0.05);
        assert_eq!(c.epochs, 5);
        assert_eq!(c.batch_size, 64);
        assert_eq!(c.seed, 42);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c: TrainConfig = serde_json::from_str(r#"{ "epochs": 2, "seed": 7 }"#).unwrap();
        assert_eq!(c.epochs, 2);
        assert_eq!(c.seed, 7);
        assert_eq!(c.batch_size, 64);
    }

    #[test]
    fn nonsense_values_are_rejected() {
        let bad = [
            TrainConfig { batch_size: 0, ..TrainConfig::default() },
            TrainConfig { epochs: 0, ..TrainConfig::default() },
            TrainConfig { hidden_size: 0, ..TrainConfig::default() },
            TrainConfig { learning_rate: -0.1, ..TrainConfig::default() },
            TrainConfig { learning_rate: f64::NAN, ..TrainConfig::default() },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(NetError::InvalidConfig(_))), "{c:?}");
        }
    }
}
