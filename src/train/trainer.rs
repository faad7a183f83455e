use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::data::sample_set::{SampleSet, N_CLASSES};
use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Builds a fresh network and trains it on `samples` as described by `config`.
///
/// A single `StdRng` seeded from `config.seed` first initializes the weights
/// and then drives every epoch's shuffle, so equal inputs give equal runs.
pub fn train_network<F>(
    samples: &mut SampleSet,
    config: &TrainConfig,
    on_epoch: F,
) -> Result<(Network, Vec<EpochStats>)>
where
    F: FnMut(&EpochStats),
{
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut network = Network::new(samples.input_size(), config.hidden_size, N_CLASSES, &mut rng);
    let optimizer = Sgd::new(config.learning_rate);

    info!(
        "training {}-{}-{} network on {} samples: lr {}, batch {}, {} epochs, seed {}",
        network.input_size(),
        network.hidden_size(),
        network.output_size(),
        samples.len(),
        config.learning_rate,
        config.batch_size,
        config.epochs,
        config.seed
    );

    let history = train_loop(&mut network, samples, &optimizer, config, &mut rng, on_epoch)?;
    Ok((network, history))
}
