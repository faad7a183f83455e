use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::data::sample_set::SampleSet;
use crate::error::{NetError, Result};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::batching::batch_ranges;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns one `EpochStats`
/// per epoch.
///
/// # Arguments
/// - `network`: mutable reference to the network; modified in place
/// - `samples`: training set; reshuffled in place at the start of every epoch
/// - `optimizer`: SGD optimizer (carries learning rate)
/// - `config`: epochs and batch size (the other fields are used by the caller)
/// - `rng`: source of the per-epoch permutations; never reseeded here
/// - `on_epoch`: called with each epoch's stats as soon as they are known
///
/// # Errors
/// `InvalidConfig` for an invalid config or an empty training set,
/// `ShapeMismatch` when the sample width differs from the network input size.
pub fn train_loop<R, F>(
    network: &mut Network,
    samples: &mut SampleSet,
    optimizer: &Sgd,
    config: &TrainConfig,
    rng: &mut R,
    mut on_epoch: F,
) -> Result<Vec<EpochStats>>
where
    R: Rng + ?Sized,
    F: FnMut(&EpochStats),
{
    config.validate()?;
    if samples.is_empty() {
        return Err(NetError::InvalidConfig("training set is empty".into()));
    }
    if samples.input_size() != network.input_size() {
        return Err(NetError::ShapeMismatch {
            what: "inputs",
            expected: (samples.len(), network.input_size()),
            got: samples.images().shape(),
        });
    }

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        samples.shuffle(rng);

        // ── One full pass over the training data ───────────────────────────
        let train_loss = run_one_epoch(network, samples, optimizer, config.batch_size)?;

        // ── Accuracy over the whole (shuffled) set ────────────────────────
        let train_accuracy = network.accuracy(samples.images(), samples.labels());

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            train_accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        debug!(
            "epoch {}/{}: loss {:.6}, accuracy {:.4}, {} ms",
            stats.epoch, stats.total_epochs, stats.train_loss, stats.train_accuracy, stats.elapsed_ms
        );

        on_epoch(&stats);
        history.push(stats);
    }

    Ok(history)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs forward → backward → update for every mini-batch, in order.
/// Returns the mean loss over all samples.
fn run_one_epoch(
    network: &mut Network,
    samples: &SampleSet,
    optimizer: &Sgd,
    batch_size: usize,
) -> Result<f64> {
    let mut total_loss = 0.0;

    for range in batch_ranges(samples.len(), batch_size) {
        let batch = samples.batch(range);

        let pass = network.forward(&batch.inputs);
        total_loss += CrossEntropyLoss::loss(&pass.probs, &batch.targets) * batch.len() as f64;

        let grads = network.backward(&batch.inputs, &batch.targets, &pass);
        optimizer.step(network, &grads)?;
    }

    Ok(total_loss / samples.len() as f64)
}
