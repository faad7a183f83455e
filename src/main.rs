//! Trains the digit classifier on the gzipped MNIST training archives and
//! writes the learned parameters to a JSON file.
//!
//! Run with:
//!   cargo run --release -- --images train-images-idx3-ubyte.gz --labels train-labels-idx1-ubyte.gz
//!
//! Set `RUST_LOG=info` (or `debug`) for more detail than the per-epoch lines.
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use digit_mlp::data::load_mnist_gz;
use digit_mlp::{train_network, Result, TrainConfig};

/// Train a two-layer perceptron on handwritten digits.
#[derive(Parser, Debug)]
#[command(name = "digit-mlp", version, about)]
struct Args {
    /// Gzipped IDX3 image archive
    #[arg(long, default_value = "train-images-idx3-ubyte.gz")]
    images: PathBuf,

    /// Gzipped IDX1 label archive
    #[arg(long, default_value = "train-labels-idx1-ubyte.gz")]
    labels: PathBuf,

    /// Where to write the trained weights
    #[arg(short, long, default_value = "Weights.json")]
    output: PathBuf,

    /// JSON file with training hyperparameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Neurons in the hidden layer
    #[arg(long)]
    hidden_size: Option<usize>,

    /// SGD learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Number of passes over the training set
    #[arg(long)]
    epochs: Option<usize>,

    /// Samples per mini-batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// Seed for weight initialization and shuffling
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn train_config(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::load_json(path)?,
            None => TrainConfig::default(),
        };
        if let Some(v) = self.hidden_size { config.hidden_size = v; }
        if let Some(v) = self.learning_rate { config.learning_rate = v; }
        if let Some(v) = self.epochs { config.epochs = v; }
        if let Some(v) = self.batch_size { config.batch_size = v; }
        if let Some(v) = self.seed { config.seed = v; }
        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.train_config()?;
    let mut samples = load_mnist_gz(&args.images, &args.labels)?;

    let (network, _) = train_network(&mut samples, &config, |stats| {
        println!("{}", stats);
    })?;

    network.save_json(&args.output)?;
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
