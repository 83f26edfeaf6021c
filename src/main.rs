use std::{env, path::PathBuf};

use anyhow::{Context, bail};
use log::info;
use serde::Deserialize;

use neural_network_engine::{
    Network, NetworkOptions,
    arch::loss::Mse,
    dataset::{Dataset, WindowOptions},
    persistence,
    training::{Trainer, TrainingConfig, generate_rng},
};

/// Everything a training run reads from its config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    network: NetworkOptions,
    window: WindowOptions,
    training: TrainingConfig,
    save_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let [_, config_path, series_path] = args.as_slice() else {
        bail!("usage: neural-network-engine <config.json> <series-file>");
    };

    let raw = tokio::fs::read_to_string(config_path)
        .await
        .with_context(|| format!("couldn't read {config_path}"))?;
    let config: RunConfig =
        serde_json::from_str(&raw).with_context(|| format!("invalid config {config_path}"))?;

    let raw = tokio::fs::read_to_string(series_path)
        .await
        .with_context(|| format!("couldn't read {series_path}"))?;
    let series = parse_series(&raw)?;

    let dataset = Dataset::from_series(&series, &config.window)?;
    info!("built {} examples from {}", dataset.len(), series_path);

    let mut rng = generate_rng(config.training.seed);
    let mut network = Network::new(config.network);
    network.initialize_weights(&mut rng);

    let mut trainer = Trainer::new(network, dataset, config.training.epochs, Mse::new(), rng);
    let losses = trainer.train()?;
    for (epoch, loss) in losses.iter().enumerate() {
        info!("epoch {epoch}: {loss:.6}");
    }

    let save_path = config
        .save_path
        .unwrap_or_else(|| PathBuf::from(persistence::NETWORK_PATH));
    persistence::save_async(trainer.network(), &save_path).await;

    Ok(())
}

/// Parses a series of numbers separated by whitespace or commas.
fn parse_series(raw: &str) -> anyhow::Result<Vec<f64>> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("'{token}' is not a number"))
        })
        .collect()
}
