use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use iris_plots::chart::{self, ChartReport};
use iris_plots::config::ChartConfig;
use iris_plots::data;
use iris_plots::state::AppState;

const DEFAULT_DATA_FILE: &str = "iris.csv";

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let config = ChartConfig::load()?;
    let mut state = AppState::new(config).context("invalid chart config")?;

    let dataset = data::loader::load_file(&path).inspect_err(|e| {
        log::error!("Failed to load file: {e:#}");
    })?;
    log::info!(
        "Loaded {} rows with columns {:?}",
        dataset.len(),
        dataset.column_names
    );
    state.set_dataset(dataset)?;

    let report = ChartReport {
        scatter: chart::scatter::layout(&state),
        box_plot: chart::box_plot::layout(&state),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("writing chart JSON")?;
    writeln!(out)?;
    Ok(())
}
