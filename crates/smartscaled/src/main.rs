//! smartscaled — the SmartScale daemon.
//!
//! Single binary that assembles the autoscaler service:
//! - Forecast model (loaded from disk, trained on first run)
//! - Host sampler (sysinfo)
//! - Metrics registry + Prometheus exposition
//! - REST API
//!
//! # Usage
//!
//! ```text
//! smartscaled serve --port 8000 --model-dir models
//! smartscaled train --model-dir models --samples 1000 --seed 42
//! smartscaled decide --current 85 --predicted 90
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use smartscale_api::{AppState, build_router};
use smartscale_autoscale::{ActionExecutor, SimulatedExecutor, decide};
use smartscale_metrics::SystemSampler;
use smartscale_model::TrainingConfig;

#[derive(Parser)]
#[command(name = "smartscaled", about = "SmartScale autoscaler daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the API server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Directory holding the model artifacts.
        #[arg(long, default_value = "models")]
        model_dir: PathBuf,

        /// CPU sampling window in seconds.
        #[arg(long, default_value = "1")]
        sample_window: u64,
    },

    /// Train the forecast model and persist its artifacts.
    Train {
        /// Directory to write the model artifacts to.
        #[arg(long, default_value = "models")]
        model_dir: PathBuf,

        /// Number of synthetic training samples.
        #[arg(long, default_value = "1000")]
        samples: usize,

        /// RNG seed for the synthetic noise.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run one decision + simulated action for the given readings.
    Decide {
        /// Current CPU usage percentage.
        #[arg(long)]
        current: f64,

        /// Predicted CPU usage percentage.
        #[arg(long)]
        predicted: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,smartscaled=debug,smartscale=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            model_dir,
            sample_window,
        } => run_serve(port, model_dir, sample_window).await,
        Command::Train {
            model_dir,
            samples,
            seed,
        } => run_train(model_dir, samples, seed),
        Command::Decide { current, predicted } => run_decide(current, predicted).await,
    }
}

async fn run_serve(port: u16, model_dir: PathBuf, sample_window: u64) -> anyhow::Result<()> {
    info!("SmartScale daemon starting");

    // Two-phase init: the forecaster is only handed to the API once it
    // is fully loaded. Until then /predict answers 503.
    let config = TrainingConfig::default();
    let forecaster = match smartscale_model::load_or_train(&model_dir, &config) {
        Ok(forecaster) => {
            info!(dir = %model_dir.display(), "forecast model ready");
            Some(Arc::new(forecaster))
        }
        Err(e) => {
            warn!(error = %e, "forecast model unavailable, serving without predictions");
            None
        }
    };

    let sampler = SystemSampler::new(Duration::from_secs(sample_window));
    let state = AppState::new(forecaster, sampler);
    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("SmartScale daemon stopped");
    Ok(())
}

fn run_train(model_dir: PathBuf, samples: usize, seed: u64) -> anyhow::Result<()> {
    let config = TrainingConfig {
        samples,
        seed,
        ..TrainingConfig::default()
    };

    // Training failures, including artifact persistence, are fatal here.
    let outcome = smartscale_model::train(&model_dir, &config)?;
    info!(
        r_squared = outcome.r_squared,
        dir = %model_dir.display(),
        "training complete"
    );
    Ok(())
}

async fn run_decide(current: f64, predicted: Option<f64>) -> anyhow::Result<()> {
    let decision = decide(current, predicted);
    let success = SimulatedExecutor::new().execute(decision).await;

    println!("decision: {decision}");
    println!("action successful: {success}");
    Ok(())
}
