mod control;
mod routes;
mod state;
mod tick_loop;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use lab_assistant::{GeminiClient, LabAssistant, TextGenerator, UnavailableGenerator};
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lab_daemon", about = "Metal displacement lab simulation server")]
struct Cli {
    #[arg(long, default_value_t = 3002)]
    port: u16,
    /// Reaction config JSON.
    #[arg(long, default_value = lab_setup::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Override the config's wall-clock milliseconds per simulated second.
    #[arg(long)]
    tick_interval_ms: Option<u64>,
    #[arg(long, default_value = "http://localhost:5173")]
    cors_origin: String,
    #[arg(long, default_value = lab_assistant::DEFAULT_MODEL)]
    model: String,
    #[arg(long, default_value_t = 30)]
    assistant_timeout_secs: u64,
}

fn build_assistant(model: &str, timeout: Duration) -> LabAssistant {
    let generator: Arc<dyn TextGenerator> = match GeminiClient::from_env(model) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::warn!("lab assistant disabled: {err}");
            Arc::new(UnavailableGenerator)
        }
    };
    LabAssistant::new(generator).with_timeout(timeout)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = lab_setup::load_config(&cli.config)?;
    if let Some(ms) = cli.tick_interval_ms {
        config.tick_interval_ms = ms;
    }
    lab_setup::validate_config(&config).context("validating reaction config")?;

    let cors_origin: HeaderValue = cli
        .cors_origin
        .parse()
        .with_context(|| format!("invalid --cors-origin: {}", cli.cors_origin))?;

    let assistant = build_assistant(&cli.model, Duration::from_secs(cli.assistant_timeout_secs));
    tracing::info!(
        duration = config.duration,
        tick_interval_ms = config.tick_interval_ms,
        speed = config.playback_speed(),
        model = assistant.model(),
        "lab session ready"
    );

    let app_state = AppState::new(config, assistant);
    let router = routes::make_router_with_cors(app_state.clone(), cors_origin);

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    control::shutdown(&app_state);
    tracing::info!("shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_defaults_to_shipped_file() {
        let cli = Cli::try_parse_from(["lab_daemon"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(lab_setup::DEFAULT_CONFIG_PATH));
        assert_eq!(cli.port, 3002);
    }
}
