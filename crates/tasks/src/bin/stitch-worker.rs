//! stitch-worker — command-line runner for Stitch extraction tasks.
//!
//! Resolves credentials from the environment-backed connection registry and
//! runs one task per invocation: `trigger`, `run` (trigger + monitor), or
//! `sense` (poll for completion of a run started elsewhere).

use clap::{Parser, Subcommand};
use tracing::info;

use stitch_core::{config, EnvConnectionRegistry, StitchConfig};
use stitch_http::AuthScheme;
use stitch_tasks::stitch;
use stitch_tasks::{
    ExtractionSensor, RunAndMonitorTask, SensorRunner, Task, TaskContext, TriggerExtractionTask,
};

// ── CLI ─────────────────────────────────────────────────────────────

/// Stitch extraction worker: triggers and monitors data-sync runs.
#[derive(Parser, Debug)]
#[command(name = "stitch-worker", version, about)]
struct Cli {
    /// Source to sync on the extraction platform.
    #[arg(long, env = "STITCH_SOURCE_ID")]
    source_id: String,

    /// Stitch account client id.
    #[arg(long, env = "STITCH_CLIENT_ID")]
    client_id: String,

    /// Connection id to resolve credentials from.
    #[arg(long, env = "STITCH_CONN_ID", default_value = "stitch")]
    conn_id: String,

    /// Authorization scheme: Bearer or Basic.
    #[arg(long, env = "STITCH_AUTH_SCHEME", default_value = "Bearer")]
    auth_scheme: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trigger a sync and exit without waiting.
    Trigger,
    /// Trigger a sync and block until it completes, fails, or times out.
    Run,
    /// Poll the status feed until a run completes (sensor mode).
    Sense,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    config::load_dotenv();
    let cli = Cli::parse();

    let config = StitchConfig::from_env();
    config.log_summary();

    let scheme: AuthScheme = cli.auth_scheme.parse()?;
    let registry = EnvConnectionRegistry::new();
    let client = stitch::client_from_registry(
        &registry,
        &cli.conn_id,
        scheme,
        &config,
        &cli.source_id,
        &cli.client_id,
    )
    .await?;

    let ctx = TaskContext::new();
    info!(run_id = %ctx.run_id, "worker started");

    match cli.command {
        Command::Trigger => TriggerExtractionTask::new(client).execute(&ctx).await?,
        Command::Run => RunAndMonitorTask::new(client).execute(&ctx).await?,
        Command::Sense => {
            let sensor = ExtractionSensor::new(client);
            SensorRunner::new()
                .initial_delay(config.monitor.grace())
                .poke_interval(config.monitor.poll_interval())
                .timeout(config.monitor.timeout())
                .run(&sensor, &ctx)
                .await?;
        }
    }

    info!(run_id = %ctx.run_id, "worker finished");
    Ok(())
}
