//! Fleet Scout - Ollama discovery and benchmark tool for Tailscale meshes.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleet_scout::{export, mesh, pipeline, Cli, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration, then let explicit flags win
    let config = match Config::load(cli.config.as_deref()).and_then(|mut config| {
        cli.apply(&mut config);
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing; stdout is reserved for the routing table
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = mesh::source_from_config(&config.mesh);
    let plan = cli.plan();

    // Dropping the pipeline future on interrupt aborts every outstanding task
    tokio::select! {
        outcome = pipeline::run(&config, source.as_ref(), &plan) => match outcome {
            Ok(report) => {
                if let Some(table) = report.table.filter(|t| !t.is_empty()) {
                    println!("\n--- Routing Table ---");
                    println!("{}", export::render_table(&table));
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{}", e);
                ExitCode::from(e.exit_code())
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("\nAborted by user.");
            ExitCode::SUCCESS
        }
    }
}
