use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use ffp::core::FreedomPoint;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "ffp",
    about = "Financial Freedom Point calculator (staged savings vs inflation-adjusted required capital)"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Project a plan file and print the report as JSON
    Project {
        plan: PathBuf,
        #[arg(long, help = "Pretty-print the JSON report")]
        pretty: bool,
        #[arg(long, help = "Project the plan even if stages do not cover it exactly")]
        skip_validation: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Serve { port } => ffp::api::run_http_server(port)
            .await
            .context("HTTP server failed"),
        Command::Project {
            plan,
            pretty,
            skip_validation,
        } => {
            let json = fs::read_to_string(&plan)
                .with_context(|| format!("failed to read plan file {}", plan.display()))?;
            let result = ffp::api::project_plan_json(&json, !skip_validation)
                .map_err(|msg| anyhow!(msg))
                .with_context(|| format!("cannot project {}", plan.display()))?;

            match result.freedom_point {
                FreedomPoint::Reached { age, value } => {
                    info!("financial freedom point at age {age:.3} with {value:.3}")
                }
                FreedomPoint::NotReached => {
                    info!("plan does not reach self-sufficiency before age {}", result.end)
                }
            }

            let out = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{out}");
            Ok(())
        }
    }
}
