//! Console router command-line tool.
//!
//! ```text
//!   path ──▶ config ──▶ startup ──▶ resolver ──▶ JSON on stdout
//!            (TOML)     (compile,    (first match,
//!                        verify)      redirects, mounts)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use console_router::config::{load_config, RouterConfig};
use console_router::lifecycle::build_resolver;
use console_router::observability::{logging::init_logging, metrics::init_metrics};

#[derive(Parser)]
#[command(name = "console-router")]
#[command(about = "Resolve admin console navigation paths", long_about = None)]
struct Cli {
    /// Route configuration file (TOML). Defaults to the built-in console table.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve paths and print one JSON result per line
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print Prometheus metrics after resolving
        #[arg(long)]
        metrics: bool,
    },
    /// Build and verify the route table, then exit
    Check,
    /// List parameterized routes for analytics redaction
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    init_logging(&config.observability);

    let want_metrics = matches!(cli.command, Commands::Resolve { metrics: true, .. });
    let metrics = if config.observability.metrics_enabled || want_metrics {
        Some(init_metrics()?)
    } else {
        None
    };

    let resolver = build_resolver(&config)?;

    match cli.command {
        Commands::Resolve { paths, .. } => {
            let mut failures = 0;
            for path in &paths {
                let line = match resolver.resolve(path) {
                    Ok(resolution) => json!({ "path": path, "resolution": resolution }),
                    Err(e) => {
                        failures += 1;
                        let message = e.to_string();
                        json!({ "path": path, "error": e, "message": message })
                    }
                };
                println!("{}", serde_json::to_string(&line)?);
            }

            if want_metrics {
                if let Some(handle) = &metrics {
                    print!("{}", handle.render());
                }
            }

            if failures > 0 {
                return Err(format!("{} path(s) hit a misconfigured route table", failures).into());
            }
        }
        Commands::Check => {
            let table = resolver.table();
            println!(
                "route table OK: {} routes, {} redirects, max {} hops",
                table.len(),
                table.redirect_count(),
                resolver.max_hops()
            );
        }
        Commands::Routes => {
            let inventory = resolver.table().inventory(&config.analytics.sensitive());
            println!("{}", serde_json::to_string_pretty(&inventory)?);
        }
    }

    Ok(())
}
