//! # Piazza - Social Demo Client
//!
//! The main binary for the Piazza demo-data core.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/piazza (THE BINARY)         │
//! │                                               │
//! │   ┌─────────────┐        ┌───────────────┐   │
//! │   │    CLI      │        │  piazza.toml  │   │
//! │   │   (clap)    │        │   (config)    │   │
//! │   └──────┬──────┘        └───────┬───────┘   │
//! │          └──────────┬────────────┘           │
//! │                     ▼                        │
//! │             ┌───────────────┐                │
//! │             │  piazza-core  │                │
//! │             │  (THE LOGIC)  │                │
//! │             └───────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Seed the demo database
//! piazza init
//!
//! # Views
//! piazza trending
//! piazza events --filter upcoming
//! piazza recommend --kind users
//!
//! # Mutations
//! piazza follow user-amara
//! piazza requests --accept user-priya
//! ```

use clap::Parser;
use piazza::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing. PIAZZA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PIAZZA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "piazza=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Piazza startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗ ██╗ █████╗ ███████╗███████╗ █████╗
  ██╔══██╗██║██╔══██╗╚══███╔╝╚══███╔╝██╔══██╗
  ██████╔╝██║███████║  ███╔╝   ███╔╝ ███████║
  ██╔═══╝ ██║██╔══██║ ███╔╝   ███╔╝  ██╔══██║
  ██║     ██║██║  ██║███████╗███████╗██║  ██║
  ╚═╝     ╚═╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝  ╚═╝

  Social Demo Core v{}

  Deterministic • Synchronous • Fail-open
"#,
        env!("CARGO_PKG_VERSION")
    );
}
