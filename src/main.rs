//! sysmon: a compact CPU / memory / GPU / disk / network monitor for the
//! terminal and status bars.
//!
//! Run with:  `RUST_LOG=debug sysmon --mode detail`

mod app;
mod cli;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::{parse_args, Command, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    let args = match parse_args(std::env::args()) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("sysmon {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    // Logs go to stderr so stdout carries nothing but frames.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("sysmon v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone().unwrap_or_else(sysmon_config::default_path);
    let once = args.once;
    let app = App::new(args, config_path);

    if once {
        app.once().await
    } else {
        app.run().await
    }
}
