use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use healthyday_core::{application::create_service, domain::common::HealthyDayConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::application::controller::{Controller, Navigation};
use crate::args::Args;

mod application;
mod args;

fn init_logger(args: &Args) {
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, anyhow::Error> {
    dotenv().ok();

    let args = Args::parse();
    init_logger(&args);

    let config = HealthyDayConfig::from(&args);
    debug!(?config, "Configuration loaded");

    let service = create_service(config.clone()).with_context(|| {
        format!(
            "Failed to open local store in {}",
            config.storage.data_dir.display()
        )
    })?;
    let controller = Controller::new(service, config.search);

    match controller.run(args.command).await? {
        Navigation::Done => Ok(ExitCode::SUCCESS),
        Navigation::Login { reason } => {
            eprintln!("{}", reason);
            eprintln!("Log in with `healthyday login <username>`.");
            Ok(ExitCode::from(2))
        }
    }
}
