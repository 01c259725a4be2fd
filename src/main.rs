use anyhow::Result;
use clap::Parser;
use tracing::info;

use hilan_payslip::{Cli, Pipeline, PortalConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry RUST_LOG, so it is read before the filter is built
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr; stdout carries the run's report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hilan_payslip=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = PortalConfig::load(&cli.config)?;
    info!("Loaded configuration from {}", cli.config.display());

    let today = chrono::Local::now().date_naive();
    let outcome = Pipeline::new(config, cli.run_options())
        .run(today, &mut std::io::stdout())
        .await?;
    info!("Run outcome: {:?}", outcome);

    Ok(())
}
