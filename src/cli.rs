use clap::Parser;
use std::path::PathBuf;

use crate::core::month::MAX_LOOKBACK;
use crate::core::pipeline::RunOptions;

/// Download the salary file for the past <LOOKBACK> months.
///
/// LOOKBACK is an optional parameter you can provide to download older months.
/// For example running 'hilan-payslip 3' will download the salary file for 3 months ago.
#[derive(Debug, Parser)]
#[command(name = "hilan-payslip", version)]
pub struct Cli {
    /// Months to go back past last month
    #[arg(default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=MAX_LOOKBACK as i64))]
    pub lookback: u32,

    /// If added, the salary sums will not be printed to console
    #[arg(short, long)]
    pub private: bool,

    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "conf.yaml")]
    pub config: PathBuf,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            lookback: self.lookback,
            private: self.private,
        }
    }
}
