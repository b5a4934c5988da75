use std::path::PathBuf;

use clap::Parser;

/// Classify emails through the triage service and browse past verdicts.
#[derive(Debug, Parser)]
#[command(name = "mail-triage", version)]
pub struct Args {
    /// Configuration file (RON). Missing file means defaults.
    #[arg(short, long, value_name = "FILE", default_value = "triage.ron")]
    pub config: PathBuf,

    /// Service base URL, overriding the configuration file.
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Log at debug level regardless of configuration.
    #[arg(short, long)]
    pub verbose: bool,
}
