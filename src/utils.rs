//! Utils

use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// YAML configuration file to load instead of the built-in defaults
    #[clap(short, long)]
    pub config: Option<String>,

    /// Print each record as JSON after validation
    #[clap(short, long)]
    pub json: bool,
}
