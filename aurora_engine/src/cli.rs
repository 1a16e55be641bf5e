use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    about = "Host that runs engine-function call scripts against a module",
    version
)]
pub struct Args {
    /// JSON module definition (areas and placed objects)
    #[arg(long)]
    pub module: Option<PathBuf>,

    /// JSON call script to replay against the module (requires --module)
    #[arg(long)]
    pub calls: Option<PathBuf>,

    /// Path to write the call results, events and coverage as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Seed for dice and Random
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Log every dispatched call
    #[arg(long)]
    pub verbose: bool,

    /// Print the registered engine functions and exit
    #[arg(long)]
    pub list_functions: bool,
}
