use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "repolyzer")]
#[clap(about = "Repository analyzer for security, optimization and architecture issues", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
