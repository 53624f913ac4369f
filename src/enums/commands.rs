use std::path::PathBuf;
use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Clone or update a remote repository and analyze it
    Analyze {
        /// https URL of a GitHub or GitLab repository
        url: String,
        /// Directory the working copy is cloned into
        #[clap(short, long)]
        clone_dir: Option<PathBuf>,
        /// Analyze every file, not only the latest changes
        #[clap(long, conflicts_with = "incremental")]
        full: bool,
        /// Analyze only the files touched since the previous sync
        #[clap(long)]
        incremental: bool,
        /// Active workspace folder
        #[clap(short, long)]
        workspace: Option<PathBuf>,
        /// Make the working copy the active workspace when it lives elsewhere
        #[clap(long)]
        switch_workspace: bool,
        /// Open the report in the browser
        #[clap(long)]
        open: bool,
        /// Write the report to this file
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Analyze a local directory without synchronizing it
    Scan {
        path: PathBuf,
        #[clap(long)]
        open: bool,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a unified diff (file or '-' for stdin) and print its change records
    Diff {
        input: String,
    },
    /// Serve generated reports over HTTP
    Serve {
        /// Report files or directories of reports; defaults to the report directory
        reports: Vec<PathBuf>,
        /// First port to try; defaults to output.server_port
        #[clap(short, long)]
        port: Option<u16>,
    },
    /// Validate the configuration file
    Validate,
}
