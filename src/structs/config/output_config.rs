use serde::{Deserialize, Serialize};
use crate::config::constants::DEFAULT_SERVER_PORT_RANGE_START;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Report directory; defaults to ~/repolyzer/reports.
    #[serde(default)]
    pub output_dir: Option<String>,

    #[serde(default)]
    pub open_in_browser: bool,

    #[serde(default = "OutputConfig::default_server_port")]
    pub server_port: u16,
}

impl OutputConfig {
    fn default_server_port() -> u16 {
        DEFAULT_SERVER_PORT_RANGE_START
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            open_in_browser: false,
            server_port: DEFAULT_SERVER_PORT_RANGE_START,
        }
    }
}
