use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Incremental when the sync moved HEAD, full otherwise.
    Auto,
    Full,
    Incremental,
}

impl Default for AnalysisMode {
    fn default() -> Self {
        AnalysisMode::Auto
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisMode::Auto => "auto",
            AnalysisMode::Full => "full",
            AnalysisMode::Incremental => "incremental",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(AnalysisMode::Auto),
            "full" => Ok(AnalysisMode::Full),
            "incremental" => Ok(AnalysisMode::Incremental),
            other => Err(format!("unknown analysis mode '{}'", other)),
        }
    }
}
