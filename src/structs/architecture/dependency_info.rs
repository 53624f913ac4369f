use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInfo {
    pub module: String,
    /// Internal modules this module imports.
    pub dependencies: Vec<String>,
    /// Internal modules importing this module.
    pub used_by: Vec<String>,
    pub is_circular: bool,
}
