use serde::{Deserialize, Serialize};
use crate::enums::organization_style::OrganizationStyle;
use crate::structs::architecture::architecture_pattern::ArchitecturePattern;
use crate::structs::architecture::architecture_suggestion::ArchitectureSuggestion;
use crate::structs::architecture::dependency_info::DependencyInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureReport {
    pub organization: OrganizationStyle,
    pub patterns: Vec<ArchitecturePattern>,
    pub suggestions: Vec<ArchitectureSuggestion>,
    pub dependencies: Vec<DependencyInfo>,
    pub circular_dependencies: Vec<String>,
    pub present_layers: Vec<String>,
}
