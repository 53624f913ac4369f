use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStyle {
    LayerBased,
    FeatureBased,
    Mixed,
    Flat,
}

impl OrganizationStyle {
    pub fn label(&self) -> &'static str {
        match self {
            OrganizationStyle::LayerBased => "Layer-based",
            OrganizationStyle::FeatureBased => "Feature-based",
            OrganizationStyle::Mixed => "Mixed",
            OrganizationStyle::Flat => "Flat",
        }
    }
}
