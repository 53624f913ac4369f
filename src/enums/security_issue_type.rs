use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SecurityIssueType {
    SecretExposure,
    InsecureConfiguration,
    UnsafeInput,
    AuthorizationBypass,
}

impl SecurityIssueType {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityIssueType::SecretExposure => "Secret exposure",
            SecurityIssueType::InsecureConfiguration => "Insecure configuration",
            SecurityIssueType::UnsafeInput => "Unsafe input handling",
            SecurityIssueType::AuthorizationBypass => "Authorization bypass",
        }
    }
}
