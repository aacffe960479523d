use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Business deployments the agent ships canned knowledge and phrasing for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    #[default]
    Restaurant,
    RealEstate,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::RealEstate => "real_estate",
        }
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BusinessType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "restaurant" => Ok(Self::Restaurant),
            "real_estate" | "real-estate" => Ok(Self::RealEstate),
            other => Err(ConfigError::Validation(format!(
                "unsupported business type `{other}` (expected restaurant|real_estate)"
            ))),
        }
    }
}
