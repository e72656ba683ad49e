use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset class queried by the balance/allowance endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// USDC collateral
    Collateral,
    /// Outcome (conditional) tokens
    Conditional,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Collateral => "COLLATERAL",
            AssetType::Conditional => "CONDITIONAL",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
