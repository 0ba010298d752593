//! Worker configuration from TOML (`[workers]` section)

use serde::{Deserialize, Serialize};

/// Raw worker configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkersConfig {
    /// Offer the Research Notes target to the controller
    pub research_notes: bool,
}
