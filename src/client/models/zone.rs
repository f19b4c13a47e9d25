//! Zone models

use serde::{Deserialize, Serialize};

/// Zone summary returned by the zone listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Zone ID
    pub id: String,

    /// Zone name (apex domain)
    pub name: String,

    /// Zone status, e.g. "active"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
