//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Resource type the data describes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                resource_type: None,
            },
        }
    }

    /// Tag the output with the resource type it belongs to
    pub fn for_resource(mut self, resource_type: &str) -> Self {
        self.meta.resource_type = Some(resource_type.to_string());
        self
    }
}

/// Format resource data as pretty-printed JSON tagged with its type
pub fn format_resource_json<T: Serialize + ?Sized>(
    resource_type: &str,
    data: &T,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data).for_resource(resource_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{RESOURCE_TYPE, ResourceData, SpectrumAppConfig};

    #[test]
    fn test_json_output_new() {
        let output = JsonOutput::new(vec!["abc123"]);

        assert_eq!(output.data, vec!["abc123"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(output.meta.resource_type.is_none());
    }

    #[test]
    fn test_format_resource_json() {
        let mut data = ResourceData::new(SpectrumAppConfig {
            zone_id: "zone-1".to_string(),
            ..Default::default()
        });
        data.set_id("abc123");

        let result = format_resource_json(RESOURCE_TYPE, &data).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["data"]["id"], "abc123");
        assert_eq!(parsed["data"]["zone_id"], "zone-1");
        assert_eq!(parsed["meta"]["resource_type"], "cloudflare_spectrum_app");
    }
}
