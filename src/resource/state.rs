//! Declared configuration and local state of a Spectrum application

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::spectrum_app_schema;
use crate::error::{ResourceError, Result};

/// User-declared Spectrum application.
///
/// Optional fields are `None` when unset; `Some(false)` is an explicit value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumAppConfig {
    pub zone_id: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_direct: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_dns: Option<OriginDnsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_firewall: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<bool>,
}

/// Public hostname record of an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfig {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
}

/// Origin hostname of an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginDnsConfig {
    pub name: String,
}

impl SpectrumAppConfig {
    /// Parse a YAML (or JSON) document, applying schema defaults and validation
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(contents)?;
        Ok(spectrum_app_schema().decode(document)?)
    }

    /// Load a declared configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}

/// Local state handle for one Spectrum application.
///
/// `id` is the persisted key; an empty `id` means the remote object does not
/// exist (never created, deleted, or gone missing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,

    #[serde(flatten)]
    pub config: SpectrumAppConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

impl ResourceData {
    pub fn new(config: SpectrumAppConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the remote object as gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn zone_id(&self) -> &str {
        &self.config.zone_id
    }

    /// Write one attribute, checked against the schema.
    ///
    /// On error the previous value is left untouched.
    pub fn set<V: Serialize>(
        &mut self,
        field: &str,
        value: V,
    ) -> std::result::Result<(), ResourceError> {
        let write_error = |reason: String| ResourceError::FieldWrite {
            field: field.to_string(),
            reason,
        };

        let schema = spectrum_app_schema()
            .field(field)
            .ok_or_else(|| write_error("not declared in the schema".to_string()))?;
        let value = serde_json::to_value(value).map_err(|e| write_error(e.to_string()))?;
        schema.check(&value).map_err(write_error)?;

        let c = &mut self.config;
        match field {
            "zone_id" => c.zone_id = decode(field, value)?,
            "protocol" => c.protocol = decode(field, value)?,
            "dns" => c.dns = decode(field, value)?,
            "origin_direct" => c.origin_direct = decode(field, value)?,
            "origin_dns" => c.origin_dns = decode(field, value)?,
            "origin_port" => c.origin_port = decode(field, value)?,
            "tls" => c.tls = decode(field, value)?,
            "ip_firewall" => c.ip_firewall = decode(field, value)?,
            "proxy_protocol" => c.proxy_protocol = decode(field, value)?,
            "created_on" => self.created_on = decode(field, value)?,
            "modified_on" => self.modified_on = decode(field, value)?,
            _ => return Err(write_error("no storage for this field".to_string())),
        }
        Ok(())
    }

    /// Load a state file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save the state file, replacing any previous contents
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(field: &str, value: Value) -> std::result::Result<T, ResourceError> {
    serde_json::from_value(value).map_err(|e| ResourceError::FieldWrite {
        field: field.to_string(),
        reason: e.to_string(),
    })
}
