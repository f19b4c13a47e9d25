//! Spectrum application models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spectrum application as exchanged with the Cloudflare API.
///
/// The same shape is used for requests and responses. Fields left as `None`
/// are omitted from requests so the API applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumApplication {
    /// Server-assigned application ID (empty on requests)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Edge protocol and port, e.g. "tcp/22"
    pub protocol: String,

    /// Public-facing DNS record
    pub dns: SpectrumApplicationDns,

    /// Direct origin endpoints, e.g. "tcp://192.0.2.1:22"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_direct: Option<Vec<String>>,

    /// Origin hostname resolved by Cloudflare
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_dns: Option<SpectrumApplicationOriginDns>,

    /// Origin port used together with `origin_dns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_port: Option<u16>,

    /// TLS termination mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<String>,

    /// Whether IP Access rules apply to this application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_firewall: Option<bool>,

    /// Whether Proxy Protocol is sent to the origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<bool>,

    /// Creation time (set by the API)
    #[serde(default, skip_serializing)]
    pub created_on: Option<DateTime<Utc>>,

    /// Last modification time (set by the API)
    #[serde(default, skip_serializing)]
    pub modified_on: Option<DateTime<Utc>>,
}

/// DNS record bound to a Spectrum application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectrumApplicationDns {
    /// Record type, e.g. "CNAME"
    #[serde(rename = "type")]
    pub record_type: String,

    /// Fully qualified hostname
    pub name: String,
}

/// Origin hostname of a Spectrum application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectrumApplicationOriginDns {
    pub name: String,
}
