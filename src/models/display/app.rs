//! Spectrum application display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{bool_mark, or_dash};
use crate::client::SpectrumApplication;
use crate::resource::{ResourceData, format_rfc3339_nano};

/// One row of `spectrumctl list`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SpectrumAppDisplay {
    #[tabled(rename = "APP ID")]
    pub id: String,

    #[tabled(rename = "PROTOCOL")]
    pub protocol: String,

    /// Public hostname with its record type
    #[tabled(rename = "DNS")]
    pub dns: String,

    #[tabled(rename = "ORIGIN")]
    pub origin: String,

    #[tabled(rename = "TLS")]
    pub tls: String,

    #[tabled(rename = "IP FIREWALL")]
    pub ip_firewall: String,

    #[tabled(rename = "MODIFIED")]
    pub modified_on: String,
}

impl From<&SpectrumApplication> for SpectrumAppDisplay {
    fn from(app: &SpectrumApplication) -> Self {
        Self {
            id: app.id.clone(),
            protocol: app.protocol.clone(),
            dns: format!("{} ({})", app.dns.name, app.dns.record_type),
            origin: describe_origin(
                app.origin_direct.as_deref(),
                app.origin_dns.as_ref().map(|d| d.name.as_str()),
                app.origin_port,
            ),
            tls: or_dash(app.tls.as_deref()),
            ip_firewall: bool_mark(app.ip_firewall),
            modified_on: app
                .modified_on
                .as_ref()
                .map(format_rfc3339_nano)
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

/// Field/value pairs of a locally tracked application, in schema order.
pub fn state_rows(data: &ResourceData) -> Vec<(String, String)> {
    let c = &data.config;
    let dns = c
        .dns
        .as_ref()
        .map(|d| format!("{} ({})", d.name, d.record_type));

    vec![
        ("id".to_string(), or_dash(Some(data.id()))),
        ("zone_id".to_string(), or_dash(Some(c.zone_id.as_str()))),
        ("protocol".to_string(), or_dash(Some(c.protocol.as_str()))),
        ("dns".to_string(), or_dash(dns.as_deref())),
        (
            "origin".to_string(),
            describe_origin(
                c.origin_direct.as_deref(),
                c.origin_dns.as_ref().map(|d| d.name.as_str()),
                c.origin_port,
            ),
        ),
        ("tls".to_string(), or_dash(c.tls.as_deref())),
        ("ip_firewall".to_string(), bool_mark(c.ip_firewall)),
        ("proxy_protocol".to_string(), bool_mark(c.proxy_protocol)),
        ("created_on".to_string(), or_dash(data.created_on.as_deref())),
        ("modified_on".to_string(), or_dash(data.modified_on.as_deref())),
    ]
}

/// `origin_direct` wins; otherwise `name:port` from the origin DNS block.
fn describe_origin(direct: Option<&[String]>, dns_name: Option<&str>, port: Option<u16>) -> String {
    if let Some(direct) = direct.filter(|d| !d.is_empty()) {
        return direct.join(", ");
    }
    match (dns_name, port) {
        (Some(name), Some(port)) => format!("{}:{}", name, port),
        (Some(name), None) => name.to_string(),
        _ => "--".to_string(),
    }
}
