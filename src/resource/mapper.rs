//! Mapping between declared configuration and the API representation

use chrono::{DateTime, SecondsFormat, Utc};

use super::state::{DnsConfig, OriginDnsConfig, SpectrumAppConfig};
use crate::client::{SpectrumApplication, SpectrumApplicationDns, SpectrumApplicationOriginDns};
use crate::error::ResourceError;

/// Build the API request for a declared application.
///
/// Optional fields are only sent when set, so the API keeps its own defaults
/// for everything else. `dns` must be present.
pub fn expand_application(
    config: &SpectrumAppConfig,
) -> Result<SpectrumApplication, ResourceError> {
    let dns = config
        .dns
        .as_ref()
        .ok_or_else(|| ResourceError::Validation("dns is required".to_string()))?;

    Ok(SpectrumApplication {
        protocol: config.protocol.clone(),
        dns: expand_dns(dns),
        origin_direct: config.origin_direct.clone(),
        origin_dns: config.origin_dns.as_ref().map(expand_origin_dns),
        origin_port: config.origin_port,
        tls: config.tls.clone(),
        ip_firewall: config.ip_firewall,
        proxy_protocol: config.proxy_protocol,
        ..Default::default()
    })
}

pub fn expand_dns(dns: &DnsConfig) -> SpectrumApplicationDns {
    SpectrumApplicationDns {
        record_type: dns.record_type.clone(),
        name: dns.name.clone(),
    }
}

pub fn expand_origin_dns(dns: &OriginDnsConfig) -> SpectrumApplicationOriginDns {
    SpectrumApplicationOriginDns {
        name: dns.name.clone(),
    }
}

pub fn flatten_dns(dns: &SpectrumApplicationDns) -> DnsConfig {
    DnsConfig {
        record_type: dns.record_type.clone(),
        name: dns.name.clone(),
    }
}

pub fn flatten_origin_dns(dns: &SpectrumApplicationOriginDns) -> OriginDnsConfig {
    OriginDnsConfig {
        name: dns.name.clone(),
    }
}

/// RFC 3339 with up to nine fractional digits and trailing zeros removed,
/// e.g. `2024-05-01T10:00:00.5Z` or `2024-05-01T10:00:00Z`.
pub fn format_rfc3339_nano(ts: &DateTime<Utc>) -> String {
    let formatted = ts.to_rfc3339_opts(SecondsFormat::Nanos, true);
    match formatted.split_once('.') {
        Some((seconds, rest)) => {
            let fraction = rest.trim_end_matches('Z').trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}Z", seconds)
            } else {
                format!("{}.{}Z", seconds, fraction)
            }
        }
        None => formatted,
    }
}
