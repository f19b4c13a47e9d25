//! The `cloudflare_spectrum_app` resource
//!
//! Schema, declared configuration, mapping to the API shape and the
//! create/read/update/delete/import operations.

mod handler;
mod mapper;
mod schema;
mod state;

pub use handler::SpectrumAppResource;
pub use mapper::format_rfc3339_nano;
pub use schema::{FieldSchema, RESOURCE_TYPE, ResourceSchema, spectrum_app_schema};
#[cfg(test)]
pub use state::DnsConfig;
pub use state::{ResourceData, SpectrumAppConfig};
