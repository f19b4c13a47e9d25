//! Cloudflare Spectrum API client

use async_trait::async_trait;

use crate::error::Result;

pub mod cloudflare;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use cloudflare::{CloudflareClient, Credentials};
#[cfg(test)]
pub use mock::MockSpectrumClient;
pub use models::{SpectrumApplication, SpectrumApplicationDns, SpectrumApplicationOriginDns, Zone};

/// Remote operations the Spectrum application resource relies on.
///
/// Not-found conditions are reported as [`ApiError::NotFound`](crate::error::ApiError::NotFound)
/// so callers never inspect error text.
#[async_trait]
pub trait SpectrumApi: Send + Sync {
    /// Create an application in a zone. The response carries the new ID.
    async fn create_application(
        &self,
        zone_id: &str,
        app: &SpectrumApplication,
    ) -> Result<SpectrumApplication>;

    /// Replace an existing application in place.
    async fn update_application(
        &self,
        zone_id: &str,
        app_id: &str,
        app: &SpectrumApplication,
    ) -> Result<SpectrumApplication>;

    /// Fetch a single application.
    async fn get_application(&self, zone_id: &str, app_id: &str) -> Result<SpectrumApplication>;

    /// Delete an application.
    async fn delete_application(&self, zone_id: &str, app_id: &str) -> Result<()>;

    /// List every application in a zone.
    async fn list_applications(&self, zone_id: &str) -> Result<Vec<SpectrumApplication>>;

    /// Resolve a zone name (e.g. "example.com") to its zone ID.
    async fn zone_id_by_name(&self, zone_name: &str) -> Result<String>;
}
