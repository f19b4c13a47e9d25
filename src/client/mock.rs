//! Mock Spectrum API client for testing
//!
//! Provides an in-memory implementation of [`SpectrumApi`] for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{SpectrumApi, SpectrumApplication};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Applications live in memory keyed by `(zone_id, app_id)`. Configure zones,
/// seeded applications and failures via builder methods.
///
/// # Example
/// ```ignore
/// let mock = MockSpectrumClient::new()
///     .with_zone("example.com", "zone-1")
///     .await;
///
/// let zone_id = mock.zone_id_by_name("example.com").await?;
/// assert_eq!(zone_id, "zone-1");
/// ```
#[derive(Default)]
pub struct MockSpectrumClient {
    /// Stored applications keyed by (zone_id, app_id)
    apps: Arc<Mutex<HashMap<(String, String), SpectrumApplication>>>,
    /// Zone name -> zone ID
    zones: Arc<Mutex<HashMap<String, String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// When set, create succeeds but returns an application without an ID
    empty_create_id: Arc<Mutex<bool>>,
    /// When set, update answers 405 like the live API does for most changes
    reject_updates: Arc<Mutex<bool>>,
    /// Sequence for generated application IDs
    next_id: Arc<Mutex<u64>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub create_application: usize,
    pub update_application: usize,
    pub get_application: usize,
    pub delete_application: usize,
    pub list_applications: usize,
    pub zone_id_by_name: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.create_application
            + self.update_application
            + self.get_application
            + self.delete_application
            + self.list_applications
            + self.zone_id_by_name
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "create_application")
    pub method: String,
    /// Zone ID the call targeted
    pub zone_id: String,
    /// Application ID, if the call addressed one
    pub app_id: Option<String>,
    /// Request body for create/update calls
    pub body: Option<SpectrumApplication>,
}

impl MockSpectrumClient {
    /// Create a new mock client with no zones or applications.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone for `zone_id_by_name`.
    pub async fn with_zone(self, name: &str, zone_id: &str) -> Self {
        self.zones
            .lock()
            .await
            .insert(name.to_string(), zone_id.to_string());
        self
    }

    /// Seed an existing application (its `id` must be set).
    pub async fn with_app(self, zone_id: &str, app: SpectrumApplication) -> Self {
        self.apps
            .lock()
            .await
            .insert((zone_id.to_string(), app.id.clone()), app);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Make create return a response with an empty ID.
    pub async fn with_empty_create_id(self) -> Self {
        *self.empty_create_id.lock().await = true;
        self
    }

    /// Make update fail with 405 Method Not Allowed.
    pub async fn with_rejected_updates(self) -> Self {
        *self.reject_updates.lock().await = true;
        self
    }

    /// Remove an application behind the handler's back.
    pub async fn remove_app(&self, zone_id: &str, app_id: &str) {
        self.apps
            .lock()
            .await
            .remove(&(zone_id.to_string(), app_id.to_string()));
    }

    /// Current remote copy of an application.
    pub async fn app(&self, zone_id: &str, app_id: &str) -> Option<SpectrumApplication> {
        self.apps
            .lock()
            .await
            .get(&(zone_id.to_string(), app_id.to_string()))
            .cloned()
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture_request(
        &self,
        method: &str,
        zone_id: &str,
        app_id: Option<&str>,
        body: Option<&SpectrumApplication>,
    ) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            zone_id: zone_id.to_string(),
            app_id: app_id.map(|s| s.to_string()),
            body: body.cloned(),
        });
    }

    async fn generate_id(&self) -> String {
        let mut next = self.next_id.lock().await;
        *next += 1;
        format!("{:032x}", *next)
    }
}

#[async_trait]
impl SpectrumApi for MockSpectrumClient {
    async fn create_application(
        &self,
        zone_id: &str,
        app: &SpectrumApplication,
    ) -> Result<SpectrumApplication> {
        self.capture_request("create_application", zone_id, None, Some(app))
            .await;
        self.call_count.lock().await.create_application += 1;
        self.check_error().await?;

        if *self.empty_create_id.lock().await {
            return Ok(SpectrumApplication {
                id: String::new(),
                ..app.clone()
            });
        }

        let now = Utc::now();
        let created = SpectrumApplication {
            id: self.generate_id().await,
            created_on: Some(now),
            modified_on: Some(now),
            ..app.clone()
        };

        self.apps
            .lock()
            .await
            .insert((zone_id.to_string(), created.id.clone()), created.clone());

        Ok(created)
    }

    async fn update_application(
        &self,
        zone_id: &str,
        app_id: &str,
        app: &SpectrumApplication,
    ) -> Result<SpectrumApplication> {
        self.capture_request("update_application", zone_id, Some(app_id), Some(app))
            .await;
        self.call_count.lock().await.update_application += 1;
        self.check_error().await?;

        if *self.reject_updates.lock().await {
            return Err(ApiError::MethodNotAllowed("HTTP status 405".to_string()).into());
        }

        let mut apps = self.apps.lock().await;
        let key = (zone_id.to_string(), app_id.to_string());
        let existing = apps
            .get(&key)
            .ok_or_else(|| ApiError::NotFound(format!("spectrum application {}", app_id)))?;

        let updated = SpectrumApplication {
            id: existing.id.clone(),
            created_on: existing.created_on,
            modified_on: Some(Utc::now()),
            ..app.clone()
        };
        apps.insert(key, updated.clone());

        Ok(updated)
    }

    async fn get_application(&self, zone_id: &str, app_id: &str) -> Result<SpectrumApplication> {
        self.capture_request("get_application", zone_id, Some(app_id), None)
            .await;
        self.call_count.lock().await.get_application += 1;
        self.check_error().await?;

        self.app(zone_id, app_id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("spectrum application {}", app_id)).into())
    }

    async fn delete_application(&self, zone_id: &str, app_id: &str) -> Result<()> {
        self.capture_request("delete_application", zone_id, Some(app_id), None)
            .await;
        self.call_count.lock().await.delete_application += 1;
        self.check_error().await?;

        self.apps
            .lock()
            .await
            .remove(&(zone_id.to_string(), app_id.to_string()))
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("spectrum application {}", app_id)).into())
    }

    async fn list_applications(&self, zone_id: &str) -> Result<Vec<SpectrumApplication>> {
        self.capture_request("list_applications", zone_id, None, None)
            .await;
        self.call_count.lock().await.list_applications += 1;
        self.check_error().await?;

        let apps = self.apps.lock().await;
        let mut listed: Vec<SpectrumApplication> = apps
            .iter()
            .filter(|((zone, _), _)| zone == zone_id)
            .map(|(_, app)| app.clone())
            .collect();
        listed.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(listed)
    }

    async fn zone_id_by_name(&self, zone_name: &str) -> Result<String> {
        self.call_count.lock().await.zone_id_by_name += 1;
        self.check_error().await?;

        self.zones
            .lock()
            .await
            .get(zone_name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("zone {}", zone_name)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SpectrumApplicationDns;
    use crate::error::Error;

    fn app() -> SpectrumApplication {
        SpectrumApplication {
            protocol: "tcp/22".to_string(),
            dns: SpectrumApplicationDns {
                record_type: "CNAME".to_string(),
                name: "ssh.example.com".to_string(),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let mock = MockSpectrumClient::new();
        let created = mock.create_application("zone-1", &app()).await.unwrap();

        assert_eq!(created.id.len(), 32);
        assert!(created.created_on.is_some());
        assert_eq!(mock.app("zone-1", &created.id).await, Some(created));
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_created_on() {
        let mock = MockSpectrumClient::new();
        let created = mock.create_application("zone-1", &app()).await.unwrap();

        let changed = SpectrumApplication {
            origin_direct: Some(vec!["tcp://192.0.2.9:22".to_string()]),
            ..app()
        };
        let updated = mock
            .update_application("zone-1", &created.id, &changed)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_on, created.created_on);
        assert!(updated.modified_on >= created.modified_on);
    }

    #[tokio::test]
    async fn test_error_is_consumed_once() {
        let mock = MockSpectrumClient::new()
            .with_error(ApiError::ServerError("down".to_string()))
            .await;

        assert!(mock.list_applications("zone-1").await.is_err());
        assert!(mock.list_applications("zone-1").await.is_ok());
        assert_eq!(mock.call_counts().await.list_applications, 2);
    }

    #[tokio::test]
    async fn test_get_missing_app_is_not_found() {
        let mock = MockSpectrumClient::new();
        let err = mock.get_application("zone-1", "nope").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
    }
}
