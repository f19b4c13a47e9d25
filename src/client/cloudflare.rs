//! Cloudflare API client implementation

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{SpectrumApi, SpectrumApplication, Zone};
use crate::error::{ApiError, Result};

/// Default Cloudflare API host
pub const DEFAULT_API_HOST: &str = "https://api.cloudflare.com";

/// API version prefix appended to the host
const API_PATH: &str = "/client/v4";

/// Rate limit: 1200 requests per five minutes (4 per second)
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(4).unwrap();

/// Credentials accepted by the Cloudflare API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token, sent as a bearer token
    Token(String),
    /// Legacy global API key paired with the account email
    Key { email: String, key: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Credentials::Token(<redacted>)"),
            Credentials::Key { email, .. } => write!(f, "Credentials::Key({email}, <redacted>)"),
        }
    }
}

/// Cloudflare API client
pub struct CloudflareClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

/// Cloudflare response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<EnvelopeError>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    code: i64,
    message: String,
}

/// Extract a readable message from an error response body.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        if !envelope.errors.is_empty() {
            return envelope
                .errors
                .iter()
                .map(|e| format!("{} ({})", e.message, e.code))
                .collect::<Vec<_>>()
                .join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP status {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}

impl CloudflareClient {
    /// Create a client. `api_host` defaults to the production Cloudflare API.
    pub fn with_host(credentials: Credentials, api_host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("spectrumctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let host = api_host.unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let base_url = format!("{}{}", host.trim_end_matches('/'), API_PATH);

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        Ok(Self {
            http,
            base_url,
            credentials,
            rate_limiter,
        })
    }

    /// Base URL including the API version prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Token(token) => builder.bearer_auth(token),
            Credentials::Key { email, key } => builder
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        }
    }

    /// Send a request and unwrap the Cloudflare envelope
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let request = self
            .authorize(builder)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("{} {}", request.method(), request.url());

        let response = self
            .http
            .execute(request)
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        match status {
            status if status.is_success() => {
                let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;

                if !envelope.success {
                    return Err(ApiError::BadRequest(error_message(&body, status)).into());
                }

                envelope.result.ok_or_else(|| {
                    ApiError::InvalidResponse("Response has no result".to_string()).into()
                })
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(error_message(&body, status)).into()),
            StatusCode::METHOD_NOT_ALLOWED => {
                Err(ApiError::MethodNotAllowed(error_message(&body, status)).into())
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimit(Duration::from_secs(
                retry_after.unwrap_or(60),
            ))
            .into()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::BadRequest(error_message(&body, status)).into())
            }
            status if status.is_server_error() => {
                Err(ApiError::ServerError(error_message(&body, status)).into())
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                status
            ))
            .into()),
        }
    }
}

#[async_trait]
impl SpectrumApi for CloudflareClient {
    async fn create_application(
        &self,
        zone_id: &str,
        app: &SpectrumApplication,
    ) -> Result<SpectrumApplication> {
        let url = self.url(&format!("/zones/{}/spectrum/apps", zone_id));
        self.send(self.http.post(url).json(app)).await
    }

    async fn update_application(
        &self,
        zone_id: &str,
        app_id: &str,
        app: &SpectrumApplication,
    ) -> Result<SpectrumApplication> {
        let url = self.url(&format!("/zones/{}/spectrum/apps/{}", zone_id, app_id));
        self.send(self.http.put(url).json(app)).await
    }

    async fn get_application(&self, zone_id: &str, app_id: &str) -> Result<SpectrumApplication> {
        let url = self.url(&format!("/zones/{}/spectrum/apps/{}", zone_id, app_id));
        self.send(self.http.get(url)).await
    }

    async fn delete_application(&self, zone_id: &str, app_id: &str) -> Result<()> {
        let url = self.url(&format!("/zones/{}/spectrum/apps/{}", zone_id, app_id));
        let _deleted: serde_json::Value = self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn list_applications(&self, zone_id: &str) -> Result<Vec<SpectrumApplication>> {
        let url = self.url(&format!("/zones/{}/spectrum/apps", zone_id));
        self.send(self.http.get(url)).await
    }

    async fn zone_id_by_name(&self, zone_name: &str) -> Result<String> {
        let url = self.url("/zones");
        let zones: Vec<Zone> = self
            .send(self.http.get(url).query(&[("name", zone_name)]))
            .await?;

        let mut matching: Vec<Zone> = zones
            .into_iter()
            .filter(|z| z.name.eq_ignore_ascii_case(zone_name))
            .collect();

        match matching.len() {
            0 => Err(ApiError::NotFound(format!("zone {}", zone_name)).into()),
            1 => Ok(matching.remove(0).id),
            n => Err(ApiError::InvalidResponse(format!(
                "ambiguous zone name {}: {} zones match",
                zone_name, n
            ))
            .into()),
        }
    }
}
