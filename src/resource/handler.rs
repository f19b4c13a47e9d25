//! CRUD and import operations for the Spectrum application resource
//!
//! Each operation performs one remote call sequence and reports results by
//! mutating the [`ResourceData`] it is given. Create and Update finish with a
//! Read so local state always matches what a refresh would show.

use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use super::mapper::{expand_application, flatten_dns, flatten_origin_dns, format_rfc3339_nano};
use super::schema::{ResourceSchema, spectrum_app_schema};
use super::state::ResourceData;
use crate::client::SpectrumApi;
use crate::error::{Error, ResourceError, Result};

/// Handler for `cloudflare_spectrum_app` resources
pub struct SpectrumAppResource<C: SpectrumApi> {
    client: Arc<C>,
    schema: &'static ResourceSchema,
}

impl<C: SpectrumApi> SpectrumAppResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            schema: spectrum_app_schema(),
        }
    }

    /// Create the remote application and refresh local state from it
    pub async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let config = self.schema.prepare(&data.config)?;
        let request = expand_application(&config)?;

        info!("Creating Cloudflare Spectrum application from struct: {:?}", request);

        let created = self
            .client
            .create_application(&config.zone_id, &request)
            .await
            .map_err(|e| {
                remote_error(
                    format!(
                        "error creating spectrum application for zone {}",
                        config.zone_id
                    ),
                    e,
                )
            })?;

        if created.id.is_empty() {
            return Err(ResourceError::EmptyResource.into());
        }

        data.config = config;
        data.set_id(created.id);
        info!("Cloudflare Spectrum application ID: {}", data.id());

        self.read(data).await
    }

    /// Update the remote application in place and refresh local state
    pub async fn update(&self, data: &mut ResourceData) -> Result<()> {
        require_id(data)?;
        let config = self.schema.prepare(&data.config)?;
        let request = expand_application(&config)?;
        let app_id = data.id().to_string();

        info!("Updating Cloudflare Spectrum application {} from struct: {:?}", app_id, request);

        self.client
            .update_application(&config.zone_id, &app_id, &request)
            .await
            .map_err(|e| {
                remote_error(
                    format!(
                        "error updating spectrum application {} for zone {}",
                        app_id, config.zone_id
                    ),
                    e,
                )
            })?;

        data.config = config;
        self.read(data).await
    }

    /// Overwrite local state with the remote application.
    ///
    /// A missing remote application clears the local id instead of failing.
    pub async fn read(&self, data: &mut ResourceData) -> Result<()> {
        require_id(data)?;
        let zone_id = data.zone_id().to_string();
        let app_id = data.id().to_string();

        let app = match self.client.get_application(&zone_id, &app_id).await {
            Ok(app) => app,
            Err(Error::Api(err)) if err.is_not_found() => {
                info!("Spectrum application {} in zone {} not found", app_id, zone_id);
                data.clear_id();
                return Ok(());
            }
            Err(err) => {
                return Err(remote_error(
                    format!(
                        "error reading spectrum application {} in zone {}",
                        app_id, zone_id
                    ),
                    err,
                ));
            }
        };

        set_logged(data, "protocol", &app.protocol);
        set_logged(data, "dns", flatten_dns(&app.dns));
        set_logged(data, "origin_direct", &app.origin_direct);
        set_logged(
            data,
            "origin_dns",
            app.origin_dns.as_ref().map(flatten_origin_dns),
        );
        set_logged(data, "origin_port", app.origin_port);
        set_logged(data, "tls", &app.tls);
        set_logged(data, "ip_firewall", app.ip_firewall);
        set_logged(data, "proxy_protocol", app.proxy_protocol);
        set_logged(
            data,
            "created_on",
            app.created_on.as_ref().map(format_rfc3339_nano),
        );
        set_logged(
            data,
            "modified_on",
            app.modified_on.as_ref().map(format_rfc3339_nano),
        );

        Ok(())
    }

    /// Delete the remote application and clear the local id
    pub async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        require_id(data)?;
        let zone_id = data.zone_id().to_string();
        let app_id = data.id().to_string();

        info!("Deleting Cloudflare Spectrum application: {} in zone: {}", app_id, zone_id);

        self.client
            .delete_application(&zone_id, &app_id)
            .await
            .map_err(|e| {
                remote_error(
                    format!(
                        "error deleting spectrum application {} in zone {}",
                        app_id, zone_id
                    ),
                    e,
                )
            })?;

        data.clear_id();
        Ok(())
    }

    /// Adopt an existing application from a `zoneName/applicationID` id.
    ///
    /// Only `zone_id` and the id are seeded; a following Read fills the rest.
    pub async fn import(&self, import_id: &str) -> Result<ResourceData> {
        let (zone_name, app_id) = parse_import_id(import_id)?;

        let zone_id = self
            .client
            .zone_id_by_name(zone_name)
            .await
            .map_err(|err| match err {
                Error::Api(source) => ResourceError::ZoneLookup {
                    zone_name: zone_name.to_string(),
                    source,
                }
                .into(),
                other => other,
            })?;

        info!(
            "Importing Cloudflare Spectrum application {} from zone {} ({})",
            app_id, zone_name, zone_id
        );

        let mut data = ResourceData::default();
        data.config.zone_id = zone_id;
        data.set_id(app_id);
        Ok(data)
    }
}

/// Split `zoneName/applicationID` on the first slash.
fn parse_import_id(import_id: &str) -> std::result::Result<(&str, &str), ResourceError> {
    match import_id.split_once('/') {
        Some((zone_name, app_id)) if !zone_name.is_empty() && !app_id.is_empty() => {
            Ok((zone_name, app_id))
        }
        _ => Err(ResourceError::InvalidImportId(import_id.to_string())),
    }
}

fn require_id(data: &ResourceData) -> std::result::Result<(), ResourceError> {
    if data.exists() {
        Ok(())
    } else {
        Err(ResourceError::MissingId)
    }
}

fn remote_error(context: String, err: Error) -> Error {
    match err {
        Error::Api(source) => ResourceError::remote(context, source).into(),
        other => Error::Other(format!("{}: {}", context, other)),
    }
}

/// Per-field writes during refresh are best effort.
fn set_logged<V: Serialize>(data: &mut ResourceData, field: &str, value: V) {
    if let Err(err) = data.set(field, value) {
        warn!("Error setting {} on spectrum application {:?}: {}", field, data.id(), err);
    }
}
