// src/services/location_service.rs

use axum::body::Bytes;

use crate::{
    clients::XcsSession,
    common::{error::AppError, sequence::RequestSequencer},
    models::{
        access_point::{AccessPoint, CreateAccessPointPayload},
        location::{Location, LocationPayload, RobloxBinding},
        options::{SelectOption, TableQuery},
        ApiMessage, CreatedResponse,
    },
    services::{tags::aggregate_tags, table_view::apply_table_view},
};

/// `xcs-template-<slug>.rbxmx`, slug being the lowercased location name with
/// every run of other characters collapsed to a single `-`.
pub fn starter_pack_filename(location_name: &str) -> String {
    let mut slug = String::with_capacity(location_name.len());
    for c in location_name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "xcs-template.rbxmx".to_string()
    } else {
        format!("xcs-template-{slug}.rbxmx")
    }
}

/// A Roblox place or universe, once bound, stays bound.
fn check_roblox_binding(current: &RobloxBinding, requested: &RobloxBinding) -> Result<(), AppError> {
    if current.place_id.is_some() && requested.place_id != current.place_id {
        return Err(AppError::ImmutableField { field: "Roblox place id" });
    }
    if current.universe.is_some() && requested.universe != current.universe {
        return Err(AppError::ImmutableField { field: "Roblox universe" });
    }
    Ok(())
}

#[derive(Clone)]
pub struct LocationService {
    sequencer: RequestSequencer,
}

impl LocationService {
    pub fn new(sequencer: RequestSequencer) -> Self {
        Self { sequencer }
    }

    pub async fn list(&self, session: &XcsSession, organization_id: &str) -> Result<Vec<Location>, AppError> {
        session.list_locations(organization_id).await
    }

    pub async fn get(&self, session: &XcsSession, id: &str) -> Result<Location, AppError> {
        session.get_location(id).await
    }

    pub async fn create(
        &self,
        session: &XcsSession,
        organization_id: &str,
        payload: &LocationPayload,
    ) -> Result<CreatedResponse, AppError> {
        let created = session.create_location(organization_id, payload).await?;
        tracing::info!(organization_id, location_id = ?created.id, "location created");
        Ok(created)
    }

    pub async fn update(
        &self,
        session: &XcsSession,
        id: &str,
        payload: &LocationPayload,
    ) -> Result<ApiMessage, AppError> {
        // The Roblox binding can be set once, never changed
        if let Some(requested) = &payload.roblox {
            let current = session.get_location(id).await?;
            check_roblox_binding(&current.roblox, requested)?;
        }
        session.update_location(id, payload).await
    }

    pub async fn delete(&self, session: &XcsSession, id: &str) -> Result<ApiMessage, AppError> {
        let message = session.delete_location(id).await?;
        tracing::info!(location_id = %id, "location deleted");
        Ok(message)
    }

    /// Returns the download name and the file contents.
    pub async fn starter_pack(&self, session: &XcsSession, id: &str) -> Result<(String, Bytes), AppError> {
        let (location, bytes) = tokio::try_join!(session.get_location(id), session.starter_pack(id))?;
        Ok((starter_pack_filename(&location.name), bytes))
    }

    // --- Access points ---

    /// The location's access point table. Only the latest load per viewer
    /// and location is answered.
    pub async fn access_point_table(
        &self,
        session: &XcsSession,
        viewer_key: &str,
        location_id: &str,
        query: &TableQuery,
    ) -> Result<Vec<AccessPoint>, AppError> {
        // 1. Claim the latest slot for this table
        let ticket = self
            .sequencer
            .issue(format!("{viewer_key}:access-points:{location_id}"));

        // 2. Fetch, then sort and filter in-process
        let points = session.list_access_points(location_id).await?;
        let rows = apply_table_view(&points, &query.sort_status(), query.text(), &query.tag_list());

        // 3. Answer only if no newer load started meanwhile
        self.sequencer.finish(ticket, rows)
    }

    pub async fn access_point_tags(
        &self,
        session: &XcsSession,
        location_id: &str,
    ) -> Result<Vec<SelectOption>, AppError> {
        let points = session.list_access_points(location_id).await?;
        Ok(aggregate_tags(&points))
    }

    pub async fn create_access_point(
        &self,
        session: &XcsSession,
        location_id: &str,
        payload: &CreateAccessPointPayload,
    ) -> Result<CreatedResponse, AppError> {
        let created = session.create_access_point(location_id, payload).await?;
        tracing::info!(location_id, access_point_id = ?created.id, "access point created");
        Ok(created)
    }
}
