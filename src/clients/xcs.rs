// src/clients/xcs.rs

use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use axum::body::Bytes;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::{
    clients::token::TokenProvider,
    common::error::AppError,
    models::{
        access_group::{AccessGroup, AccessGroupUpstream},
        access_point::{AccessPoint, AccessPointUpstream, CreateAccessPointPayload},
        invitation::{CreateInviteLinkPayload, InviteLinkCreated},
        location::{Location, LocationPayload},
        organization::{
            AddMemberPayload, Organization, OrganizationMember, OrganizationPayload,
            UpdateMemberPayload,
        },
        roblox::{RobloxGroup, RobloxGroupRole},
        user::{AppCreated, CreateAppPayload, UpdateProfilePayload, User},
        ApiMessage, CreatedResponse, KeyedList,
    },
};

const USER_AGENT: &str = concat!("xcs-dashboard/", env!("CARGO_PKG_VERSION"));

// ---
// Response envelopes
// ---

#[derive(Deserialize)]
struct OrganizationsEnvelope {
    organizations: Vec<Organization>,
}

#[derive(Deserialize)]
struct OrganizationEnvelope {
    organization: Organization,
}

#[derive(Deserialize)]
struct LocationsEnvelope {
    locations: Vec<Location>,
}

#[derive(Deserialize)]
struct LocationEnvelope {
    location: Location,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessPointsEnvelope {
    access_points: Vec<AccessPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessPointEnvelope {
    access_point: AccessPoint,
}

/// Shared HTTP client for the XCS REST API. Holds no credentials; call
/// [`XcsClient::session`] with a token provider to make authenticated calls.
#[derive(Clone)]
pub struct XcsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl XcsClient {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn session(&self, tokens: Arc<dyn TokenProvider>) -> XcsSession {
        XcsSession {
            client: self.clone(),
            tokens,
        }
    }
}

/// An [`XcsClient`] bound to one caller's token provider.
#[derive(Clone)]
pub struct XcsSession {
    client: XcsClient,
    tokens: Arc<dyn TokenProvider>,
}

impl XcsSession {
    // =========================================================================
    //  Plumbing
    // =========================================================================

    /// Builds `<base>/<segments...>`, percent-encoding every segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.client.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("XCS API URL cannot be used as a base: {}", self.client.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, AppError> {
        let url = self.endpoint(segments)?;
        // Acquired per call: the provider may refresh between requests.
        let token = self.tokens.id_token().await?;
        tracing::debug!(%method, %url, "calling XCS API");
        Ok(self.client.http.request(method, url).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = builder.send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let builder = self.request(Method::GET, segments).await?;
        self.send(builder).await
    }

    async fn with_body<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, segments).await?.json(body);
        self.send(builder).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<ApiMessage, AppError> {
        let builder = self.request(Method::DELETE, segments).await?;
        self.send(builder).await
    }

    /// Non-success responses carry `{ "message": ... }`; surface it verbatim.
    async fn check(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ApiMessage>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response from the XCS API")
                .to_string(),
        };

        tracing::warn!(status = status.as_u16(), %message, "XCS API returned an error");
        Err(AppError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    // =========================================================================
    //  Organizations
    // =========================================================================

    pub async fn list_organizations(&self) -> Result<Vec<Organization>, AppError> {
        let body: OrganizationsEnvelope = self.get(&["api", "v1", "organizations"]).await?;
        Ok(body.organizations)
    }

    pub async fn create_organization(&self, payload: &OrganizationPayload) -> Result<CreatedResponse, AppError> {
        self.with_body(Method::POST, &["api", "v1", "organizations"], payload).await
    }

    pub async fn get_organization(&self, id: &str) -> Result<Organization, AppError> {
        let body: OrganizationEnvelope = self.get(&["api", "v1", "organizations", id]).await?;
        Ok(body.organization)
    }

    pub async fn update_organization(&self, id: &str, payload: &OrganizationPayload) -> Result<ApiMessage, AppError> {
        self.with_body(Method::PUT, &["api", "v1", "organizations", id], payload).await
    }

    pub async fn delete_organization(&self, id: &str) -> Result<ApiMessage, AppError> {
        self.delete(&["api", "v1", "organizations", id]).await
    }

    // --- Members ---

    pub async fn list_members(&self, organization_id: &str) -> Result<Vec<OrganizationMember>, AppError> {
        let KeyedList(members): KeyedList<OrganizationMember> = self
            .get(&["api", "v2", "organizations", organization_id, "members"])
            .await?;
        Ok(members)
    }

    pub async fn add_member(&self, organization_id: &str, payload: &AddMemberPayload) -> Result<ApiMessage, AppError> {
        self.with_body(
            Method::POST,
            &["api", "v1", "organizations", organization_id, "members"],
            payload,
        )
        .await
    }

    pub async fn update_member(
        &self,
        organization_id: &str,
        member_id: &str,
        payload: &UpdateMemberPayload,
    ) -> Result<ApiMessage, AppError> {
        self.with_body(
            Method::PATCH,
            &["api", "v1", "organizations", organization_id, "members", member_id],
            payload,
        )
        .await
    }

    pub async fn remove_member(&self, organization_id: &str, member_id: &str) -> Result<ApiMessage, AppError> {
        self.delete(&["api", "v1", "organizations", organization_id, "members", member_id])
            .await
    }

    // --- Access groups ---

    pub async fn list_access_groups(&self, organization_id: &str) -> Result<Vec<AccessGroup>, AppError> {
        let KeyedList(groups): KeyedList<AccessGroup> = self
            .get(&["api", "v1", "organizations", organization_id, "access-groups"])
            .await?;
        Ok(groups)
    }

    pub async fn create_access_group(
        &self,
        organization_id: &str,
        body: &AccessGroupUpstream,
    ) -> Result<CreatedResponse, AppError> {
        self.with_body(
            Method::POST,
            &["api", "v1", "organizations", organization_id, "access-groups"],
            body,
        )
        .await
    }

    pub async fn update_access_group(
        &self,
        organization_id: &str,
        group_id: &str,
        body: &AccessGroupUpstream,
    ) -> Result<ApiMessage, AppError> {
        self.with_body(
            Method::PUT,
            &["api", "v1", "organizations", organization_id, "access-groups", group_id],
            body,
        )
        .await
    }

    pub async fn delete_access_group(&self, organization_id: &str, group_id: &str) -> Result<ApiMessage, AppError> {
        self.delete(&["api", "v1", "organizations", organization_id, "access-groups", group_id])
            .await
    }

    // =========================================================================
    //  Locations
    // =========================================================================

    pub async fn list_locations(&self, organization_id: &str) -> Result<Vec<Location>, AppError> {
        let body: LocationsEnvelope = self
            .get(&["api", "v1", "organizations", organization_id, "locations"])
            .await?;
        Ok(body.locations)
    }

    pub async fn create_location(
        &self,
        organization_id: &str,
        payload: &LocationPayload,
    ) -> Result<CreatedResponse, AppError> {
        self.with_body(
            Method::POST,
            &["api", "v1", "organizations", organization_id, "locations"],
            payload,
        )
        .await
    }

    pub async fn get_location(&self, id: &str) -> Result<Location, AppError> {
        let body: LocationEnvelope = self.get(&["api", "v1", "locations", id]).await?;
        Ok(body.location)
    }

    pub async fn update_location(&self, id: &str, payload: &LocationPayload) -> Result<ApiMessage, AppError> {
        self.with_body(Method::PUT, &["api", "v1", "locations", id], payload).await
    }

    pub async fn delete_location(&self, id: &str) -> Result<ApiMessage, AppError> {
        self.delete(&["api", "v1", "locations", id]).await
    }

    /// The `.rbxmx` model the location's Roblox place needs. Binary, not JSON.
    pub async fn starter_pack(&self, location_id: &str) -> Result<Bytes, AppError> {
        let builder = self
            .request(Method::GET, &["api", "v1", "locations", location_id, "starter-pack"])
            .await?;
        let response = Self::check(builder.send().await?).await?;
        Ok(response.bytes().await?)
    }

    // --- Access points ---

    pub async fn list_access_points(&self, location_id: &str) -> Result<Vec<AccessPoint>, AppError> {
        let body: AccessPointsEnvelope = self
            .get(&["api", "v1", "locations", location_id, "access-points"])
            .await?;
        Ok(body.access_points)
    }

    pub async fn create_access_point(
        &self,
        location_id: &str,
        payload: &CreateAccessPointPayload,
    ) -> Result<CreatedResponse, AppError> {
        self.with_body(
            Method::POST,
            &["api", "v1", "locations", location_id, "access-points"],
            payload,
        )
        .await
    }

    pub async fn get_access_point(&self, id: &str) -> Result<AccessPoint, AppError> {
        let body: AccessPointEnvelope = self.get(&["api", "v1", "access-points", id]).await?;
        Ok(body.access_point)
    }

    pub async fn update_access_point(&self, id: &str, body: &AccessPointUpstream) -> Result<ApiMessage, AppError> {
        self.with_body(Method::PUT, &["api", "v1", "access-points", id], body).await
    }

    pub async fn delete_access_point(&self, id: &str) -> Result<ApiMessage, AppError> {
        self.delete(&["api", "v1", "access-points", id]).await
    }

    // =========================================================================
    //  Roblox lookups
    // =========================================================================

    pub async fn roblox_group_search(&self, query: &str) -> Result<Vec<RobloxGroup>, AppError> {
        self.get(&["api", "v1", "roblox", "group-search", query]).await
    }

    pub async fn roblox_group_roles(&self, group_id: u64) -> Result<Vec<RobloxGroupRole>, AppError> {
        let group_id = group_id.to_string();
        self.get(&["api", "v1", "roblox", "group-roles", &group_id]).await
    }

    // =========================================================================
    //  Admin
    // =========================================================================

    pub async fn create_invite_link(&self, payload: &CreateInviteLinkPayload) -> Result<InviteLinkCreated, AppError> {
        self.with_body(Method::POST, &["api", "v1", "admin", "invite-link", "create"], payload)
            .await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<User>, AppError> {
        self.get(&["api", "v1", "admin", "search-users", query]).await
    }

    // =========================================================================
    //  Me
    // =========================================================================

    pub async fn get_me(&self) -> Result<User, AppError> {
        self.get(&["api", "v1", "me"]).await
    }

    pub async fn update_profile(&self, payload: &UpdateProfilePayload) -> Result<ApiMessage, AppError> {
        self.with_body(Method::PATCH, &["api", "v1", "me"], payload).await
    }

    pub async fn update_me(&self, payload: &UpdateProfilePayload) -> Result<ApiMessage, AppError> {
        self.with_body(Method::PATCH, &["api", "v2", "me"], payload).await
    }

    pub async fn create_app(&self, payload: &CreateAppPayload) -> Result<AppCreated, AppError> {
        self.with_body(Method::POST, &["api", "v2", "me", "apps"], payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::token::BearerToken;

    fn session(base: &str) -> XcsSession {
        XcsClient::new(base.parse().unwrap(), Duration::from_secs(1))
            .unwrap()
            .session(Arc::new(BearerToken::new("t")))
    }

    #[test]
    fn endpoint_encodes_user_supplied_segments() {
        let url = session("https://xcs.example.com/")
            .endpoint(&["api", "v1", "admin", "search-users", "a b/c"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://xcs.example.com/api/v1/admin/search-users/a%20b%2Fc"
        );
    }

    #[test]
    fn endpoint_keeps_a_base_path_prefix() {
        let url = session("https://example.com/xcs/")
            .endpoint(&["api", "v1", "me"])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/xcs/api/v1/me");
    }
}
