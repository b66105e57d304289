// src/handlers/organizations.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        access_group::{AccessGroup, AccessGroupPayload},
        options::{BulkRemoveResult, MemberTable, OptionGroup, TableQuery},
        organization::{
            AddMemberPayload, BulkRemovePayload, Organization, OrganizationPayload,
            UpdateMemberPayload,
        },
        ApiMessage, CreatedResponse,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AccessGroupOptionsQuery {
    /// Only list organization-wide groups and this location's groups.
    pub location_id: Option<String>,
}

// =============================================================================
//  1. ORGANIZATIONS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = "Organizations",
    responses(
        (status = 200, description = "Organizations the caller belongs to", body = Vec<Organization>),
        (status = 401, description = "Missing bearer token", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_organizations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let organizations = app_state.organization_service.list(&session).await?;
    Ok(Json(organizations))
}

#[utoipa::path(
    post,
    path = "/api/organizations",
    tag = "Organizations",
    request_body = OrganizationPayload,
    responses(
        (status = 201, description = "Organization created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<OrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let created = app_state.organization_service.create(&session, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization id")),
    responses(
        (status = 200, description = "The organization", body = Organization),
        (status = 404, description = "Unknown organization", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let organization = app_state.organization_service.get(&session, &id).await?;
    Ok(Json(organization))
}

#[utoipa::path(
    put,
    path = "/api/organizations/{id}",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization id")),
    request_body = OrganizationPayload,
    responses((status = 200, description = "Organization updated", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn update_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<OrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state.organization_service.update(&session, &id, &payload).await?;
    Ok(Json(message))
}

#[utoipa::path(
    delete,
    path = "/api/organizations/{id}",
    tag = "Organizations",
    params(("id" = String, Path, description = "Organization id")),
    responses((status = 200, description = "Organization deleted", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn delete_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let message = app_state.organization_service.delete(&session, &id).await?;
    Ok(Json(message))
}

// =============================================================================
//  2. MEMBERS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/organizations/{id}/members",
    tag = "Members",
    params(("id" = String, Path, description = "Organization id"), TableQuery),
    responses(
        (status = 200, description = "Filtered member table with the caller's allowed actions", body = MemberTable),
        (status = 403, description = "Caller is not a member", body = ErrorBody),
        (status = 409, description = "Superseded by a newer load", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let table = app_state
        .organization_service
        .member_table(&session, &user.viewer_key, &id, &query)
        .await?;
    Ok(Json(table))
}

#[utoipa::path(
    post,
    path = "/api/organizations/{id}/members",
    tag = "Members",
    params(("id" = String, Path, description = "Organization id")),
    request_body = AddMemberPayload,
    responses((status = 201, description = "Member added", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn add_member(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<AddMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state.organization_service.add_member(&session, &id, &payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    patch,
    path = "/api/organizations/{id}/members/{member_id}",
    tag = "Members",
    params(
        ("id" = String, Path, description = "Organization id"),
        ("member_id" = String, Path, description = "Member id")
    ),
    request_body = UpdateMemberPayload,
    responses(
        (status = 200, description = "Member updated", body = ApiMessage),
        (status = 403, description = "Role change not allowed", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, member_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let message = app_state
        .organization_service
        .update_member(&session, &id, &member_id, &payload)
        .await?;
    Ok(Json(message))
}

#[utoipa::path(
    delete,
    path = "/api/organizations/{id}/members/{member_id}",
    tag = "Members",
    params(
        ("id" = String, Path, description = "Organization id"),
        ("member_id" = String, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member removed", body = ApiMessage),
        (status = 403, description = "Removal not allowed", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_member(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let message = app_state
        .organization_service
        .remove_member(&session, &id, &member_id)
        .await?;
    Ok(Json(message))
}

#[utoipa::path(
    post,
    path = "/api/organizations/{id}/members/bulk-remove",
    tag = "Members",
    params(("id" = String, Path, description = "Organization id")),
    request_body = BulkRemovePayload,
    responses((status = 200, description = "Per-member outcome", body = BulkRemoveResult)),
    security(("api_jwt" = []))
)]
pub async fn bulk_remove_members(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<BulkRemovePayload>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Validate the payload
    payload.validate()?;

    // 2. Call the service; per-member failures come back in the body
    let session = user.session(&app_state.xcs_client);
    let result = app_state
        .organization_service
        .bulk_remove(&session, &id, &payload.member_ids)
        .await?;
    Ok(Json(result))
}

// =============================================================================
//  3. ACCESS GROUPS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/organizations/{id}/access-groups",
    tag = "Access Groups",
    params(("id" = String, Path, description = "Organization id")),
    responses((status = 200, description = "Access groups", body = Vec<AccessGroup>)),
    security(("api_jwt" = []))
)]
pub async fn list_access_groups(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let groups = app_state.organization_service.list_access_groups(&session, &id).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/organizations/{id}/access-group-options",
    tag = "Access Groups",
    params(("id" = String, Path, description = "Organization id"), AccessGroupOptionsQuery),
    responses((status = 200, description = "Grouped multi-select options", body = Vec<OptionGroup>)),
    security(("api_jwt" = []))
)]
pub async fn access_group_options(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Query(query): Query<AccessGroupOptionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let options = app_state
        .organization_service
        .access_group_options(&session, &id, query.location_id.as_deref())
        .await?;
    Ok(Json(options))
}

#[utoipa::path(
    post,
    path = "/api/organizations/{id}/access-groups",
    tag = "Access Groups",
    params(("id" = String, Path, description = "Organization id")),
    request_body = AccessGroupPayload,
    responses(
        (status = 201, description = "Access group created", body = CreatedResponse),
        (status = 400, description = "Invalid payload or scan data", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_access_group(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<AccessGroupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let created = app_state
        .organization_service
        .create_access_group(&session, &id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/organizations/{id}/access-groups/{group_id}",
    tag = "Access Groups",
    params(
        ("id" = String, Path, description = "Organization id"),
        ("group_id" = String, Path, description = "Access group id")
    ),
    request_body = AccessGroupPayload,
    responses((status = 200, description = "Access group updated", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn update_access_group(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, group_id)): Path<(String, String)>,
    Json(payload): Json<AccessGroupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state
        .organization_service
        .update_access_group(&session, &id, &group_id, &payload)
        .await?;
    Ok(Json(message))
}

#[utoipa::path(
    delete,
    path = "/api/organizations/{id}/access-groups/{group_id}",
    tag = "Access Groups",
    params(
        ("id" = String, Path, description = "Organization id"),
        ("group_id" = String, Path, description = "Access group id")
    ),
    responses((status = 200, description = "Access group deleted", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn delete_access_group(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, group_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let message = app_state
        .organization_service
        .delete_access_group(&session, &id, &group_id)
        .await?;
    Ok(Json(message))
}
