// src/handlers/locations.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        access_point::{AccessPoint, CreateAccessPointPayload},
        location::{Location, LocationPayload},
        options::{SelectOption, TableQuery},
        ApiMessage, CreatedResponse,
    },
};

#[utoipa::path(
    get,
    path = "/api/organizations/{id}/locations",
    tag = "Locations",
    params(("id" = String, Path, description = "Organization id")),
    responses((status = 200, description = "The organization's locations", body = Vec<Location>)),
    security(("api_jwt" = []))
)]
pub async fn list_locations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(organization_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let locations = app_state.location_service.list(&session, &organization_id).await?;
    Ok(Json(locations))
}

#[utoipa::path(
    post,
    path = "/api/organizations/{id}/locations",
    tag = "Locations",
    params(("id" = String, Path, description = "Organization id")),
    request_body = LocationPayload,
    responses(
        (status = 201, description = "Location created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_location(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(organization_id): Path<String>,
    Json(payload): Json<LocationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let created = app_state
        .location_service
        .create(&session, &organization_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    tag = "Locations",
    params(("id" = String, Path, description = "Location id")),
    responses(
        (status = 200, description = "The location", body = Location),
        (status = 404, description = "Unknown location", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_location(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let location = app_state.location_service.get(&session, &id).await?;
    Ok(Json(location))
}

#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    tag = "Locations",
    params(("id" = String, Path, description = "Location id")),
    request_body = LocationPayload,
    responses(
        (status = 200, description = "Location updated", body = ApiMessage),
        (status = 400, description = "Invalid payload or Roblox binding change", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_location(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<LocationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state.location_service.update(&session, &id, &payload).await?;
    Ok(Json(message))
}

#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    tag = "Locations",
    params(("id" = String, Path, description = "Location id")),
    responses((status = 200, description = "Location deleted", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn delete_location(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let message = app_state.location_service.delete(&session, &id).await?;
    Ok(Json(message))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}/starter-pack",
    tag = "Locations",
    params(("id" = String, Path, description = "Location id")),
    responses((status = 200, description = "The .rbxmx Roblox model, sent as an attachment")),
    security(("api_jwt" = []))
)]
pub async fn download_starter_pack(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Fetch the model and the location name together
    let session = user.session(&app_state.xcs_client);
    let (filename, bytes) = app_state.location_service.starter_pack(&session, &id).await?;

    // 2. Send it as a download
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    Ok((headers, bytes))
}

// ---
// Access points of a location
// ---

#[utoipa::path(
    get,
    path = "/api/locations/{id}/access-points",
    tag = "Access Points",
    params(("id" = String, Path, description = "Location id"), TableQuery),
    responses(
        (status = 200, description = "Sorted and filtered access points", body = Vec<AccessPoint>),
        (status = 409, description = "Superseded by a newer load", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_access_points(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let rows = app_state
        .location_service
        .access_point_table(&session, &user.viewer_key, &id, &query)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}/access-point-tags",
    tag = "Access Points",
    params(("id" = String, Path, description = "Location id")),
    responses((status = 200, description = "Every tag in use, first-seen order", body = Vec<SelectOption>)),
    security(("api_jwt" = []))
)]
pub async fn access_point_tags(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let tags = app_state.location_service.access_point_tags(&session, &id).await?;
    Ok(Json(tags))
}

#[utoipa::path(
    post,
    path = "/api/locations/{id}/access-points",
    tag = "Access Points",
    params(("id" = String, Path, description = "Location id")),
    request_body = CreateAccessPointPayload,
    responses(
        (status = 201, description = "Access point created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_access_point(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateAccessPointPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let created = app_state
        .location_service
        .create_access_point(&session, &id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
