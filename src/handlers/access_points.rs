// src/handlers/access_points.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        access_point::{AccessPoint, AccessPointConfigPayload, UpdateAccessPointPayload},
        ApiMessage,
    },
};

#[utoipa::path(
    get,
    path = "/api/access-points/{id}",
    tag = "Access Points",
    params(("id" = String, Path, description = "Access point id")),
    responses(
        (status = 200, description = "The access point", body = AccessPoint),
        (status = 404, description = "Unknown access point", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_access_point(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let access_point = app_state.access_point_service.get(&session, &id).await?;
    Ok(Json(access_point))
}

#[utoipa::path(
    put,
    path = "/api/access-points/{id}",
    tag = "Access Points",
    params(("id" = String, Path, description = "Access point id")),
    request_body = UpdateAccessPointPayload,
    responses((status = 200, description = "Access point updated", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn update_access_point(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAccessPointPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state.access_point_service.update(&session, &id, &payload).await?;
    Ok(Json(message))
}

#[utoipa::path(
    put,
    path = "/api/access-points/{id}/config",
    tag = "Access Points",
    params(("id" = String, Path, description = "Access point id")),
    request_body = AccessPointConfigPayload,
    responses(
        (status = 200, description = "Configuration saved", body = ApiMessage),
        (status = 400, description = "Invalid field or malformed scan data", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_access_point_config(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<AccessPointConfigPayload>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Validate the form fields
    payload.validate()?;

    // 2. Call the service (scan data is parsed there)
    let session = user.session(&app_state.xcs_client);
    let message = app_state
        .access_point_service
        .update_config(&session, &id, &payload)
        .await?;
    Ok(Json(message))
}

#[utoipa::path(
    delete,
    path = "/api/access-points/{id}",
    tag = "Access Points",
    params(("id" = String, Path, description = "Access point id")),
    responses((status = 200, description = "Access point deleted", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn delete_access_point(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let message = app_state.access_point_service.delete(&session, &id).await?;
    Ok(Json(message))
}
