// src/handlers/account.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        user::{
            AppCreated, CreateAppPayload, DefaultOrganization, DefaultOrganizationPayload,
            UpdateProfilePayload, User,
        },
        ApiMessage,
    },
};

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Account",
    responses(
        (status = 200, description = "The signed-in user", body = User),
        (status = 401, description = "Missing bearer token", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let me = app_state.account_service.me(&session).await?;
    Ok(Json(me))
}

#[utoipa::path(
    patch,
    path = "/api/me",
    tag = "Account",
    request_body = UpdateProfilePayload,
    responses((status = 200, description = "Account updated", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state.account_service.update_me(&session, &payload).await?;
    Ok(Json(message))
}

#[utoipa::path(
    patch,
    path = "/api/me/profile",
    tag = "Account",
    request_body = UpdateProfilePayload,
    responses((status = 200, description = "Profile updated", body = ApiMessage)),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let message = app_state.account_service.update_profile(&session, &payload).await?;
    Ok(Json(message))
}

#[utoipa::path(
    post,
    path = "/api/me/apps",
    tag = "Account",
    request_body = CreateAppPayload,
    responses(
        (status = 201, description = "App registered", body = AppCreated),
        (status = 400, description = "Invalid payload", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_app(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateAppPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let created = app_state.account_service.create_app(&session, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/me/default-organization",
    tag = "Account",
    responses((status = 200, description = "The organization the dashboard opens first", body = DefaultOrganization)),
    security(("api_jwt" = []))
)]
pub async fn get_default_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let selection = app_state.account_service.default_organization(&session).await?;
    Ok(Json(selection))
}

#[utoipa::path(
    put,
    path = "/api/me/default-organization",
    tag = "Account",
    request_body = DefaultOrganizationPayload,
    responses((status = 200, description = "Default organization saved", body = DefaultOrganization)),
    security(("api_jwt" = []))
)]
pub async fn set_default_organization(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<DefaultOrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let selection = app_state
        .account_service
        .set_default_organization(&session, &payload.organization_id)
        .await?;
    Ok(Json(selection))
}
