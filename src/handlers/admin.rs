// src/handlers/admin.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        invitation::{CreateInviteLinkPayload, Invitation},
        user::User,
    },
};

#[utoipa::path(
    post,
    path = "/api/admin/invite-links",
    tag = "Admin",
    request_body = CreateInviteLinkPayload,
    responses(
        (status = 201, description = "Invite link created; expires after 14 days", body = Invitation),
        (status = 403, description = "Caller is not staff", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invite_link(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateInviteLinkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = user.session(&app_state.xcs_client);
    let invitation = app_state.account_service.create_invite_link(&session, &payload).await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

#[utoipa::path(
    get,
    path = "/api/admin/search-users/{query}",
    tag = "Admin",
    params(("query" = String, Path, description = "Username fragment")),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 409, description = "A newer search replaced this one", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn search_users(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(query): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let users = app_state
        .account_service
        .search_users(&session, &user.viewer_key, &query)
        .await?;
    Ok(Json(users))
}
