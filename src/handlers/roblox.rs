// src/handlers/roblox.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::roblox::{RobloxGroup, RobloxGroupRole},
};

#[utoipa::path(
    get,
    path = "/api/roblox/group-search/{query}",
    tag = "Roblox",
    params(("query" = String, Path, description = "Group name fragment")),
    responses(
        (status = 200, description = "Matching Roblox groups", body = Vec<RobloxGroup>),
        (status = 409, description = "A newer search replaced this one", body = ErrorBody)
    ),
    security(("api_jwt" = []))
)]
pub async fn group_search(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(query): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let groups = app_state
        .account_service
        .roblox_group_search(&session, &user.viewer_key, &query)
        .await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/roblox/group-roles/{group_id}",
    tag = "Roblox",
    params(("group_id" = u64, Path, description = "Roblox group id")),
    responses((status = 200, description = "Roles of the group", body = Vec<RobloxGroupRole>)),
    security(("api_jwt" = []))
)]
pub async fn group_roles(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(group_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let session = user.session(&app_state.xcs_client);
    let roles = app_state.account_service.roblox_group_roles(&session, group_id).await?;
    Ok(Json(roles))
}
