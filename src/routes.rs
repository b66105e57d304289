// src/routes.rs

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{auth::auth_guard, request_id::request_id},
};

pub fn router(app_state: AppState) -> Router {
    let organization_routes = Router::new()
        .route(
            "/",
            get(handlers::organizations::list_organizations)
                .post(handlers::organizations::create_organization),
        )
        .route(
            "/{id}",
            get(handlers::organizations::get_organization)
                .put(handlers::organizations::update_organization)
                .delete(handlers::organizations::delete_organization),
        )
        // Members
        .route(
            "/{id}/members",
            get(handlers::organizations::list_members).post(handlers::organizations::add_member),
        )
        .route(
            "/{id}/members/bulk-remove",
            post(handlers::organizations::bulk_remove_members),
        )
        .route(
            "/{id}/members/{member_id}",
            patch(handlers::organizations::update_member)
                .delete(handlers::organizations::remove_member),
        )
        // Access groups
        .route(
            "/{id}/access-groups",
            get(handlers::organizations::list_access_groups)
                .post(handlers::organizations::create_access_group),
        )
        .route(
            "/{id}/access-groups/{group_id}",
            put(handlers::organizations::update_access_group)
                .delete(handlers::organizations::delete_access_group),
        )
        .route(
            "/{id}/access-group-options",
            get(handlers::organizations::access_group_options),
        )
        // Locations
        .route(
            "/{id}/locations",
            get(handlers::locations::list_locations).post(handlers::locations::create_location),
        );

    let location_routes = Router::new()
        .route(
            "/{id}",
            get(handlers::locations::get_location)
                .put(handlers::locations::update_location)
                .delete(handlers::locations::delete_location),
        )
        .route("/{id}/starter-pack", get(handlers::locations::download_starter_pack))
        .route(
            "/{id}/access-points",
            get(handlers::locations::list_access_points)
                .post(handlers::locations::create_access_point),
        )
        .route("/{id}/access-point-tags", get(handlers::locations::access_point_tags));

    let access_point_routes = Router::new()
        .route(
            "/{id}",
            get(handlers::access_points::get_access_point)
                .put(handlers::access_points::update_access_point)
                .delete(handlers::access_points::delete_access_point),
        )
        .route("/{id}/config", put(handlers::access_points::update_access_point_config));

    let roblox_routes = Router::new()
        .route("/group-search/{query}", get(handlers::roblox::group_search))
        .route("/group-roles/{group_id}", get(handlers::roblox::group_roles));

    let admin_routes = Router::new()
        .route("/invite-links", post(handlers::admin::create_invite_link))
        .route("/search-users/{query}", get(handlers::admin::search_users));

    let me_routes = Router::new()
        .route(
            "/",
            get(handlers::account::get_me).patch(handlers::account::update_me),
        )
        .route("/profile", patch(handlers::account::update_profile))
        .route("/apps", post(handlers::account::create_app))
        .route(
            "/default-organization",
            get(handlers::account::get_default_organization)
                .put(handlers::account::set_default_organization),
        );

    // Everything under /api except health needs a bearer token.
    let protected: Router<AppState> = Router::new()
        .nest("/api/organizations", organization_routes)
        .nest("/api/locations", location_routes)
        .nest("/api/access-points", access_point_routes)
        .nest("/api/roblox", roblox_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/me", me_routes)
        .route_layer(axum_middleware::from_fn(auth_guard));

    let cors = app_state
        .config
        .cors_allowed_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
        .map(|origin| {
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        });

    let app = Router::<AppState>::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());

    let app = match cors {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.layer(axum_middleware::from_fn(request_id))
}
