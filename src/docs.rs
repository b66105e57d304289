// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::common::error::ErrorBody;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Organizations ---
        handlers::organizations::list_organizations,
        handlers::organizations::create_organization,
        handlers::organizations::get_organization,
        handlers::organizations::update_organization,
        handlers::organizations::delete_organization,

        // --- Members ---
        handlers::organizations::list_members,
        handlers::organizations::add_member,
        handlers::organizations::update_member,
        handlers::organizations::remove_member,
        handlers::organizations::bulk_remove_members,

        // --- Access groups ---
        handlers::organizations::list_access_groups,
        handlers::organizations::access_group_options,
        handlers::organizations::create_access_group,
        handlers::organizations::update_access_group,
        handlers::organizations::delete_access_group,

        // --- Locations ---
        handlers::locations::list_locations,
        handlers::locations::create_location,
        handlers::locations::get_location,
        handlers::locations::update_location,
        handlers::locations::delete_location,
        handlers::locations::download_starter_pack,

        // --- Access points ---
        handlers::locations::list_access_points,
        handlers::locations::access_point_tags,
        handlers::locations::create_access_point,
        handlers::access_points::get_access_point,
        handlers::access_points::update_access_point,
        handlers::access_points::update_access_point_config,
        handlers::access_points::delete_access_point,

        // --- Roblox ---
        handlers::roblox::group_search,
        handlers::roblox::group_roles,

        // --- Admin ---
        handlers::admin::create_invite_link,
        handlers::admin::search_users,

        // --- Account ---
        handlers::account::get_me,
        handlers::account::update_me,
        handlers::account::update_profile,
        handlers::account::create_app,
        handlers::account::get_default_organization,
        handlers::account::set_default_organization,
    ),
    components(
        schemas(
            ErrorBody,
            models::ApiMessage,
            models::CreatedResponse,

            // --- Organizations ---
            models::organization::Organization,
            models::organization::OwnerRef,
            models::organization::MemberRole,
            models::organization::MemberType,
            models::organization::OrganizationMember,
            models::organization::OrganizationPayload,
            models::organization::AddMemberPayload,
            models::organization::UpdateMemberPayload,
            models::organization::BulkRemovePayload,

            // --- Access groups ---
            models::access_group::AccessGroupType,
            models::access_group::AccessGroup,
            models::access_group::AccessGroupPayload,

            // --- Locations ---
            models::location::Location,
            models::location::RobloxBinding,
            models::location::ViewerContext,
            models::location::LocationPayload,

            // --- Access points ---
            models::access_point::AccessPoint,
            models::access_point::AccessPointConfig,
            models::access_point::AlwaysAllowed,
            models::access_point::ScanData,
            models::access_point::WebhookConfig,
            models::access_point::CreateAccessPointPayload,
            models::access_point::UpdateAccessPointPayload,
            models::access_point::AccessPointConfigPayload,
            models::access_point::ScanDataText,
            models::access_point::WebhookPayload,

            // --- Tables and options ---
            models::options::SelectOption,
            models::options::OptionGroup,
            models::options::SortDirection,
            models::options::SortStatus,
            models::options::MemberActions,
            models::options::MemberRow,
            models::options::MemberTable,
            models::options::BulkRemoveResult,
            models::options::BulkRemoveFailure,

            // --- Account / admin ---
            models::user::User,
            models::user::About,
            models::user::Email,
            models::user::Platform,
            models::user::UpdateProfilePayload,
            models::user::CreateAppPayload,
            models::user::AppCreated,
            models::user::DefaultOrganizationPayload,
            models::user::DefaultOrganization,
            models::invitation::InvitationType,
            models::invitation::Invitation,
            models::invitation::CreateInviteLinkPayload,
            models::roblox::RobloxGroup,
            models::roblox::RobloxGroupRole,
        )
    ),
    tags(
        (name = "Organizations", description = "Organizations the caller belongs to"),
        (name = "Members", description = "Organization membership and role management"),
        (name = "Access Groups", description = "Access groups and their select options"),
        (name = "Locations", description = "Locations and Roblox starter packs"),
        (name = "Access Points", description = "Doors, their tags and configuration"),
        (name = "Roblox", description = "Roblox group lookups"),
        (name = "Admin", description = "Staff tools: invite links and user search"),
        (name = "Account", description = "The signed-in user's profile, apps and preferences")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented_with_bearer_auth() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/organizations/{id}/members"));
        assert!(doc.paths.paths.contains_key("/api/access-points/{id}/config"));
        let schemes = &doc.components.expect("components").security_schemes;
        assert!(schemes.contains_key("api_jwt"));
    }
}
