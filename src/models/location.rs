// src/models/location.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{access_group::AccessGroup, keyed, null_as_default, organization::MemberRole};

// A physical site, bound 1:1 to a Roblox experience.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[schema(example = "loc-01")]
    pub id: String,

    #[schema(example = "Headquarters")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub roblox: RobloxBinding,

    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(default, deserialize_with = "keyed::deserialize")]
    pub access_groups: Vec<AccessGroup>,

    /// The viewer's effective permission on this location.
    #[serde(default, rename = "self")]
    pub viewer: Option<ViewerContext>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RobloxBinding {
    pub place_id: Option<u64>,
    pub universe: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ViewerContext {
    pub role: MemberRole,
}

// ---
// Payloads
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[validate(length(min = 1, max = 32, message = "Name must be between 1 and 32 characters."))]
    #[schema(example = "Warehouse")]
    pub name: String,

    #[validate(length(max = 256, message = "Description must be at most 256 characters."))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roblox: Option<RobloxBinding>,
}
