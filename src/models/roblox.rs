// src/models/roblox.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RobloxGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub has_verified_badge: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RobloxGroupRole {
    pub id: u64,
    pub name: String,
    pub rank: u8,
    #[serde(default)]
    pub member_count: Option<u64>,
}
