// src/models/invitation.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::organization::MemberRole;

/// Invite links stop working 14 days after they are created.
pub const INVITATION_TTL_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationType {
    Organization,
    Xcs,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    #[serde(rename = "type")]
    pub invitation_type: InvitationType,

    #[schema(example = "b7Xq2Lp9")]
    pub code: String,

    pub max_uses: u32,

    #[serde(default)]
    pub sender_id: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    pub fn expiry_for(created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::days(INVITATION_TTL_DAYS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteLinkPayload {
    #[serde(rename = "type")]
    pub invitation_type: InvitationType,

    #[validate(range(min = 1, max = 100, message = "Max uses must be between 1 and 100."))]
    #[schema(example = 1)]
    pub max_uses: u32,

    #[validate(length(max = 256, message = "Comment must be at most 256 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

/// What the backend hands back after creating an invite link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLinkCreated {
    #[serde(alias = "inviteCode")]
    pub code: String,
    #[serde(default)]
    pub sender_id: Option<String>,
}
