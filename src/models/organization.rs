// src/models/organization.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use utoipa::ToSchema;
use validator::Validate;

use super::{access_group::AccessGroup, keyed, user::User, Keyed};

// ---
// 1. Organization (the tenant)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[schema(example = "org-01")]
    pub id: String,

    #[schema(example = "Acme Security")]
    pub name: String,

    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub owner: Option<OwnerRef>,

    #[serde(default, deserialize_with = "keyed::deserialize")]
    pub members: Vec<OrganizationMember>,

    #[serde(default, deserialize_with = "keyed::deserialize")]
    pub access_groups: Vec<AccessGroup>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub statistics: Option<Value>,
}

impl Organization {
    /// The owner's id, falling back to the member holding the Owner role.
    pub fn owner_id(&self) -> Option<&str> {
        self.owner.as_ref().map(OwnerRef::id).or_else(|| {
            self.members
                .iter()
                .find(|m| m.role == MemberRole::Owner)
                .map(|m| m.id.as_str())
        })
    }

    pub fn member(&self, id: &str) -> Option<&OrganizationMember> {
        self.members.iter().find(|m| m.id == id)
    }
}

/// The backend returns the owner either as a bare id or as a user object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(String),
    User(Box<User>),
}

impl OwnerRef {
    pub fn id(&self) -> &str {
        match self {
            OwnerRef::Id(id) => id,
            OwnerRef::User(user) => &user.id,
        }
    }
}

// ---
// 2. Members
// ---

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr, ToSchema,
)]
#[repr(u8)]
pub enum MemberRole {
    Member = 1,
    Manager = 2,
    Owner = 3,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MemberType {
    #[default]
    User,
    Roblox,
    RobloxGroup,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    #[serde(default)]
    #[schema(example = "u-123")]
    pub id: String,

    #[serde(rename = "type", default)]
    pub member_type: MemberType,

    pub role: MemberRole,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,

    /// `false` while an invitation is still pending.
    #[serde(default)]
    pub joined: Option<bool>,
}

impl OrganizationMember {
    /// The label shown in tables: display name, then username, then id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.id)
    }
}

impl Keyed for OrganizationMember {
    fn fill_id(&mut self, key: String) {
        if self.id.is_empty() {
            self.id = key;
        }
    }
}

// ---
// 3. Payloads
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPayload {
    #[validate(length(min = 1, max = 32, message = "Name must be between 1 and 32 characters."))]
    #[schema(example = "Acme Security")]
    pub name: String,

    #[validate(url(message = "Avatar must be a valid URL."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberPayload {
    #[serde(rename = "type")]
    pub member_type: MemberType,

    /// User id, Roblox user id or Roblox group id depending on `type`.
    #[validate(length(min = 1, message = "Member id is required."))]
    pub id: String,

    pub role: MemberRole,

    /// Group ranks granted access when adding a Roblox group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roblox_group_roles: Vec<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkRemovePayload {
    #[validate(length(min = 1, message = "Select at least one member."))]
    pub member_ids: Vec<String>,
}
