// src/models/user.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "u-123")]
    pub id: String,

    #[serde(default)]
    #[schema(example = "restrafes")]
    pub username: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,

    // Older profiles keep the bio at the top level.
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub about: About,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: Email,

    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: Platform,

    #[serde(default, deserialize_with = "null_as_default")]
    pub organizations: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(value_type = Object)]
    pub achievements: HashMap<String, Value>,
}

impl User {
    pub fn bio(&self) -> Option<&str> {
        self.about.bio.as_deref().or(self.bio.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub bio: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Email {
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Platform {
    pub staff: bool,
    pub staff_title: Option<String>,
    pub features: Vec<String>,
}

// ---
// Payloads
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 32, message = "Display name must be between 1 and 32 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[validate(length(max = 256, message = "Bio must be at most 256 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[validate(url(message = "Website must be a valid URL."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppPayload {
    #[validate(length(min = 1, max = 32, message = "Name must be between 1 and 32 characters."))]
    #[schema(example = "Door Monitor")]
    pub name: String,

    #[validate(length(max = 256, message = "Description must be at most 256 characters."))]
    pub description: Option<String>,
}

/// Whatever the backend returns for a newly registered app (credentials etc).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppCreated {
    pub message: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefaultOrganizationPayload {
    #[validate(length(min = 1, message = "Organization id is required."))]
    pub organization_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefaultOrganization {
    pub organization_id: Option<String>,
}
