// src/models/access_point.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::{empty_object, null_as_default};

// A door controller. Belongs to exactly one location.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    #[schema(example = "ap-01")]
    pub id: String,

    #[schema(example = "Front Door")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = json!(["lobby", "ground-floor"]))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub location_id: Option<String>,

    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub config: AccessPointConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessPointConfig {
    pub active: bool,
    pub armed: bool,
    /// Seconds the door stays unlocked after a granted scan.
    pub unlock_time: u32,
    pub always_allowed: AlwaysAllowed,
    pub scan_data: ScanData,
    pub webhook: WebhookConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AlwaysAllowed {
    pub users: Vec<String>,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanData {
    #[schema(value_type = Object)]
    pub disarmed: Value,
    #[schema(value_type = Object)]
    pub ready: Value,
}

impl Default for ScanData {
    fn default() -> Self {
        Self {
            disarmed: empty_object(),
            ready: empty_object(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub event_granted: bool,
    pub event_denied: bool,
}

// ---
// Payloads
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessPointPayload {
    #[validate(length(min = 1, max = 32, message = "Name must be between 1 and 32 characters."))]
    #[schema(example = "Back Door")]
    pub name: String,

    #[validate(length(max = 256, message = "Description must be at most 256 characters."))]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessPointPayload {
    #[validate(length(min = 1, max = 32, message = "Name must be between 1 and 32 characters."))]
    pub name: String,

    #[validate(length(max = 256, message = "Description must be at most 256 characters."))]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// The access point configuration form. Scan data comes in as editor text.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessPointConfigPayload {
    pub active: bool,
    pub armed: bool,

    #[validate(range(min = 1, max = 300, message = "Unlock time must be between 1 and 300 seconds."))]
    #[schema(example = 8)]
    pub unlock_time: u32,

    #[serde(default)]
    pub always_allowed: AlwaysAllowed,

    #[serde(default)]
    pub scan_data: ScanDataText,

    #[serde(default)]
    #[validate(nested)]
    pub webhook: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanDataText {
    #[schema(example = "{}")]
    pub disarmed: String,
    #[schema(example = "{\"door\": \"open\"}")]
    pub ready: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookPayload {
    #[validate(url(message = "Webhook URL must be a valid URL."))]
    pub url: Option<String>,
    pub event_granted: bool,
    pub event_denied: bool,
}

/// Body sent upstream for name/description/tags and config changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPointUpstream {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<AccessPointConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tags_and_config_are_treated_as_empty() {
        let ap: AccessPoint = serde_json::from_str(
            r#"{"id": "ap", "name": "Side Gate", "tags": null, "config": null}"#,
        )
        .unwrap();

        assert!(ap.tags.is_empty());
        assert_eq!(ap.config, AccessPointConfig::default());
        assert_eq!(ap.config.scan_data.ready, serde_json::json!({}));
    }

    #[test]
    fn webhook_url_is_validated() {
        let hook = WebhookPayload {
            url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(hook.validate().is_err());

        let hook = WebhookPayload {
            url: Some("https://hooks.example.com/xcs".into()),
            ..Default::default()
        };
        assert!(hook.validate().is_ok());
    }
}
