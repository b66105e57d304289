// src/models/access_group.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{empty_object, Keyed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessGroupType {
    Organization,
    Location,
}

// A named permission bucket, organization-wide or scoped to one location.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessGroup {
    #[serde(default)]
    #[schema(example = "7f1c2a")]
    pub id: String,

    #[schema(example = "Front Desk Staff")]
    pub name: String,

    #[serde(rename = "type")]
    pub group_type: AccessGroupType,

    #[serde(default)]
    pub location_id: Option<String>,

    #[serde(default)]
    pub location_name: Option<String>,

    // Merged with user-level scan data at scan time; user data wins.
    #[serde(default = "empty_object")]
    #[schema(value_type = Object)]
    pub scan_data: Value,
}

impl Keyed for AccessGroup {
    fn fill_id(&mut self, key: String) {
        if self.id.is_empty() {
            self.id = key;
        }
    }
}

// ---
// Payloads
// ---

/// Create/update form for an access group. `scanData` is the raw text of the
/// JSON editor; it is parsed before anything is sent to the backend.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_group_scope"))]
pub struct AccessGroupPayload {
    #[validate(length(min = 1, max = 32, message = "Name must be between 1 and 32 characters."))]
    #[schema(example = "Night Shift")]
    pub name: String,

    #[serde(rename = "type")]
    pub group_type: AccessGroupType,

    pub location_id: Option<String>,

    #[schema(example = "{\"clearance\": 3}")]
    pub scan_data: Option<String>,
}

fn validate_group_scope(payload: &AccessGroupPayload) -> Result<(), ValidationError> {
    let has_location = payload
        .location_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());

    if payload.group_type == AccessGroupType::Location && !has_location {
        let mut err = ValidationError::new("location_required");
        err.message = Some("Location-scoped access groups need a location.".into());
        return Err(err);
    }
    Ok(())
}

/// Body sent upstream once the scan data has been parsed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGroupUpstream {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: AccessGroupType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub scan_data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_groups_require_a_location() {
        let payload = AccessGroupPayload {
            name: "Lobby".into(),
            group_type: AccessGroupType::Location,
            location_id: Some("  ".into()),
            scan_data: None,
        };
        assert!(payload.validate().is_err());

        let payload = AccessGroupPayload {
            location_id: Some("L1".into()),
            ..payload
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn missing_scan_data_defaults_to_an_empty_object() {
        let group: AccessGroup =
            serde_json::from_str(r#"{"id": "g", "name": "All", "type": "organization"}"#).unwrap();
        assert_eq!(group.scan_data, serde_json::json!({}));
    }
}
