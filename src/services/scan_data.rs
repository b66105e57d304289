// src/services/scan_data.rs

use serde::de::Error as _;
use serde_json::Value;

use crate::{common::error::AppError, models::empty_object};

/// Parses the text of a scan-data editor. Blank means `{}`; anything else must
/// be a JSON object. Runs before any request is made, so bad input never
/// leaves the dashboard.
pub fn parse_scan_data(field: &'static str, text: Option<&str>) -> Result<Value, AppError> {
    let text = match text.map(str::trim) {
        None | Some("") => return Ok(empty_object()),
        Some(text) => text,
    };

    let value: Value =
        serde_json::from_str(text).map_err(|source| AppError::InvalidScanData { field, source })?;

    if !value.is_object() {
        return Err(AppError::InvalidScanData {
            field,
            source: serde_json::Error::custom("scan data must be a JSON object"),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_editor_means_empty_object() {
        assert_eq!(parse_scan_data("ready", None).unwrap(), json!({}));
        assert_eq!(parse_scan_data("ready", Some("   ")).unwrap(), json!({}));
    }

    #[test]
    fn objects_pass_through() {
        let value = parse_scan_data("ready", Some(r#"{"clearance": 3}"#)).unwrap();
        assert_eq!(value, json!({"clearance": 3}));
    }

    #[test]
    fn malformed_json_names_the_field() {
        let err = parse_scan_data("disarmed", Some("{clearance: 3")).unwrap_err();
        assert!(matches!(err, AppError::InvalidScanData { field: "disarmed", .. }));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(parse_scan_data("ready", Some("[1, 2]")).is_err());
        assert!(parse_scan_data("ready", Some("42")).is_err());
    }
}
