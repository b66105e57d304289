// src/services/access_point_service.rs

use crate::{
    clients::XcsSession,
    common::error::AppError,
    models::{
        access_point::{
            AccessPoint, AccessPointConfig, AccessPointConfigPayload, AccessPointUpstream,
            ScanData, UpdateAccessPointPayload, WebhookConfig,
        },
        ApiMessage,
    },
    services::scan_data::parse_scan_data,
};

/// Turns the configuration form into the stored config. Fails on the first
/// scan data field that is not a JSON object.
pub fn build_config(payload: &AccessPointConfigPayload) -> Result<AccessPointConfig, AppError> {
    let scan_data = ScanData {
        disarmed: parse_scan_data("disarmed", Some(&payload.scan_data.disarmed))?,
        ready: parse_scan_data("ready", Some(&payload.scan_data.ready))?,
    };

    let webhook_url = payload
        .webhook
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    Ok(AccessPointConfig {
        active: payload.active,
        armed: payload.armed,
        unlock_time: payload.unlock_time,
        always_allowed: payload.always_allowed.clone(),
        scan_data,
        webhook: WebhookConfig {
            url: webhook_url,
            event_granted: payload.webhook.event_granted,
            event_denied: payload.webhook.event_denied,
        },
    })
}

#[derive(Clone, Default)]
pub struct AccessPointService;

impl AccessPointService {
    pub fn new() -> Self {
        Self
    }

    pub async fn get(&self, session: &XcsSession, id: &str) -> Result<AccessPoint, AppError> {
        session.get_access_point(id).await
    }

    pub async fn update(
        &self,
        session: &XcsSession,
        id: &str,
        payload: &UpdateAccessPointPayload,
    ) -> Result<ApiMessage, AppError> {
        let body = AccessPointUpstream {
            name: Some(payload.name.trim().to_string()),
            description: payload.description.clone(),
            tags: Some(payload.tags.clone()),
            config: None,
        };
        session.update_access_point(id, &body).await
    }

    /// Scan data is checked before anything is sent upstream.
    pub async fn update_config(
        &self,
        session: &XcsSession,
        id: &str,
        payload: &AccessPointConfigPayload,
    ) -> Result<ApiMessage, AppError> {
        // 1. Build the config; malformed scan data stops here
        let config = build_config(payload)?;
        let body = AccessPointUpstream {
            name: None,
            description: None,
            tags: None,
            config: Some(config),
        };

        // 2. Forward
        let message = session.update_access_point(id, &body).await?;
        tracing::info!(access_point_id = %id, "access point configuration updated");
        Ok(message)
    }

    pub async fn delete(&self, session: &XcsSession, id: &str) -> Result<ApiMessage, AppError> {
        let message = session.delete_access_point(id).await?;
        tracing::info!(access_point_id = %id, "access point deleted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(disarmed: &str, ready: &str) -> AccessPointConfigPayload {
        serde_json::from_value(json!({
            "active": true,
            "armed": false,
            "unlockTime": 8,
            "scanData": {"disarmed": disarmed, "ready": ready},
            "webhook": {"url": "  ", "eventGranted": true}
        }))
        .unwrap()
    }

    #[test]
    fn editor_text_becomes_objects() {
        let config = build_config(&payload("", r#"{"door": "open"}"#)).unwrap();

        assert_eq!(config.scan_data.disarmed, json!({}));
        assert_eq!(config.scan_data.ready, json!({"door": "open"}));
        assert_eq!(config.unlock_time, 8);
        assert!(config.webhook.event_granted);
        assert_eq!(config.webhook.url, None);
    }

    #[test]
    fn invalid_scan_data_names_the_field() {
        let err = build_config(&payload("{}", "{door")).unwrap_err();
        assert!(matches!(err, AppError::InvalidScanData { field: "ready", .. }));
    }

    #[test]
    fn scan_data_must_be_an_object() {
        let err = build_config(&payload("[1, 2]", "{}")).unwrap_err();
        assert!(matches!(err, AppError::InvalidScanData { field: "disarmed", .. }));
    }
}
