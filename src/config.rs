// src/config.rs

use std::{env, net::SocketAddr, time::Duration};

use anyhow::Context;
use axum::http::HeaderValue;
use url::Url;

use crate::{
    clients::XcsClient,
    common::{
        debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE},
        sequence::RequestSequencer,
    },
    services::{AccessPointService, AccountService, LocationService, OrganizationService, PreferenceStore},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub xcs_api_url: Url,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_url = var("XCS_API_URL").context("XCS_API_URL must be set")?;
        let xcs_api_url = Url::parse(&raw_url)
            .with_context(|| format!("XCS_API_URL is not a valid URL: {raw_url}"))?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let request_timeout = match var("XCS_REQUEST_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("XCS_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let search_debounce = match var("SEARCH_DEBOUNCE_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .context("SEARCH_DEBOUNCE_MS must be a whole number of milliseconds")?,
            ),
            None => DEFAULT_SEARCH_DEBOUNCE,
        };

        let cors_allowed_origin = var("CORS_ALLOWED_ORIGIN");
        if let Some(origin) = &cors_allowed_origin {
            HeaderValue::from_str(origin)
                .with_context(|| format!("CORS_ALLOWED_ORIGIN is not a valid header value: {origin}"))?;
        }

        Ok(Self {
            xcs_api_url,
            bind_addr,
            request_timeout,
            search_debounce,
            cors_allowed_origin,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub xcs_client: XcsClient,
    pub organization_service: OrganizationService,
    pub location_service: LocationService,
    pub access_point_service: AccessPointService,
    pub account_service: AccountService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let xcs_client = XcsClient::new(config.xcs_api_url.clone(), config.request_timeout)
            .context("failed to build the XCS HTTP client")?;

        tracing::info!(xcs_api_url = %config.xcs_api_url, "XCS API client ready");

        // --- Wire up the services ---
        let sequencer = RequestSequencer::new();
        let preferences = PreferenceStore::new();

        Ok(Self {
            organization_service: OrganizationService::new(sequencer.clone(), preferences.clone()),
            location_service: LocationService::new(sequencer),
            access_point_service: AccessPointService::new(),
            account_service: AccountService::new(SearchDebouncer::new(config.search_debounce), preferences),
            xcs_client,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("XCS_API_URL", "https://xcs.example.com")]).unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.search_debounce, Duration::from_millis(200));
        assert_eq!(config.cors_allowed_origin, None);
    }

    #[test]
    fn api_url_is_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("XCS_API_URL", "not a url")]).is_err());
    }

    #[test]
    fn invalid_numbers_are_startup_errors() {
        let err = config(&[
            ("XCS_API_URL", "https://xcs.example.com"),
            ("SEARCH_DEBOUNCE_MS", "soon"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SEARCH_DEBOUNCE_MS"));
    }
}
