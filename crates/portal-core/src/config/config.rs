use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the portal backend API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Identity-provider app registration. Only used to derive the
    /// protected API scope; the auth flow itself lives outside this crate.
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub tenant_id: String,
    /// Budget for the URL liveness probe, in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    std::env::var("PORTAL_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn default_probe_timeout_secs() -> u64 {
    10
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            client_id: std::env::var("PORTAL_CLIENT_ID").unwrap_or_default(),
            tenant_id: std::env::var("PORTAL_TENANT_ID").unwrap_or_default(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl PortalConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::resolve_path("config.json");

        let mut config = if config_path.exists() {
            let data = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<PortalConfig>(&data)?
        } else {
            PortalConfig::default()
        };

        if config.client_id.is_empty() {
            config.client_id = std::env::var("PORTAL_CLIENT_ID").unwrap_or_default();
        }
        if config.tenant_id.is_empty() {
            config.tenant_id = std::env::var("PORTAL_TENANT_ID").unwrap_or_default();
        }

        let local_path = std::env::current_dir()
            .ok()
            .map(|d| d.join(".portal.json"))
            .filter(|p| p.exists());

        if let Some(local) = local_path {
            let data = std::fs::read_to_string(local)?;
            let override_val: serde_json::Value = serde_json::from_str(&data)?;
            let mut base = serde_json::to_value(&config)?;
            if let (Some(base_obj), Some(over_obj)) =
                (base.as_object_mut(), override_val.as_object())
            {
                for (k, v) in over_obj {
                    base_obj.insert(k.clone(), v.clone());
                }
            }
            config = serde_json::from_value(base)?;
        }

        Ok(config)
    }

    pub fn resolve_path(relative: &str) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".portal")
            .join(relative)
    }

    /// The scope the backend API requires, exposed by the app registration.
    pub fn api_scopes(&self) -> Vec<String> {
        vec![format!("api://{}/access_as_user", self.client_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_scope_is_derived_from_client_id() {
        let config = PortalConfig {
            client_id: "11111111-2222-3333-4444-555555555555".to_string(),
            ..PortalConfig::default()
        };
        assert_eq!(
            config.api_scopes(),
            vec!["api://11111111-2222-3333-4444-555555555555/access_as_user".to_string()]
        );
    }

    #[test]
    fn probe_timeout_defaults_to_ten_seconds() {
        let config: PortalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.probe_timeout_secs, 10);
    }
}
