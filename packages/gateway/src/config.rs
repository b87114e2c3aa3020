//! Backend connection settings from environment variables.

use crate::error::ClientError;

pub const URL_VAR: &str = "WANDERER_SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "WANDERER_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Project base URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Public anonymous key sent as the `apikey` header.
    pub anon_key: String,
    /// Browser storage key holding the signed-in session.
    pub session_storage_key: String,
}

impl GatewayConfig {
    pub fn new(url: &str, anon_key: &str) -> Self {
        let url = url.trim_end_matches('/').to_string();
        Self {
            session_storage_key: session_storage_key(&url),
            url,
            anon_key: anon_key.to_string(),
        }
    }

    /// Read the configuration from the process environment, loading `.env`
    /// first if present.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let url = std::env::var(URL_VAR).map_err(|_| ClientError::MissingEnv(URL_VAR))?;
        let anon_key =
            std::env::var(ANON_KEY_VAR).map_err(|_| ClientError::MissingEnv(ANON_KEY_VAR))?;
        Ok(Self::new(&url, &anon_key))
    }

    /// Browser builds have no process environment; the values are baked in
    /// at compile time.
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Result<Self, ClientError> {
        Self::compiled()
    }

    pub fn compiled() -> Result<Self, ClientError> {
        let url = option_env!("WANDERER_SUPABASE_URL").ok_or(ClientError::MissingEnv(URL_VAR))?;
        let anon_key =
            option_env!("WANDERER_SUPABASE_ANON_KEY").ok_or(ClientError::MissingEnv(ANON_KEY_VAR))?;
        Ok(Self::new(url, anon_key))
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    pub fn auth_user_url(&self) -> String {
        format!("{}/auth/v1/user", self.url)
    }
}

/// `sb-<project-ref>-auth-token`, where the project ref is the first label of
/// the host name.
fn session_storage_key(url: &str) -> String {
    let host = url
        .split("://")
        .nth(1)
        .unwrap_or(url)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    let project = host.split('.').next().unwrap_or(host);
    format!("sb-{project}-auth-token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_and_storage_key() {
        let config = GatewayConfig::new("https://abcd1234.supabase.co/", "anon");
        assert_eq!(config.url, "https://abcd1234.supabase.co");
        assert_eq!(
            config.rest_url("tourist_spots"),
            "https://abcd1234.supabase.co/rest/v1/tourist_spots"
        );
        assert_eq!(config.auth_user_url(), "https://abcd1234.supabase.co/auth/v1/user");
        assert_eq!(config.session_storage_key, "sb-abcd1234-auth-token");
    }

    #[test]
    fn test_storage_key_for_local_instance() {
        let config = GatewayConfig::new("http://localhost:54321", "anon");
        assert_eq!(config.session_storage_key, "sb-localhost-auth-token");
    }
}
