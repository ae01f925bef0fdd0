//! Runtime configuration loaded from the environment (and `.env`).

use reqwest::Url;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5173/api";
pub const DEFAULT_SESSION_DIR: &str = ".portal/sessions";
pub const DEFAULT_COMPANY_NAME: &str = "PizeonFly";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub api_url: Url,
    pub session_dir: PathBuf,
    pub download_dir: PathBuf,
    pub typst_bin: String,
    pub company_name: String,
    pub logo_path: Option<PathBuf>,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("PORTAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session_dir =
            env::var("PORTAL_SESSION_DIR").unwrap_or_else(|_| DEFAULT_SESSION_DIR.to_string());
        let download_dir = env::var("PORTAL_DOWNLOAD_DIR").unwrap_or_else(|_| ".".to_string());
        let typst_bin = env::var("PORTAL_TYPST_BIN").unwrap_or_else(|_| "typst".to_string());
        let company_name =
            env::var("PORTAL_COMPANY_NAME").unwrap_or_else(|_| DEFAULT_COMPANY_NAME.to_string());
        let logo_path = env::var("PORTAL_LOGO_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            session_dir: PathBuf::from(session_dir),
            download_dir: PathBuf::from(download_dir),
            typst_bin,
            company_name,
            logo_path,
        })
    }

    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(raw)?;
        Ok(self)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            download_dir: PathBuf::from("."),
            typst_bin: "typst".to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            logo_path: None,
        }
    }
}

/// Parse the backend base URL. Only http(s) URLs are accepted.
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        name: "PORTAL_API_URL",
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            name: "PORTAL_API_URL",
            value: raw.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_accepts_http() {
        let url = parse_api_url("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(parse_api_url("ftp://example.com").is_err());
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert_eq!(config.api_url.as_str(), "http://localhost:5173/api");
        assert_eq!(config.company_name, "PizeonFly");
        assert!(config.logo_path.is_none());
    }
}
