//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub timezone: String,

    /// Heading of the posts index page
    pub posts_title: String,

    // URL
    pub url: String,
    pub logo: Option<String>,
    pub logo_alt: String,
    pub studio_url: Option<String>,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sanity: SanityConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "AI Research in Application Development".to_string(),
            description: "Advance a World of Applications Through AI Research and Development"
                .to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            posts_title: "AI Research, Advance, Deployment".to_string(),

            url: "http://localhost:3000".to_string(),
            logo: None,
            logo_alt: "Site logo".to_string(),
            studio_url: None,

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            server: ServerConfig::default(),
            sanity: SanityConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `SANITY_*` environment overrides on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(project_id) = lookup("SANITY_PROJECT_ID") {
            self.sanity.project_id = project_id;
        }
        if let Some(dataset) = lookup("SANITY_DATASET") {
            self.sanity.dataset = dataset;
        }
        if let Some(api_version) = lookup("SANITY_API_VERSION") {
            self.sanity.api_version = api_version;
        }
        if let Some(token) = lookup("SANITY_API_READ_TOKEN") {
            tracing::debug!("Using read token from SANITY_API_READ_TOKEN");
            self.sanity.token = Some(token);
        }
        if let Some(secret) = lookup("SANITY_PREVIEW_SECRET") {
            self.sanity.preview_secret = Some(secret);
        }
    }

    /// Parse the configured display timezone, if any
    pub fn display_timezone(&self) -> Option<chrono_tz::Tz> {
        if self.timezone.is_empty() {
            return None;
        }
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!("Ignoring invalid timezone {:?}: {}", self.timezone, e);
                None
            }
        }
    }
}

/// Server bind configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Sanity project and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Serve published reads from the API CDN
    pub use_cdn: bool,
    /// Read token, required for draft reads
    pub token: Option<String>,
    /// Shared secret checked by the draft-mode enable endpoint
    pub preview_secret: Option<String>,
    /// Override for the API host (tests and self-hosted proxies)
    pub api_host: Option<String>,
    pub image_cdn: String,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-10-01".to_string(),
            use_cdn: true,
            token: None,
            preview_secret: None,
            api_host: None,
            image_cdn: "https://cdn.sanity.io".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sanity.dataset, "production");
        assert!(config.sanity.use_cdn);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
timezone: Europe/Berlin
sanity:
  project_id: abc123
  dataset: staging
  use_cdn: false
server:
  port: 8080
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.sanity.project_id, "abc123");
        assert_eq!(config.sanity.dataset, "staging");
        assert!(!config.sanity.use_cdn);
        assert_eq!(config.sanity.api_version, "2024-10-01");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.display_timezone(), Some(chrono_tz::Europe::Berlin));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SANITY_PROJECT_ID", "fromenv"),
            ("SANITY_API_READ_TOKEN", "sk-token"),
            ("SANITY_DATASET", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = SiteConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.sanity.project_id, "fromenv");
        assert_eq!(config.sanity.token.as_deref(), Some("sk-token"));
        assert_eq!(config.sanity.dataset, "production");
        assert!(config.sanity.preview_secret.is_none());
    }

    #[test]
    fn test_invalid_timezone_is_ignored() {
        let mut config = SiteConfig::default();
        config.timezone = "Mars/Olympus".to_string();
        assert!(config.display_timezone().is_none());
    }
}
