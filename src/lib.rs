//! sanity-site: a server-rendered blog and page-builder site
//!
//! Content lives in a Sanity dataset and is read through typed GROQ
//! queries. Pages are rendered on request by an axum server, or written
//! out ahead of time as a static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod query;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The site: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Static assets directory
    pub static_dir: std::path::PathBuf,
}

impl Site {
    /// Load the site in a directory. `_config.yml` is optional;
    /// `SANITY_*` environment variables override it.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
            static_dir,
        })
    }

    /// Client for the configured dataset
    pub fn client(&self) -> Result<query::SanityClient> {
        Ok(query::SanityClient::new(&self.config.sanity)?)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<usize> {
        let client = self.client()?;
        commands::generate::run(self, &client).await
    }

    /// Print all routes
    pub async fn routes(&self) -> Result<()> {
        let client = self.client()?;
        commands::routes::run(&client).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
