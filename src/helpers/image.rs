//! Image CDN URL construction
//!
//! Only images that passed the readiness guard can reach the builder:
//! [`ImageUrlBuilder::image`] takes a [`ReadyImage`].

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::config::SanityConfig;
use crate::content::ReadyImage;

lazy_static! {
    /// `image-<assetId>-<width>x<height>-<format>`
    static ref ASSET_REF: Regex =
        Regex::new(r"^image-([A-Za-z0-9]+)-(\d+)x(\d+)-([A-Za-z0-9]+)$").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageUrlError {
    #[error("malformed image asset reference: {0}")]
    MalformedRef(String),
}

/// How the CDN fits an image into the requested box (`fit=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl Fit {
    pub fn as_param(&self) -> &'static str {
        match self {
            Fit::Clip => "clip",
            Fit::Crop => "crop",
            Fit::Fill => "fill",
            Fit::FillMax => "fillmax",
            Fit::Max => "max",
            Fit::Scale => "scale",
            Fit::Min => "min",
        }
    }
}

/// Builds CDN URLs for a single project and dataset
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    base: String,
}

impl ImageUrlBuilder {
    pub fn new(config: &SanityConfig) -> Self {
        Self {
            base: format!(
                "{}/images/{}/{}",
                config.image_cdn.trim_end_matches('/'),
                config.project_id,
                config.dataset
            ),
        }
    }

    /// Start building a URL for a ready image
    pub fn image<'a>(&'a self, image: ReadyImage<'a>) -> ImageUrl<'a> {
        ImageUrl {
            builder: self,
            asset_ref: image.asset_ref(),
            width: None,
            height: None,
            quality: None,
            fit: None,
            auto_format: false,
        }
    }
}

/// A URL under construction
#[derive(Debug, Clone)]
pub struct ImageUrl<'a> {
    builder: &'a ImageUrlBuilder,
    asset_ref: &'a str,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u8>,
    fit: Option<Fit>,
    auto_format: bool,
}

impl<'a> ImageUrl<'a> {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Let the CDN pick the best format for the client (`auto=format`)
    pub fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    /// Produce the fully-qualified URL
    pub fn url(&self) -> Result<String, ImageUrlError> {
        let caps = ASSET_REF
            .captures(self.asset_ref)
            .ok_or_else(|| ImageUrlError::MalformedRef(self.asset_ref.to_string()))?;

        let mut url = format!(
            "{}/{}-{}x{}.{}",
            self.builder.base, &caps[1], &caps[2], &caps[3], &caps[4]
        );

        let mut params = Vec::new();
        if let Some(w) = self.width {
            params.push(format!("w={}", w));
        }
        if let Some(h) = self.height {
            params.push(format!("h={}", h));
        }
        if let Some(q) = self.quality {
            params.push(format!("q={}", q));
        }
        if self.auto_format {
            params.push("auto=format".to_string());
        }
        if let Some(fit) = self.fit {
            params.push(format!("fit={}", fit.as_param()));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        Ok(url)
    }
}
