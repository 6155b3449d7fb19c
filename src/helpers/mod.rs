//! Helper functions shared by components and templates
//!
//! URL building, HTML escaping, date formatting and image CDN URLs.

mod date;
mod html;
mod image;
mod url;

pub use date::*;
pub use html::*;
pub use image::{Fit, ImageUrl, ImageUrlBuilder, ImageUrlError};
pub use url::*;
