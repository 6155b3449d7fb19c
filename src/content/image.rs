//! Image references and the readiness guard
//!
//! An image field in Sanity is an object pointing at an asset document.
//! While the Studio is still uploading, the object carries an `_upload`
//! marker and the asset reference may be missing or partial. Building a
//! CDN URL from such a reference fails, so every URL construction goes
//! through [`ImageRef::ready`].

use serde::{Deserialize, Deserializer, Serialize};

/// Reference to an uploaded asset document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
}

/// An image field as stored on a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub asset: Option<AssetRef>,
    pub alt: Option<String>,
    pub hotspot: Option<serde_json::Value>,
    pub crop: Option<serde_json::Value>,
    /// Upload marker. `Some` whenever the key is present, even as `null`.
    #[serde(
        rename = "_upload",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub upload: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Why an image is or is not usable for URL construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReadiness {
    Ready,
    /// The Studio is mid-upload; the reference may appear later
    Uploading,
    /// No usable asset reference and no upload in progress
    MissingAsset,
}

/// An image that passed the readiness guard
#[derive(Debug, Clone, Copy)]
pub struct ReadyImage<'a> {
    image: &'a ImageRef,
    asset_ref: &'a str,
}

impl<'a> ReadyImage<'a> {
    pub fn asset_ref(&self) -> &'a str {
        self.asset_ref
    }

    pub fn alt(&self) -> Option<&'a str> {
        self.image.alt.as_deref().filter(|alt| !alt.is_empty())
    }
}

impl ImageRef {
    /// The non-empty asset reference, if any
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|asset| asset.reference.as_deref())
            .filter(|r| !r.is_empty())
    }

    /// `true` when an asset reference is present and non-empty
    pub fn has_valid_asset(&self) -> bool {
        self.asset_ref().is_some()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload.is_some()
    }

    /// Classify the image. An upload marker wins over a missing asset so
    /// callers can tell a transient state from a broken reference.
    pub fn readiness(&self) -> ImageReadiness {
        if self.is_uploading() {
            ImageReadiness::Uploading
        } else if self.has_valid_asset() {
            ImageReadiness::Ready
        } else {
            ImageReadiness::MissingAsset
        }
    }

    /// `true` when the image can be handed to the URL builder
    pub fn is_ready(&self) -> bool {
        self.readiness() == ImageReadiness::Ready
    }

    /// Guarded access for URL construction
    pub fn ready(&self) -> Option<ReadyImage<'_>> {
        if self.is_uploading() {
            return None;
        }
        self.asset_ref().map(|asset_ref| ReadyImage {
            image: self,
            asset_ref,
        })
    }
}

/// Predicate form of the guard for optional image fields
pub fn is_image_ready(image: Option<&ImageRef>) -> bool {
    image.map(ImageRef::is_ready).unwrap_or(false)
}

/// `true` when the optional image has a non-empty asset reference
pub fn has_valid_image_asset(image: Option<&ImageRef>) -> bool {
    image.map(ImageRef::has_valid_asset).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image(value: serde_json::Value) -> ImageRef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ready_image() {
        let img = image(json!({
            "_type": "image",
            "asset": { "_ref": "image-abc-600x400-jpg", "_type": "reference" },
            "alt": "A cat"
        }));
        assert!(img.is_ready());
        assert_eq!(img.readiness(), ImageReadiness::Ready);
        let ready = img.ready().unwrap();
        assert_eq!(ready.asset_ref(), "image-abc-600x400-jpg");
        assert_eq!(ready.alt(), Some("A cat"));
    }

    #[test]
    fn test_missing_or_empty_ref_is_not_ready() {
        assert!(!image(json!({})).is_ready());
        assert!(!image(json!({ "asset": null })).is_ready());
        assert!(!image(json!({ "asset": {} })).is_ready());
        assert!(!image(json!({ "asset": { "_ref": "" } })).is_ready());
        assert_eq!(
            image(json!({ "asset": { "_ref": "" } })).readiness(),
            ImageReadiness::MissingAsset
        );
    }

    #[test]
    fn test_upload_marker_blocks_readiness() {
        let uploading = image(json!({
            "asset": { "_ref": "image-abc-600x400-jpg" },
            "_upload": { "progress": 40 }
        }));
        assert!(!uploading.is_ready());
        assert!(uploading.ready().is_none());
        assert_eq!(uploading.readiness(), ImageReadiness::Uploading);

        let null_marker = image(json!({
            "asset": { "_ref": "image-abc-600x400-jpg" },
            "_upload": null
        }));
        assert!(null_marker.is_uploading());
        assert!(!null_marker.is_ready());
    }

    #[test]
    fn test_optional_predicates() {
        assert!(!is_image_ready(None));
        assert!(!has_valid_image_asset(None));

        let uploading = image(json!({
            "asset": { "_ref": "image-abc-600x400-jpg" },
            "_upload": {}
        }));
        assert!(has_valid_image_asset(Some(&uploading)));
        assert!(!is_image_ready(Some(&uploading)));
    }

    #[test]
    fn test_empty_alt_is_ignored() {
        let img = image(json!({ "asset": { "_ref": "image-a-1x1-png" }, "alt": "" }));
        assert_eq!(img.ready().unwrap().alt(), None);
    }
}
