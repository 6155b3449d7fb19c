//! Post, author and category documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, ImageRef, PortableText};

/// A Sanity slug object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default)]
    pub current: Option<String>,
}

impl Slug {
    pub fn new(current: &str) -> Self {
        Self {
            current: Some(current.to_string()),
        }
    }

    /// The slug string, if defined and non-empty
    pub fn as_str(&self) -> Option<&str> {
        self.current.as_deref().filter(|s| !s.is_empty())
    }
}

/// Post author (dereferenced `author->{name, image}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: Option<String>,
    pub image: Option<ImageRef>,
}

/// Post category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<Slug>,
}

/// Entry of a post's `relatedPosts` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedPost {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<Slug>,
}

/// A full post as returned by `POST_QUERY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<Slug>,
    pub body: Option<PortableText>,
    pub main_image: Option<ImageRef>,
    pub published_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    pub author: Option<Author>,
    #[serde(deserialize_with = "null_as_default")]
    pub related_posts: Vec<RelatedPost>,
}

/// A post as listed by `POSTS_QUERY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<Slug>,
    pub body: Option<PortableText>,
    pub main_image: Option<ImageRef>,
    pub published_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    pub author: Option<Author>,
}

/// Row of `POSTS_SLUGS_QUERY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostSlug {
    #[serde(default)]
    pub slug: Option<String>,
}

/// A post summary without a usable slug cannot be linked to
#[derive(Debug, thiserror::Error)]
#[error("post {id} has no slug")]
pub struct MissingSlug {
    pub id: String,
}

impl Post {
    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        parse_datetime(self.published_at.as_deref())
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().and_then(Slug::as_str)
    }
}

impl PostSummary {
    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        parse_datetime(self.published_at.as_deref())
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().and_then(Slug::as_str)
    }
}

impl PostSlug {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}

impl RelatedPost {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().and_then(Slug::as_str)
    }
}

fn parse_datetime(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Ignoring unparseable date {:?}: {}", value, e);
            None
        }
    }
}
