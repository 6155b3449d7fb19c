//! Route enumeration

use anyhow::Result;

use crate::content::PostSlug;
use crate::helpers::{post_path, POSTS_PATH};
use crate::query::ContentSource;

/// Post routes for pre-rendering; entries without a slug are skipped
pub fn static_routes(slugs: &[PostSlug]) -> Vec<String> {
    slugs
        .iter()
        .filter_map(|entry| entry.slug())
        .map(post_path)
        .collect()
}

/// Every route of the site: home, posts index, then each post
pub async fn all_routes(source: &dyn ContentSource) -> Result<Vec<String>> {
    let slugs = source.post_slugs().await?;
    let mut routes = vec!["/".to_string(), POSTS_PATH.to_string()];
    routes.extend(static_routes(&slugs));
    Ok(routes)
}

/// Print every route
pub async fn run(source: &dyn ContentSource) -> Result<()> {
    for route in all_routes(source).await? {
        println!("{}", route);
    }
    Ok(())
}
