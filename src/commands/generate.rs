//! Generate static files

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::PostSlug;
use crate::generator::{write_route, Generator};
use crate::helpers::POSTS_PATH;
use crate::query::{ContentSource, QueryContext};
use crate::Site;

/// Render every enumerable route into the public directory.
/// Returns the number of routes written.
pub async fn run(site: &Site, source: &dyn ContentSource) -> Result<usize> {
    let start = std::time::Instant::now();
    let generator = Generator::new(&site.config)?;
    let ctx = QueryContext::published();
    let public_dir = &site.public_dir;

    fs::create_dir_all(public_dir)?;

    let settings = source.home_page(&ctx).await?;
    write_route(public_dir, "/", &generator.home(settings.as_ref(), false)?)?;

    let posts = source.posts(&ctx).await?;
    write_route(public_dir, POSTS_PATH, &generator.posts_index(&posts, false)?)?;
    let mut count = 2;

    let slugs = source.post_slugs().await?;
    tracing::info!("Found {} post routes", slugs.len());

    for slug in slugs.iter().filter_map(PostSlug::slug) {
        if !is_safe_segment(slug) {
            tracing::warn!("Skipping post with unsafe slug {:?}", slug);
            continue;
        }
        match source.post(&ctx, slug).await? {
            Some(post) => {
                let route = format!("{}/{}", POSTS_PATH, slug);
                write_route(public_dir, &route, &generator.post_page(&post, slug, false)?)?;
                count += 1;
            }
            None => tracing::warn!("Post {} is listed but could not be loaded", slug),
        }
    }

    fs::write(public_dir.join("404.html"), generator.not_found(false)?)?;

    copy_static_dir(&site.static_dir, &public_dir.join("static"))?;

    tracing::info!("Generated {} routes in {:?}", count, start.elapsed());
    Ok(count)
}

/// A slug usable as a single directory name
fn is_safe_segment(slug: &str) -> bool {
    !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}

/// Copy static assets to the public directory
fn copy_static_dir(static_dir: &Path, dest_dir: &Path) -> Result<()> {
    if !static_dir.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(static_dir)?;
        let dest = dest_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
    }

    Ok(())
}
