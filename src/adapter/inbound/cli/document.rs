//! Handlers for `sitemap`, `feed`, `robots` and `metadata`.

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::adapter::inbound::cli::command::{ConfigPathArg, MetadataArgs, OutputArgs};
use crate::adapter::inbound::cli::{config, output};
use crate::application::{feed, metadata, robots, sitemap};
use crate::domain::{DocumentType, Slug};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;

/// Write `content` to `path`, or to stdout when no path is given.
fn deliver(content: &str, path: Option<&Path>, what: &str) -> Result<()> {
    let Some(path) = path else {
        print!("{content}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    output::success(&format!("Wrote {what}"));
    output::field("Path", path.display());
    output::field("Size", format!("{} bytes", content.len()));
    Ok(())
}

/// Execute `sitemap`.
pub async fn execute_sitemap(args: &OutputArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);

    let pb = output::spinner("Loading content from Sanity");
    let xml = match sitemap::generate(cms.as_ref(), &config.site, Utc::now().date_naive()).await {
        Ok(xml) => xml,
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load content");
            return Err(e);
        }
    };
    output::spinner_success(&pb, "Content loaded");
    deliver(&xml, args.output.as_deref(), "sitemap")
}

/// Execute `feed`.
pub async fn execute_feed(args: &OutputArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let cms = bootstrap::build_cms(&config);

    let pb = output::spinner("Loading posts from Sanity");
    let xml = match feed::generate(cms.as_ref(), &config.site, &config.feed, Utc::now()).await {
        Ok(xml) => xml,
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load posts");
            return Err(e);
        }
    };
    output::spinner_success(&pb, "Posts loaded");
    deliver(&xml, args.output.as_deref(), "feed")
}

/// Execute `robots`.
pub fn execute_robots(args: &ConfigPathArg) -> Result<()> {
    let config = config::load(&args.config)?;
    print!("{}", robots::render(&config.site, &config.robots));
    Ok(())
}

/// Execute `metadata`.
pub async fn execute_metadata(args: &MetadataArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let slug = Slug::parse(args.slug.as_str())?;
    let doc_type = DocumentType::from(args.doc_type);
    let cms = bootstrap::build_cms(&config);
    let metadata = metadata::lookup(cms.as_ref(), doc_type, &slug, &config.site)
        .await?
        .ok_or_else(|| Error::NotFound(format!("{} '{slug}'", doc_type.as_str())))?;

    if output::is_json() {
        output::json_output("metadata", &metadata);
        return Ok(());
    }

    output::section("Page");
    output::field("Title", &metadata.title);
    output::field("Description", &metadata.description);
    output::field("Canonical", &metadata.canonical);

    output::section("Open Graph");
    output::field("Type", metadata.open_graph.og_type);
    if let Some(image) = &metadata.open_graph.image {
        output::field("Image", image);
    }
    if let Some(published) = &metadata.open_graph.published_time {
        output::field("Published", published);
    }
    if let Some(section) = &metadata.open_graph.section {
        output::field("Section", section);
    }

    output::section("Twitter");
    output::field("Card", metadata.twitter.card);

    if output::verbosity() > 0 {
        output::section("JSON-LD");
        let pretty = serde_json::to_string_pretty(&metadata.json_ld)?;
        output::lines(&pretty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliver_writes_file_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("sitemap.xml");
        deliver("<urlset/>", Some(&path), "sitemap").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<urlset/>");
    }
}
