//! The carousel pipeline: article to published social post.
//!
//! Steps run strictly in sequence: load, caption, tips, photo, slides,
//! rasterize, upload, publish. Nothing is retried. When an upload or the
//! publish step fails, assets already on the CDN are deleted before the
//! error is returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::slides::{self, SlideStyle};
use super::{caption, tips};
use crate::domain::carousel::{Caption, Carousel, Platform, PublishReport};
use crate::domain::{DocumentType, Post, Slug};
use crate::error::{Error, Result};
use crate::infrastructure::config::site::SiteConfig;
use crate::port::outbound::cms::ContentSource;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::media::{MediaHost, UploadedMedia};
use crate::port::outbound::photo::{PhotoSearch, StockPhoto};
use crate::port::outbound::publish::SocialPublisher;
use crate::port::outbound::render::SlideRenderer;

/// Result of a dry run: rendered files, nothing uploaded.
#[derive(Debug, Clone, Serialize)]
pub struct DryRunReport {
    pub platform: Platform,
    pub post_slug: String,
    pub caption: Caption,
    pub files: Vec<PathBuf>,
}

/// What a pipeline run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PipelineOutcome {
    DryRun(DryRunReport),
    Published(PublishReport),
}

/// Collaborators and settings for a run.
pub struct CarouselPipeline {
    source: Arc<dyn ContentSource>,
    llm: Arc<dyn Llm>,
    renderer: Arc<dyn SlideRenderer>,
    photos: Option<Arc<dyn PhotoSearch>>,
    media: Option<Arc<dyn MediaHost>>,
    publisher: Option<Arc<dyn SocialPublisher>>,
    site: SiteConfig,
    style: SlideStyle,
    work_dir: PathBuf,
}

impl CarouselPipeline {
    pub fn new(
        source: Arc<dyn ContentSource>,
        llm: Arc<dyn Llm>,
        renderer: Arc<dyn SlideRenderer>,
        site: SiteConfig,
        style: SlideStyle,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            llm,
            renderer,
            photos: None,
            media: None,
            publisher: None,
            site,
            style,
            work_dir: work_dir.into(),
        }
    }

    #[must_use]
    pub fn with_photos(mut self, photos: Arc<dyn PhotoSearch>) -> Self {
        self.photos = Some(photos);
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: Arc<dyn MediaHost>) -> Self {
        self.media = Some(media);
        self
    }

    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn SocialPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Run the pipeline for one article.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] for an unknown slug,
    /// [`Error::Unavailable`] when publishing is requested without a media
    /// host or publisher for the platform, and the first failing step's
    /// error otherwise.
    pub async fn run(
        &self,
        platform: Platform,
        slug: &str,
        dry_run: bool,
        now: DateTime<Utc>,
    ) -> Result<PipelineOutcome> {
        let (media, publisher) = if dry_run {
            (None, None)
        } else {
            (Some(self.media()?), Some(self.publisher(platform)?))
        };

        let slug = Slug::parse(slug)?;
        let post = self
            .source
            .post_by_slug(&slug)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post '{slug}'")))?;
        let link = self
            .site
            .url(&format!("{}/{}", DocumentType::Post.route_prefix(), slug));
        info!(slug = %slug, platform = %platform, dry_run, "Carousel pipeline started");

        let caption = caption::generate(self.llm.as_ref(), platform, &post, &link).await?;
        let tips = tips::extract(self.llm.as_ref(), platform, &post).await?;
        let photo = self.find_photo(&post).await;

        let slides = slides::build(platform, &post, &tips, photo.as_ref(), &self.style, &link);
        let carousel = Carousel::new(platform, slug.as_str(), link, slides, caption)?;

        let run_dir = self.work_dir.join(format!(
            "{}-{}-{}",
            slug,
            platform,
            now.format("%Y%m%d%H%M%S")
        ));
        let files = self
            .rasterize(&carousel, &run_dir, photo.as_ref().and_then(|p| p.credit.as_deref()))
            .await?;
        info!(slides = files.len(), dir = %run_dir.display(), "Slides rendered");

        let (Some(media), Some(publisher)) = (media, publisher) else {
            return Ok(PipelineOutcome::DryRun(DryRunReport {
                platform,
                post_slug: carousel.post_slug,
                caption: carousel.caption,
                files,
            }));
        };

        let uploaded = upload_all(media, &files).await?;
        let urls: Vec<String> = uploaded.iter().map(|m| m.url.clone()).collect();

        match publisher.publish(&urls, &carousel.caption, &carousel.link).await {
            Ok(published) => {
                info!(
                    platform = %platform,
                    remote_id = %published.remote_id,
                    "Carousel published"
                );
                Ok(PipelineOutcome::Published(PublishReport {
                    platform,
                    post_slug: carousel.post_slug,
                    media_urls: urls,
                    remote_id: published.remote_id,
                    permalink: published.permalink,
                }))
            }
            Err(e) => {
                warn!(platform = %platform, error = %e, "Publish failed; removing uploaded slides");
                compensate(media, &uploaded).await;
                Err(e)
            }
        }
    }

    fn media(&self) -> Result<&dyn MediaHost> {
        self.media
            .as_deref()
            .ok_or(Error::Unavailable("media CDN"))
    }

    fn publisher(&self, platform: Platform) -> Result<&dyn SocialPublisher> {
        self.publisher
            .as_deref()
            .filter(|p| p.platform() == platform)
            .ok_or(Error::Unavailable(match platform {
                Platform::Instagram => "instagram publisher",
                Platform::Pinterest => "pinterest publisher",
            }))
    }

    async fn find_photo(&self, post: &Post) -> Option<StockPhoto> {
        let photos = self.photos.as_deref()?;
        let query = post.primary_category().unwrap_or(post.title.as_str());
        match photos.find(query).await {
            Ok(Some(photo)) => Some(photo),
            Ok(None) => {
                info!(query, "No stock photo found; using solid backgrounds");
                None
            }
            Err(e) => {
                warn!(query, error = %e, "Stock photo search failed; using solid backgrounds");
                None
            }
        }
    }

    async fn rasterize(&self, carousel: &Carousel, dir: &Path, credit: Option<&str>) -> Result<Vec<PathBuf>> {
        let (width, height) = carousel.platform.dimensions();
        let total = carousel.slides.len();
        let mut files = Vec::with_capacity(total);
        for slide in &carousel.slides {
            let html = slides::render_html(slide, total, width, height, &self.style, credit);
            let output = dir.join(format!("slide-{:02}.png", slide.index + 1));
            files.push(self.renderer.render(&html, width, height, &output).await?);
        }
        Ok(files)
    }
}

async fn upload_all(media: &dyn MediaHost, files: &[PathBuf]) -> Result<Vec<UploadedMedia>> {
    let mut uploaded = Vec::with_capacity(files.len());
    for file in files {
        match media.upload(file).await {
            Ok(asset) => uploaded.push(asset),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Upload failed; removing earlier uploads");
                compensate(media, &uploaded).await;
                return Err(e);
            }
        }
    }
    Ok(uploaded)
}

/// Delete uploaded assets. Each failure is logged and the rest continue.
async fn compensate(media: &dyn MediaHost, uploaded: &[UploadedMedia]) {
    for asset in uploaded {
        if let Err(e) = media.delete(&asset.public_id).await {
            warn!(public_id = %asset.public_id, error = %e, "Failed to delete uploaded slide");
        }
    }
}
