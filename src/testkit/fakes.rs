//! In-memory port implementations for tests.
//!
//! Every fake records what it was asked to do so tests can assert on the
//! calls, and most can be switched into a failing mode.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::carousel::{Caption, Platform};
use crate::domain::subscriber::{Subscriber, SubscriptionStatus};
use crate::domain::{
    Category, DocumentId, DocumentSummary, DocumentType, Email, Post, Slug, Technique,
};
use crate::error::{Error, Result};
use crate::port::outbound::cms::{ContentSource, ContentWriter};
use crate::port::outbound::form::FormSink;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::media::{MediaHost, UploadedMedia};
use crate::port::outbound::photo::{PhotoSearch, StockPhoto};
use crate::port::outbound::publish::{Published, SocialPublisher};
use crate::port::outbound::render::SlideRenderer;
use crate::port::outbound::subscriber::SubscriberStore;

// ---------------------------------------------------------------------------
// MemoryCms
// ---------------------------------------------------------------------------

/// CMS holding content in memory. Also records slug patches.
#[derive(Default)]
pub struct MemoryCms {
    posts: Vec<Post>,
    categories: Vec<Category>,
    techniques: Vec<Technique>,
    documents: Vec<DocumentSummary>,
    failing: bool,
    patches: Mutex<Vec<(DocumentId, Slug)>>,
}

impl MemoryCms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_techniques(mut self, techniques: Vec<Technique>) -> Self {
        self.techniques = techniques;
        self
    }

    /// Raw document listings. When any are given for a type they replace the
    /// listing derived from posts, categories and techniques.
    pub fn with_documents(mut self, documents: Vec<DocumentSummary>) -> Self {
        self.documents = documents;
        self
    }

    /// Every read fails with an upstream error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Slug patches written so far.
    pub fn patches(&self) -> Vec<(DocumentId, Slug)> {
        self.patches.lock().clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            Err(Error::upstream("sanity", "503 Service Unavailable: scripted failure"))
        } else {
            Ok(())
        }
    }

    fn derived(&self, doc_type: DocumentType) -> Vec<DocumentSummary> {
        let summary = |id: &DocumentId, title: &str, slug: Option<&Slug>| DocumentSummary {
            id: id.clone(),
            doc_type,
            title: Some(title.to_string()),
            slug: slug.map(|s| s.as_str().to_string()),
        };
        match doc_type {
            DocumentType::Post => self
                .posts
                .iter()
                .map(|p| summary(&p.id, &p.title, p.slug.as_ref()))
                .collect(),
            DocumentType::Category => self
                .categories
                .iter()
                .map(|c| summary(&c.id, &c.title, c.slug.as_ref()))
                .collect(),
            DocumentType::Technique => self
                .techniques
                .iter()
                .map(|t| summary(&t.id, &t.title, t.slug.as_ref()))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentSource for MemoryCms {
    async fn posts(&self) -> Result<Vec<Post>> {
        self.check()?;
        Ok(self.posts.clone())
    }

    async fn post_by_slug(&self, slug: &Slug) -> Result<Option<Post>> {
        self.check()?;
        Ok(self.posts.iter().find(|p| p.slug.as_ref() == Some(slug)).cloned())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn techniques(&self) -> Result<Vec<Technique>> {
        self.check()?;
        Ok(self.techniques.clone())
    }

    async fn documents(&self, doc_type: DocumentType) -> Result<Vec<DocumentSummary>> {
        self.check()?;
        let explicit: Vec<DocumentSummary> = self
            .documents
            .iter()
            .filter(|d| d.doc_type == doc_type)
            .cloned()
            .collect();
        if explicit.is_empty() {
            Ok(self.derived(doc_type))
        } else {
            Ok(explicit)
        }
    }
}

#[async_trait]
impl ContentWriter for MemoryCms {
    async fn set_slug(&self, id: &DocumentId, slug: &Slug) -> Result<()> {
        self.check()?;
        self.patches.lock().push((id.clone(), slug.clone()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedLlm
// ---------------------------------------------------------------------------

/// LLM returning pre-loaded replies in order and recording each prompt.
/// Once the script is exhausted every call fails.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// An LLM whose every call fails.
    pub fn failing() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, _system: Option<&str>, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| Error::upstream("scripted", "no reply scripted"))
    }
}

// ---------------------------------------------------------------------------
// MemorySubscriberStore
// ---------------------------------------------------------------------------

/// Subscriber store backed by a vector.
#[derive(Default)]
pub struct MemorySubscriberStore {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl MemorySubscriberStore {
    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }

    pub fn all(&self) -> Vec<Subscriber> {
        self.subscribers.lock().clone()
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn save(&self, subscriber: &Subscriber) -> Result<()> {
        let mut subscribers = self.subscribers.lock();
        if subscribers
            .iter()
            .any(|s| s.id != subscriber.id && s.email == subscriber.email)
        {
            return Err(Error::Conflict(format!("subscriber {}", subscriber.email)));
        }
        match subscribers.iter_mut().find(|s| s.id == subscriber.id) {
            Some(existing) => *existing = subscriber.clone(),
            None => subscribers.push(subscriber.clone()),
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Subscriber>> {
        Ok(self.subscribers.lock().iter().find(|s| &s.email == email).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Subscriber>> {
        Ok(self
            .subscribers
            .lock()
            .iter()
            .find(|s| s.unsubscribe_token == token)
            .cloned())
    }

    async fn list(&self, status: Option<SubscriptionStatus>) -> Result<Vec<Subscriber>> {
        let mut list: Vec<Subscriber> = self
            .subscribers
            .lock()
            .iter()
            .filter(|s| status.map_or(true, |st| s.status == st))
            .cloned()
            .collect();
        list.sort_by_key(|s| s.subscribed_at);
        Ok(list)
    }

    async fn count(&self, status: SubscriptionStatus) -> Result<usize> {
        Ok(self.subscribers.lock().iter().filter(|s| s.status == status).count())
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Form sink that records every record, optionally failing after recording.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Value>>,
    failing: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl FormSink for RecordingSink {
    async fn submit(&self, record: &Value) -> Result<()> {
        self.records.lock().push(record.clone());
        if self.failing {
            Err(Error::upstream("sheets", "500 Internal Server Error: scripted failure"))
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// FixedPhotoSearch
// ---------------------------------------------------------------------------

/// Photo search returning the same result for every query.
#[derive(Default)]
pub struct FixedPhotoSearch {
    photo: Option<StockPhoto>,
    queries: Mutex<Vec<String>>,
}

impl FixedPhotoSearch {
    pub fn new(photo: Option<StockPhoto>) -> Self {
        Self {
            photo,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl PhotoSearch for FixedPhotoSearch {
    async fn find(&self, query: &str) -> Result<Option<StockPhoto>> {
        self.queries.lock().push(query.to_string());
        Ok(self.photo.clone())
    }
}

// ---------------------------------------------------------------------------
// FileRenderer
// ---------------------------------------------------------------------------

/// Renderer that writes the HTML bytes to the output path instead of a PNG.
#[derive(Default)]
pub struct FileRenderer {
    rendered: Mutex<Vec<(PathBuf, String)>>,
}

impl FileRenderer {
    /// Output paths and the HTML rendered into each.
    pub fn rendered(&self) -> Vec<(PathBuf, String)> {
        self.rendered.lock().clone()
    }
}

#[async_trait]
impl SlideRenderer for FileRenderer {
    async fn render(&self, html: &str, _width: u32, _height: u32, output: &Path) -> Result<PathBuf> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, html.as_bytes()).await?;
        self.rendered.lock().push((output.to_path_buf(), html.to_string()));
        Ok(output.to_path_buf())
    }
}

// ---------------------------------------------------------------------------
// MemoryMediaHost
// ---------------------------------------------------------------------------

/// Media host tracking uploads and deletions.
#[derive(Default)]
pub struct MemoryMediaHost {
    uploaded: Mutex<Vec<UploadedMedia>>,
    deleted: Mutex<Vec<String>>,
    fail_upload_at: Option<usize>,
    fail_deletes: bool,
}

impl MemoryMediaHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the upload with this zero-based index.
    pub fn fail_upload_at(mut self, index: usize) -> Self {
        self.fail_upload_at = Some(index);
        self
    }

    /// Every delete fails.
    pub fn fail_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn uploaded(&self) -> Vec<UploadedMedia> {
        self.uploaded.lock().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl MediaHost for MemoryMediaHost {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia> {
        let mut uploaded = self.uploaded.lock();
        if self.fail_upload_at == Some(uploaded.len()) {
            return Err(Error::upstream("cloudinary", "400 Bad Request: scripted failure"));
        }
        let name = path
            .file_stem()
            .map_or_else(|| "asset".to_string(), |s| s.to_string_lossy().into_owned());
        let public_id = format!("test/{}-{}", uploaded.len(), name);
        let media = UploadedMedia {
            url: format!("https://cdn.test/{public_id}.png"),
            public_id,
        };
        uploaded.push(media.clone());
        Ok(media)
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        self.deleted.lock().push(public_id.to_string());
        if self.fail_deletes {
            Err(Error::upstream("cloudinary", "500: scripted failure"))
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingPublisher
// ---------------------------------------------------------------------------

/// Publisher that records calls and succeeds or fails as configured.
pub struct RecordingPublisher {
    platform: Platform,
    failing: bool,
    calls: Mutex<Vec<(Vec<String>, Caption, String)>>,
}

impl RecordingPublisher {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            failing: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(platform: Platform) -> Self {
        Self {
            failing: true,
            ..Self::new(platform)
        }
    }

    /// Image URLs, caption and link of each publish call.
    pub fn calls(&self) -> Vec<(Vec<String>, Caption, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SocialPublisher for RecordingPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(&self, image_urls: &[String], caption: &Caption, link: &str) -> Result<Published> {
        self.calls
            .lock()
            .push((image_urls.to_vec(), caption.clone(), link.to_string()));
        if self.failing {
            return Err(Error::upstream(self.platform.name(), "400: scripted failure"));
        }
        Ok(Published {
            remote_id: format!("{}-1", self.platform),
            permalink: Some(format!("https://{}.test/p/1", self.platform)),
        })
    }
}
