//! Slide rasterization port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

/// Turns a self-contained HTML document into a PNG file.
#[async_trait]
pub trait SlideRenderer: Send + Sync {
    /// Render `html` at `width`x`height` into `output`, returning the path
    /// written.
    async fn render(&self, html: &str, width: u32, height: u32, output: &Path) -> Result<PathBuf>;
}
