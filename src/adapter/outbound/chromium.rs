//! Headless Chromium slide renderer.
//!
//! Each slide is written next to its PNG as an `.html` file and captured with
//! `--headless=new --screenshot`. The subprocess is killed if it outlives the
//! configured timeout.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::port::outbound::render::SlideRenderer;

/// Renders slides by shelling out to a Chromium binary.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: String,
    timeout: Duration,
}

impl ChromiumRenderer {
    #[must_use]
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Command-line arguments for one screenshot. `html` must be absolute.
    fn args(html: &Path, output: &Path, width: u32, height: u32) -> Result<Vec<String>> {
        let page = Url::from_file_path(html).map_err(|()| {
            Error::upstream("chromium", format!("not an absolute path: {}", html.display()))
        })?;
        Ok(vec![
            "--headless=new".into(),
            "--disable-gpu".into(),
            "--no-sandbox".into(),
            "--hide-scrollbars".into(),
            "--force-device-scale-factor=1".into(),
            format!("--window-size={width},{height}"),
            format!("--screenshot={}", output.display()),
            page.into(),
        ])
    }
}

#[async_trait]
impl SlideRenderer for ChromiumRenderer {
    async fn render(&self, html: &str, width: u32, height: u32, output: &Path) -> Result<PathBuf> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let html_path = output.with_extension("html");
        tokio::fs::write(&html_path, html).await?;
        let html_path = tokio::fs::canonicalize(&html_path).await?;

        let child = Command::new(&self.binary)
            .args(Self::args(&html_path, output, width, height)?)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let result = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                Error::upstream(
                    "chromium",
                    format!("screenshot timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| Error::upstream("chromium", format!("failed to start {}: {e}", self.binary)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::upstream(
                "chromium",
                format!("exited with {}: {}", result.status, stderr.trim()),
            ));
        }
        if !tokio::fs::try_exists(output).await? {
            return Err(Error::upstream("chromium", "no screenshot was written"));
        }

        debug!(path = %output.display(), width, height, "Slide rasterized");
        Ok(output.to_path_buf())
    }
}
