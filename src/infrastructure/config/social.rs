//! Social carousel pipeline settings.
//!
//! Credentials are never read from the config file; each `#[serde(skip)]`
//! field is filled from its environment variable when the config loads.

use std::path::PathBuf;

use serde::Deserialize;

/// Carousel pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialConfig {
    /// Directory receiving rendered HTML and PNG slides.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Chromium (or Chrome) executable used for screenshots.
    #[serde(default = "default_chrome_path")]
    pub chrome_path: String,

    /// Upper bound for a single screenshot, in seconds.
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// Text on the closing slide.
    #[serde(default = "default_cta_text")]
    pub cta_text: String,

    /// Slide accent color (CSS).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    #[serde(default)]
    pub instagram: InstagramConfig,

    #[serde(default)]
    pub pinterest: PinterestConfig,

    #[serde(default)]
    pub cloudinary: CloudinaryConfig,

    #[serde(default)]
    pub unsplash: UnsplashConfig,
}

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("fishandtips-social")
}

fn default_chrome_path() -> String {
    "chromium".into()
}

const fn default_render_timeout_secs() -> u64 {
    30
}

fn default_cta_text() -> String {
    "Read the full guide on FishandTips".into()
}

fn default_accent_color() -> String {
    "#0e7490".into()
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            chrome_path: default_chrome_path(),
            render_timeout_secs: default_render_timeout_secs(),
            cta_text: default_cta_text(),
            accent_color: default_accent_color(),
            instagram: InstagramConfig::default(),
            pinterest: PinterestConfig::default(),
            cloudinary: CloudinaryConfig::default(),
            unsplash: UnsplashConfig::default(),
        }
    }
}

/// Instagram Graph API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InstagramConfig {
    /// Instagram business account ID.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Graph API version. Defaults to "v21.0".
    #[serde(default = "default_graph_version")]
    pub graph_version: String,

    /// Loaded from `INSTAGRAM_ACCESS_TOKEN`.
    #[serde(skip)]
    pub access_token: Option<String>,
}

fn default_graph_version() -> String {
    "v21.0".into()
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            graph_version: default_graph_version(),
            access_token: None,
        }
    }
}

/// Pinterest API v5 settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinterestConfig {
    /// Target board ID.
    #[serde(default)]
    pub board_id: Option<String>,

    /// Loaded from `PINTEREST_ACCESS_TOKEN`.
    #[serde(skip)]
    pub access_token: Option<String>,
}

/// Cloudinary upload settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryConfig {
    #[serde(default)]
    pub cloud_name: Option<String>,

    /// Folder for uploaded slides.
    #[serde(default = "default_folder")]
    pub folder: String,

    /// Loaded from `CLOUDINARY_API_KEY`.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Loaded from `CLOUDINARY_API_SECRET`.
    #[serde(skip)]
    pub api_secret: Option<String>,
}

fn default_folder() -> String {
    "fishandtips/social".into()
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            folder: default_folder(),
            api_key: None,
            api_secret: None,
        }
    }
}

/// Unsplash search settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashConfig {
    /// Preferred orientation ("portrait", "landscape", "squarish").
    #[serde(default = "default_orientation")]
    pub orientation: String,

    /// Loaded from `UNSPLASH_ACCESS_KEY`.
    #[serde(skip)]
    pub access_key: Option<String>,
}

fn default_orientation() -> String {
    "portrait".into()
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            orientation: default_orientation(),
            access_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_sections() {
        let cfg: SocialConfig = toml::from_str(
            r#"
chrome_path = "/usr/bin/google-chrome"

[instagram]
account_id = "1784"

[pinterest]
board_id = "board-9"

[cloudinary]
cloud_name = "fishandtips"
"#,
        )
        .unwrap();
        assert_eq!(cfg.chrome_path, "/usr/bin/google-chrome");
        assert_eq!(cfg.instagram.account_id.as_deref(), Some("1784"));
        assert_eq!(cfg.instagram.graph_version, "v21.0");
        assert_eq!(cfg.pinterest.board_id.as_deref(), Some("board-9"));
        assert_eq!(cfg.cloudinary.folder, "fishandtips/social");
        assert_eq!(cfg.render_timeout_secs, 30);
    }
}
