//! Site redirects.

use serde::{Deserialize, Serialize};

/// A single redirect rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub source: String,
    pub destination: String,
    #[serde(default = "default_permanent")]
    pub permanent: bool,
}

const fn default_permanent() -> bool {
    true
}

impl Redirect {
    /// True when the destination points at another site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.destination.starts_with("http://") || self.destination.starts_with("https://")
    }

    /// Source path with any trailing slash removed (except root).
    #[must_use]
    pub fn normalized_source(&self) -> &str {
        normalize_path(&self.source)
    }
}

/// Strip `?query` and `#fragment` from a path.
#[must_use]
pub fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Remove a trailing slash from a path, keeping `/` intact.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let path = strip_query(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// On-disk redirect list (`[[redirects]]` tables).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RedirectFile {
    #[serde(default)]
    pub redirects: Vec<Redirect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(source: &str, destination: &str) -> Redirect {
        Redirect {
            source: source.into(),
            destination: destination.into(),
            permanent: true,
        }
    }

    #[test]
    fn external_destinations_are_detected() {
        assert!(redirect("/a", "https://shop.example.com").is_external());
        assert!(!redirect("/a", "/blog/a").is_external());
    }

    #[test]
    fn paths_are_normalized() {
        assert_eq!(redirect("/old/", "/new?x=1#top").normalized_source(), "/old");
        assert_eq!(normalize_path("/new/?x=1"), "/new");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn parses_toml_list() {
        let file: RedirectFile = toml::from_str(
            r#"
[[redirects]]
source = "/old"
destination = "/new"

[[redirects]]
source = "/temp"
destination = "/other"
permanent = false
"#,
        )
        .unwrap();
        assert_eq!(file.redirects.len(), 2);
        assert!(file.redirects[0].permanent);
        assert!(!file.redirects[1].permanent);
    }
}
