//! Miette-based error diagnostics for CLI error presentation.
//!
//! A malformed configuration file is rendered with the offending TOML span
//! highlighted instead of a bare parser message.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(fishandtips::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>, path: &Path, src: String, offset: usize, len: usize) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(path.display().to_string(), src),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic for a TOML parse failure, if the parser reported
    /// a location.
    #[must_use]
    pub fn from_toml(path: &Path, src: String, err: &toml::de::Error) -> Option<Self> {
        let span = err.span()?;
        let message = format!("invalid configuration: {}", err.message());
        Some(
            Self::new(message, path, src, span.start, span.end.saturating_sub(span.start))
                .with_help("run `fishandtips config init --force` to regenerate a documented template"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_error_points_at_the_bad_value() {
        let src = "[feed]\nmax_items = = 1\n".to_string();
        let err = toml::from_str::<toml::Value>(&src).unwrap_err();
        let diag = ConfigDiagnostic::from_toml(Path::new("config.toml"), src.clone(), &err).unwrap();
        let offset = diag.span.offset();
        assert!(offset >= "[feed]\n".len() && offset <= src.len());
        assert!(diag.message.starts_with("invalid configuration"));
        assert!(diag.help.is_some());
    }
}
