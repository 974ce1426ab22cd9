//! Redirect list audit.
//!
//! Checks a `[[redirects]]` TOML file for malformed paths, self-redirects,
//! duplicate sources, chains, loops and `/blog/{slug}` destinations that no
//! longer exist in the CMS.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::Tally;
use crate::domain::redirect::{normalize_path, Redirect, RedirectFile};
use crate::domain::seo::Severity;
use crate::domain::DocumentType;
use crate::error::{ConfigError, Result};
use crate::port::outbound::cms::ContentSource;

/// Kind of redirect problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RedirectProblem {
    InvalidSource,
    InvalidDestination,
    SelfRedirect,
    DuplicateSource { count: usize },
    /// Destination is itself redirected to `next`.
    Chain { next: String },
    /// Following destinations returns to this source.
    Loop { cycle: Vec<String> },
    /// Destination post slug is unknown to the CMS.
    BrokenDestination { slug: String },
}

impl RedirectProblem {
    /// Chains only cost an extra hop; everything else breaks navigation.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Chain { .. } => Severity::Warn,
            _ => Severity::Fail,
        }
    }
}

impl std::fmt::Display for RedirectProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSource => f.write_str("source must start with '/'"),
            Self::InvalidDestination => {
                f.write_str("destination must start with '/' or be an http(s) URL")
            }
            Self::SelfRedirect => f.write_str("redirects to itself"),
            Self::DuplicateSource { count } => write!(f, "source appears {count} times"),
            Self::Chain { next } => write!(f, "destination redirects again to {next}"),
            Self::Loop { cycle } => write!(f, "redirect loop: {}", cycle.join(" -> ")),
            Self::BrokenDestination { slug } => write!(f, "no post with slug '{slug}'"),
        }
    }
}

/// One problem on one redirect rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectFinding {
    pub source: String,
    pub destination: String,
    pub severity: Severity,
    pub problem: RedirectProblem,
}

impl RedirectFinding {
    fn new(redirect: &Redirect, problem: RedirectProblem) -> Self {
        Self {
            source: redirect.source.clone(),
            destination: redirect.destination.clone(),
            severity: problem.severity(),
            problem,
        }
    }
}

/// Load a redirects file.
///
/// # Errors
/// Returns a configuration error when the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<RedirectFile> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
    let file: RedirectFile = toml::from_str(&content).map_err(ConfigError::Parse)?;
    Ok(file)
}

fn valid_destination(destination: &str) -> bool {
    destination.starts_with('/')
        || ((destination.starts_with("https://") || destination.starts_with("http://"))
            && url::Url::parse(destination).is_ok())
}

/// Post slug targeted by an internal `/blog/{slug}` destination.
fn blog_slug(redirect: &Redirect) -> Option<&str> {
    if redirect.is_external() {
        return None;
    }
    let rest = normalize_path(&redirect.destination).strip_prefix(DocumentType::Post.route_prefix())?;
    let slug = rest.strip_prefix('/')?;
    (!slug.is_empty() && !slug.contains('/')).then_some(slug)
}

/// Check redirects without consulting the CMS.
#[must_use]
pub fn check(redirects: &[Redirect]) -> Vec<RedirectFinding> {
    let mut findings = Vec::new();

    let mut sources: HashMap<&str, usize> = HashMap::new();
    for r in redirects {
        *sources.entry(r.normalized_source()).or_default() += 1;
    }

    // First rule wins for duplicated sources.
    let mut edges: HashMap<&str, &str> = HashMap::new();
    for r in redirects {
        if !r.is_external() {
            edges
                .entry(r.normalized_source())
                .or_insert_with(|| normalize_path(&r.destination));
        }
    }

    let mut reported_cycles: HashSet<Vec<String>> = HashSet::new();

    for r in redirects {
        let source = r.normalized_source();
        if !r.source.starts_with('/') {
            findings.push(RedirectFinding::new(r, RedirectProblem::InvalidSource));
        }
        if !valid_destination(&r.destination) {
            findings.push(RedirectFinding::new(r, RedirectProblem::InvalidDestination));
            continue;
        }
        if !r.is_external() && source == normalize_path(&r.destination) {
            findings.push(RedirectFinding::new(r, RedirectProblem::SelfRedirect));
            continue;
        }
        if let Some(&count) = sources.get(source) {
            if count > 1 {
                findings.push(RedirectFinding::new(r, RedirectProblem::DuplicateSource { count }));
            }
        }
        if r.is_external() {
            continue;
        }

        match follow(source, &edges) {
            Hop::Loop(cycle) => {
                let key = canonical_cycle(&cycle);
                if reported_cycles.insert(key) {
                    findings.push(RedirectFinding::new(r, RedirectProblem::Loop { cycle }));
                }
            }
            Hop::Chain(next) => {
                findings.push(RedirectFinding::new(r, RedirectProblem::Chain { next }));
            }
            Hop::Terminal => {}
        }
    }

    findings
}

enum Hop {
    Terminal,
    Chain(String),
    Loop(Vec<String>),
}

fn follow(start: &str, edges: &HashMap<&str, &str>) -> Hop {
    let Some(&first) = edges.get(start) else {
        return Hop::Terminal;
    };
    if !edges.contains_key(first) {
        return Hop::Terminal;
    }

    let mut path = vec![start];
    let mut current = first;
    while let Some(&next) = edges.get(current) {
        if let Some(pos) = path.iter().position(|p| *p == current) {
            if pos == 0 {
                let mut cycle: Vec<String> = path.iter().map(|p| (*p).to_string()).collect();
                cycle.push(start.to_string());
                return Hop::Loop(cycle);
            }
            // Leads into a loop that does not include this source.
            return Hop::Chain(first.to_string());
        }
        path.push(current);
        current = next;
    }
    Hop::Chain(first.to_string())
}

/// Rotation-independent key so a cycle is reported once.
fn canonical_cycle(cycle: &[String]) -> Vec<String> {
    let nodes = &cycle[..cycle.len().saturating_sub(1)];
    let mut key = nodes.to_vec();
    key.sort();
    key
}

/// Report internal post destinations whose slug is not in `known`.
#[must_use]
pub fn check_destinations(redirects: &[Redirect], known: &HashSet<String>) -> Vec<RedirectFinding> {
    redirects
        .iter()
        .filter_map(|r| {
            let slug = blog_slug(r)?;
            (!known.contains(slug)).then(|| {
                RedirectFinding::new(
                    r,
                    RedirectProblem::BrokenDestination {
                        slug: slug.to_string(),
                    },
                )
            })
        })
        .collect()
}

/// Result of a redirect audit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RedirectReport {
    pub checked: usize,
    pub findings: Vec<RedirectFinding>,
}

impl RedirectReport {
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.findings.iter().map(|f| f.severity).collect()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.tally().has_failures()
    }
}

/// Audit a redirects file, checking post destinations against the CMS.
///
/// # Errors
/// Returns an error if the file is unreadable or the CMS cannot be queried.
pub async fn run(path: &Path, source: &dyn ContentSource) -> Result<RedirectReport> {
    let file = load(path)?;
    let mut findings = check(&file.redirects);

    if file.redirects.iter().any(|r| blog_slug(r).is_some()) {
        let known: HashSet<String> = source
            .documents(DocumentType::Post)
            .await?
            .into_iter()
            .filter_map(|d| d.slug)
            .collect();
        findings.extend(check_destinations(&file.redirects, &known));
    }

    let report = RedirectReport {
        checked: file.redirects.len(),
        findings,
    };
    info!(
        redirects = report.checked,
        findings = report.findings.len(),
        "Redirect audit complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(source: &str, destination: &str) -> Redirect {
        Redirect {
            source: source.into(),
            destination: destination.into(),
            permanent: true,
        }
    }

    fn problems(findings: &[RedirectFinding]) -> Vec<&RedirectProblem> {
        findings.iter().map(|f| &f.problem).collect()
    }

    #[test]
    fn clean_list_has_no_findings() {
        let redirects = [r("/old", "/blog/new"), r("/shop", "https://shop.example.com")];
        assert!(check(&redirects).is_empty());
    }

    #[test]
    fn malformed_paths_fail() {
        let findings = check(&[r("old", "/new"), r("/a", "new"), r("/b", "ftp://x.example")]);
        assert_eq!(
            problems(&findings),
            [
                &RedirectProblem::InvalidSource,
                &RedirectProblem::InvalidDestination,
                &RedirectProblem::InvalidDestination
            ]
        );
        assert!(findings.iter().all(|f| f.severity == Severity::Fail));
    }

    #[test]
    fn self_redirect_ignores_trailing_slash() {
        let findings = check(&[r("/tips/", "/tips")]);
        assert_eq!(problems(&findings), [&RedirectProblem::SelfRedirect]);
    }

    #[test]
    fn duplicate_sources_are_flagged_on_each_rule() {
        let findings = check(&[r("/a", "/x"), r("/a/", "/y")]);
        assert_eq!(findings.len(), 2);
        assert!(findings
            .iter()
            .all(|f| f.problem == RedirectProblem::DuplicateSource { count: 2 }));
    }

    #[test]
    fn chains_warn() {
        let findings = check(&[r("/a", "/b"), r("/b", "/c")]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source, "/a");
        assert_eq!(findings[0].severity, Severity::Warn);
        assert_eq!(findings[0].problem, RedirectProblem::Chain { next: "/b".into() });
    }

    #[test]
    fn loops_fail_once_per_cycle() {
        let findings = check(&[r("/a", "/b"), r("/b", "/c"), r("/c", "/a")]);
        let loops: Vec<&RedirectFinding> = findings
            .iter()
            .filter(|f| matches!(f.problem, RedirectProblem::Loop { .. }))
            .collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].severity, Severity::Fail);
        assert_eq!(
            loops[0].problem,
            RedirectProblem::Loop {
                cycle: vec!["/a".into(), "/b".into(), "/c".into(), "/a".into()]
            }
        );
    }

    #[test]
    fn unknown_post_destinations_are_broken() {
        let redirects = [
            r("/old-bass", "/blog/bass-lures"),
            r("/old-pike", "/blog/pike-rigs?ref=old"),
            r("/cat", "/categories/trout"),
        ];
        let known: HashSet<String> = ["bass-lures".to_string()].into();
        let findings = check_destinations(&redirects, &known);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].problem,
            RedirectProblem::BrokenDestination {
                slug: "pike-rigs".into()
            }
        );
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.toml");
        std::fs::write(
            &path,
            "[[redirects]]\nsource = \"/a\"\ndestination = \"/b\"\n",
        )
        .unwrap();
        let file = load(&path).unwrap();
        assert_eq!(file.redirects, vec![r("/a", "/b")]);
    }
}
