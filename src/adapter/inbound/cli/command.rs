//! Command-line interface definitions.
//!
//! Defines the CLI structure for the fishandtips application using `clap`.
//! One binary hosts the HTTP API (`serve`) and every operator task: document
//! generation, content audits, slug repair, editorial lookups, the social
//! carousel pipeline and subscriber exports.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::paths;
use crate::application::duplicates::{DEFAULT_SEMANTIC_CANDIDATES, DEFAULT_THRESHOLD};
use crate::domain::carousel::Platform;
use crate::domain::DocumentType;

/// Content backend and operator CLI for the FishandTips fishing blog
#[derive(Parser, Debug)]
#[command(name = "fishandtips")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the site API, sitemap, feed and robots.txt
    Serve(ServeArgs),

    /// Generate sitemap.xml
    Sitemap(OutputArgs),

    /// Generate the RSS feed
    Feed(OutputArgs),

    /// Print robots.txt
    Robots(ConfigPathArg),

    /// Show SEO metadata for a post, category or technique guide
    Metadata(MetadataArgs),

    /// Audit CMS content and redirects
    #[command(subcommand)]
    Audit(AuditCommand),

    /// Repair CMS content
    #[command(subcommand)]
    Repair(RepairCommand),

    /// Check a proposed title against existing posts
    Duplicates(DuplicatesArgs),

    /// Find posts mentioning keywords (internal-linking targets)
    Keywords(KeywordsArgs),

    /// Turn an article into a social carousel
    Social(SocialArgs),

    /// Inspect newsletter subscribers
    #[command(subcommand)]
    Subscribers(SubscribersCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Report which integrations are configured
    Check(ConfigPathArg),
}

/// Subcommands for `fishandtips audit`.
#[derive(Subcommand, Debug)]
pub enum AuditCommand {
    /// Grade every post's title, description, slug and image.
    Seo(ConfigPathArg),
    /// List documents with missing, invalid or duplicated slugs.
    Slugs(AuditSlugsArgs),
    /// Validate a redirects file against itself and the CMS.
    Redirects(AuditRedirectsArgs),
}

/// Subcommands for `fishandtips repair`.
#[derive(Subcommand, Debug)]
pub enum RepairCommand {
    /// Derive slugs for documents that have none.
    Slugs(RepairSlugsArgs),
}

/// Subcommands for `fishandtips subscribers`.
#[derive(Subcommand, Debug)]
pub enum SubscribersCommand {
    /// List subscribers.
    List(SubscribersListArgs),
    /// Count active and unsubscribed subscribers.
    Count(ConfigPathArg),
    /// Export subscribers as CSV.
    Export(SubscribersExportArgs),
}

/// Subcommands for `fishandtips config`.
///
/// Provides configuration management utilities including generation,
/// display, and validation of configuration files.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override the bind address (e.g. 0.0.0.0:8080).
    #[arg(long)]
    pub bind: Option<String>,
}

/// Arguments for document generators.
#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Output file path (writes to stdout if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `metadata`.
#[derive(Parser, Debug)]
pub struct MetadataArgs {
    /// Document slug.
    pub slug: String,

    /// Document type.
    #[arg(long = "type", value_enum, default_value = "post")]
    pub doc_type: DocumentKind,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// CMS document types accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    Post,
    Category,
    #[value(name = "fishingTechnique", alias = "technique")]
    FishingTechnique,
}

impl From<DocumentKind> for DocumentType {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Post => Self::Post,
            DocumentKind::Category => Self::Category,
            DocumentKind::FishingTechnique => Self::Technique,
        }
    }
}

/// Arguments for `audit slugs`.
#[derive(Parser, Debug)]
pub struct AuditSlugsArgs {
    /// Restrict the audit to one document type (all types by default).
    #[arg(long = "type", value_enum)]
    pub doc_type: Option<DocumentKind>,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `audit redirects`.
#[derive(Parser, Debug)]
pub struct AuditRedirectsArgs {
    /// Redirects file (TOML with `[[redirects]]` tables).
    #[arg(long)]
    pub file: PathBuf,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `repair slugs`.
#[derive(Parser, Debug)]
pub struct RepairSlugsArgs {
    /// Document type to repair.
    #[arg(long = "type", value_enum, default_value = "post")]
    pub doc_type: DocumentKind,

    /// Write the planned slugs to the CMS (prints the plan otherwise).
    #[arg(long)]
    pub apply: bool,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `duplicates`.
#[derive(Parser, Debug)]
pub struct DuplicatesArgs {
    /// Proposed post title.
    pub title: String,

    /// Ask the LLM whether the closest candidates cover the same topic.
    #[arg(long)]
    pub semantic: bool,

    /// Minimum keyword similarity (0.0 to 1.0) for a candidate.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Number of candidates sent to the LLM.
    #[arg(long, default_value_t = DEFAULT_SEMANTIC_CANDIDATES)]
    pub candidates: usize,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `keywords`.
#[derive(Parser, Debug)]
pub struct KeywordsArgs {
    /// Keywords or phrases to look for.
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Social platforms accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Instagram,
    Pinterest,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Instagram => Self::Instagram,
            PlatformArg::Pinterest => Self::Pinterest,
        }
    }
}

/// Arguments for `social`.
#[derive(Parser, Debug)]
pub struct SocialArgs {
    /// Target platform.
    #[arg(value_enum)]
    pub platform: PlatformArg,

    /// Slug of the article to promote.
    pub slug: String,

    /// Render slides locally without uploading or publishing.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Subscriber status filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Active,
    Unsubscribed,
    All,
}

/// Arguments for `subscribers list`.
#[derive(Parser, Debug)]
pub struct SubscribersListArgs {
    /// Which subscribers to list.
    #[arg(long, value_enum, default_value = "active")]
    pub status: StatusFilter,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `subscribers export`.
#[derive(Parser, Debug)]
pub struct SubscribersExportArgs {
    /// Which subscribers to export.
    #[arg(long, value_enum, default_value = "all")]
    pub status: StatusFilter,

    /// Output file path (writes to stdout if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "fishandtips");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fishandtips", "robots", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Auto));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["fishandtips", "--color", "never", "check"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_sitemap_output_flag() {
        let cli = Cli::try_parse_from(["fishandtips", "sitemap", "-o", "public/sitemap.xml"]).unwrap();
        let Commands::Sitemap(args) = cli.command else {
            panic!("Expected Sitemap command");
        };
        assert_eq!(args.output, Some(PathBuf::from("public/sitemap.xml")));
    }

    #[test]
    fn test_repair_slugs_type_names() {
        let cli = Cli::try_parse_from([
            "fishandtips",
            "repair",
            "slugs",
            "--type",
            "fishingTechnique",
            "--apply",
        ])
        .unwrap();
        let Commands::Repair(RepairCommand::Slugs(args)) = cli.command else {
            panic!("Expected repair slugs");
        };
        assert_eq!(DocumentType::from(args.doc_type), DocumentType::Technique);
        assert!(args.apply);
    }

    #[test]
    fn test_repair_slugs_defaults_to_posts_without_apply() {
        let cli = Cli::try_parse_from(["fishandtips", "repair", "slugs"]).unwrap();
        let Commands::Repair(RepairCommand::Slugs(args)) = cli.command else {
            panic!("Expected repair slugs");
        };
        assert_eq!(args.doc_type, DocumentKind::Post);
        assert!(!args.apply);
    }

    #[test]
    fn test_metadata_type_defaults_to_post() {
        let cli = Cli::try_parse_from(["fishandtips", "metadata", "drop-shot"]).unwrap();
        let Commands::Metadata(args) = cli.command else {
            panic!("Expected Metadata command");
        };
        assert_eq!(args.doc_type, DocumentKind::Post);

        let cli =
            Cli::try_parse_from(["fishandtips", "metadata", "drop-shot", "--type", "technique"]).unwrap();
        let Commands::Metadata(args) = cli.command else {
            panic!("Expected Metadata command");
        };
        assert_eq!(DocumentType::from(args.doc_type), DocumentType::Technique);
    }

    #[test]
    fn test_audit_redirects_requires_file() {
        assert!(Cli::try_parse_from(["fishandtips", "audit", "redirects"]).is_err());
        assert!(
            Cli::try_parse_from(["fishandtips", "audit", "redirects", "--file", "redirects.json"]).is_ok()
        );
    }

    #[test]
    fn test_duplicates_defaults() {
        let cli = Cli::try_parse_from(["fishandtips", "duplicates", "Best Bass Lures"]).unwrap();
        let Commands::Duplicates(args) = cli.command else {
            panic!("Expected Duplicates command");
        };
        assert_eq!(args.title, "Best Bass Lures");
        assert!(!args.semantic);
        assert!((args.threshold - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(args.candidates, DEFAULT_SEMANTIC_CANDIDATES);
    }

    #[test]
    fn test_keywords_requires_at_least_one() {
        assert!(Cli::try_parse_from(["fishandtips", "keywords"]).is_err());
    }

    #[test]
    fn test_social_dry_run() {
        let cli =
            Cli::try_parse_from(["fishandtips", "social", "pinterest", "walleye-jigging", "--dry-run"]).unwrap();
        let Commands::Social(args) = cli.command else {
            panic!("Expected Social command");
        };
        assert_eq!(Platform::from(args.platform), Platform::Pinterest);
        assert_eq!(args.slug, "walleye-jigging");
        assert!(args.dry_run);
    }

    #[test]
    fn test_subscribers_export_defaults_to_all() {
        let cli = Cli::try_parse_from(["fishandtips", "subscribers", "export"]).unwrap();
        let Commands::Subscribers(SubscribersCommand::Export(args)) = cli.command else {
            panic!("Expected subscribers export");
        };
        assert_eq!(args.status, StatusFilter::All);
        assert!(args.output.is_none());
    }
}
