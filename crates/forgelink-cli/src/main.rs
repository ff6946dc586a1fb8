//! Forgelink CLI - hosting resolution, web URLs, and pipeline logs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio_util::io::ReaderStream;
use tracing_subscriber::EnvFilter;

use forgelink_core::{Config, ProviderFamily};
use forgelink_hosting::ResolvedHost;
use forgelink_pipeline::LogSegmenter;
use forgelink_vcs::Backend;

#[derive(Parser)]
#[command(name = "forgelink")]
#[command(author, version, about = "Forgelink - hosted-repo integration tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository working directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure hosting endpoints
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Resolve the repository's hosting provider
    Host,

    /// Build a web URL on the resolved host
    Url {
        #[command(subcommand)]
        command: UrlCommands,
    },

    /// Read a pipeline log and print its per-command segments
    Log {
        /// Stream the log from a URL
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Stream the log from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print segments as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Add a hosting endpoint at the lowest priority
    Add {
        /// Provider family: cloud or server
        #[arg(long, value_parser = parse_family)]
        family: ProviderFamily,

        /// Host matched against remote URLs
        #[arg(long)]
        match_host: String,

        /// Host used in web URLs (defaults to the match host)
        #[arg(long)]
        display_host: Option<String>,
    },

    /// Show configured endpoints
    Show,
}

#[derive(Subcommand)]
enum UrlCommands {
    /// URL of one file's change within a commit
    Changeset {
        /// Revision; defaults to the checked out revision
        #[arg(long)]
        revision: Option<String>,

        /// Repository-relative file path
        #[arg(long)]
        path: String,
    },

    /// URL of a source file at a revision
    Source {
        /// Revision; defaults to the checked out revision
        #[arg(long)]
        revision: Option<String>,

        /// Repository-relative file path
        #[arg(long)]
        path: String,

        /// Line range as start:end, repeatable
        #[arg(long = "lines")]
        lines: Vec<String>,
    },

    /// URL of one file's diff within a review request
    Review {
        /// Review request id
        #[arg(long)]
        id: u64,

        /// Repository-relative file path
        #[arg(long)]
        path: String,
    },
}

fn parse_family(s: &str) -> Result<ProviderFamily, String> {
    match s {
        "cloud" => Ok(ProviderFamily::Cloud),
        "server" => Ok(ProviderFamily::Server),
        other => Err(format!("unknown provider family '{other}' (expected cloud or server)")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Add {
                family,
                match_host,
                display_host,
            } => {
                let mut config = Config::load()?;
                config.add_endpoint(family, match_host, display_host);
                config.save()?;
                println!("Added endpoint ({} configured)", config.endpoints.len());
            }
            ConfigCommands::Show => {
                let config = Config::load()?;
                if !config.has_endpoints() {
                    println!("No endpoints configured");
                }
                for ep in &config.endpoints {
                    let ep = ep.to_endpoint();
                    println!("{:<8} {:<32} {}", ep.family.label(), ep.match_host, ep.display_host);
                }
            }
        },
        Some(Commands::Host) => {
            let host = resolve_host(&cli.dir).await?;
            println!("{} {} {}", host.name(), host.display_host(), host.repo_path());
        }
        Some(Commands::Url { command }) => {
            let backend = Backend::git(&cli.dir);
            let host = resolve_host(&cli.dir).await?;
            match command {
                UrlCommands::Changeset { revision, path } => {
                    let revision = resolve_revision(&backend, revision).await?;
                    println!("{}", host.changeset_url(&revision, &path));
                }
                UrlCommands::Source {
                    revision,
                    path,
                    lines,
                } => {
                    let revision = resolve_revision(&backend, revision).await?;
                    println!("{}", host.source_url(&revision, &path, &lines));
                }
                UrlCommands::Review { id, path } => {
                    println!("{}", host.review_request_url(id, &path));
                }
            }
        }
        Some(Commands::Log { url, file, json }) => {
            let segmenter = match (url, file) {
                (Some(url), None) => attach_http(&url).await?,
                (None, Some(path)) => attach_file(&path).await?,
                _ => anyhow::bail!("pass exactly one of --url or --file"),
            };

            let segments = segmenter.logs().await;
            tracing::debug!(count = segments.len(), "log segmented");

            if json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else if segments.is_empty() {
                println!("No command segments found");
            } else {
                for (index, segment) in segments.iter().enumerate() {
                    if index > 0 {
                        println!("----------------------------------------");
                    }
                    print!("{segment}");
                }
            }
        }
        None => {
            println!("Forgelink - hosted-repo integration tools");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}

/// Resolve the repository at `dir` against the configured endpoints.
async fn resolve_host(dir: &Path) -> anyhow::Result<ResolvedHost> {
    let config = Config::load()?;
    let backend = Backend::git(dir);
    let remotes = backend.remotes().await?;
    let host = forgelink_hosting::resolve(&remotes, &config.resolver_endpoints())?;
    tracing::debug!(name = host.name(), path = host.repo_path(), "resolved host");
    Ok(host)
}

/// Explicit revision, or the backend's checked out revision.
async fn resolve_revision(backend: &Backend, revision: Option<String>) -> anyhow::Result<String> {
    match revision {
        Some(rev) => Ok(rev),
        None => Ok(backend.head_revision().await?),
    }
}

async fn attach_http(url: &str) -> anyhow::Result<LogSegmenter> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(LogSegmenter::attach(response.bytes_stream()))
}

async fn attach_file(path: &Path) -> anyhow::Result<LogSegmenter> {
    let file = tokio::fs::File::open(path).await?;
    Ok(LogSegmenter::attach(ReaderStream::new(file)))
}
