//! Command-line client for Markpress.
//!
//! Renders markdown to press-ready styled HTML offline, copies it to the
//! clipboard for pasting into a rich-text host, and talks to the remote
//! article API for list/get/new/push.

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use markpress_client::{AuthSession, DocumentStore, HttpDocumentStore};
use markpress_core::models::DocumentDraft;
use markpress_core::{Config, RenderInput, RenderPipeline, StyleOptions, DEFAULT_TITLE};
use markpress_editor::{export_artifact, SystemClipboard};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "markpress", about = "Markdown article press tool", version)]
struct Cli {
    /// Server base URL (can also be set via MARKPRESS_SERVER env var)
    #[arg(short, long, env = "MARKPRESS_SERVER")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Render a markdown file to styled HTML
    Render {
        file: PathBuf,
        #[arg(short, long, default_value = "default")]
        template: String,
        #[arg(long, default_value = "github")]
        code_theme: String,
        /// Style override as PROP:VALUE, repeatable
        #[arg(long = "style", value_name = "PROP:VALUE")]
        styles: Vec<String>,
        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a markdown file and copy it to the clipboard as rich content
    Copy {
        file: PathBuf,
        #[arg(short, long, default_value = "default")]
        template: String,
        #[arg(long, default_value = "github")]
        code_theme: String,
        #[arg(long = "style", value_name = "PROP:VALUE")]
        styles: Vec<String>,
    },
    /// List your articles
    List,
    /// Print an article's markdown source
    Get { id: i64 },
    /// Create an article from a markdown file
    New {
        file: PathBuf,
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Update an existing article from a markdown file
    Push {
        id: i64,
        file: PathBuf,
        #[arg(short, long)]
        title: Option<String>,
    },
}

fn parse_style_overrides(raw: &[String]) -> Result<StyleOptions> {
    let mut options = StyleOptions::new();
    for entry in raw {
        let Some((property, value)) = entry.split_once(':') else {
            bail!("invalid style override '{}': expected PROP:VALUE", entry);
        };
        options.set(property.trim(), value.trim());
    }
    Ok(options)
}

fn render_file(
    file: &Path,
    template: &str,
    code_theme: &str,
    styles: &[String],
) -> Result<std::sync::Arc<markpress_core::RenderedArtifact>> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let options = parse_style_overrides(styles)?;
    let mut pipeline = RenderPipeline::new();
    Ok(pipeline.render(&RenderInput {
        source: &source,
        template_id: template,
        style_options: &options,
        code_theme_id: code_theme,
    }))
}

fn title_for(title: Option<String>, file: &Path) -> String {
    title
        .or_else(|| {
            file.file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn config_for(server: Option<String>) -> Config {
    let mut config = Config::from_env();
    if let Some(server) = server {
        config.server_url = server.trim_end_matches('/').to_string();
    }
    config
}

fn store_for(config: &Config) -> Result<HttpDocumentStore> {
    let auth = AuthSession::from_env();
    if !auth.is_authenticated() {
        bail!("not signed in: set MARKPRESS_TOKEN to use remote commands");
    }
    HttpDocumentStore::new(config, auth).context("building API client")
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config_for(cli.server.clone());

    match cli.command {
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "markpress", &mut io::stdout());
        }
        Commands::Render {
            file,
            template,
            code_theme,
            styles,
            output,
        } => {
            let artifact = render_file(&file, &template, &code_theme, &styles)?;
            match output {
                Some(path) => fs::write(&path, &artifact.html)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", artifact.html),
            }
            eprintln!("{} words, {}", artifact.word_count, artifact.reading_time);
        }
        Commands::Copy {
            file,
            template,
            code_theme,
            styles,
        } => {
            let artifact = render_file(&file, &template, &code_theme, &styles)?;
            let mut clipboard = SystemClipboard::new();
            if !export_artifact(&artifact, &mut clipboard) {
                bail!("copy failed: nothing rendered or clipboard unavailable");
            }
            eprintln!(
                "copied {} words of styled content to the clipboard",
                artifact.word_count
            );
        }
        Commands::List => {
            let store = store_for(&config)?;
            let items = store.list().context("listing articles")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in items {
                    println!("{:<8} {:<40} {}", item.id, item.title, item.updated_at);
                }
            }
        }
        Commands::Get { id } => {
            let store = store_for(&config)?;
            let document = store
                .fetch(id)
                .with_context(|| format!("fetching article {}", id))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                println!("{}", document.content);
            }
        }
        Commands::New { file, title } => {
            let store = store_for(&config)?;
            let content = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let draft = DocumentDraft {
                title: title_for(title, &file),
                content,
            };
            let document = store.create(&draft).context("creating article")?;
            println!("created article {} ({})", document.id, document.title);
        }
        Commands::Push { id, file, title } => {
            let store = store_for(&config)?;
            let content = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let draft = DocumentDraft {
                title: title_for(title, &file),
                content,
            };
            let document = store
                .update(id, &draft)
                .with_context(|| format!("updating article {}", id))?;
            println!("updated article {} ({})", document.id, document.title);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_style_overrides, title_for};
    use std::path::Path;

    #[test]
    fn style_overrides_parse_prop_value_pairs() {
        let options =
            parse_style_overrides(&["font-size: 18px".to_string(), "color:#333".to_string()])
                .expect("parse");
        assert_eq!(options.apply_to(""), "color:#333;font-size:18px");
    }

    #[test]
    fn malformed_style_override_is_rejected() {
        assert!(parse_style_overrides(&["font-size=18px".to_string()]).is_err());
    }

    #[test]
    fn render_file_produces_styled_html() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sample.md");
        std::fs::write(&path, "# Hello\n\nworld\n").expect("write sample");

        let artifact = super::render_file(&path, "default", "github", &[]).expect("render");
        assert!(artifact.html.contains("<h1"));
        assert_eq!(artifact.word_count, 2);
    }

    #[test]
    fn title_falls_back_to_the_file_stem() {
        assert_eq!(
            title_for(None, Path::new("notes/weekly-update.md")),
            "weekly-update"
        );
        assert_eq!(
            title_for(Some("Custom".to_string()), Path::new("a.md")),
            "Custom"
        );
    }
}
