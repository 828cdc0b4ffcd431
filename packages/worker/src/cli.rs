//! Command-line interface for the worker.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use console::style;
use softhyphen_engine::{
    detect_language, format_confidence, HeuristicDetector, LanguageRegistry, OutputEncoding,
};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::{AdminAuth, AdminSession};
use crate::cache::RuleCache;
use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};
use crate::rule_file::RuleFile;
use crate::store::{RuleSource, RuleStore};
use crate::worker::{handle_request, spawn_worker, WorkerRequest, WorkerResponse, AUTO_LANGUAGE};

/// Soft hyphen worker - insert soft hyphens into text and HTML.
#[derive(Parser)]
#[command(name = "softhyphen-worker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON rule file (overrides SOFTHYPHEN_RULES_PATH)
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Rule cache freshness in seconds (overrides SOFTHYPHEN_RULE_CACHE_TTL_SECS)
    #[arg(long, global = true)]
    pub cache_ttl_secs: Option<u64>,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read JSON requests from stdin and write JSON responses to stdout, one per line.
    Serve,

    /// Hyphenate a text once and print the output.
    Hyphenate {
        /// Text to hyphenate (default: read stdin)
        text: Option<String>,

        /// Language id, or `auto` to detect
        #[arg(short, long, default_value = AUTO_LANGUAGE)]
        language: String,

        /// Output encoding: `html` (&shy;) or `unicode` (U+00AD)
        #[arg(short, long, default_value = "html")]
        encoding: OutputEncoding,

        /// Treat the text as HTML
        #[arg(long)]
        html: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect whether a text is German or English.
    Detect {
        text: String,
    },

    /// List the available language packs.
    Languages,

    /// Manage custom hyphenations and exclusions in the rule file.
    #[command(subcommand)]
    Rules(RuleCommands),
}

#[derive(Subcommand)]
pub enum RuleCommands {
    /// List custom rules and exclusions.
    List,

    /// Add a custom hyphenation, e.g. `Ladungs&shy;sicherung`.
    Add {
        word: String,
        hyphenated: String,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Replace an existing custom rule.
    Update {
        id: Uuid,
        word: String,
        hyphenated: String,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Remove custom rules by id.
    Remove {
        #[arg(required = true)]
        ids: Vec<Uuid>,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Never hyphenate these words.
    Exclude {
        #[arg(required = true)]
        words: Vec<String>,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Remove exclusions by id.
    Unexclude {
        #[arg(required = true)]
        ids: Vec<Uuid>,
        #[command(flatten)]
        admin: AdminArgs,
    },
}

#[derive(Args)]
pub struct AdminArgs {
    /// Admin password
    #[arg(long, env = "SOFTHYPHEN_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

impl Cli {
    /// Apply command-line overrides on top of the environment.
    pub fn apply(&self, mut config: WorkerConfig) -> WorkerConfig {
        if let Some(path) = &self.rules {
            config = config.with_rules_path(path);
        }
        if let Some(secs) = self.cache_ttl_secs {
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }
        config
    }
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(WorkerConfig::from_env()?);
    let registry = LanguageRegistry::global();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, registry).await,
        Commands::Hyphenate {
            text,
            language,
            encoding,
            html,
            json,
        } => {
            let request = WorkerRequest::new(read_text(text).await?)
                .with_language(language)
                .with_encoding(encoding)
                .with_html_mode(html);
            hyphenate_command(&config, &registry, request, json).await
        }
        Commands::Detect { text } => {
            let detection = detect_language(&text);
            println!(
                "{} ({})",
                style(&detection.language).bold(),
                format_confidence(detection.confidence)
            );
            Ok(())
        }
        Commands::Languages => {
            for pack in registry.all() {
                println!(
                    "{}  {} (min word length {})",
                    style(pack.id()).bold(),
                    pack.display_name(),
                    pack.min_word_length()
                );
            }
            Ok(())
        }
        Commands::Rules(command) => rules_command(&config, command).await,
    }
}

fn rule_source(config: &WorkerConfig) -> Arc<dyn RuleSource> {
    match &config.rules_path {
        Some(path) => Arc::new(RuleFile::new(path)),
        None => Arc::new(RuleStore::new()),
    }
}

async fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            Ok(buffer)
        }
    }
}

/// Line-delimited JSON over stdio. Responses are written in completion order.
async fn serve(config: &WorkerConfig, registry: Arc<LanguageRegistry>) -> Result<()> {
    let (handle, mut responses) = spawn_worker(config, registry, rule_source(config));
    // Answers to unparseable lines bypass the worker
    let (rejected_tx, mut rejected) =
        mpsc::channel::<WorkerResponse>(config.queue_capacity.max(1));

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        loop {
            let response = tokio::select! {
                Some(response) = responses.recv() => response,
                Some(response) = rejected.recv() => response,
                else => break,
            };
            let mut line = serde_json::to_string(&response)?;
            line.push('\n');
            stdout.write_all(line.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<(), WorkerError>(())
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<WorkerRequest>(&line) {
            Ok(request) => {
                handle.submit(request).await?;
            }
            Err(e) => match WorkerResponse::for_malformed(&line, &e) {
                Some(response) => {
                    tracing::warn!(id = %response.id, error = %e, "answering malformed request");
                    rejected_tx
                        .send(response)
                        .await
                        .map_err(|_| WorkerError::ChannelClosed)?;
                }
                None => tracing::warn!(error = %e, "ignoring malformed request without id"),
            },
        }
    }

    // End of input: let queued requests finish, then both channels close
    drop(rejected_tx);
    drop(handle);
    writer
        .await
        .map_err(|e| WorkerError::Panicked(e.to_string()))?
}

async fn hyphenate_command(
    config: &WorkerConfig,
    registry: &LanguageRegistry,
    request: WorkerRequest,
    json: bool,
) -> Result<()> {
    let cache = RuleCache::new(config.cache_ttl);
    cache.force_refresh(rule_source(config).as_ref()).await;

    let response = handle_request(
        &request,
        registry,
        cache.snapshot().as_ref(),
        &HeuristicDetector,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.result.output);
    }

    if let Some(error) = &response.error {
        eprintln!("{} {error}", style("Warning:").yellow().bold());
    }
    Ok(())
}

async fn rules_command(config: &WorkerConfig, command: RuleCommands) -> Result<()> {
    let path = config.rules_path.as_ref().ok_or_else(|| {
        WorkerError::Config("no rule file configured (use --rules or SOFTHYPHEN_RULES_PATH)".into())
    })?;
    let file = RuleFile::new(path);
    let store = RuleStore::from_rule_set(file.load().await?);
    let auth = AdminAuth::from_config(config);

    match command {
        RuleCommands::List => {
            for rule in store.custom_rules().await {
                println!(
                    "{}  {}  {}",
                    style(rule.id).dim(),
                    style(&rule.word).bold(),
                    rule.hyphenated
                );
            }
            for exclusion in store.exclusions().await {
                println!(
                    "{}  {}  {}",
                    style(exclusion.id).dim(),
                    style(&exclusion.word).bold(),
                    style("(excluded)").dim()
                );
            }
            return Ok(());
        }
        RuleCommands::Add {
            word,
            hyphenated,
            admin,
        } => {
            let session = login(&auth, &admin)?;
            let rule = store.add_custom_rule(&session, &word, &hyphenated).await?;
            println!("{} {}", style("Added").green().bold(), rule.id);
        }
        RuleCommands::Update {
            id,
            word,
            hyphenated,
            admin,
        } => {
            let session = login(&auth, &admin)?;
            store
                .update_custom_rule(&session, id, &word, &hyphenated)
                .await?;
            println!("{} {id}", style("Updated").green().bold());
        }
        RuleCommands::Remove { ids, admin } => {
            let session = login(&auth, &admin)?;
            let removed = store.remove_custom_rules(&session, &ids).await;
            println!("{} {removed} custom rule(s)", style("Removed").green().bold());
        }
        RuleCommands::Exclude { words, admin } => {
            let session = login(&auth, &admin)?;
            let outcome = store.add_exclusions(&session, &words).await;
            println!(
                "{} {} exclusion(s), {} duplicate(s)",
                style("Added").green().bold(),
                outcome.added,
                outcome.duplicates
            );
        }
        RuleCommands::Unexclude { ids, admin } => {
            let session = login(&auth, &admin)?;
            let removed = store.remove_exclusions(&session, &ids).await;
            println!("{} {removed} exclusion(s)", style("Removed").green().bold());
        }
    }

    file.save(&store.rule_set().await).await
}

fn login(auth: &AdminAuth, admin: &AdminArgs) -> Result<AdminSession> {
    auth.login(&admin.password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["softhyphen-worker"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_hyphenate() {
        let cli = Cli::try_parse_from([
            "softhyphen-worker",
            "hyphenate",
            "Ladungssicherung",
            "--language",
            "de",
            "--encoding",
            "unicode",
            "--html",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Hyphenate {
                text,
                language,
                encoding,
                html,
                json,
            }) => {
                assert_eq!(text.as_deref(), Some("Ladungssicherung"));
                assert_eq!(language, "de");
                assert_eq!(encoding, OutputEncoding::Unicode);
                assert!(html);
                assert!(!json);
            }
            _ => unreachable!("expected hyphenate command"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "softhyphen-worker",
            "--rules",
            "rules.json",
            "--cache-ttl-secs",
            "10",
            "languages",
        ])
        .unwrap();

        let config = cli.apply(WorkerConfig::new());
        assert_eq!(config.rules_path, Some(PathBuf::from("rules.json")));
        assert_eq!(config.cache_ttl, Duration::from_secs(10));
    }

    #[test]
    fn test_parse_exclude() {
        let cli = Cli::try_parse_from([
            "softhyphen-worker",
            "rules",
            "exclude",
            "Zucker",
            "NATO",
            "--password",
            "secret",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Rules(RuleCommands::Exclude { ref words, .. })) if words.len() == 2
        ));
    }
}
