//! Monok CLI - Command-line tools for context pruning and session recall

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use monok_core::prelude::*;
use monok_core::sessions::DEFAULT_RECENT_LIMIT;

#[derive(Parser)]
#[command(name = "monok")]
#[command(about = "Monok memory engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to monok.toml plus MONOK_* variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the storage root
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prune a JSON message array down to the configured budget
    Prune {
        /// Message file ("-" or omitted reads stdin)
        input: Option<PathBuf>,
    },
    /// Check whether a summary is due for a JSON message array
    Trigger {
        /// Message file ("-" or omitted reads stdin)
        input: Option<PathBuf>,
    },
    /// Print the auto-summary instruction
    Prompt {
        /// Exchange count to mention (defaults to the summary threshold)
        #[arg(short, long)]
        exchanges: Option<usize>,
    },
    /// Extract session topics from text
    Topics {
        text: String,
    },
    /// Session summary log
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Observations about the user
    Insights {
        #[command(subcommand)]
        command: InsightCommands,
    },
    /// Self-improvement learnings
    Learnings {
        #[command(subcommand)]
        command: LearningCommands,
    },
    /// Tagged memories
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Follow-up items to raise in later sessions
    Pending {
        #[command(subcommand)]
        command: PendingCommands,
    },
    /// Version information
    Version,
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Save a session summary (skipped if it repeats a recent one)
    Save {
        #[arg(short, long)]
        identity: String,
        #[arg(short, long)]
        summary: String,
        #[arg(short, long, default_value_t = 0)]
        message_count: usize,
        /// Conversation text used for topic extraction
        #[arg(long)]
        conversation: Option<PathBuf>,
    },
    /// Show the most recent summaries
    Recent {
        #[arg(short, long)]
        identity: String,
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum InsightCommands {
    /// Record or reinforce an insight
    Record {
        #[arg(short, long)]
        identity: String,
        #[arg(long)]
        category: InsightCategory,
        insight: String,
        #[arg(long)]
        confidence: Option<InsightConfidence>,
    },
    /// Print the prompt context built from reliable insights
    Show {
        #[arg(short, long)]
        identity: String,
    },
}

#[derive(Subcommand)]
enum LearningCommands {
    /// Record or promote a learning
    Record {
        #[arg(short, long)]
        identity: String,
        #[arg(long)]
        category: LearningCategory,
        learning: String,
        /// What prompted this learning
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        confidence: Option<LearningConfidence>,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    /// File a memory summary under one or more tags
    Add {
        #[arg(short, long)]
        identity: String,
        /// Tag to file under (repeatable)
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,
        summary: String,
        #[arg(long, default_value_t = Importance::Medium)]
        importance: Importance,
    },
    /// Find memories by tag
    Search {
        #[arg(short, long)]
        identity: String,
        tag: String,
    },
}

#[derive(Subcommand)]
enum PendingCommands {
    /// Start tracking an item
    Track {
        #[arg(short, long)]
        identity: String,
        item: String,
        #[arg(long)]
        context: Option<String>,
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// Mark an item resolved
    Resolve {
        #[arg(short, long)]
        identity: String,
        id: u64,
        /// How it was resolved
        #[arg(long)]
        resolution: Option<String>,
    },
    /// List tracked items
    List {
        #[arg(short, long)]
        identity: String,
        /// Include resolved items
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("monok {}", env!("CARGO_PKG_VERSION"));
        println!("monok-core {}", monok_core::VERSION);
        return Ok(());
    }

    let config = load_config(cli.config.as_deref(), cli.base_path)?;
    let engine = MemoryEngine::open(config)?;

    match cli.command {
        Commands::Prune { input } => {
            let messages = read_messages(input.as_deref())?;
            print_json(&engine.prune_messages(&messages))?;
        }
        Commands::Trigger { input } => {
            let messages = read_messages(input.as_deref())?;
            print_json(&serde_json::json!({
                "trigger": engine.should_trigger_summary(&messages),
            }))?;
        }
        Commands::Prompt { exchanges } => {
            let prompt = match exchanges {
                Some(count) => auto_summary_prompt(count),
                None => engine.auto_summary_prompt(),
            };
            println!("{}", prompt);
        }
        Commands::Topics { text } => {
            print_json(&extract_topics(&text))?;
        }
        Commands::Sessions { command } => match command {
            SessionCommands::Save {
                identity,
                summary,
                message_count,
                conversation,
            } => {
                let conversation_text = match conversation {
                    Some(path) => read_input(Some(path.as_path()))?,
                    None => String::new(),
                };
                let outcome = engine
                    .save_session_summary(&identity, &summary, message_count, &conversation_text)
                    .await?;
                print_json(&outcome)?;
            }
            SessionCommands::Recent { identity, limit } => {
                print_json(&engine.recent_session_summaries(&identity, limit).await?)?;
            }
        },
        Commands::Insights { command } => match command {
            InsightCommands::Record {
                identity,
                category,
                insight,
                confidence,
            } => {
                let outcome = engine
                    .record_insight(&identity, category, &insight, confidence)
                    .await?;
                print_json(&outcome)?;
            }
            InsightCommands::Show { identity } => {
                match engine.user_insights_context(&identity).await? {
                    Some(context) => println!("{}", context),
                    None => tracing::info!(identity = %identity, "no established insights yet"),
                }
            }
        },
        Commands::Learnings { command } => match command {
            LearningCommands::Record {
                identity,
                category,
                learning,
                context,
                confidence,
            } => {
                let mut new = NewLearning::new(category, &learning);
                if let Some(context) = context.as_deref() {
                    new = new.with_context(context);
                }
                if let Some(confidence) = confidence {
                    new = new.with_confidence(confidence);
                }
                print_json(&engine.record_learning(&identity, new).await?)?;
            }
        },
        Commands::Tags { command } => match command {
            TagCommands::Add {
                identity,
                tags,
                summary,
                importance,
            } => {
                let entry = engine
                    .tag_memory(&identity, tags.as_slice(), &summary, importance)
                    .await?;
                print_json(&entry)?;
            }
            TagCommands::Search { identity, tag } => {
                print_json(&engine.search_by_tag(&identity, &tag).await?)?;
            }
        },
        Commands::Pending { command } => match command {
            PendingCommands::Track {
                identity,
                item,
                context,
                priority,
            } => {
                let tracked = engine
                    .track_pending_item(&identity, &item, context.as_deref(), priority)
                    .await?;
                print_json(&tracked)?;
            }
            PendingCommands::Resolve {
                identity,
                id,
                resolution,
            } => {
                let resolved = engine
                    .resolve_pending_item(&identity, id, resolution.as_deref())
                    .await?;
                print_json(&resolved)?;
            }
            PendingCommands::List { identity, all } => {
                let pending = engine.pending_items(&identity).await?;
                if all {
                    print_json(&pending.items)?;
                } else {
                    print_json(&pending.unresolved().collect::<Vec<_>>())?;
                }
            }
        },
        Commands::Version => unreachable!("handled before loading configuration"),
    }

    Ok(())
}

fn load_config(path: Option<&Path>, base_path: Option<PathBuf>) -> Result<MonokConfig> {
    let mut config = match path {
        Some(path) => MonokConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MonokConfig::load()?,
    };
    if let Some(base_path) = base_path {
        config = config.with_base_path(base_path);
    }
    Ok(config)
}

/// Read a file, or stdin for `None` / `-`
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

fn read_messages(path: Option<&Path>) -> Result<Vec<Message>> {
    let raw = read_input(path)?;
    parse_messages(&raw)
}

fn parse_messages(raw: &str) -> Result<Vec<Message>> {
    serde_json::from_str(raw).context("expected a JSON array of {role, content} messages")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insight_record() {
        let cli = Cli::try_parse_from([
            "monok",
            "insights",
            "record",
            "--identity",
            "u1",
            "--category",
            "work_patterns",
            "Works late",
            "--confidence",
            "pattern_emerging",
        ])
        .unwrap();

        match cli.command {
            Commands::Insights {
                command:
                    InsightCommands::Record {
                        category,
                        confidence,
                        ..
                    },
            } => {
                assert_eq!(category, InsightCategory::WorkPatterns);
                assert_eq!(confidence, Some(InsightConfidence::PatternEmerging));
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = Cli::try_parse_from([
            "monok",
            "learnings",
            "record",
            "--identity",
            "u1",
            "--category",
            "vibes",
            "something",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_tag_add() {
        let cli = Cli::try_parse_from([
            "monok", "tags", "add", "-i", "u1", "--tag", "work", "--tag", "travel", "Trip to Oslo",
            "--importance", "critical",
        ])
        .unwrap();

        match cli.command {
            Commands::Tags {
                command: TagCommands::Add { tags, importance, .. },
            } => {
                assert_eq!(tags, vec!["work", "travel"]);
                assert_eq!(importance, Importance::Critical);
            }
            _ => panic!("unexpected command"),
        }

        let missing_tag = Cli::try_parse_from(["monok", "tags", "add", "-i", "u1", "Trip"]);
        assert!(missing_tag.is_err());
    }

    #[test]
    fn test_pending_priority_defaults_to_medium() {
        let cli = Cli::try_parse_from(["monok", "pending", "track", "-i", "u1", "Call the bank"])
            .unwrap();
        match cli.command {
            Commands::Pending {
                command: PendingCommands::Track { priority, context, .. },
            } => {
                assert_eq!(priority, Priority::Medium);
                assert!(context.is_none());
            }
            _ => panic!("unexpected command"),
        }

        let bad = Cli::try_parse_from([
            "monok", "pending", "track", "-i", "u1", "x", "--priority", "critical",
        ]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_messages() {
        let messages = parse_messages(
            r#"[
                {"role": "system", "content": "rules"},
                {"role": "user", "content": "hi", "timestamp": 1700000000000},
                {"role": "assistant", "content": [{"type": "text", "text": "hello"}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(messages.len(), 3);
        assert!(messages[0].is_system());
        assert!(messages[2].content.as_text().is_none());
        assert!(parse_messages("{}").is_err());
    }
}
