//! Command-line surface over the cross-tool core, used for debugging
//! assistant output and inspecting retrieval behavior without the web
//! front end.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use warroom_map_bridge::parse_commands_from_response;
use warroom_navigator::{
    continue_in_suggestions, parse_action_directive, parse_navigate_command, CrossToolContext,
};
use warroom_protocol::{NavigableTool, SavedComparison};
use warroom_retriever::{DocumentRetriever, RetrievalOptions};
use warroom_store::{
    clear_comparisons, delete_comparison, save_comparison, saved_comparisons, unix_now_ms,
    FileStore,
};

#[derive(Parser)]
#[command(name = "warroom")]
#[command(about = "Cross-tool navigation and retrieval utilities", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a `navigate:` command string and print the navigation context
    ParseNav {
        /// e.g. "navigate:canvass?precincts=P001,P002&segment=high-gotv"
        command: String,
    },
    /// Print follow-up suggestions for a source tool and recorded context
    Suggest {
        /// Source tool (segments, donors, canvass, compare, political-ai)
        tool: String,
        #[arg(long, value_delimiter = ',')]
        precincts: Vec<String>,
        #[arg(long)]
        segment: Option<String>,
        #[arg(long, value_delimiter = ',')]
        zips: Vec<String>,
        #[arg(long)]
        left: Option<String>,
        #[arg(long)]
        right: Option<String>,
    },
    /// Extract `[MAP:...]` and `[ACTION:...]` directives from assistant text
    Directives {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Run the document retriever and print the system-prompt context
    Retrieve {
        /// Base path holding document-index.json and intel-index.json
        #[arg(long)]
        base: PathBuf,
        #[arg(long)]
        jurisdiction: Option<String>,
        #[arg(long, default_value_t = 3)]
        max_docs: usize,
        /// Query text
        query: Vec<String>,
    },
    /// Manage saved comparisons in a file-backed store
    Comparisons {
        /// Store file, e.g. ~/.warroom/comparisons.json
        #[arg(long)]
        store: PathBuf,
        #[command(subcommand)]
        action: ComparisonAction,
    },
}

#[derive(Subcommand)]
enum ComparisonAction {
    List,
    Save {
        #[arg(long)]
        id: String,
        #[arg(long)]
        left: String,
        #[arg(long)]
        right: String,
        #[arg(long)]
        left_name: String,
        #[arg(long)]
        right_name: String,
        #[arg(long, default_value = "precincts")]
        boundary: String,
    },
    Delete {
        id: String,
    },
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::ParseNav { command } => parse_nav(&command),
        Command::Suggest {
            tool,
            precincts,
            segment,
            zips,
            left,
            right,
        } => suggest(&tool, precincts, segment, zips, left, right),
        Command::Directives { input } => directives(&input),
        Command::Retrieve {
            base,
            jurisdiction,
            max_docs,
            query,
        } => retrieve(base, jurisdiction, max_docs, &query.join(" ")).await,
        Command::Comparisons { store, action } => comparisons(store, action),
    }
}

fn parse_nav(command: &str) -> Result<()> {
    match parse_navigate_command(command) {
        Some(context) => {
            println!("{}", serde_json::to_string_pretty(&context)?);
            Ok(())
        }
        None => bail!("not a valid navigation command: {command:?}"),
    }
}

fn suggest(
    tool: &str,
    precincts: Vec<String>,
    segment: Option<String>,
    zips: Vec<String>,
    left: Option<String>,
    right: Option<String>,
) -> Result<()> {
    let Some(tool) = NavigableTool::parse(tool) else {
        bail!("unknown tool: {tool:?}");
    };
    let context = CrossToolContext {
        segment_name: segment,
        matching_precincts: precincts.clone(),
        top_zips: zips,
        turf_precincts: precincts,
        left_entity: left,
        right_entity: right,
    };
    for suggestion in continue_in_suggestions(tool, &context) {
        println!(
            "{}",
            serde_json::json!({
                "label": suggestion.label,
                "action": suggestion.action,
                "metadata": suggestion.metadata,
            })
        );
    }
    Ok(())
}

fn directives(input: &str) -> Result<()> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?
    };

    let map_commands = parse_commands_from_response(&text);
    println!("{}", serde_json::to_string_pretty(&map_commands)?);
    if let Some((action, _stripped)) = parse_action_directive(&text) {
        println!(
            "{}",
            serde_json::json!({
                "action": action.action_type,
                "payload": action.payload,
            })
        );
    }
    Ok(())
}

async fn retrieve(
    base: PathBuf,
    jurisdiction: Option<String>,
    max_docs: usize,
    query: &str,
) -> Result<()> {
    if query.trim().is_empty() {
        bail!("empty query");
    }
    let retriever = DocumentRetriever::new(base);
    let options = RetrievalOptions {
        max_docs,
        jurisdiction,
    };
    let result = retriever.retrieve(query, &options).await;
    log::info!(
        "retrieved {} documents, {} citations, {} intel briefs",
        result.documents.len(),
        result.citations.len(),
        result.current_intel.len()
    );
    println!("{}", retriever.format_for_system_prompt(&result));
    Ok(())
}

fn comparisons(store_path: PathBuf, action: ComparisonAction) -> Result<()> {
    let store = FileStore::new(store_path);
    match action {
        ComparisonAction::List => {
            println!("{}", serde_json::to_string_pretty(&saved_comparisons(&store))?);
        }
        ComparisonAction::Save {
            id,
            left,
            right,
            left_name,
            right_name,
            boundary,
        } => {
            save_comparison(
                &store,
                SavedComparison {
                    id,
                    left_entity_id: left,
                    right_entity_id: right,
                    left_entity_name: left_name,
                    right_entity_name: right_name,
                    boundary_type: boundary,
                    saved_at_unix_ms: unix_now_ms(),
                },
            );
        }
        ComparisonAction::Delete { id } => {
            if !delete_comparison(&store, &id) {
                bail!("no saved comparison with id {id:?}");
            }
        }
        ComparisonAction::Clear => clear_comparisons(&store),
    }
    Ok(())
}
