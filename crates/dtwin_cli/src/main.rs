//! dTwin Search CLI
//!
//! Compiles search intent into the canonical backend payload and exposes the
//! other built-in tools. The payload goes to stdout, diagnostics to stderr.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use dtwin_core::EnumRegistry;
use dtwin_tool::adapter::builtin::{ABOUT_TOOL, SEARCH_TOOL};
use dtwin_tool::{HostAdapter, SearchPolicy, ToolOutput, ToolRegistry};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dtwin")]
#[command(about = "dTwin search payload compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a search request into the backend payload
    Search {
        /// Path to a JSON request file
        #[arg(short, long, conflicts_with = "json")]
        file: Option<PathBuf>,
        /// Inline JSON request
        #[arg(short, long)]
        json: Option<String>,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the dTwin overview
    About {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// List available tools
    Tools {
        /// Print full schemas as JSON
        #[arg(long)]
        schema: bool,
    },
}

/// Gating rule configuration; flags only ever switch rules on
#[derive(Args, Debug, Default)]
struct PolicyArgs {
    /// JSON policy file
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Reject requests with more than one parameter
    #[arg(long)]
    single_filter: bool,
    /// Reject Property parameters without both key and value
    #[arg(long)]
    require_property_value: bool,
    /// Reject EntityType parameters unless the prompt names a type
    #[arg(long)]
    require_entity_type_mention: bool,
}

impl PolicyArgs {
    fn resolve(&self) -> Result<SearchPolicy> {
        let base = match &self.policy {
            Some(path) => load_policy(path)?,
            None => SearchPolicy::default(),
        };
        Ok(SearchPolicy {
            enforce_single_filter: base.enforce_single_filter || self.single_filter,
            require_property_value: base.require_property_value || self.require_property_value,
            require_entity_type_explicit_mention: base.require_entity_type_explicit_mention
                || self.require_entity_type_mention,
        })
    }
}

fn load_policy(path: &Path) -> Result<SearchPolicy> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading policy file {}", path.display()))?;
    let policy: SearchPolicy = serde_json::from_str(&text)
        .wrap_err_with(|| format!("parsing policy file {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?policy, "loaded policy");
    Ok(policy)
}

fn read_request(file: Option<&Path>, json: Option<&str>) -> Result<Vec<u8>> {
    if let Some(json) = json {
        return Ok(json.as_bytes().to_vec());
    }
    if let Some(path) = file {
        return std::fs::read(path).wrap_err_with(|| format!("reading {}", path.display()));
    }
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .wrap_err("reading request from stdin")?;
    Ok(buffer)
}

fn host(policy: SearchPolicy) -> HostAdapter {
    let registry = Arc::new(EnumRegistry::standard());
    HostAdapter::new(Arc::new(ToolRegistry::with_builtins(registry, policy)))
}

fn render(output: &ToolOutput, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(&output.data)?
    } else {
        serde_json::to_string(&output.data)?
    };
    Ok(text)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dtwin=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            file,
            json,
            policy,
            pretty,
        } => {
            let policy = policy.resolve()?;
            let input = read_request(file.as_deref(), json.as_deref())?;
            let output = host(policy).execute_json(SEARCH_TOOL, &input)?;
            println!("{}", render(&output, pretty)?);
            Ok(())
        }
        Commands::About { pretty } => {
            let output = host(SearchPolicy::default()).execute_json(ABOUT_TOOL, b"")?;
            println!("{}", render(&output, pretty)?);
            Ok(())
        }
        Commands::Tools { schema } => {
            let adapter = host(SearchPolicy::default());
            if schema {
                println!("{}", serde_json::to_string_pretty(&adapter.describe_tools())?);
            } else {
                for tool in adapter.describe_tools() {
                    let summary = tool.description.split(". ").next().unwrap_or_default();
                    println!("{}\t{}\t{}", tool.name, tool.version, summary);
                }
            }
            Ok(())
        }
    }
}
