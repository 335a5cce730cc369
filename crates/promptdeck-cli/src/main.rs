//! promptdeck CLI - Record and organize prompt snippets
//!
//! Terminal panel over a local prompt collection.

mod config;
mod render;
mod storage;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::Config;
use promptdeck::{DomainError, Prompt, PromptFilter, PromptInput, PromptStore};
use render::{format_relative, TerminalRenderer};
use storage::JsonFileStore;

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(about = "promptdeck - Record and organize prompt snippets", long_about = None)]
#[command(version)]
struct Cli {
    /// Storage file to use instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a prompt
    Add {
        /// Prompt title (will prompt if not provided)
        title: Option<String>,
        /// Prompt content (or use -f for file)
        #[arg(short, long)]
        content: Option<String>,
        /// Read content from file
        #[arg(short, long)]
        file: Option<String>,
        /// Category (defaults to "uncategorized")
        #[arg(long)]
        category: Option<String>,
        /// Groups, comma-separated (e.g., "writing, daily")
        #[arg(short, long)]
        groups: Option<String>,
    },

    /// List prompts, optionally filtered
    List {
        /// Case-insensitive text in title or content
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category
        #[arg(short, long)]
        category: Option<String>,
        /// Exact group label
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Show a prompt in full
    Show {
        /// Prompt id or unique id prefix
        id: String,
    },

    /// Replace a prompt's fields (omitted fields keep their current value)
    Edit {
        /// Prompt id or unique id prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// Read new content from file
        #[arg(short, long)]
        file: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New groups, comma-separated
        #[arg(short, long)]
        groups: Option<String>,
    },

    /// Delete a prompt
    Delete {
        /// Prompt id or unique id prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List categories in use
    Categories,

    /// List groups in use
    Groups,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set the storage file location
    SetDataFile {
        /// Path to the JSON storage file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let data_file = cli.data_file;

    match cli.command {
        Commands::Add {
            title,
            content,
            file,
            category,
            groups,
        } => cmd_add(&config, data_file, title, content, file, category, groups).await,
        Commands::List {
            search,
            category,
            group,
        } => cmd_list(&config, data_file, search, category, group).await,
        Commands::Show { id } => cmd_show(&config, data_file, id).await,
        Commands::Edit {
            id,
            title,
            content,
            file,
            category,
            groups,
        } => cmd_edit(&config, data_file, id, title, content, file, category, groups).await,
        Commands::Delete { id, yes } => cmd_delete(&config, data_file, id, yes).await,
        Commands::Categories => cmd_categories(&config, data_file).await,
        Commands::Groups => cmd_groups(&config, data_file).await,
        Commands::Config { action } => cmd_config(config, data_file, action),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn open_store(
    config: &Config,
    data_file: Option<PathBuf>,
) -> Result<PromptStore<JsonFileStore>> {
    let storage = Arc::new(JsonFileStore::new(config.resolve_data_file(data_file)?));
    let mut store = PromptStore::new(storage.clone());
    store
        .load()
        .await
        .with_context(|| format!("Failed to load prompts from {:?}", storage.path()))?;
    Ok(store)
}

fn subscribe_renderer(store: &mut PromptStore<JsonFileStore>, config: &Config) {
    store.subscribe(Arc::new(TerminalRenderer::new(config.preview_chars)));
}

/// Get content from argument or file, if either is given
fn read_content(content: Option<String>, file: Option<String>) -> Result<Option<String>> {
    match (content, file) {
        (Some(c), None) => Ok(Some(c)),
        (None, Some(f)) => fs::read_to_string(&f)
            .map(Some)
            .with_context(|| format!("Failed to read file: {}", f)),
        (Some(_), Some(_)) => bail!("Cannot specify both content and --file"),
        (None, None) => Ok(None),
    }
}

async fn cmd_add(
    config: &Config,
    data_file: Option<PathBuf>,
    title: Option<String>,
    content: Option<String>,
    file: Option<String>,
    category: Option<String>,
    groups: Option<String>,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => Input::new()
            .with_prompt("Title")
            .interact_text()
            .context("Failed to read input")?,
    };
    let content = match read_content(content, file)? {
        Some(c) => c,
        None => Input::new()
            .with_prompt("Prompt content")
            .interact_text()
            .context("Failed to read input")?,
    };

    let mut store = open_store(config, data_file).await?;
    subscribe_renderer(&mut store, config);

    let prompt = store
        .add(PromptInput {
            title,
            content,
            category,
            groups: groups.unwrap_or_default(),
        })
        .await
        .context("Failed to save prompt")?;

    println!(
        "\n{} Prompt '{}' added [{}]",
        "✓".green(),
        prompt.title.cyan(),
        prompt.category
    );

    Ok(())
}

async fn cmd_list(
    config: &Config,
    data_file: Option<PathBuf>,
    search: Option<String>,
    category: Option<String>,
    group: Option<String>,
) -> Result<()> {
    let mut store = open_store(config, data_file).await?;
    subscribe_renderer(&mut store, config);

    store.set_filter(PromptFilter {
        search: search.unwrap_or_default(),
        category: category.unwrap_or_default(),
        group: group.unwrap_or_default(),
    });

    Ok(())
}

async fn cmd_show(config: &Config, data_file: Option<PathBuf>, id: String) -> Result<()> {
    let store = open_store(config, data_file).await?;
    let id = store.resolve_id(&id)?;
    let prompt = store
        .get(id)
        .ok_or_else(|| DomainError::not_found("Prompt", id))?;

    let now = chrono::Utc::now();
    println!("{}", prompt.title.cyan().bold());
    println!("  {} {}", "Id:".dimmed(), prompt.id);
    println!("  {} {}", "Category:".dimmed(), prompt.category.yellow());
    println!(
        "  {} {}",
        "Groups:".dimmed(),
        if prompt.groups.is_empty() {
            "-".to_string()
        } else {
            prompt.groups_text()
        }
    );
    println!(
        "  {} {} ({})",
        "Created:".dimmed(),
        prompt.created_at.to_rfc3339(),
        format_relative(prompt.created_at, now)
    );
    println!(
        "  {} {} ({})",
        "Updated:".dimmed(),
        prompt.updated_at.to_rfc3339(),
        format_relative(prompt.updated_at, now)
    );
    println!("{}", "---".dimmed());
    println!("{}", prompt.content);

    Ok(())
}

/// Full replacement input where omitted fields come from the current prompt
fn edit_input(
    current: &Prompt,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    groups: Option<String>,
) -> PromptInput {
    PromptInput {
        title: title.unwrap_or_else(|| current.title.clone()),
        content: content.unwrap_or_else(|| current.content.clone()),
        category: category.or_else(|| Some(current.category.clone())),
        groups: groups.unwrap_or_else(|| current.groups_text()),
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_edit(
    config: &Config,
    data_file: Option<PathBuf>,
    id: String,
    title: Option<String>,
    content: Option<String>,
    file: Option<String>,
    category: Option<String>,
    groups: Option<String>,
) -> Result<()> {
    let content = read_content(content, file)?;

    let mut store = open_store(config, data_file).await?;
    let id = store.resolve_id(&id)?;
    let current = store
        .get(id)
        .ok_or_else(|| DomainError::not_found("Prompt", id))?;

    let input = edit_input(current, title, content, category, groups);

    subscribe_renderer(&mut store, config);
    match store.update(id, input).await.context("Failed to save prompt")? {
        Some(prompt) => println!("\n{} Prompt '{}' updated", "✓".green(), prompt.title.cyan()),
        None => bail!("Prompt '{}' not found", id),
    }

    Ok(())
}

async fn cmd_delete(
    config: &Config,
    data_file: Option<PathBuf>,
    id: String,
    yes: bool,
) -> Result<()> {
    let mut store = open_store(config, data_file).await?;
    let id = store.resolve_id(&id)?;

    let Some(prompt) = store.get(id) else {
        println!("No prompt with id {}", id);
        return Ok(());
    };
    let title = prompt.title.clone();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{}'?", title))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    subscribe_renderer(&mut store, config);
    if store.delete(id).await.context("Failed to save prompts")? {
        println!("\n{} Prompt '{}' deleted", "✓".green(), title.cyan());
    }

    Ok(())
}

async fn cmd_categories(config: &Config, data_file: Option<PathBuf>) -> Result<()> {
    let store = open_store(config, data_file).await?;
    let categories = store.categories();

    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }

    println!("{}", "Categories:".bold());
    for category in categories {
        let count = store
            .prompts()
            .iter()
            .filter(|p| p.category == category)
            .count();
        println!("  {} ({})", category.yellow(), count);
    }

    Ok(())
}

async fn cmd_groups(config: &Config, data_file: Option<PathBuf>) -> Result<()> {
    let store = open_store(config, data_file).await?;
    let groups = store.groups();

    if groups.is_empty() {
        println!("No groups yet.");
        println!("\n{}", "Tag a prompt with:".dimmed());
        println!("  promptdeck edit <id> --groups \"writing, daily\"");
        return Ok(());
    }

    println!("{}", "Groups:".bold());
    for group in groups {
        let count = store
            .prompts()
            .iter()
            .filter(|p| p.in_group(&group))
            .count();
        println!("  {} ({})", group.blue(), count);
    }

    Ok(())
}

fn cmd_config(
    mut config: Config,
    data_file: Option<PathBuf>,
    action: Option<ConfigAction>,
) -> Result<()> {
    if let Some(ConfigAction::SetDataFile { path }) = action {
        config.set_data_file(path.clone());
        config.save()?;
        println!("{} Data file set to {:?}", "✓".green(), path);
        return Ok(());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Data File: {:?}", config.resolve_data_file(data_file)?);
    println!("  Preview Chars: {}", config.preview_chars);

    Ok(())
}
