//! Docsum CLI - document summarisation client
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use docsum::config::SummaryLength;
use docsum::{driver, logging, ui, Config, Msg, Route, SelectedFile, SummarizerClient, SummarizerState};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docsum")]
#[command(author, version, about = "TUI for document summarisation", long_about = None)]
struct Cli {
    /// Path to a config file (default: ./docsum.toml, then ~/.config/docsum/docsum.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Route the TUI opens on
    #[arg(long, default_value = "/")]
    start: Route,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a document without the TUI
    Summarize {
        /// PDF or image to upload (prompted for when omitted)
        file: Option<PathBuf>,
        /// Summary length hint for the backend
        #[arg(long, value_enum)]
        length: Option<SummaryLength>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "docsum", &mut std::io::stdout());
        }
        Some(Commands::Summarize { file, length, json }) => {
            let mut config = load_config(cli.config.as_ref())?;
            logging::init_stderr(&config.logging)?;
            if length.is_some() {
                config.backend.length = length;
            }
            summarize(&config, file, json).await?;
        }
        None => {
            let config = load_config(cli.config.as_ref())?;
            let (_guard, log_path) = logging::init_file(&config.logging)?;
            tracing::info!(log = %log_path.display(), backend = %config.backend.url, "starting");
            ui::run(&config, cli.start).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    })
}

async fn summarize(config: &Config, file: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let path = match file {
        Some(path) => path,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Document to summarize (PDF, PNG, JPEG)")
            .interact_text()?
            .into(),
    };

    let file = SelectedFile::open(&path)?;
    if !file.matches_accept_filter() {
        eprintln!(
            "{} {} is not a PDF, PNG or JPEG; uploading anyway",
            "warning:".yellow().bold(),
            file.name()
        );
    }

    let client = Arc::new(SummarizerClient::new(&config.backend)?);
    if !json {
        eprintln!("Uploading {} to {}", file.name(), client.endpoint());
    }

    let mut state = SummarizerState::new(config.progress.clone());
    state.update(Msg::FileSelected(file));

    driver::run_cycle(&mut state, client, config.progress.clone(), |state| {
        if !json && state.is_loading() {
            eprint!("\rProcessing... {}%", state.progress());
            let _ = std::io::stderr().flush();
        }
    })
    .await;
    if !json {
        eprintln!();
    }

    if state.has_error() {
        if json {
            println!("{}", serde_json::json!({ "error": state.error_message() }));
        }
        anyhow::bail!("{}", state.error_message());
    }

    if json {
        let output = serde_json::json!({
            "summary": state.summary_text(),
            "model_used": state.model_used(),
            "completed_at": state.completed_at().map(|at| at.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n{}\n", "=== Summary ===".bold());
        println!("{}\n", state.summary_text());
        println!("{} {}", "Model Used:".bold(), state.model_label().cyan());
    }

    Ok(())
}
