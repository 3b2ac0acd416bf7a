use anyhow::Result;
use calculette::calculator::{ERROR_LABEL, copy_to_clipboard};
use calculette::config::Config;
use calculette::editor::EditBuffer;
use calculette::repl::Repl;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "calculette")]
#[command(version)]
#[command(about = "Interactive calculator with live preview")]
struct Cli {
    /// Expression to evaluate; starts an interactive session when omitted
    expression: Vec<String>,

    /// Show the tolerant live preview instead of committing
    #[arg(long)]
    preview: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Copy a finite result to the clipboard
    #[arg(long)]
    copy: bool,

    /// Configuration file (defaults to <config dir>/calculette/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    if cli.expression.is_empty() {
        let stdin = std::io::stdin();
        let interactive = stdin.is_terminal();
        Repl::new(config).run(stdin.lock(), std::io::stdout().lock(), interactive)?;
        return Ok(ExitCode::SUCCESS);
    }

    let expression = cli.expression.join(" ");
    let mut buffer = EditBuffer::new();
    buffer.insert_text(&expression);

    if cli.preview {
        let preview = buffer.result_preview();
        if cli.json {
            let value = serde_json::json!({
                "display_expression": buffer.expression_display(),
                "display_result": preview,
            });
            println!("{value}");
        } else {
            println!("{preview}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(outcome) = buffer.commit() else {
        anyhow::bail!("Empty expression");
    };

    if cli.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{}", outcome.display_result);
    }

    if (cli.copy || config.copy_on_commit)
        && let Some(text) = outcome.clipboard.as_deref()
    {
        copy_to_clipboard(text)?;
    }

    // Sentinels are valid results; only an evaluation error fails
    if outcome.display_result == ERROR_LABEL {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
