use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mel_core::{CommandReference, CompletionSession, DEFAULT_HELP_URL_BASE, extract_text, hover};

mod render;

const DEFAULT_TRACE_FILTER: &str = "mel_cli=warn,mel_core=warn";
const VERBOSE_TRACE_FILTER: &str = "mel_cli=debug,mel_core=debug";

#[derive(Debug, Parser)]
#[command(
    name = "mel",
    author,
    version,
    about = "Outline, completion vocabulary and command help for MEL scripts",
    long_about = None
)]
struct CliArgs {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the procedure and variable outline of a script.
    Outline {
        #[arg(value_name = "FILE", value_parser = parse_sanitized_path)]
        file: PathBuf,
        /// Emit the symbol tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the variables and words completion would offer for a script.
    Index {
        #[arg(value_name = "FILE", value_parser = parse_sanitized_path)]
        file: PathBuf,
        #[arg(long)]
        json: bool,
        /// Command table to use instead of the bundled one
        #[arg(long, value_name = "PATH", value_parser = parse_sanitized_path)]
        reference: Option<PathBuf>,
    },
    /// Print help for the command under a position (1-based line and UTF-16 column).
    Hover {
        #[arg(value_name = "FILE", value_parser = parse_sanitized_path)]
        file: PathBuf,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        column: u32,
        #[arg(long, value_name = "PATH", value_parser = parse_sanitized_path)]
        reference: Option<PathBuf>,
        /// Base URL the online help link is built from
        #[arg(long, value_name = "URL", default_value = DEFAULT_HELP_URL_BASE)]
        url_base: String,
    },
    /// List the command triggers of the reference table.
    Commands {
        #[arg(long, value_name = "PATH", value_parser = parse_sanitized_path)]
        reference: Option<PathBuf>,
    },
}

fn read_file_content(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path.display()))
}

fn sanitize_path(raw: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(raw);

    for comp in p.components() {
        if matches!(comp, Component::ParentDir) {
            return Err(anyhow::anyhow!(
                "Parent directory components ('..') are not allowed in file paths."
            ));
        }
    }

    Ok(p.to_path_buf())
}

fn parse_sanitized_path(raw: &str) -> Result<PathBuf, String> {
    sanitize_path(raw).map_err(|e| e.to_string())
}

fn load_reference(path: Option<&Path>) -> anyhow::Result<Arc<CommandReference>> {
    match path {
        Some(path) => {
            let table = CommandReference::from_path(path)?;
            tracing::debug!(commands = table.len(), "loaded command table from {}", path.display());
            Ok(Arc::new(table))
        }
        None => Ok(CommandReference::builtin()),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = if verbose {
        EnvFilter::new(VERBOSE_TRACE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_FILTER))
    };
    let _ = fmt().with_writer(std::io::stderr).with_env_filter(filter).try_init();
}

fn main() -> anyhow::Result<()> {
    let CliArgs { verbose, command } = CliArgs::parse();
    init_tracing(verbose);

    match command {
        Commands::Outline { file, json } => {
            let src = read_file_content(&file)?;
            let symbols = extract_text(&src);
            tracing::debug!(roots = symbols.len(), "outline extracted from {}", file.display());
            if json {
                println!("{}", serde_json::to_string_pretty(&symbols)?);
            } else {
                print!("{}", render::outline_text(&symbols));
            }
        }
        Commands::Index { file, json, reference } => {
            let src = read_file_content(&file)?;
            let mut session = CompletionSession::new(load_reference(reference.as_deref())?);
            session.refresh(&src);
            let index = session.index();
            if json {
                let value = serde_json::json!({
                    "variables": render::labels(index.variable_items()),
                    "words": render::labels(index.word_items()),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", render::index_text(index));
            }
        }
        Commands::Hover {
            file,
            line,
            column,
            reference,
            url_base,
        } => {
            let src = read_file_content(&file)?;
            let reference = load_reference(reference.as_deref())?;
            let line_index = line - 1;
            let text = src
                .lines()
                .nth(line_index as usize)
                .with_context(|| format!("no hover: '{}' has no line {}", file.display(), line))?;
            let info = hover(&reference, line_index, text, column - 1, &url_base)
                .with_context(|| format!("no hover at {}:{}", line, column))?;
            println!("{}", info.markdown);
        }
        Commands::Commands { reference } => {
            let reference = load_reference(reference.as_deref())?;
            for trigger in reference.all_triggers() {
                println!("{}", trigger);
            }
        }
    }

    Ok(())
}
