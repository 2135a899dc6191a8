//! CLI tool to inspect, check, and highlight TOML files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sithra_toml::{Highlighter, ThemeMode, TomlValidator, Validator, style_for, to_markers};
use tracing_subscriber::EnvFilter;

const RESET: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(
    name = "sithra-toml",
    version,
    about = "Inspect, check, and highlight TOML files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of every line
    Tokens {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
    },
    /// Report TOML syntax errors as `path:line:column` markers
    Check {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
    },
    /// Print files with syntax colours
    Highlight {
        /// Colour theme: light or dark
        #[arg(long, env = "SITHRA_TOML_THEME", default_value = "dark")]
        theme: ThemeMode,
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Self::Tokens { files } | Self::Check { files } | Self::Highlight { files, .. } => files,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut had_error = false;

    for path in cli.command.files() {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                had_error = true;
                continue;
            }
        };

        match &cli.command {
            Command::Tokens { .. } => print_tokens(&content),
            Command::Check { .. } => {
                if !check(path, &content) {
                    had_error = true;
                }
            }
            Command::Highlight { theme, .. } => print_highlighted(&content, *theme),
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_tokens(content: &str) {
    let highlighter = Highlighter::new(content);
    for (index, line) in highlighter.lines().iter().enumerate() {
        for token in &line.tokens {
            println!(
                "{}\t{}\t{}..{}\t{:?}",
                index + 1,
                token.kind,
                token.span.start,
                token.span.end,
                token.text
            );
        }
    }
}

fn check(path: &Path, content: &str) -> bool {
    let Err(error) = TomlValidator.validate(content) else {
        eprintln!("{}: valid", path.display());
        return true;
    };
    match to_markers(&error) {
        Ok(markers) => {
            for marker in markers {
                eprintln!("{}:{marker}", path.display());
            }
        }
        Err(e) => eprintln!("{}: {e}", path.display()),
    }
    false
}

fn print_highlighted(content: &str, theme: ThemeMode) {
    let highlighter = Highlighter::new(content);
    let mut out = String::new();
    for (index, line) in highlighter.lines().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for token in &line.tokens {
            out.push_str(&style_for(token.kind, theme).ansi());
            out.push_str(&token.text);
            out.push_str(RESET);
        }
    }
    println!("{out}");
}
