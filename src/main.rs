use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fissure::lexer::Token;
use fissure::parser::{self, ParseState, ParserConfig};
use fissure::validate::validate_entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// One token per line
    Tokens,
    /// The syntax tree in debug form
    Ast,
    /// Canonically formatted source
    Source,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Fissure front end", long_about = None)]
struct Cli {
    /// Source file to parse
    #[arg(value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,

    /// Parse without the packrat memo table
    #[arg(long)]
    no_memo: bool,

    /// What to print after a successful parse
    #[arg(long, value_enum, default_value_t = Emit::Source)]
    emit: Emit,

    /// Stop after validation without printing anything
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let file = cli.file.display().to_string();

    let tokens = Token::lex_file(&file, &input)?;
    debug!(count = tokens.len(), "lexed");

    if cli.emit == Emit::Tokens && !cli.check {
        for token in &tokens {
            println!("{}\t{}", token.location, token.describe());
        }
        return Ok(());
    }

    let config = ParserConfig {
        memoize: !cli.no_memo,
    };
    let mut state = ParseState::with_config(tokens, config);
    let program = parser::parse(&mut state)?;

    if let Err(errors) = validate_entry(&program) {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        return Err(anyhow!(message));
    }
    info!(structs = program.struct_declarations.len(), "program is valid");

    if cli.check {
        return Ok(());
    }

    match cli.emit {
        Emit::Ast => println!("{program:#?}"),
        Emit::Source => print!("{program}"),
        Emit::Tokens => unreachable!("tokens are emitted before parsing"),
    }
    Ok(())
}
