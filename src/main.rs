use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zparse::{
    errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse, render_error,
    DiagnosticConfig, ErrColor, UnitId,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    On,
    Off,
}

impl From<ColorArg> for ErrColor {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ErrColor::Auto,
            ColorArg::On => ErrColor::On,
            ColorArg::Off => ErrColor::Off,
        }
    }
}

/// Parses a Zig source file and prints its syntax tree.
#[derive(Debug, Parser)]
#[command(name = "zparse", version)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Color syntax errors
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorArg,

    /// Print the token sequence before parsing
    #[arg(long)]
    tokens: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = DiagnosticConfig::new(args.color.into());

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: failed to read {}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => return report(error.with_color(config.color), &source, &args.file),
    };
    info!("Tokenized in {:?}", start.elapsed());

    if args.tokens {
        for token in &tokens {
            println!("{} {:?} {:?}", token.span.start, token.kind, token.payload);
        }
    }

    let parse_start = Instant::now();
    let root = match parse(tokens, UnitId(0), config) {
        Ok(root) => root,
        Err(error) => return report(error, &source, &args.file),
    };
    info!("Parsed in {:?}", parse_start.elapsed());

    if !args.quiet {
        println!("{:#?}", root);
    }

    ExitCode::SUCCESS
}

fn report(error: Error, source: &str, file: &Path) -> ExitCode {
    eprint!("{}", render_error(&error, source, file));
    ExitCode::FAILURE
}
