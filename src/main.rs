use chordsheet::{
    load_vocabulary, rendered_text, to_html, ChordVocabulary, ChordsheetError,
    EngineConfig, LineClassifier, LineKind, RenderResponse,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Chord vocabulary file (YAML or JSON); overrides the config file
    #[arg(long, global = true)]
    vocab: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate and optionally transpose a song
    Render {
        /// Song text file, or `-` for stdin
        input: PathBuf,

        /// Semitones to transpose by
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        transpose: i32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print whether each line is a chord line or a lyric line
    Classify {
        /// Song text file, or `-` for stdin
        input: PathBuf,
    },

    /// Transpose a single chord symbol
    Transpose {
        symbol: String,

        #[arg(allow_negative_numbers = true)]
        semitones: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read_input(path: &Path) -> Result<String, ChordsheetError> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| ChordsheetError::io(e, path))?;
        Ok(source)
    } else {
        fs::read_to_string(path).map_err(|e| ChordsheetError::io(e, path))
    }
}

/// Resolve the vocabulary, falling back to degraded mode when none is usable
fn resolve_vocabulary(
    cli_path: Option<&Path>,
    config: &EngineConfig,
) -> Result<ChordVocabulary, ChordsheetError> {
    let Some(path) = cli_path.or(config.vocabulary.as_deref()) else {
        warn!("No chord vocabulary given; every line will be treated as lyrics");
        return Ok(ChordVocabulary::empty());
    };
    match load_vocabulary(path) {
        Ok(vocab) => Ok(vocab),
        Err(ChordsheetError::EmptyVocabulary) => {
            warn!(path = %path.display(), "Chord vocabulary is empty; every line will be treated as lyrics");
            Ok(ChordVocabulary::empty())
        }
        Err(e) => Err(e),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    debug!(?config, "Loaded config");

    match cli.command {
        Commands::Render {
            input,
            transpose,
            format,
        } => {
            let vocab = resolve_vocabulary(cli.vocab.as_deref(), &config)?;
            let source = read_input(&input)?;
            let segments = chordsheet::render_with_config(&source, &vocab, transpose, &config);
            match format {
                OutputFormat::Text => print!("{}", rendered_text(&segments)),
                OutputFormat::Json => {
                    let response = RenderResponse { segments };
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Html => print!("{}", to_html(&segments)),
            }
        }
        Commands::Classify { input } => {
            let vocab = resolve_vocabulary(cli.vocab.as_deref(), &config)?;
            let source = read_input(&input)?;
            let classifier = LineClassifier::new(config.classifier.clone());
            for line in source.lines() {
                let label = match classifier.classify(line, &vocab) {
                    LineKind::Chord => "chord",
                    LineKind::Lyric => "lyric",
                };
                println!("{}\t{}", label, line);
            }
        }
        Commands::Transpose { symbol, semitones } => {
            println!("{}", chordsheet::transpose_symbol(&symbol, semitones));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
