//! arcspan CLI
//!
//! Usage:
//!   arcspan [OPTIONS] [FILE]
//!
//! Options:
//!   -g, --gold <FILE>        Gold instance; render the diff of FILE against it
//!   -s, --stylesheet <FILE>  Stylesheet file for the color palette (TOML format)
//!   -c, --config <FILE>      Layout configuration (TOML format)
//!   --no-curve               Draw arcs and spans with straight corners
//!   -d, --debug              Outline hit regions
//!   -v, --verbose            Log layout passes to stderr
//!   -h, --help               Print help

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arcspan::{diff, document, render_with_config, LayoutConfig, RenderConfig, Stylesheet};

#[derive(Parser)]
#[command(name = "arcspan")]
#[command(about = "Render dependency arcs and span annotations over a token sequence as SVG")]
struct Cli {
    /// Instance file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Gold instance to diff the input against
    #[arg(short, long)]
    gold: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rectangular arcs and square span corners
    #[arg(long)]
    no_curve: bool,

    /// Debug mode: outline hit regions
    #[arg(short, long)]
    debug: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "arcspan=debug"
    } else if cli.debug {
        "arcspan=info"
    } else {
        "arcspan=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path).unwrap_or_else(|e| {
            fail(format!("loading stylesheet '{}': {}", path.display(), e))
        }),
        None => Stylesheet::default(),
    };

    let mut layout = match &cli.config {
        Some(path) => LayoutConfig::from_file(path).unwrap_or_else(|e| {
            fail(format!("loading config '{}': {}", path.display(), e))
        }),
        None => LayoutConfig::default(),
    };
    if cli.no_curve {
        layout = layout.with_curve(false);
    }

    // Read input
    let instance = match &cli.input {
        Some(path) => document::load(path)
            .unwrap_or_else(|e| fail(format!("reading '{}': {}", path.display(), e))),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail(format!("reading from stdin: {}", e));
            }
            document::parse(&buffer).unwrap_or_else(|e| fail(format!("stdin: {}", e)))
        }
    };

    let instance = match &cli.gold {
        Some(path) => {
            let gold = document::load(path)
                .unwrap_or_else(|e| fail(format!("reading '{}': {}", path.display(), e)));
            let result = diff::diff(&gold, &instance);
            let tally = diff::tally(&result);
            info!(
                matches = tally.matches,
                false_positives = tally.false_positives,
                false_negatives = tally.false_negatives,
                "compared against gold"
            );
            result
        }
        None => instance,
    };

    let config = RenderConfig::new()
        .with_layout(layout)
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug);
    match render_with_config(&instance, config) {
        Ok(svg) => println!("{}", svg),
        Err(e) => fail(e.to_string()),
    }
}
