//! genetrie - DNA Gene Indexer
//!
//! Interactive console that indexes every length-m gene of DNA sequences.
//!
//! ## Usage
//!
//! ```bash
//! genetrie                       # interactive console
//! genetrie --script commands.txt # run commands from a file
//! genetrie --max-depth 12 -v     # allow deeper trees, log progress
//! ```
//!
//! ## Commands
//!
//! - `bio start <m>`: create the tree for genes of length m
//! - `bio read <file>`: index a sequence file (plain or FASTA)
//! - `bio search <gene>`: offsets of a gene
//! - `bio all`, `bio max`, `bio min`: list genes
//! - `bio exit`: quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use genetrie::config::{EngineConfig, MAX_SUPPORTED_DEPTH};
use genetrie::controller::Console;

/// genetrie - index DNA genes in a complete 4-ary tree
///
/// Reads `bio <action>` commands from stdin (or from --script) and answers
/// exact-match, listing and frequency queries.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read commands from a file instead of stdin
    #[arg(short = 's', long = "script")]
    script: Option<PathBuf>,

    /// Largest gene length accepted by `bio start`
    #[arg(short = 'm', long = "max-depth", default_value = "10")]
    max_depth: usize,

    /// Refuse to build trees with more nodes than this
    #[arg(long = "node-limit")]
    node_limit: Option<usize>,

    /// Wrap long offset lists at this column
    #[arg(short = 'w', long = "width", default_value = "80")]
    width: usize,

    /// Do not print the banner and prompt
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Log progress (info level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Log details (debug level)
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn init_logging(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = EngineConfig {
        max_depth: args.max_depth,
        node_limit: args.node_limit,
        wrap_width: args.width,
    };
    if let Err(msg) = config.validate() {
        anyhow::bail!("Invalid configuration: {} (deepest supported: {})", msg, MAX_SUPPORTED_DEPTH);
    }
    info!("Starting with {:?}", config);

    let stdout = io::stdout();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script '{}'", path.display()))?;
            let mut console = Console::new(BufReader::new(file), stdout.lock(), &config).quiet();
            console.run()?;
        }
        None => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), stdout.lock(), &config);
            if args.quiet {
                console = console.quiet();
            }
            console.run()?;
        }
    }

    Ok(())
}
