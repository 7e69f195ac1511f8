use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use pdb2res::{Config, MalformedPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "pdb2res",
    about = "Extract per-residue sequences and representative CB/CA coordinates from gzip-compressed PDB files.",
    version
)]
struct Cli {
    /// File listing one structure path per line. When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Drop a whole file when one of its ATOM records is malformed.
    #[arg(long)]
    strict: bool,
    /// Read inputs with buffered I/O instead of memory mapping.
    #[arg(long)]
    no_mmap: bool,
    /// Number of worker threads (defaults to the number of CPUs).
    #[arg(short = 'j', long, value_name = "N")]
    threads: Option<usize>,
    /// Increase diagnostic verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let paths = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open path list {}", path.display()))?;
            pdb2res::read_paths(BufReader::new(file))
        }
        None => pdb2res::read_paths(io::stdin().lock()),
    }
    .context("failed to read input paths")?;

    let config = Config {
        use_mmap: !cli.no_mmap,
        on_malformed: if cli.strict {
            MalformedPolicy::Abort
        } else {
            MalformedPolicy::Skip
        },
        threads: cli.threads,
    };

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    pdb2res::run(&paths, &config, &mut out).context("failed to write residues")?;
    out.flush()?;
    Ok(())
}
