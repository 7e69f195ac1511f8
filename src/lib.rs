use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

pub mod amino;
pub mod contacts;
pub mod error;
pub mod format;
#[cfg(feature = "python")]
mod python;
pub mod scan;
pub mod sequence;
pub mod source;

pub use contacts::{DEFAULT_CONTACT_CUTOFF, contact_map, distance_matrix};
pub use error::{Error, Result};
pub use scan::{AtomCandidate, ChainScanner};
pub use sequence::{ResidueRecord, Sequencer};

/// Files decoded concurrently before their output is written in order.
const BATCH_SIZE: usize = 64;

/// What to do with an ATOM record whose numeric columns cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Drop the record with a warning and keep scanning the file.
    #[default]
    Skip,
    /// Give up on the file; it contributes no output.
    Abort,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub use_mmap: bool,
    pub on_malformed: MalformedPolicy,
    /// Worker threads; `None` lets rayon pick.
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_mmap: true,
            on_malformed: MalformedPolicy::Skip,
            threads: None,
        }
    }
}

/// Residues of one file plus the records dropped as malformed.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ResidueRecord>,
    pub malformed: Vec<Error>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub failed: usize,
    pub residues: usize,
    pub skipped_records: usize,
}

/// Scans the first chain of `reader` and sequences its residues.
pub fn scan_records<R: BufRead>(reader: R, policy: MalformedPolicy) -> Result<Extraction> {
    let mut sequencer = Sequencer::new();
    let mut extraction = Extraction::default();
    for candidate in ChainScanner::new(reader) {
        match candidate {
            Ok(candidate) => {
                sequencer.push(&candidate, &mut extraction.records);
            }
            Err(err @ Error::RecordParse { .. }) if policy == MalformedPolicy::Skip => {
                extraction.malformed.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(extraction)
}

/// Opens, decompresses, and extracts the residue stream of one file.
pub fn extract(path: &Path, config: &Config) -> Result<Extraction> {
    let buffer = source::open(path, config.use_mmap)?;
    let extraction = scan_records(&buffer[..], config.on_malformed)?;
    for err in &extraction.malformed {
        warn!("{}: skipping record: {}", path.display(), err);
    }
    Ok(extraction)
}

pub fn extract_residues(path: &Path, config: &Config) -> Result<Vec<ResidueRecord>> {
    extract(path, config).map(|e| e.records)
}

/// Renders the output lines of one file.
pub fn render_file(path: &Path, config: &Config) -> Result<Vec<u8>> {
    render(path, config).map(|(text, _)| text)
}

fn render(path: &Path, config: &Config) -> Result<(Vec<u8>, Extraction)> {
    let extraction = extract(path, config)?;
    let mut text = Vec::with_capacity(extraction.records.len() * 32);
    format::write_records(&mut text, &extraction.records)?;
    Ok((text, extraction))
}

/// Reads one path per line, ignoring blank lines.
pub fn read_paths<R: BufRead>(reader: R) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        paths.push(PathBuf::from(line));
    }
    Ok(paths)
}

/// Extracts every file and writes their records to `out` in input order.
///
/// A file that fails to open, or is aborted on a malformed record, is
/// reported and contributes nothing; only failures on `out` stop the run.
pub fn run<W: Write>(paths: &[PathBuf], config: &Config, out: &mut W) -> Result<RunSummary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .build()?;

    let mut summary = RunSummary::default();
    for batch in paths.chunks(BATCH_SIZE) {
        let rendered: Vec<Result<(Vec<u8>, Extraction)>> =
            pool.install(|| batch.par_iter().map(|p| render(p, config)).collect());

        for (path, result) in batch.iter().zip(rendered) {
            summary.files += 1;
            match result {
                Ok((text, extraction)) => {
                    out.write_all(&text)?;
                    summary.residues += extraction.records.len();
                    summary.skipped_records += extraction.malformed.len();
                }
                Err(err) => {
                    warn!("{}: no residues written: {}", path.display(), err);
                    summary.failed += 1;
                }
            }
        }
        out.flush()?;
    }

    info!(
        "processed {} files ({} failed), {} residue lines, {} malformed records skipped",
        summary.files, summary.failed, summary.residues, summary.skipped_records
    );
    Ok(summary)
}
