//! Fixed-column scanning of ATOM records in the first chain of a PDB file.
//!
//! Only the representative atom of each residue is kept: the beta carbon for
//! every standard residue, the alpha carbon for glycine. Records for residues
//! outside the amino-acid table are dropped without a diagnostic.

use std::io::BufRead;

use crate::amino;
use crate::error::{Error, Result};

const ATOM_NAME: (usize, usize) = (13, 15);
const RES_NAME: (usize, usize) = (17, 20);
const RES_SEQ: (usize, usize) = (23, 27);
const XYZ: [(usize, usize, &str); 3] = [(30, 38, "x"), (38, 46, "y"), (46, 54, "z")];

/// Record kind derived from the first four columns of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Terminator,
    Atom,
    Other,
}

/// Representative atom of one residue, as read from a single ATOM line.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomCandidate {
    pub atom_name: [u8; 2],
    pub residue_name: [u8; 3],
    pub code: char,
    pub seq: i32,
    pub coord: [f64; 3],
    /// One-based line number the record was read from.
    pub line: usize,
}

pub fn classify(line: &[u8]) -> RecordKind {
    match line.get(..4) {
        Some(b"TER ") => RecordKind::Terminator,
        Some(b"ATOM") => RecordKind::Atom,
        _ if line == b"TER" => RecordKind::Terminator,
        _ => RecordKind::Other,
    }
}

/// Parses an ATOM line into a candidate, or `None` when the atom-selection
/// policy or the residue filter rejects it.
///
/// Selection runs before any numeric field is touched, so rejected records
/// never produce parse errors.
pub fn parse_atom(line: &[u8], line_number: usize) -> Result<Option<AtomCandidate>> {
    let Some(atom_name) = line.get(ATOM_NAME.0..ATOM_NAME.1) else {
        return Ok(None);
    };
    let Some(residue_name) = line.get(RES_NAME.0..RES_NAME.1) else {
        return Ok(None);
    };

    match atom_name {
        b"CB" => {}
        b"CA" if amino::is_glycine(residue_name) => {}
        _ => return Ok(None),
    }
    let Some(code) = amino::one_letter(residue_name) else {
        return Ok(None);
    };

    let seq = parse_seq(line, line_number)?;
    let mut coord = [0.0f64; 3];
    for (slot, &(start, end, field)) in coord.iter_mut().zip(XYZ.iter()) {
        *slot = parse_float(line, start, end, field, line_number)?;
    }

    Ok(Some(AtomCandidate {
        atom_name: [atom_name[0], atom_name[1]],
        residue_name: [residue_name[0], residue_name[1], residue_name[2]],
        code,
        seq,
        coord,
        line: line_number,
    }))
}

/// Reads the residue sequence number.
///
/// The window starts one column into the resSeq field and covers the
/// insertion code; a digit or sign in the column before it is folded in so
/// four-digit and large negative numbers survive, and a trailing insertion
/// letter is ignored.
fn parse_seq(line: &[u8], line_number: usize) -> Result<i32> {
    let (mut start, end) = RES_SEQ;
    let raw = field_text(line, start, end, "resSeq", line_number)?;
    if line
        .get(start - 1)
        .is_some_and(|&lead| lead.is_ascii_digit() || lead == b'-')
    {
        start -= 1;
    }
    let mut text = std::str::from_utf8(&line[start..end])
        .map_err(|_| parse_error("resSeq", raw, line_number))?
        .trim();
    if text.ends_with(|c: char| c.is_ascii_alphabetic()) {
        text = &text[..text.len() - 1];
    }
    text.trim_end()
        .parse::<i32>()
        .map_err(|_| parse_error("resSeq", raw, line_number))
}

fn parse_float(
    line: &[u8],
    start: usize,
    end: usize,
    field: &'static str,
    line_number: usize,
) -> Result<f64> {
    let raw = field_text(line, start, end, field, line_number)?;
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| parse_error(field, raw, line_number))
}

fn field_text<'a>(
    line: &'a [u8],
    start: usize,
    end: usize,
    field: &'static str,
    line_number: usize,
) -> Result<&'a [u8]> {
    line.get(start..end)
        .ok_or_else(|| parse_error(field, line.get(start..).unwrap_or(&[]), line_number))
}

fn parse_error(field: &'static str, raw: &[u8], line_number: usize) -> Error {
    Error::RecordParse {
        line: line_number,
        field,
        text: String::from_utf8_lossy(raw).into_owned(),
    }
}

/// Iterator over the representative atoms of the first chain.
///
/// Stops at the first chain terminator or at end of input. A malformed
/// record yields an `Err` item; iteration may continue past it.
pub struct ChainScanner<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> ChainScanner<R> {
    pub fn new(reader: R) -> Self {
        ChainScanner {
            reader,
            buf: Vec::with_capacity(96),
            line_number: 0,
            done: false,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for ChainScanner<R> {
    type Item = Result<AtomCandidate>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(Error::Io(err)));
                }
            }
            self.line_number += 1;

            let mut line = self.buf.as_slice();
            if let Some(stripped) = line.strip_suffix(b"\n") {
                line = stripped;
            }
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }

            match classify(line) {
                RecordKind::Terminator => self.done = true,
                RecordKind::Other => {}
                RecordKind::Atom => match parse_atom(line, self.line_number) {
                    Ok(Some(candidate)) => return Some(Ok(candidate)),
                    Ok(None) => {}
                    Err(err) => return Some(Err(err)),
                },
            }
        }
        None
    }
}
