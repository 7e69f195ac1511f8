//! Opening structure files, gzip-compressed or plain.

use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Deref;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use memmap2::Mmap;

use crate::error::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decompressed (or mapped) text of one input file.
///
/// Dropped once the file has been scanned; nothing is retained across files.
pub enum SourceBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for SourceBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            SourceBuffer::Mapped(mmap) => mmap,
            SourceBuffer::Owned(bytes) => bytes,
        }
    }
}

/// Opens `path`, inflating it when it carries the gzip magic.
pub fn open(path: &Path, use_mmap: bool) -> Result<SourceBuffer> {
    let file = File::open(path).map_err(|e| Error::source_open(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| Error::source_open(path, e))?
        .len();

    let raw = if use_mmap && len > 0 {
        // SAFETY: the mapping is read-only and lives only while this file is
        // processed; inputs are not expected to change underneath us.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::source_open(path, e))?;
        SourceBuffer::Mapped(mmap)
    } else {
        let mut bytes = Vec::with_capacity(len as usize);
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::source_open(path, e))?;
        SourceBuffer::Owned(bytes)
    };

    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(raw);
    }
    let inflated = inflate(&raw).map_err(|e| Error::source_open(path, e))?;
    Ok(SourceBuffer::Owned(inflated))
}

fn inflate(compressed: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(compressed.len() * 4);
    MultiGzDecoder::new(compressed).read_to_end(&mut out)?;
    Ok(out)
}
