//! Folding scanned candidates into a contiguous, 0-indexed residue stream.

use log::debug;

use crate::scan::AtomCandidate;

/// One output position: a resolved residue or a gap placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct ResidueRecord {
    /// One-letter code, `None` for a gap.
    pub code: Option<char>,
    /// 0-indexed position (sequence number minus one).
    pub index: usize,
    /// Representative atom position, `None` for a gap.
    pub coord: Option<[f64; 3]>,
}

impl ResidueRecord {
    pub fn gap(index: usize) -> Self {
        ResidueRecord {
            code: None,
            index,
            coord: None,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.code.is_none()
    }
}

/// Fold state carried across the candidates of one chain.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    last_seen: i32,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self) -> i32 {
        self.last_seen
    }

    /// Appends the gap records preceding `candidate` and then its own record.
    ///
    /// A candidate whose sequence number does not advance past the last one
    /// seen is dropped (the first record for a position wins) and `false` is
    /// returned.
    pub fn push(&mut self, candidate: &AtomCandidate, out: &mut Vec<ResidueRecord>) -> bool {
        let seq = candidate.seq;
        if seq <= self.last_seen {
            debug!(
                "line {}: dropping {} {} at sequence number {} (last seen {})",
                candidate.line,
                String::from_utf8_lossy(&candidate.residue_name),
                String::from_utf8_lossy(&candidate.atom_name),
                seq,
                self.last_seen
            );
            return false;
        }

        let first = self.last_seen as usize + 1;
        let seq = seq as usize;
        out.reserve(seq - first + 1);
        out.extend((first..seq).map(|i| ResidueRecord::gap(i - 1)));
        out.push(ResidueRecord {
            code: Some(candidate.code),
            index: seq - 1,
            coord: Some(candidate.coord),
        });
        self.last_seen = candidate.seq;
        true
    }
}

/// Runs a fresh [`Sequencer`] over `candidates`.
pub fn sequence<'a, I>(candidates: I) -> Vec<ResidueRecord>
where
    I: IntoIterator<Item = &'a AtomCandidate>,
{
    let mut sequencer = Sequencer::new();
    let mut out = Vec::new();
    for candidate in candidates {
        sequencer.push(candidate, &mut out);
    }
    out
}
