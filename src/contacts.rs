//! Pairwise distances and contact maps over an extracted residue stream.

use crate::sequence::ResidueRecord;

/// Contact cutoff in Ångström between representative atoms.
pub const DEFAULT_CONTACT_CUTOFF: f64 = 8.0;

/// Square matrix of Euclidean distances between residues.
///
/// Entries involving a gap are NaN. The diagonal is always zero.
pub fn distance_matrix(records: &[ResidueRecord]) -> Vec<Vec<f64>> {
    let n = records.len();
    let mut matrix = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = distance(&records[i], &records[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

/// Thresholded distance matrix: `1` within `cutoff`, `0` beyond it,
/// `-1` where the distance is undefined.
pub fn contact_map(records: &[ResidueRecord], cutoff: f64) -> Vec<Vec<i8>> {
    distance_matrix(records)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|d| match d {
                    d if d.is_nan() => -1,
                    d if d <= cutoff => 1,
                    _ => 0,
                })
                .collect()
        })
        .collect()
}

fn distance(a: &ResidueRecord, b: &ResidueRecord) -> f64 {
    match (a.coord, b.coord) {
        (Some(p), Some(q)) => p
            .iter()
            .zip(q.iter())
            .map(|(u, v)| (u - v) * (u - v))
            .sum::<f64>()
            .sqrt(),
        _ => f64::NAN,
    }
}
