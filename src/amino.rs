//! Three-letter to one-letter amino-acid codes.

/// Maps a three-letter residue name to its one-letter code.
///
/// Histidine protonation variants (`HIP`, `HIE`) fold onto `H`.
/// Selenocysteine, pyrrolysine and any modified residue return `None`.
pub fn one_letter(code3: &[u8]) -> Option<char> {
    let code = match code3 {
        b"ALA" => 'A',
        b"ARG" => 'R',
        b"ASN" => 'N',
        b"ASP" => 'D',
        b"CYS" => 'C',
        b"GLN" => 'Q',
        b"GLU" => 'E',
        b"GLY" => 'G',
        b"HIS" | b"HIP" | b"HIE" => 'H',
        b"ILE" => 'I',
        b"LEU" => 'L',
        b"LYS" => 'K',
        b"MET" => 'M',
        b"PHE" => 'F',
        b"PRO" => 'P',
        b"SER" => 'S',
        b"THR" => 'T',
        b"TYR" => 'Y',
        b"TRP" => 'W',
        b"VAL" => 'V',
        _ => return None,
    };
    Some(code)
}

pub fn is_glycine(code3: &[u8]) -> bool {
    code3 == b"GLY"
}
