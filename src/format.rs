//! Text rendering of residue records.

use std::io::{self, Write};

use crate::sequence::ResidueRecord;

const GAP_MARKER: char = '.';
const SIG_DIGITS: usize = 6;

/// Writes one `<code> <index> <x> <y> <z>` line.
pub fn write_record<W: Write>(w: &mut W, record: &ResidueRecord) -> io::Result<()> {
    let code = record.code.unwrap_or(GAP_MARKER);
    match record.coord {
        Some([x, y, z]) => writeln!(
            w,
            "{} {} {} {} {}",
            code,
            record.index,
            format_number(x),
            format_number(y),
            format_number(z)
        ),
        None => writeln!(w, "{} {} nan nan nan", code, record.index),
    }
}

pub fn write_records<W: Write>(w: &mut W, records: &[ResidueRecord]) -> io::Result<()> {
    records.iter().try_for_each(|record| write_record(w, record))
}

/// Renders a float the way a default C++ output stream does: six
/// significant digits, trailing zeros dropped, exponent form outside
/// `1e-4 ..< 1e6`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Exponent after rounding to six significant digits.
    let sci = format!("{:.*e}", SIG_DIGITS - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SIG_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_zeros(mantissa.to_string()), sign, exp.abs());
    }

    let decimals = (SIG_DIGITS as i32 - 1 - exp).max(0) as usize;
    trim_zeros(format!("{:.*}", decimals, value))
}

fn trim_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}
