//! Python bindings for residue extraction.

use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::{Config, Error, MalformedPolicy, ResidueRecord, contacts};

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::RecordParse { .. } => PyValueError::new_err(err.to_string()),
        _ => PyIOError::new_err(err.to_string()),
    }
}

fn load(path: PathBuf) -> PyResult<Vec<ResidueRecord>> {
    let config = Config {
        on_malformed: MalformedPolicy::Abort,
        ..Config::default()
    };
    crate::extract_residues(&path, &config).map_err(to_py_err)
}

/// Residues of the first chain as `(code, index, x, y, z)` tuples.
///
/// Missing residues appear as `(".", index, nan, nan, nan)`.
#[pyfunction(name = "residues_from_pdb")]
pub fn py_residues_from_pdb(path: PathBuf) -> PyResult<Vec<(String, usize, f64, f64, f64)>> {
    let rows = load(path)?
        .into_iter()
        .map(|r| {
            let [x, y, z] = r.coord.unwrap_or([f64::NAN; 3]);
            (r.code.unwrap_or('.').to_string(), r.index, x, y, z)
        })
        .collect();
    Ok(rows)
}

/// Pairwise representative-atom distances; NaN where a residue is missing.
#[pyfunction(name = "distance_matrix")]
pub fn py_distance_matrix(path: PathBuf) -> PyResult<Vec<Vec<f64>>> {
    Ok(contacts::distance_matrix(&load(path)?))
}

/// Contact map with `1` (contact), `0` (no contact), `-1` (unknown).
#[pyfunction(name = "contact_map")]
#[pyo3(signature = (path, cutoff = contacts::DEFAULT_CONTACT_CUTOFF))]
pub fn py_contact_map(path: PathBuf, cutoff: f64) -> PyResult<Vec<Vec<i8>>> {
    Ok(contacts::contact_map(&load(path)?, cutoff))
}

#[pymodule]
fn pdb2res(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_residues_from_pdb, m)?)?;
    m.add_function(wrap_pyfunction!(py_distance_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(py_contact_map, m)?)?;
    Ok(())
}
