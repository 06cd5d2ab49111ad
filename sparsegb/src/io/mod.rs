//! Exchange formats and random construction
//!
//! Readers take any [`std::io::BufRead`] and writers any [`std::io::Write`];
//! opening files is left to the caller.

mod matrix_market;
mod random;
mod tsv;

pub use matrix_market::{read_mm, write_mm};
pub use tsv::{read_tsv, write_tsv};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::storage::{RowStore, Value};
use sparsegb_core::{Domain, Scalar};
use std::io::{BufRead, Write};

impl Matrix {
    /// Read a Matrix Market stream, see [`read_mm`]
    pub fn from_mm<R: BufRead>(reader: R) -> Result<Self> {
        read_mm(reader)
    }

    /// Write this matrix as Matrix Market, see [`write_mm`]
    pub fn to_mm<W: Write>(&self, writer: W) -> Result<()> {
        write_mm(self, writer)
    }

    /// Read a tab-separated stream, see [`read_tsv`]
    pub fn from_tsv<R: BufRead>(reader: R, domain: Domain, nrows: usize, ncols: usize) -> Result<Self> {
        read_tsv(reader, domain, nrows, ncols)
    }

    /// Write this matrix as tab-separated triples, see [`write_tsv`]
    pub fn to_tsv<W: Write>(&self, writer: W) -> Result<()> {
        write_tsv(self, writer)
    }
}

/// Build a matrix of `domain` from parsed entries, last write wins
fn assemble(domain: Domain, nrows: usize, ncols: usize, entries: Vec<(usize, usize, Scalar)>) -> Matrix {
    fn typed<T: Value>(nrows: usize, ncols: usize, entries: Vec<(usize, usize, Scalar)>) -> Matrix {
        let store = RowStore::from_entries(
            entries
                .into_iter()
                .map(|(r, c, v)| (r, c, T::from_scalar(v))),
        );
        Matrix::from_store(nrows, ncols, store)
    }

    match domain {
        Domain::Bool => typed::<bool>(nrows, ncols, entries),
        Domain::Int64 => typed::<i64>(nrows, ncols, entries),
        Domain::Fp64 => typed::<f64>(nrows, ncols, entries),
    }
}

/// Text form of a stored value; booleans become `1`/`0`
fn format_value(value: Scalar) -> String {
    match value {
        Scalar::Bool(b) => u8::from(b).to_string(),
        other => other.to_string(),
    }
}

/// Parse one value field, tagging failures with the line number
fn parse_value(domain: Domain, field: Option<&str>, line: usize) -> Result<Scalar> {
    let text = field.ok_or_else(|| Error::format(line, "missing value"))?;
    Scalar::parse(domain, text).map_err(|_| Error::format(line, format!("invalid {domain} value {text:?}")))
}
