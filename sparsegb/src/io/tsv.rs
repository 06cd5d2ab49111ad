//! Tab-separated triples
//!
//! A `nrows ncols nvals` line followed by 1-indexed `row col value` lines.
//! Fields may be separated by tabs or spaces when reading.

use super::{assemble, format_value, parse_value};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use sparsegb_core::validation::{parse_entry_line, parse_size_line};
use sparsegb_core::Domain;
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

/// Read a tab-separated stream into an `nrows x ncols` matrix of `domain`
///
/// The caller's dimensions win over the size line; a disagreement, like a
/// wrong entry count, is logged and tolerated. Entries outside the
/// caller's dimensions are rejected.
#[instrument(skip(reader))]
pub fn read_tsv<R: BufRead>(reader: R, domain: Domain, nrows: usize, ncols: usize) -> Result<Matrix> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !matches!(line, Ok(text) if text.trim().is_empty()));

    let declared = match lines.next() {
        Some((lineno, line)) => {
            let line = line?;
            let (r, c, n) = parse_size_line(&line)
                .map_err(|_| Error::format(lineno, format!("invalid size line {:?}", line.trim())))?;
            if (r, c) != (nrows, ncols) {
                warn!(declared = ?(r, c), given = ?(nrows, ncols), "tsv size line disagrees with requested shape");
            }
            n
        }
        None => {
            warn!("empty tsv input");
            0
        }
    };

    let mut entries = Vec::with_capacity(declared);
    for (lineno, line) in lines {
        let line = line?;
        let (row, col, field) = parse_entry_line(&line, nrows, ncols)
            .map_err(|_| Error::format(lineno, format!("invalid entry {:?}", line.trim())))?;
        entries.push((row, col, parse_value(domain, field, lineno)?));
    }
    if entries.len() != declared {
        warn!(declared, found = entries.len(), "tsv entry count disagrees with size line");
    }

    let matrix = assemble(domain, nrows, ncols, entries);
    debug!(nrows, ncols, nvals = matrix.nvals(), "read tsv");
    Ok(matrix)
}

/// Write `matrix` as tab-separated triples
#[instrument(skip(matrix, writer), fields(shape = ?matrix.shape(), nvals = matrix.nvals()))]
pub fn write_tsv<W: Write>(matrix: &Matrix, mut writer: W) -> Result<()> {
    writeln!(writer, "{}\t{}\t{}", matrix.nrows(), matrix.ncols(), matrix.nvals())?;
    for (row, col, value) in matrix.iter() {
        writeln!(writer, "{}\t{}\t{}", row + 1, col + 1, format_value(value))?;
    }
    writer.flush()?;
    Ok(())
}
