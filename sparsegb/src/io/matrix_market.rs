//! Matrix Market coordinate format
//!
//! Files start with a `%%MatrixMarket` banner; this crate also writes and
//! honours a `%%GraphBLAS <type tag>` line that pins the element domain.

use super::{assemble, format_value, parse_value};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use sparsegb_core::format::constants::GRAPHBLAS_BANNER;
use sparsegb_core::validation::{parse_entry_line, parse_size_line};
use sparsegb_core::{Domain, Element, MmField, MmHeader, MmSymmetry, Scalar, UnaryKind};
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

/// Write `matrix` in Matrix Market coordinate format
///
/// Square matrices equal to their transpose are written as `symmetric`
/// with only the lower triangle; everything else is `general`.
///
/// ```
/// use sparsegb::{io::write_mm, Matrix};
///
/// let m = Matrix::from_lists(&[0, 1, 2], &[0, 1, 2], &[2i64, 3, 4]).unwrap();
/// let mut out = Vec::new();
/// write_mm(&m, &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with("%%MatrixMarket"));
/// ```
#[instrument(skip(matrix, writer), fields(shape = ?matrix.shape(), nvals = matrix.nvals()))]
pub fn write_mm<W: Write>(matrix: &Matrix, mut writer: W) -> Result<()> {
    let symmetric = matrix.nrows() == matrix.ncols() && matrix.iseq(&matrix.transpose());
    let (symmetry, body) = if symmetric {
        (MmSymmetry::Symmetric, matrix.tril())
    } else {
        (MmSymmetry::General, matrix.dup())
    };

    let header = MmHeader::new(MmField::for_domain(matrix.domain()), symmetry);
    writeln!(writer, "{header}")?;
    writeln!(writer, "{GRAPHBLAS_BANNER} {}", matrix.domain().type_tag())?;
    writeln!(writer, "{} {} {}", matrix.nrows(), matrix.ncols(), body.nvals())?;
    for (row, col, value) in body.iter() {
        writeln!(writer, "{} {} {}", row + 1, col + 1, format_value(value))?;
    }
    writer.flush()?;

    debug!(symmetric, written = body.nvals(), "wrote matrix market");
    Ok(())
}

/// Read a Matrix Market coordinate stream
///
/// Accepts `integer`, `real` and `pattern` fields with `general`,
/// `symmetric` or `skew-symmetric` symmetry. Off-diagonal entries of
/// symmetric inputs are mirrored, negated for skew-symmetric ones.
#[instrument(skip(reader))]
pub fn read_mm<R: BufRead>(reader: R) -> Result<Matrix> {
    let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (_, banner) = lines
        .next()
        .ok_or_else(|| Error::format(1, "empty input"))?;
    let banner = banner?;
    let header = MmHeader::parse(banner.trim())
        .map_err(|_| Error::format(1, format!("unrecognized banner {:?}", banner.trim())))?;
    let mut domain = header.field.default_domain();

    let mut size = None;
    let mut entries = Vec::new();
    let mut expected = 0;

    for (lineno, line) in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(GRAPHBLAS_BANNER) {
            if size.is_some() {
                return Err(Error::format(lineno, "type tag after size line"));
            }
            let tag = rest.trim();
            domain = Domain::from_type_tag(tag)
                .map_err(|_| Error::format(lineno, format!("unknown type tag {tag:?}")))?;
            continue;
        }
        if line.starts_with('%') {
            continue;
        }

        let Some((nrows, ncols)) = size else {
            let (nrows, ncols, nvals) = parse_size_line(line)
                .map_err(|_| Error::format(lineno, format!("invalid size line {line:?}")))?;
            size = Some((nrows, ncols));
            expected = nvals;
            entries.reserve(nvals);
            continue;
        };

        let (row, col, field) = parse_entry_line(line, nrows, ncols)
            .map_err(|_| Error::format(lineno, format!("invalid entry {line:?}")))?;
        let value = match header.field {
            MmField::Pattern => {
                if field.is_some() {
                    return Err(Error::format(lineno, "value in pattern file"));
                }
                Scalar::one(domain)
            }
            _ => parse_value(domain, field, lineno)?,
        };

        if row != col {
            match header.symmetry {
                MmSymmetry::General => {}
                MmSymmetry::Symmetric => entries.push((col, row, value)),
                MmSymmetry::SkewSymmetric => entries.push((col, row, negate(value))),
            }
        }
        entries.push((row, col, value));
        expected = expected.checked_sub(1).ok_or_else(|| {
            Error::format(lineno, "more entries than declared in the size line")
        })?;
    }

    let (nrows, ncols) = size.ok_or_else(|| Error::format(0, "missing size line"))?;
    if expected != 0 {
        warn!(missing = expected, "matrix market input ended early");
        return Err(Error::format(0, format!("{expected} declared entries missing")));
    }

    let matrix = assemble(domain, nrows, ncols, entries);
    debug!(nrows, ncols, nvals = matrix.nvals(), %domain, "read matrix market");
    Ok(matrix)
}

fn negate(value: Scalar) -> Scalar {
    match value {
        Scalar::Bool(b) => Scalar::Bool(b),
        Scalar::Int64(i) => Scalar::Int64(i64::unary(UnaryKind::AInv, i)),
        Scalar::Fp64(x) => Scalar::Fp64(f64::unary(UnaryKind::AInv, x)),
    }
}
