//! Parsing helpers for selection tokens and exchange-format lines
//!
//! Pure string handling with no I/O; readers in `sparsegb` feed lines in
//! and attach line numbers to failures.

use crate::error::{ErrorKind, Result};
use crate::ops::{Comparator, SelectOp};
use crate::scalar::Scalar;

/// Split a comparator off the front of a token
///
/// Returns the comparator and the remaining text, e.g. `">=0.5"` gives
/// `(Ge, "0.5")`.
pub fn parse_comparator(token: &str) -> Result<(Comparator, &str)> {
    let token = token.trim();
    for cmp in Comparator::ALL {
        if let Some(rest) = token.strip_prefix(cmp.symbol()) {
            return Ok((cmp, rest.trim()));
        }
    }
    Err(ErrorKind::Format)
}

/// Parse a selection token with an optional separate threshold
///
/// Named predicates (`nonzero`, `diag`, `offdiag`, `tril`, `triu`) take an
/// optional integer offset as threshold. Comparator tokens take their
/// threshold either inline (`"!=0"`) or separately (`"!="`, `0`); giving
/// neither is a type error since there is nothing to compare against.
/// Inline thresholds keep the literal's own domain; the caller casts them
/// to the receiver's domain when applying the predicate.
pub fn parse_select(token: &str, thunk: Option<Scalar>) -> Result<SelectOp> {
    let name = token.trim();
    let offset = || -> Result<i64> {
        match thunk {
            None => Ok(0),
            Some(Scalar::Int64(k)) => Ok(k),
            Some(_) => Err(ErrorKind::Type),
        }
    };

    if name.eq_ignore_ascii_case("nonzero") {
        return Ok(SelectOp::NonZero);
    }
    let positional: [(&str, fn(i64) -> SelectOp); 4] = [
        ("diag", SelectOp::Diag),
        ("offdiag", SelectOp::OffDiag),
        ("tril", SelectOp::Tril),
        ("triu", SelectOp::Triu),
    ];
    if let Some((_, make)) = positional.iter().find(|(n, _)| name.eq_ignore_ascii_case(n)) {
        return Ok(make(offset()?));
    }

    let (cmp, rest) = parse_comparator(name)?;
    let threshold = match (rest.is_empty(), thunk) {
        (false, None) => Scalar::parse_literal(rest)?,
        (true, Some(value)) => value,
        (true, None) => return Err(ErrorKind::Type),
        // Both an inline and a separate threshold
        (false, Some(_)) => return Err(ErrorKind::Format),
    };
    Ok(SelectOp::Value(cmp, threshold))
}

/// Parse a usize field
pub fn parse_usize(field: &str) -> Result<usize> {
    field.trim().parse::<usize>().map_err(|_| ErrorKind::Format)
}

/// Parse a size line `nrows ncols nvals`
pub fn parse_size_line(line: &str) -> Result<(usize, usize, usize)> {
    let mut fields = line.split_whitespace();
    let nrows = parse_usize(fields.next().ok_or(ErrorKind::Format)?)?;
    let ncols = parse_usize(fields.next().ok_or(ErrorKind::Format)?)?;
    let nvals = parse_usize(fields.next().ok_or(ErrorKind::Format)?)?;
    if fields.next().is_some() {
        return Err(ErrorKind::Format);
    }
    Ok((nrows, ncols, nvals))
}

/// Parse a 1-indexed coordinate line `row col [value]`
///
/// Returns 0-indexed coordinates and the value field (`None` for pattern
/// lines). Coordinates outside `nrows x ncols` are format errors.
pub fn parse_entry_line(line: &str, nrows: usize, ncols: usize) -> Result<(usize, usize, Option<&str>)> {
    let mut fields = line.split_whitespace();
    let row = parse_usize(fields.next().ok_or(ErrorKind::Format)?)?;
    let col = parse_usize(fields.next().ok_or(ErrorKind::Format)?)?;
    let value = fields.next();
    if fields.next().is_some() {
        return Err(ErrorKind::Format);
    }

    if row == 0 || col == 0 || row > nrows || col > ncols {
        return Err(ErrorKind::Format);
    }
    Ok((row - 1, col - 1, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comparator() {
        assert_eq!(parse_comparator("!=0"), Ok((Comparator::Ne, "0")));
        assert_eq!(parse_comparator(">= 0.5"), Ok((Comparator::Ge, "0.5")));
        assert_eq!(parse_comparator(">"), Ok((Comparator::Gt, "")));
        assert_eq!(parse_comparator("<=5"), Ok((Comparator::Le, "5")));
        assert_eq!(parse_comparator("=5"), Err(ErrorKind::Format));
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(parse_select("nonzero", None), Ok(SelectOp::NonZero));
        assert_eq!(parse_select("TRIL", None), Ok(SelectOp::Tril(0)));
        assert_eq!(
            parse_select("triu", Some(Scalar::Int64(1))),
            Ok(SelectOp::Triu(1))
        );
        assert_eq!(
            parse_select("!=0", None),
            Ok(SelectOp::Value(Comparator::Ne, Scalar::Int64(0)))
        );
        assert_eq!(
            parse_select("!=", Some(Scalar::Int64(0))),
            Ok(SelectOp::Value(Comparator::Ne, Scalar::Int64(0)))
        );
        assert_eq!(
            parse_select(">", Some(Scalar::Fp64(0.5))),
            Ok(SelectOp::Value(Comparator::Gt, Scalar::Fp64(0.5)))
        );

        // Invalid cases
        assert_eq!(parse_select(">", None), Err(ErrorKind::Type));
        assert_eq!(
            parse_select(">1", Some(Scalar::Int64(1))),
            Err(ErrorKind::Format)
        );
        assert_eq!(parse_select("upper", None), Err(ErrorKind::Format));
        assert_eq!(
            parse_select("diag", Some(Scalar::Fp64(1.0))),
            Err(ErrorKind::Type)
        );
        assert_eq!(parse_select("a-very-long-unknown-token", None), Err(ErrorKind::Format));
    }

    #[test]
    fn test_parse_size_line() {
        assert_eq!(parse_size_line("3 3 3"), Ok((3, 3, 3)));
        assert_eq!(parse_size_line("3\t4\t5"), Ok((3, 4, 5)));
        assert_eq!(parse_size_line("3 3"), Err(ErrorKind::Format));
        assert_eq!(parse_size_line("3 3 3 3"), Err(ErrorKind::Format));
        assert_eq!(parse_size_line("-3 3 3"), Err(ErrorKind::Format));
    }

    #[test]
    fn test_parse_entry_line() {
        assert_eq!(parse_entry_line("1 1 2", 3, 3), Ok((0, 0, Some("2"))));
        assert_eq!(parse_entry_line("3\t2\t4.5", 3, 3), Ok((2, 1, Some("4.5"))));
        assert_eq!(parse_entry_line("2 3", 3, 3), Ok((1, 2, None)));

        // 1-indexed bounds
        assert_eq!(parse_entry_line("0 1 1", 3, 3), Err(ErrorKind::Format));
        assert_eq!(parse_entry_line("4 1 1", 3, 3), Err(ErrorKind::Format));
        assert_eq!(parse_entry_line("1", 3, 3), Err(ErrorKind::Format));
        assert_eq!(parse_entry_line("1 1 1 1", 3, 3), Err(ErrorKind::Format));
    }
}
