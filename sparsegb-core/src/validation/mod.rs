//! Validation and parsing utilities
//!
//! Pure functions with no I/O dependencies, shared by container
//! construction and the exchange-format readers.

pub mod bounds;
pub mod parsing;

pub use bounds::{
    check_index, checked_positions, infer_dimension, resolve_dimension, resolve_range, validate_coordinates,
};
pub use parsing::{parse_comparator, parse_entry_line, parse_select, parse_size_line};
