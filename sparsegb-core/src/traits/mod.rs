//! Abstract interfaces for sparse containers and their element types

pub mod element;
pub mod matrix;

pub use element::Element;
pub use matrix::SparseContainer;
