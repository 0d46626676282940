//! Lint rules organized by category.

pub mod layout;

pub use layout::OrderedMethods;
