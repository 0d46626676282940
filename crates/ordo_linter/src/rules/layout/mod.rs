//! Layout rules: where declarations sit relative to each other.

pub mod ordered_methods;

pub use ordered_methods::OrderedMethods;
