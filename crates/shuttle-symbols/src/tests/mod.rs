//! Crate-internal tests for shuttle-symbols.

mod warnings;
