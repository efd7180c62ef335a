//! Crate-internal tests for shuttle-syntax.
