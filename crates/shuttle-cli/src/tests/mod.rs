//! Unit and behavioural tests for the CLI runtime.

mod support;
