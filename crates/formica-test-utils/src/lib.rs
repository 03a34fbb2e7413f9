//! Shared fixtures for Formica tests and benches.

#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{classic_pair, color, multi_color, random_table};
