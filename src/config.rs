//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema for playback, controls,
//! UI and catalog behavior, plus helpers to load it from disk.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
