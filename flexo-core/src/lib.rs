//! Shared primitives, traits, and utilities for the Flexo cheminformatics crates.
//!
//! `flexo-core` provides the foundation the descriptor and matching crates
//! build on:
//!
//! - **Error types** — [`FlexoError`] and [`Result`] for structured error handling
//! - **Traits** — Core abstractions like [`Scored`] and [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{FlexoError, Result};
pub use traits::*;
