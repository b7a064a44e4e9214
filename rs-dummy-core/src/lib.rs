//! Locale-driven dummy data generation.
//!
//! This crate provides:
//! - A seeded random sampler with inclusive-bound draws
//! - In-memory locale dictionaries addressed by dot-separated keys
//! - A small template language (`#{key}`, `#{{key}}`, `#`, `\#`) and its resolver
//! - A `Dummy` facade with its builder and a few convenience generators
//!
//! Everything is deterministic for a given seed: replaying the same calls
//! on a `Dummy` built with the same seed yields the same data.

/// Error and result types.
pub mod error;

/// Seeded random sampler (`RandomService`) and the `RandomSource` seam.
pub mod random;

/// Locale dictionary traits and the map-backed implementation.
pub mod definitions;

/// Template parsing and resolution.
pub mod expression;

/// High-level entry point and its builder.
pub mod dummy;

/// Collection and choice helpers built on the sampler.
mod convenience;

pub use definitions::{Definition, DefinitionMap, DefinitionProvider, LocalizedDefinitions};
pub use dummy::{Dummy, DummyBuilder};
pub use error::{Error, Result};
pub use random::{RandomService, RandomSource};
