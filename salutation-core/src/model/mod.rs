//! Top-level module for the salutation system.
//!
//! This module provides:
//! - File-backed word lists indexed by first character (`WordList`)
//! - The salutation generator (`SalutationGenerator`)
//! - Per-character combination counts (`CombinationCounts`)
//! - Generator settings (`GeneratorSettings`)

/// Immutable list of entries loaded from a text file.
///
/// Tracks the distinct first characters of its entries and answers
/// per-character lookups.
pub mod word_list;

/// High-level interface pairing foods and recipients into salutations.
///
/// Owns both word lists, runs the bounded random generation loop and
/// computes combination counts.
pub mod generator;

/// Number of possible salutations per shared starting character.
pub mod combinations;

/// Generator settings with defaults, TOML file and environment layers.
pub mod settings;
