//! Sushi-style salutation generator.
//!
//! This crate pairs entries from two word lists (foods and recipients) that
//! start with the same letter and joins them with a hyphen:
//! - File-backed word lists indexed by first character
//! - Random generation with an injectable random source
//! - Combination counting per shared starting character
//! - Layered settings (defaults, TOML file, environment)

/// Word lists, the salutation generator and combination counting.
pub mod model;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (word list file loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::SalutationError;
pub use model::combinations::{CharCount, CombinationCounts};
pub use model::generator::{get_salutations, salutations_from_settings, SalutationGenerator};
pub use model::settings::GeneratorSettings;
pub use model::word_list::WordList;
