use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading word lists, reading settings or generating.
///
/// `NoMatch` is an expected outcome of a lookup: the generation loop consumes
/// it and retries, it never leaves `SalutationGenerator::generate`.
#[derive(Debug, Error)]
pub enum SalutationError {
	/// A word list or settings file could not be opened or read.
	#[error("cannot read {}: {source}", path.display())]
	FileAccess {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// No entry of the list starts with the requested character.
	#[error("no entry starts with '{0}'")]
	NoMatch(char),

	/// A caller-supplied starting character cannot be used for generation.
	#[error("invalid starting character '{character}': {reason}")]
	InvalidCharacter { character: char, reason: &'static str },

	/// Random generation was requested but the two lists share no starting character.
	#[error("foods and recipients share no lowercase starting character")]
	NoSharedCharacter,

	/// The generation loop missed too many times before reaching its target.
	#[error("gave up after {attempts} missed attempts ({produced} of {requested} salutations generated)")]
	GenerationTimeout {
		attempts: usize,
		produced: usize,
		requested: usize,
	},

	/// A settings file is not valid TOML or does not match the expected layout.
	#[error("invalid settings file {}: {source}", path.display())]
	SettingsParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// A settings value is out of range.
	#[error("invalid setting: {0}")]
	InvalidSetting(String),
}
