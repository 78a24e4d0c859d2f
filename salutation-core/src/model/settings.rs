use std::env;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::SalutationError;
use crate::io;

/// Default location of the foods word list.
pub const DEFAULT_FOODS_PATH: &str = "data/food_types.txt";

/// Default location of the recipients word list.
pub const DEFAULT_RECIPIENTS_PATH: &str = "data/recipients.txt";

/// Default number of missed attempts tolerated by one generation call.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Environment variable overriding `foods_path`.
pub const ENV_FOODS: &str = "SALUTATION_FOODS";
/// Environment variable overriding `recipients_path`.
pub const ENV_RECIPIENTS: &str = "SALUTATION_RECIPIENTS";
/// Environment variable overriding `max_attempts`.
pub const ENV_MAX_ATTEMPTS: &str = "SALUTATION_MAX_ATTEMPTS";

/// Settings used to build a `SalutationGenerator`.
///
/// Layers, lowest priority first:
/// - built-in defaults
/// - a TOML file (`from_toml_file`), missing keys keep their default
/// - environment variables (`apply_env`)
/// - whatever the caller sets afterwards (ex. command-line flags)
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
	/// Path of the foods word list.
	pub foods_path: PathBuf,

	/// Path of the recipients word list.
	pub recipients_path: PathBuf,

	/// Missed attempts allowed before generation gives up (must be > 0).
	pub max_attempts: usize,
}

impl Default for GeneratorSettings {
	fn default() -> Self {
		Self {
			foods_path: PathBuf::from(DEFAULT_FOODS_PATH),
			recipients_path: PathBuf::from(DEFAULT_RECIPIENTS_PATH),
			max_attempts: DEFAULT_MAX_ATTEMPTS,
		}
	}
}

impl GeneratorSettings {
	/// Reads settings from a TOML file.
	///
	/// # Errors
	/// - `FileAccess` if the file cannot be read
	/// - `SettingsParse` if it is not valid TOML or has unknown keys
	/// - `InvalidSetting` if a value is out of range
	pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, SalutationError> {
		let path = path.as_ref();
		let contents = io::read_to_string(path).map_err(|source| SalutationError::FileAccess {
			path: path.to_path_buf(),
			source,
		})?;
		let settings: Self = toml::from_str(&contents).map_err(|source| SalutationError::SettingsParse {
			path: path.to_path_buf(),
			source,
		})?;
		settings.validate()?;
		debug!("Loaded settings from {}", path.display());
		Ok(settings)
	}

	/// Applies the `SALUTATION_*` environment variables on top of the current values.
	pub fn apply_env(&mut self) -> Result<(), SalutationError> {
		self.apply_overrides(|key| env::var(key).ok())
	}

	/// Applies overrides looked up by environment variable name.
	///
	/// Empty values are ignored.
	pub(crate) fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SalutationError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		if let Some(path) = lookup(ENV_FOODS) {
			self.foods_path = PathBuf::from(path);
		}
		if let Some(path) = lookup(ENV_RECIPIENTS) {
			self.recipients_path = PathBuf::from(path);
		}
		if let Some(value) = lookup(ENV_MAX_ATTEMPTS) {
			self.max_attempts = value.trim().parse().map_err(|_| {
				SalutationError::InvalidSetting(format!("{ENV_MAX_ATTEMPTS} must be an integer, got '{value}'"))
			})?;
		}
		self.validate()
	}

	/// Checks value ranges.
	///
	/// # Errors
	/// Returns `InvalidSetting` if `max_attempts` is 0.
	pub fn validate(&self) -> Result<(), SalutationError> {
		if self.max_attempts == 0 {
			return Err(SalutationError::InvalidSetting("max_attempts must be greater than 0".to_owned()));
		}
		Ok(())
	}
}
