use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::error::SalutationError;
use crate::io;

/// An immutable list of entries loaded from a plain text file.
///
/// # Responsibilities
/// - Load one entry per line, trimmed, blank lines dropped
/// - Track the distinct first characters of the entries
/// - Return the entries starting with a given character
///
/// # Invariants
/// - Every entry is non-empty and has no surrounding whitespace
/// - `start_chars` holds exactly the first characters found in `entries`,
///   each once, in order of first appearance
/// - `index` maps each of `start_chars` to a non-empty, order-preserving
///   subset of `entries`
#[derive(Clone, Debug)]
pub struct WordList {
	/// Where the entries came from (file path, or a label for in-memory lists).
	source: String,
	entries: Vec<String>,
	start_chars: Vec<char>,
	index: HashMap<char, Vec<String>>,
}

impl WordList {
	/// Loads a word list from a text file.
	///
	/// # Errors
	/// Returns `SalutationError::FileAccess` if the file cannot be opened or read.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SalutationError> {
		let path = path.as_ref();
		let entries = io::read_entries(path).map_err(|source| SalutationError::FileAccess {
			path: path.to_path_buf(),
			source,
		})?;

		let list = Self::from_entries(path.display().to_string(), entries);
		debug!(
			"Loaded {} entries ({} starting characters) from {}",
			list.len(),
			list.start_chars.len(),
			list.source
		);
		Ok(list)
	}

	/// Builds a word list from in-memory lines, cleaned the same way as a file.
	pub fn from_lines<I, S>(source: &str, lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::from_entries(source.to_owned(), io::clean_lines(lines))
	}

	/// Indexes already-cleaned entries.
	fn from_entries(source: String, entries: Vec<String>) -> Self {
		let mut start_chars = Vec::new();
		let mut index: HashMap<char, Vec<String>> = HashMap::new();

		for entry in &entries {
			// Should not fail, entries are never empty
			let Some(first) = entry.chars().next() else { continue };
			index
				.entry(first)
				.or_insert_with(|| {
					start_chars.push(first);
					Vec::new()
				})
				.push(entry.clone());
		}

		let unselectable: usize = start_chars
			.iter()
			.filter(|c| !c.is_ascii_lowercase())
			.map(|c| index[c].len())
			.sum();
		if unselectable > 0 {
			warn!(
				"{} entries of {} do not start with a lowercase ASCII letter and will never be selected",
				unselectable, source
			);
		}

		Self { source, entries, start_chars, index }
	}

	/// Returns the file path (or label) the list was built from.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Returns all entries in file order.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the distinct first characters, in order of first appearance.
	pub fn start_chars(&self) -> &[char] {
		&self.start_chars
	}

	/// Returns `true` if at least one entry starts with `c`.
	pub fn has_start_char(&self, c: char) -> bool {
		self.index.contains_key(&c)
	}

	/// Returns the entries starting with `c`, in file order.
	///
	/// `c` must be a lowercase ASCII letter; anything else is a caller bug.
	///
	/// # Errors
	/// Returns `SalutationError::NoMatch` if no entry starts with `c`.
	pub fn select_by_char(&self, c: char) -> Result<&[String], SalutationError> {
		debug_assert!(c.is_ascii_lowercase(), "'{c}' is not a lowercase ASCII letter");
		self.index
			.get(&c)
			.map(Vec::as_slice)
			.ok_or(SalutationError::NoMatch(c))
	}
}
