use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, trace};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::SalutationError;
use crate::model::combinations::CombinationCounts;
use crate::model::settings::{DEFAULT_MAX_ATTEMPTS, GeneratorSettings};
use crate::model::word_list::WordList;

/// Separator placed between the food and the recipient.
pub const SEPARATOR: char = '-';

/// High-level generator pairing foods with recipients.
///
/// # Responsibilities
/// - Own the foods and recipients word lists
/// - Generate `lines` salutations `"<food>-<recipient>"` whose parts share
///   their first character
/// - Count how many salutations can be formed
///
/// # Notes
/// - Each `generate` call clears and rebuilds `salutations`; nothing else is
///   kept between calls.
/// - Generation gives up after `max_attempts` missed draws in a row instead
///   of looping forever.
#[derive(Debug)]
pub struct SalutationGenerator {
	lines: usize,
	foods: WordList,
	recipients: WordList,
	salutations: Vec<String>,
	max_attempts: usize,
}

impl SalutationGenerator {
	/// Creates a generator over already loaded word lists.
	pub fn new(foods: WordList, recipients: WordList, lines: usize) -> Self {
		Self {
			lines,
			foods,
			recipients,
			salutations: Vec::new(),
			max_attempts: DEFAULT_MAX_ATTEMPTS,
		}
	}

	/// Loads both word lists from disk and creates a generator.
	///
	/// # Errors
	/// Returns `SalutationError::FileAccess` if either file cannot be read.
	pub fn from_paths<PF, PR>(foods_path: PF, recipients_path: PR, lines: usize) -> Result<Self, SalutationError>
	where
		PF: AsRef<Path>,
		PR: AsRef<Path>,
	{
		let foods = WordList::load(foods_path)?;
		let recipients = WordList::load(recipients_path)?;
		Ok(Self::new(foods, recipients, lines))
	}

	/// Creates a generator from `GeneratorSettings` (paths and attempt bound).
	///
	/// # Errors
	/// - `InvalidSetting` if the settings are out of range
	/// - `FileAccess` if either word list cannot be read
	pub fn from_settings(settings: &GeneratorSettings, lines: usize) -> Result<Self, SalutationError> {
		settings.validate()?;
		let generator = Self::from_paths(&settings.foods_path, &settings.recipients_path, lines)?;
		Ok(generator.with_max_attempts(settings.max_attempts))
	}

	/// Sets the number of consecutive missed attempts tolerated by `generate`.
	///
	/// A bound of 0 is raised to 1.
	pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
		self.max_attempts = max_attempts.max(1);
		self
	}

	pub fn lines(&self) -> usize {
		self.lines
	}

	/// Changes the number of salutations produced by the next `generate` call.
	pub fn set_lines(&mut self, lines: usize) {
		self.lines = lines;
	}

	pub fn foods(&self) -> &WordList {
		&self.foods
	}

	pub fn recipients(&self) -> &WordList {
		&self.recipients
	}

	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	/// Returns the result of the last successful `generate` call.
	pub fn salutations(&self) -> &[String] {
		&self.salutations
	}

	/// Returns the characters a random draw can pick from.
	///
	/// This is the union of both start character sets, restricted to
	/// lowercase ASCII letters. A member is not guaranteed to be present in
	/// both lists.
	pub fn valid_chars(&self) -> BTreeSet<char> {
		self.foods
			.start_chars()
			.iter()
			.chain(self.recipients.start_chars())
			.copied()
			.filter(char::is_ascii_lowercase)
			.collect()
	}

	/// Returns the lowercase characters present in both lists, in foods order.
	pub fn shared_chars(&self) -> Vec<char> {
		self.foods
			.start_chars()
			.iter()
			.copied()
			.filter(|c| c.is_ascii_lowercase() && self.recipients.has_start_char(*c))
			.collect()
	}

	/// Generates `lines` salutations using the thread-local random generator.
	///
	/// See `generate_with_rng`.
	pub fn generate(&mut self, fixed_char: Option<char>) -> Result<&[String], SalutationError> {
		let mut rng = rand::rng();
		self.generate_with_rng(fixed_char, &mut rng)
	}

	/// Generates `lines` salutations using the given random source.
	///
	/// # Parameters
	/// - `fixed_char`: if set, every salutation starts with this character;
	///   otherwise a character is drawn uniformly from `valid_chars` at each attempt.
	/// - `rng`: random source for every draw.
	///
	/// # Behavior
	/// - Clears the previous result first.
	/// - An attempt whose character is missing from one of the lists is
	///   discarded and retried; it does not count towards `lines`.
	/// - Food and recipient are drawn uniformly among the entries starting
	///   with the chosen character.
	///
	/// # Errors
	/// - `InvalidCharacter` if `fixed_char` is not a lowercase ASCII letter or
	///   is not a starting character of both lists
	/// - `NoSharedCharacter` if no `fixed_char` is given and the lists share
	///   no starting character
	/// - `GenerationTimeout` once `max_attempts` attempts in a row have missed
	///
	/// On error, no salutation is kept.
	pub fn generate_with_rng<R: Rng + ?Sized>(
		&mut self,
		fixed_char: Option<char>,
		rng: &mut R,
	) -> Result<&[String], SalutationError> {
		self.salutations.clear();
		if self.lines == 0 {
			return Ok(&self.salutations);
		}

		let candidates: Vec<char> = match fixed_char {
			Some(c) => {
				self.check_fixed_char(c)?;
				vec![c]
			}
			None => {
				if self.shared_chars().is_empty() {
					return Err(SalutationError::NoSharedCharacter);
				}
				self.valid_chars().into_iter().collect()
			}
		};

		let mut salutations = Vec::with_capacity(self.lines);
		let mut missed = 0;
		let mut streak = 0;
		while salutations.len() < self.lines {
			let Some(&c) = candidates.choose(rng) else {
				return Err(SalutationError::NoSharedCharacter);
			};

			match self.pair_on_char(c, rng) {
				Ok(salutation) => {
					salutations.push(salutation);
					streak = 0;
				}
				Err(SalutationError::NoMatch(_)) => {
					missed += 1;
					streak += 1;
					trace!("No pair for '{}', retrying ({} in a row)", c, streak);
					if streak >= self.max_attempts {
						return Err(SalutationError::GenerationTimeout {
							attempts: streak,
							produced: salutations.len(),
							requested: self.lines,
						});
					}
				}
				Err(e) => return Err(e),
			}
		}

		debug!("Generated {} salutations ({} missed attempts)", salutations.len(), missed);
		self.salutations = salutations;
		Ok(&self.salutations)
	}

	/// Rejects a fixed character that could never produce a salutation.
	fn check_fixed_char(&self, c: char) -> Result<(), SalutationError> {
		if !c.is_ascii_lowercase() {
			return Err(SalutationError::InvalidCharacter {
				character: c,
				reason: "not a lowercase ASCII letter",
			});
		}
		if !self.foods.has_start_char(c) {
			return Err(SalutationError::InvalidCharacter {
				character: c,
				reason: "no food starts with it",
			});
		}
		if !self.recipients.has_start_char(c) {
			return Err(SalutationError::InvalidCharacter {
				character: c,
				reason: "no recipient starts with it",
			});
		}
		Ok(())
	}

	/// Draws one food and one recipient starting with `c` and joins them.
	///
	/// # Errors
	/// Returns `SalutationError::NoMatch` if either list has no entry starting with `c`.
	fn pair_on_char<R: Rng + ?Sized>(&self, c: char, rng: &mut R) -> Result<String, SalutationError> {
		let foods = self.foods.select_by_char(c)?;
		let recipients = self.recipients.select_by_char(c)?;

		let food = foods.choose(rng).ok_or(SalutationError::NoMatch(c))?;
		let recipient = recipients.choose(rng).ok_or(SalutationError::NoMatch(c))?;

		Ok(format!("{food}{SEPARATOR}{recipient}"))
	}

	/// Counts the possible salutations per shared starting character.
	///
	/// Recomputed on every call.
	pub fn combination_counts(&self) -> CombinationCounts {
		CombinationCounts::compute(&self.foods, &self.recipients)
	}

	/// Returns the total number of possible salutations.
	pub fn total_combinations(&self) -> u64 {
		self.combination_counts().total()
	}
}

/// Generates `lines` salutations from the default word lists.
///
/// Reads `data/food_types.txt` and `data/recipients.txt` relative to the
/// working directory.
///
/// # Errors
/// Returns an error if a word list cannot be read or generation fails.
pub fn get_salutations(lines: usize) -> Result<Vec<String>, SalutationError> {
	salutations_from_settings(&GeneratorSettings::default(), lines)
}

/// Generates `lines` salutations from the word lists named in `settings`.
///
/// # Errors
/// Returns an error if a word list cannot be read or generation fails.
pub fn salutations_from_settings(settings: &GeneratorSettings, lines: usize) -> Result<Vec<String>, SalutationError> {
	let mut generator = SalutationGenerator::from_settings(settings, lines)?;
	generator.generate(None)?;
	Ok(std::mem::take(&mut generator.salutations))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::io::Write;

	fn generator(foods: &[&str], recipients: &[&str], lines: usize) -> SalutationGenerator {
		SalutationGenerator::new(
			WordList::from_lines("foods", foods),
			WordList::from_lines("recipients", recipients),
			lines,
		)
	}

	fn sushi(lines: usize) -> SalutationGenerator {
		generator(
			&["avocado roll", "anago", "butterfish", "bonito", "tamago", "zuke"],
			&["amy", "alex", "ben", "tom", "yuki"],
			lines,
		)
	}

	/// Splits a salutation on its first separator.
	fn split(salutation: &str) -> (&str, &str) {
		salutation.split_once(SEPARATOR).unwrap()
	}

	#[test]
	fn generates_requested_number() {
		let mut generator = sushi(25);
		let mut rng = StdRng::seed_from_u64(7);

		let salutations = generator.generate_with_rng(None, &mut rng).unwrap().to_vec();
		assert_eq!(salutations.len(), 25);
		assert_eq!(generator.salutations(), salutations.as_slice());
	}

	#[test]
	fn salutations_pair_food_and_recipient_with_same_start() {
		let mut generator = sushi(50);
		let mut rng = StdRng::seed_from_u64(42);

		let salutations = generator.generate_with_rng(None, &mut rng).unwrap().to_vec();
		for salutation in &salutations {
			let (food, recipient) = split(salutation);
			assert!(generator.foods().entries().iter().any(|e| e == food), "{salutation}");
			assert!(generator.recipients().entries().iter().any(|e| e == recipient), "{salutation}");
			assert_eq!(food.chars().next(), recipient.chars().next(), "{salutation}");
			// 'z' and 'y' are only in one list each
			assert!(!food.starts_with('z') && !recipient.starts_with('y'));
		}
	}

	#[test]
	fn zero_lines_gives_empty_result() {
		let mut generator = sushi(0);
		assert!(generator.generate(None).unwrap().is_empty());
	}

	#[test]
	fn zero_lines_does_not_validate_fixed_char() {
		let mut generator = sushi(0);
		assert!(generator.generate(Some('q')).unwrap().is_empty());
	}

	#[test]
	fn fixed_char_generation() {
		let mut generator = generator(&["avocado roll", "anago"], &["amy", "alex"], 3);
		let mut rng = StdRng::seed_from_u64(3);

		let salutations = generator.generate_with_rng(Some('a'), &mut rng).unwrap();
		assert_eq!(salutations.len(), 3);
		for salutation in salutations {
			let (food, recipient) = split(salutation);
			assert!(["avocado roll", "anago"].contains(&food), "{salutation}");
			assert!(["amy", "alex"].contains(&recipient), "{salutation}");
		}
	}

	#[test]
	fn fixed_char_in_one_list_fails_fast() {
		let mut generator = sushi(3);
		match generator.generate(Some('z')) {
			Err(SalutationError::InvalidCharacter { character: 'z', .. }) => (),
			other => panic!("unexpected result: {other:?}"),
		}
		match generator.generate(Some('y')) {
			Err(SalutationError::InvalidCharacter { character: 'y', .. }) => (),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn fixed_char_must_be_lowercase_ascii() {
		let mut generator = sushi(1);
		for c in ['A', '1', '-', 'é'] {
			assert!(matches!(
				generator.generate(Some(c)),
				Err(SalutationError::InvalidCharacter { character, .. }) if character == c
			));
		}
	}

	#[test]
	fn no_shared_character_fails_fast() {
		let mut generator = generator(&["ika"], &["omar"], 2);
		assert!(matches!(generator.generate(None), Err(SalutationError::NoSharedCharacter)));
		assert!(generator.salutations().is_empty());
	}

	#[test]
	fn empty_lists_fail_fast() {
		let mut generator = generator(&[], &[], 1);
		assert!(matches!(generator.generate(None), Err(SalutationError::NoSharedCharacter)));
	}

	#[test]
	fn gives_up_after_max_attempts() {
		// 'a' is shared, 'b' to 'y' are not: most draws miss
		let foods: Vec<String> = ('a'..='y').map(|c| format!("{c}food")).collect();
		let foods: Vec<&str> = foods.iter().map(String::as_str).collect();
		let mut generator = generator(&foods, &["amy"], 1_000).with_max_attempts(5);
		let mut rng = StdRng::seed_from_u64(11);

		match generator.generate_with_rng(None, &mut rng) {
			Err(SalutationError::GenerationTimeout { attempts, produced, requested }) => {
				assert_eq!(attempts, 5);
				assert!(produced < 1_000);
				assert_eq!(requested, 1_000);
			}
			other => panic!("unexpected result: {other:?}"),
		}
		assert!(generator.salutations().is_empty());
	}

	#[test]
	fn miss_limit_applies_to_consecutive_misses() {
		// 'a' is shared, 'b' and 'c' always miss
		let mut generator = generator(&["ahi", "bonito", "chutoro"], &["amy"], 5_000).with_max_attempts(100);
		let mut rng = StdRng::seed_from_u64(1);

		let salutations = generator.generate_with_rng(None, &mut rng).unwrap();
		assert_eq!(salutations.len(), 5_000);
		assert!(salutations.iter().all(|s| s == "ahi-amy"));
	}

	#[test]
	fn large_request_on_bundled_lists() {
		let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
		let mut generator =
			SalutationGenerator::from_paths(data.join("food_types.txt"), data.join("recipients.txt"), 50_000).unwrap();
		let mut rng = StdRng::seed_from_u64(1);

		assert_eq!(generator.generate_with_rng(None, &mut rng).unwrap().len(), 50_000);
	}

	#[test]
	fn failed_generation_clears_previous_result() {
		let mut generator = sushi(2);
		generator.generate(None).unwrap();
		assert_eq!(generator.salutations().len(), 2);

		assert!(generator.generate(Some('z')).is_err());
		assert!(generator.salutations().is_empty());
	}

	#[test]
	fn same_seed_same_salutations() {
		let mut generator = sushi(10);

		let first = generator.generate_with_rng(None, &mut StdRng::seed_from_u64(99)).unwrap().to_vec();
		let second = generator.generate_with_rng(None, &mut StdRng::seed_from_u64(99)).unwrap().to_vec();
		assert_eq!(first, second);
	}

	#[test]
	fn set_lines_changes_next_generation() {
		let mut generator = sushi(2);
		generator.set_lines(4);
		assert_eq!(generator.generate(None).unwrap().len(), 4);
	}

	#[test]
	fn valid_chars_is_union_of_lowercase_starts() {
		let generator = generator(&["avocado", "Ebi", "zuke"], &["amy", "yuki", "3po"], 1);
		assert_eq!(generator.valid_chars().into_iter().collect::<Vec<_>>(), ['a', 'y', 'z']);
		assert_eq!(generator.shared_chars(), ['a']);
	}

	#[test]
	fn combination_counts_example() {
		let generator = generator(&["avocado", "ahi", "butterfish"], &["amy", "ben"], 0);
		let counts = generator.combination_counts();
		assert_eq!(counts.get('a'), Some(2));
		assert_eq!(counts.get('b'), Some(1));
		assert_eq!(generator.total_combinations(), 3);
	}

	#[test]
	fn from_settings_loads_files() {
		let dir = tempfile::tempdir().unwrap();
		let foods_path = dir.path().join("foods.txt");
		let recipients_path = dir.path().join("recipients.txt");
		writeln!(std::fs::File::create(&foods_path).unwrap(), "  saba\n\nsake").unwrap();
		writeln!(std::fs::File::create(&recipients_path).unwrap(), "sam").unwrap();

		let settings = GeneratorSettings {
			foods_path,
			recipients_path,
			max_attempts: 3,
		};
		let mut generator = SalutationGenerator::from_settings(&settings, 2).unwrap();
		assert_eq!(generator.max_attempts(), 3);
		for salutation in generator.generate(Some('s')).unwrap() {
			assert!(salutation == "saba-sam" || salutation == "sake-sam", "{salutation}");
		}
	}

	#[test]
	fn bundled_word_lists() {
		let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
		let mut generator =
			SalutationGenerator::from_paths(data.join("food_types.txt"), data.join("recipients.txt"), 20).unwrap();

		assert!(generator.total_combinations() > 0);
		let salutations = generator.generate(None).unwrap();
		assert_eq!(salutations.len(), 20);
		assert!(salutations.iter().all(|s| s.contains(SEPARATOR)));
	}

	#[test]
	fn salutations_from_bundled_settings() {
		let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
		let settings = GeneratorSettings {
			foods_path: data.join("food_types.txt"),
			recipients_path: data.join("recipients.txt"),
			..GeneratorSettings::default()
		};
		let foods = WordList::load(&settings.foods_path).unwrap();
		let recipients = WordList::load(&settings.recipients_path).unwrap();

		let salutations = salutations_from_settings(&settings, 12).unwrap();
		assert_eq!(salutations.len(), 12);
		for salutation in &salutations {
			let (food, recipient) = split(salutation);
			assert!(foods.entries().iter().any(|e| e == food), "{salutation}");
			assert!(recipients.entries().iter().any(|e| e == recipient), "{salutation}");
			assert_eq!(food.chars().next(), recipient.chars().next(), "{salutation}");
		}
	}

	#[test]
	fn salutations_from_settings_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let settings = GeneratorSettings {
			foods_path: dir.path().join("food_types.txt"),
			recipients_path: dir.path().join("recipients.txt"),
			..GeneratorSettings::default()
		};
		match salutations_from_settings(&settings, 3) {
			Err(SalutationError::FileAccess { path, .. }) => assert_eq!(path, settings.foods_path),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn get_salutations_uses_default_lists() {
		// The default paths are relative to the working directory
		let default_foods = Path::new(crate::model::settings::DEFAULT_FOODS_PATH);
		match get_salutations(4) {
			Ok(salutations) => {
				assert!(default_foods.exists());
				assert_eq!(salutations.len(), 4);
				assert!(salutations.iter().all(|s| s.contains(SEPARATOR)));
			}
			Err(SalutationError::FileAccess { path, .. }) => {
				assert!(!default_foods.exists());
				assert_eq!(path, default_foods);
			}
			Err(e) => panic!("unexpected error: {e}"),
		}
	}

	#[test]
	fn from_paths_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = SalutationGenerator::from_paths(dir.path().join("a.txt"), dir.path().join("b.txt"), 1);
		assert!(matches!(result, Err(SalutationError::FileAccess { .. })));
	}
}
