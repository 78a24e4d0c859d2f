use serde::Serialize;

use super::word_list::WordList;

/// Number of salutations that can be formed with one starting character.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCount {
	pub character: char,
	pub count: u64,
}

/// Number of distinct (food, recipient) pairs, per shared starting character.
///
/// # Invariants
/// - `per_char` only holds lowercase ASCII characters present in both lists
/// - `per_char` follows the order in which characters first appear in the foods list
/// - `total` is the sum of all `per_char` counts
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinationCounts {
	per_char: Vec<CharCount>,
	total: u64,
}

impl CombinationCounts {
	/// Counts `|foods starting with c| * |recipients starting with c|` for every
	/// shared character `c`.
	pub(crate) fn compute(foods: &WordList, recipients: &WordList) -> Self {
		let per_char: Vec<CharCount> = foods
			.start_chars()
			.iter()
			.filter(|c| c.is_ascii_lowercase())
			.filter_map(|&c| {
				let food_count = foods.select_by_char(c).ok()?.len() as u64;
				let recipient_count = recipients.select_by_char(c).ok()?.len() as u64;
				Some(CharCount { character: c, count: food_count * recipient_count })
			})
			.collect();
		let total: u64 = per_char.iter().map(|c| c.count).sum();

		Self { per_char, total }
	}

	/// Returns the total number of possible salutations.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Returns the per-character breakdown.
	pub fn per_char(&self) -> &[CharCount] {
		&self.per_char
	}

	/// Returns the count for one character, if it is shared by both lists.
	pub fn get(&self, c: char) -> Option<u64> {
		self.per_char.iter().find(|entry| entry.character == c).map(|entry| entry.count)
	}
}
