use std::fs;
use std::io;
use std::path::Path;

/// Reads a text file and returns its cleaned entries.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - See `clean_lines` for the filtering
pub(crate) fn read_entries<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = read_to_string(filename)?;
	Ok(clean_lines(contents.lines()))
}

/// Trims every line and drops the ones left empty.
///
/// Order is preserved.
pub(crate) fn clean_lines<I, S>(lines: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	lines
		.into_iter()
		.map(|line| line.as_ref().trim().to_owned())
		.filter(|line| !line.is_empty())
		.collect()
}

/// Reads a whole file as a string.
pub(crate) fn read_to_string<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}
