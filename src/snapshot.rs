//! ### Snapshot
//!
//! the last known content of the document, kept line by line.
//!
//! a snapshot is the baseline the next editor change is translated against: when the editor
//! reports a change its live content is already modified, so anything about "what was there
//! before" must be read from here. all offsets and columns count `char`s.

use crate::api::{Position, Range, TextModel};

/// line ending used when nothing better is known.
pub const DEFAULT_EOL: &str = "\n";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
	lines: Vec<String>,
	eol: String,
}

impl Default for Snapshot {
	fn default() -> Self {
		Snapshot { lines: Vec::new(), eol: DEFAULT_EOL.to_string() }
	}
}

impl Snapshot {
	/// build a snapshot from lines; an empty line ending falls back to [`DEFAULT_EOL`].
	pub fn new(lines: Vec<String>, eol: impl Into<String>) -> Self {
		let mut eol = eol.into();
		if eol.is_empty() {
			eol = DEFAULT_EOL.to_string();
		}
		Snapshot { lines, eol }
	}

	pub fn from_text(text: &str, eol: &str) -> Self {
		let eol = if eol.is_empty() { DEFAULT_EOL } else { eol };
		Snapshot::new(text.split(eol).map(str::to_string).collect(), eol)
	}

	/// capture current content of a live model.
	pub fn capture(model: &dyn TextModel) -> Self {
		Snapshot::new(model.lines_content(), model.eol())
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	pub fn eol(&self) -> &str {
		&self.eol
	}

	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// length of given line in chars, 0 if it doesn't exist.
	pub fn line_len(&self, line_number: usize) -> usize {
		line_number
			.checked_sub(1)
			.and_then(|i| self.lines.get(i))
			.map_or(0, |l| l.chars().count())
	}

	/// whole content, lines joined with the line ending.
	pub fn text(&self) -> String {
		self.lines.join(&self.eol)
	}

	/// length of the whole content in chars.
	pub fn len(&self) -> usize {
		let eol = self.eol.chars().count();
		let content: usize = self.lines.iter().map(|l| l.chars().count()).sum();
		content + eol * self.lines.len().saturating_sub(1)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// xxh3 hash of the whole content.
	pub fn hash(&self) -> i64 {
		crate::ext::hash(self.text())
	}

	/// range covering the whole document.
	pub fn full_range(&self) -> Range {
		let last = self.lines.len().max(1);
		Range::new(Position::new(1, 1), Position::new(last, self.line_len(last) + 1))
	}

	/// move given coordinate inside document bounds.
	pub fn clamp(&self, position: Position) -> Position {
		if self.lines.is_empty() {
			return Position::default();
		}
		let line_number = position.line_number.clamp(1, self.lines.len());
		let column = position.column.clamp(1, self.line_len(line_number) + 1);
		Position::new(line_number, column)
	}

	pub fn offset_at(&self, position: Position) -> usize {
		let position = self.clamp(position);
		let eol = self.eol.chars().count();
		let before: usize = self.lines[..position.line_number.saturating_sub(1)]
			.iter()
			.map(|l| l.chars().count() + eol)
			.sum();
		before + position.column - 1
	}

	pub fn position_at(&self, offset: usize) -> Position {
		let eol = self.eol.chars().count();
		let mut remaining = offset;
		for (i, line) in self.lines.iter().enumerate() {
			let len = line.chars().count();
			if remaining <= len {
				return Position::new(i + 1, remaining + 1);
			}
			if remaining < len + eol {
				// inside a multi char line ending
				return Position::new(i + 1, len + 1);
			}
			remaining -= len + eol;
		}
		self.full_range().end
	}

	/// content between given coordinates, or the whole document if no range is given.
	pub fn text_in_range(&self, range: Option<&Range>) -> String {
		let Some(range) = range else {
			return self.text();
		};
		if self.lines.is_empty() {
			return String::new();
		}

		let start = self.clamp(range.start);
		let end = self.clamp(range.end);
		if end <= start {
			return String::new();
		}

		let first = &self.lines[start.line_number - 1];
		if start.line_number == end.line_number {
			return char_slice(first, start.column - 1, end.column - 1).to_string();
		}

		let last = &self.lines[end.line_number - 1];
		let mut parts = Vec::with_capacity(end.line_number - start.line_number + 1);
		parts.push(char_slice(first, start.column - 1, usize::MAX));
		parts.extend(self.lines[start.line_number..end.line_number - 1].iter().map(String::as_str));
		parts.push(char_slice(last, 0, end.column - 1));
		parts.join(&self.eol)
	}
}

/// slice a string by char indexes, clamping out of bounds indexes.
pub(crate) fn char_slice(txt: &str, from: usize, to: usize) -> &str {
	let byte = |n: usize| txt.char_indices().nth(n).map_or(txt.len(), |(i, _)| i);
	let (from, to) = (byte(from), byte(to));
	if from >= to { "" } else { &txt[from..to] }
}

#[cfg(test)]
mod tests {
	use super::{char_slice, Snapshot};
	use crate::api::{Position, Range};

	fn sample() -> Snapshot {
		Snapshot::from_text("sphinx of\nblack quartz,\njudge my vow", "\n")
	}

	#[test]
	fn single_line_range_matches_direct_slice() {
		let snap = sample();
		let range = Range::new(Position::new(2, 7), Position::new(2, 13));
		assert_eq!(snap.text_in_range(Some(&range)), &snap.lines()[1][6..12]);
		assert_eq!(snap.text_in_range(Some(&range)), "quartz");
	}

	#[test]
	fn multi_line_range_matches_offset_extraction() {
		let snap = sample();
		let text = snap.text();
		let range = Range::new(Position::new(1, 8), Position::new(3, 6));
		let from = snap.offset_at(range.start);
		let to = snap.offset_at(range.end);
		assert_eq!(snap.text_in_range(Some(&range)), &text[from..to]);
		assert_eq!(snap.text_in_range(Some(&range)), "of\nblack quartz,\njudge");
	}

	#[test]
	fn missing_range_returns_whole_document() {
		let snap = Snapshot::from_text("a\r\nb", "\r\n");
		assert_eq!(snap.text_in_range(None), "a\r\nb");
		assert_eq!(snap.len(), 4);
	}

	#[test]
	fn offsets_and_positions_convert_both_ways() {
		let snap = sample();
		for offset in 0..=snap.len() {
			assert_eq!(snap.offset_at(snap.position_at(offset)), offset);
		}
		assert_eq!(snap.position_at(9), Position::new(1, 10));
		assert_eq!(snap.position_at(10), Position::new(2, 1));
	}

	#[test]
	fn columns_count_chars_not_bytes() {
		let snap = Snapshot::from_text("caffè latte\nè", "\n");
		let range = Range::new(Position::new(1, 5), Position::new(2, 2));
		assert_eq!(snap.text_in_range(Some(&range)), "è latte\nè");
		assert_eq!(snap.len(), 13);
	}

	#[test]
	fn out_of_bounds_coordinates_are_clamped() {
		let snap = sample();
		let range = Range::new(Position::new(3, 7), Position::new(42, 42));
		assert_eq!(snap.text_in_range(Some(&range)), "my vow");
		assert_eq!(snap.position_at(9000), Position::new(3, 13));
	}

	#[test]
	fn empty_snapshot_never_panics() {
		let snap = Snapshot::default();
		assert_eq!(snap.eol(), super::DEFAULT_EOL);
		assert_eq!(snap.text_in_range(None), "");
		assert_eq!(snap.text_in_range(Some(&Range::new(Position::new(1, 1), Position::new(2, 2)))), "");
		assert_eq!(snap.offset_at(Position::new(3, 3)), 0);
		assert!(snap.is_empty());
	}

	#[test]
	fn char_slice_clamps() {
		assert_eq!(char_slice("hello", 1, 3), "el");
		assert_eq!(char_slice("hello", 3, 100), "lo");
		assert_eq!(char_slice("hello", 4, 2), "");
	}
}
