//! # ChangeRecord
//!
//! one primitive edit as reported by the host editor

use crate::api::Range;
use crate::snapshot::{char_slice, Snapshot};

/// one primitive edit reported by the host editor
///
/// this represents a range in the previous state of the document and a new content which
/// replaced it, allowing to represent any combination of deletions, insertions or replacements.
/// a single editor event may carry a batch of these, for example when typing with multiple
/// cursors or running a replace-all
///
/// ### examples
/// to insert 'a' after 4th character the editor reports a
///     `ChangeRecord { range_offset: 4, range_length: 0, text: "a".into(), .. }`
///
/// to delete the fourth character the editor reports a
///     `ChangeRecord { range_offset: 3, range_length: 1, text: "".into(), .. }`
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeRecord {
	/// replaced range, as coordinates in document previous state
	pub range: Range,
	/// offset of range start, in chars
	pub range_offset: usize,
	/// length of replaced range, in chars
	pub range_length: usize,
	/// new content of text inside range
	pub text: String,
}

impl ChangeRecord {
	/// create a record replacing given char span of a snapshot with some text
	pub fn replacing(snapshot: &Snapshot, span: std::ops::Range<usize>, text: impl Into<String>) -> Self {
		let start = snapshot.position_at(span.start);
		let end = snapshot.position_at(span.end);
		ChangeRecord {
			range: Range::new(start, end),
			range_offset: span.start,
			range_length: span.end.saturating_sub(span.start),
			text: text.into(),
		}
	}

	/// create a record from the difference between a snapshot and some new content
	///
	/// the record spans from the first to the last differing char, so common prefix and
	/// suffix are left untouched
	pub fn from_diff(before: &Snapshot, after: &str) -> Self {
		let previous = before.text();
		let diff = similar::TextDiff::from_chars(previous.as_str(), after);
		let mut start = 0;
		let mut end = 0;
		let mut from_beginning = true;
		for op in diff.ops() {
			match op {
				similar::DiffOp::Equal { len, .. } => {
					if from_beginning {
						start += len
					} else {
						end += len
					}
				},
				_ => {
					end = 0;
					from_beginning = false;
				}
			}
		}
		let end_before = before.len() - end;
		let end_after = after.chars().count() - end;

		ChangeRecord::replacing(before, start..end_before, char_slice(after, start, end_after))
	}

	/// char span replaced by this record, in document previous state
	pub fn span(&self) -> std::ops::Range<usize> {
		self.range_offset..self.range_offset + self.range_length
	}

	/// returns true if this record removes existing text
	pub fn is_deletion(&self) -> bool {
		self.range_length > 0
	}

	/// returns true if this record adds new text
	pub fn is_insertion(&self) -> bool {
		!self.text.is_empty()
	}

	/// returns true if this record is effectively a no-op
	pub fn is_empty(&self) -> bool {
		!self.is_deletion() && !self.is_insertion()
	}

	/// apply this record to given text, clamping the span to its extents
	pub fn apply(&self, txt: &str) -> String {
		let pre = char_slice(txt, 0, self.range_offset);
		let post = char_slice(txt, self.range_offset + self.range_length, usize::MAX);
		format!("{}{}{}", pre, self.text, post)
	}
}
