//! ### Cursor
//! represents a user caret or selection as linear offsets.

use serde::{Deserialize, Serialize};

/// caret or selection in a document, as char offsets.
///
/// when both ends are equal this is a plain caret. on the wire it looks like
/// `{"position":3,"selectionEnd":7}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
	/// offset where the cursor sits.
	pub position: usize,
	/// offset where the selection ends, equal to `position` for a caret.
	pub selection_end: usize,
}

impl Cursor {
	pub const fn new(position: usize, selection_end: usize) -> Self {
		Cursor { position, selection_end }
	}

	pub const fn caret(position: usize) -> Self {
		Cursor { position, selection_end: position }
	}

	pub fn is_caret(&self) -> bool {
		self.position == self.selection_end
	}

	/// covered span, with ends ordered.
	pub fn span(&self) -> std::ops::Range<usize> {
		self.position.min(self.selection_end)..self.position.max(self.selection_end)
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}

	pub fn from_json(txt: &str) -> serde_json::Result<Self> {
		serde_json::from_str(txt)
	}
}
