//! ### Position
//! coordinates inside a document, 1-based like most editor widgets.

/// a `(line, column)` coordinate, both 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
	/// line number, starting from 1.
	pub line_number: usize,
	/// column, starting from 1. column `len + 1` is the end of the line.
	pub column: usize,
}

impl Position {
	pub const fn new(line_number: usize, column: usize) -> Self {
		Position { line_number, column }
	}
}

impl Default for Position {
	fn default() -> Self {
		Position::new(1, 1)
	}
}

impl From<(usize, usize)> for Position {
	fn from((line_number, column): (usize, usize)) -> Self {
		Position::new(line_number, column)
	}
}

/// a span between two coordinates, with `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
	pub start: Position,
	pub end: Position,
}

impl Range {
	/// build a range from two coordinates, swapping them if given in reverse order.
	pub fn new(a: Position, b: Position) -> Self {
		if a <= b {
			Range { start: a, end: b }
		} else {
			Range { start: b, end: a }
		}
	}

	/// a zero-width range at given coordinate.
	pub fn point(at: Position) -> Self {
		Range { start: at, end: at }
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	pub fn is_single_line(&self) -> bool {
		self.start.line_number == self.end.line_number
	}
}

/// a user selection: an anchor and an active end, possibly reversed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
	/// where the selection started.
	pub anchor: Position,
	/// where the caret currently is.
	pub active: Position,
}

impl Selection {
	pub fn new(anchor: Position, active: Position) -> Self {
		Selection { anchor, active }
	}

	pub fn caret(at: Position) -> Self {
		Selection { anchor: at, active: at }
	}

	pub fn start(&self) -> Position {
		std::cmp::min(self.anchor, self.active)
	}

	pub fn end(&self) -> Position {
		std::cmp::max(self.anchor, self.active)
	}

	pub fn is_empty(&self) -> bool {
		self.anchor == self.active
	}

	pub fn range(&self) -> Range {
		Range::new(self.anchor, self.active)
	}
}

#[cfg(test)]
mod tests {
	use super::{Position, Range, Selection};

	#[test]
	fn positions_order_by_line_then_column() {
		assert!(Position::new(1, 9) < Position::new(2, 1));
		assert!(Position::new(2, 1) < Position::new(2, 3));
	}

	#[test]
	fn range_normalizes_reversed_endpoints() {
		let range = Range::new(Position::new(3, 2), Position::new(1, 5));
		assert_eq!(range.start, Position::new(1, 5));
		assert_eq!(range.end, Position::new(3, 2));
		assert!(!range.is_single_line());
	}

	#[test]
	fn reversed_selection_reports_ordered_bounds() {
		let sel = Selection::new(Position::new(2, 4), Position::new(1, 1));
		assert_eq!(sel.start(), Position::new(1, 1));
		assert_eq!(sel.end(), Position::new(2, 4));
		assert!(!sel.is_empty());
		assert!(Selection::caret(Position::new(4, 4)).is_empty());
	}
}
