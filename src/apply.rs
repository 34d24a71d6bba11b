//! ### Apply
//!
//! turns an operation into a batch of editor edits.

use operational_transform::{Operation, OperationSeq};

use crate::api::{EditOperation, Range as TextRange, TextModel};

/// build editor edits performing given operation on given model.
///
/// coordinates are all resolved against current model content, so the resulting batch must be
/// applied at once with [`TextModel::apply_edits`].
pub fn edits_from_operation(op: &OperationSeq, model: &dyn TextModel) -> Vec<EditOperation> {
	let mut edits = Vec::new();
	let mut index = 0;
	for entry in op.ops() {
		match entry {
			Operation::Retain(n) => index += *n as usize,
			Operation::Insert(text) => edits.push(EditOperation::insert(model.position_at(index), text.as_str())),
			Operation::Delete(n) => {
				let start = model.position_at(index);
				let end = model.position_at(index + *n as usize);
				edits.push(EditOperation::delete(TextRange::new(start, end)));
				index += *n as usize;
			},
		}
	}
	edits
}

#[cfg(test)]
mod tests {
	use operational_transform::OperationSeq;

	use super::edits_from_operation;
	use crate::api::{Position, Range};
	use crate::headless::HeadlessModel;

	#[test]
	fn retains_emit_no_edits() {
		let model = HeadlessModel::new("hello\nworld");
		let mut op = OperationSeq::default();
		op.retain(11);
		assert!(edits_from_operation(&op, &*model).is_empty());
	}

	#[test]
	fn edits_resolve_against_previous_content() {
		let model = HeadlessModel::new("hello\nworld");
		let mut op = OperationSeq::default();
		op.retain(5);
		op.delete(1);
		op.insert(", ");
		op.retain(5);
		let edits = edits_from_operation(&op, &*model);
		assert_eq!(edits.len(), 2);
		assert_eq!(edits[0].range, Range::point(Position::new(1, 6)));
		assert_eq!(edits[0].text, ", ");
		assert_eq!(edits[1].range, Range::new(Position::new(1, 6), Position::new(2, 1)));
		assert!(edits[1].text.is_empty());
		assert!(edits.iter().all(|e| e.force_move_markers));
	}
}
