//! ### Translate
//!
//! turns a batch of editor changes into an operation and its inverse.
//!
//! editors report a batch of discontiguous edits, each positioned against the content before
//! the batch. records are walked left to right keeping a running offset into that previous
//! content, so every retain and delete count refers to what is left of the baseline.

use operational_transform::OperationSeq;

use crate::api::ChangeRecord;
use crate::errors::{ErrorReport, TranslationError};
use crate::snapshot::Snapshot;

/// a local edit expressed as operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
	/// transforms previous content into current content.
	pub operation: OperationSeq,
	/// transforms current content back into previous content.
	pub inverse: OperationSeq,
}

/// translate a batch of changes made on top of given snapshot.
///
/// on failure the returned report holds the operations built so far and the offending record.
pub fn translate(changes: &[ChangeRecord], snapshot: &Snapshot) -> Result<Translation, Box<ErrorReport>> {
	let content_length = snapshot.len();
	let mut operation = OperationSeq::default();
	let mut inverse = OperationSeq::default();

	let mut batch : Vec<&ChangeRecord> = changes.iter().collect();
	if batch.len() > 1 && batch[0].range_offset > batch[batch.len() - 1].range_offset {
		batch.reverse();
	}

	let mut skipped = 0;
	for change in batch {
		let Some(retain) = change.range_offset.checked_sub(skipped) else {
			let error = TranslationError::OverlappingChange { offset: change.range_offset, skipped };
			return Err(report(error, &operation, &inverse, Some(change), content_length));
		};
		operation.retain(retain as u64);
		inverse.retain(retain as u64);

		let inserted = change.text.chars().count() as u64;
		if change.is_deletion() {
			let previous = snapshot.text_in_range(Some(&change.range));
			operation.delete(change.range_length as u64);
			inverse.insert(&previous);
		}
		if change.is_insertion() {
			operation.insert(&change.text);
			inverse.delete(inserted);
		}
		tracing::trace!("translated change at {} (-{} +{})", change.range_offset, change.range_length, inserted);

		skipped += retain + change.range_length;
	}

	let Some(tail) = content_length.checked_sub(skipped) else {
		let error = TranslationError::ChangeOutOfBounds { skipped, length: content_length };
		return Err(report(error, &operation, &inverse, None, content_length));
	};
	operation.retain(tail as u64);
	inverse.retain(tail as u64);

	Ok(Translation { operation, inverse })
}

fn report(
	error: TranslationError,
	operation: &OperationSeq,
	inverse: &OperationSeq,
	change: Option<&ChangeRecord>,
	content_length: usize,
) -> Box<ErrorReport> {
	Box::new(ErrorReport {
		error,
		operation: format!("{:?}", operation.ops()),
		inverse: format!("{:?}", inverse.ops()),
		change: change.cloned(),
		content_length,
	})
}

#[cfg(test)]
mod tests {
	use operational_transform::OperationSeq;

	use super::translate;
	use crate::api::ChangeRecord;
	use crate::errors::TranslationError;
	use crate::snapshot::Snapshot;

	fn snap(txt: &str) -> Snapshot {
		Snapshot::from_text(txt, "\n")
	}

	#[test]
	fn replacing_a_newline_produces_expected_operations() {
		let before = snap("hello\nworld");
		let change = ChangeRecord::replacing(&before, 5..6, ", ");
		let res = translate(&[change], &before).unwrap();

		let mut operation = OperationSeq::default();
		operation.retain(5);
		operation.delete(1);
		operation.insert(", ");
		operation.retain(5);
		let mut inverse = OperationSeq::default();
		inverse.retain(5);
		inverse.insert("\n");
		inverse.delete(2);
		inverse.retain(5);

		assert_eq!(res.operation, operation);
		assert_eq!(res.inverse, inverse);
		assert_eq!(res.operation.apply("hello\nworld").unwrap(), "hello, world");
		assert_eq!(res.inverse.apply("hello, world").unwrap(), "hello\nworld");
	}

	#[test]
	fn descending_batch_is_processed_left_to_right() {
		let before = snap("one two three");
		// editors usually report multi cursor edits from the bottom up
		let batch = vec![
			ChangeRecord::replacing(&before, 8..13, "3"),
			ChangeRecord::replacing(&before, 4..4, "and "),
			ChangeRecord::replacing(&before, 0..3, ""),
		];
		let res = translate(&batch, &before).unwrap();
		assert_eq!(res.operation.base_len(), before.len());
		assert_eq!(res.operation.apply("one two three").unwrap(), " and two 3");
		assert_eq!(res.inverse.apply(" and two 3").unwrap(), "one two three");
	}

	#[test]
	fn ascending_batch_is_kept_as_is() {
		let before = snap("alpha\nbeta\ngamma");
		let batch = vec![
			ChangeRecord::replacing(&before, 0..1, "A"),
			ChangeRecord::replacing(&before, 6..7, "B"),
			ChangeRecord::replacing(&before, 11..12, "G"),
		];
		let res = translate(&batch, &before).unwrap();
		assert_eq!(res.operation.apply(&before.text()).unwrap(), "Alpha\nBeta\nGamma");
		assert_eq!(res.inverse.apply("Alpha\nBeta\nGamma").unwrap(), before.text());
	}

	#[test]
	fn multi_line_deletion_restores_removed_lines_on_inverse() {
		let before = snap("first\nsecond\nthird\nfourth");
		let change = ChangeRecord::replacing(&before, 3..16, "");
		let res = translate(&[change], &before).unwrap();
		assert_eq!(res.operation.apply(&before.text()).unwrap(), "firrd\nfourth");
		assert_eq!(res.inverse.apply("firrd\nfourth").unwrap(), before.text());
	}

	#[test]
	fn inverse_composed_with_operation_is_identity() {
		let before = snap("sphinx of black quartz\njudge my vow");
		let batch = vec![
			ChangeRecord::replacing(&before, 23..28, "guard"),
			ChangeRecord::replacing(&before, 10..16, ""),
		];
		let res = translate(&batch, &before).unwrap();
		let identity = res.operation.compose(&res.inverse).unwrap();
		assert_eq!(identity.apply(&before.text()).unwrap(), before.text());
	}

	#[test]
	fn empty_batch_is_a_noop() {
		let before = snap("nothing to see");
		let res = translate(&[], &before).unwrap();
		assert!(res.operation.is_noop());
		assert!(res.inverse.is_noop());
		assert_eq!(res.operation.base_len(), before.len());
	}

	#[test]
	fn overlapping_changes_are_rejected() {
		let before = snap("hello world");
		let batch = vec![
			ChangeRecord::replacing(&before, 2..8, "y"),
			ChangeRecord::replacing(&before, 4..6, "z"),
		];
		let report = translate(&batch, &before).unwrap_err();
		assert_eq!(report.error, TranslationError::OverlappingChange { offset: 4, skipped: 8 });
		assert_eq!(report.change.as_ref().map(|c| c.range_offset), Some(4));
		assert_eq!(report.content_length, 11);
		assert!(report.operation.contains("Retain(2)"));
	}

	#[test]
	fn changes_past_document_end_are_rejected() {
		let before = snap("short");
		let change = ChangeRecord { range_offset: 3, range_length: 10, ..Default::default() };
		let report = translate(&[change], &before).unwrap_err();
		assert_eq!(report.error, TranslationError::ChangeOutOfBounds { skipped: 13, length: 5 });
		assert!(report.change.is_none());
	}

	mod generated {
		use proptest::prelude::*;
		use proptest::test_runner::Config;

		use super::{snap, translate};
		use crate::api::ChangeRecord;

		proptest! {
			#![proptest_config(Config::with_cases(256))]
			#[test]
			fn any_well_formed_batch_round_trips(
				doc in "[ab é\n]{0,32}",
				steps in prop::collection::vec((0_usize..4, 0_usize..4, "[xy\né]{0,3}"), 0..6),
				descending in any::<bool>(),
			) {
				let before = snap(&doc);
				let len = before.len();
				let mut offset = 0;
				let mut batch = Vec::new();
				for (i, (gap, del, text)) in steps.into_iter().enumerate() {
					// records never touch, editors merge those
					let gap = if i == 0 { gap } else { gap + 1 };
					if offset + gap > len {
						break;
					}
					offset += gap;
					let end = offset + del.min(len - offset);
					batch.push(ChangeRecord::replacing(&before, offset..end, text));
					offset = end;
				}

				let mut after = doc.clone();
				for change in batch.iter().rev() {
					after = change.apply(&after);
				}
				if descending {
					batch.reverse();
				}

				let res = translate(&batch, &before).unwrap();
				prop_assert_eq!(res.operation.base_len(), len);
				prop_assert_eq!(res.operation.target_len(), after.chars().count());
				prop_assert_eq!(res.operation.apply(&doc).unwrap(), after.clone());
				prop_assert_eq!(res.inverse.apply(&after).unwrap(), doc.clone());
			}
		}
	}
}
