use operational_transform::OperationSeq;

use crate::errors::ErrorReport;

/// kinds of events an [`crate::EditorAdapter`] publishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
	Change,
	Cursor,
	Blur,
	Focus,
	Error,
}

#[derive(Debug, Clone)]
pub enum AdapterEvent {
	/// local edit, as an operation on previous content and its inverse.
	Change { operation: OperationSeq, inverse: OperationSeq },
	/// local cursor moved, read it with [`crate::EditorAdapter::cursor`].
	Cursor,
	Blur,
	Focus,
	/// local edit could not be translated.
	Error(ErrorReport),
}

impl AdapterEvent {
	pub fn kind(&self) -> EventKind {
		match self {
			Self::Change { .. } => EventKind::Change,
			Self::Cursor => EventKind::Cursor,
			Self::Blur => EventKind::Blur,
			Self::Focus => EventKind::Focus,
			Self::Error(_) => EventKind::Error,
		}
	}
}

impl std::fmt::Display for AdapterEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Change { operation, .. } => write!(f, "Change(base:{}, target:{})", operation.base_len(), operation.target_len()),
			Self::Cursor => write!(f, "Cursor"),
			Self::Blur   => write!(f, "Blur"),
			Self::Focus  => write!(f, "Focus"),
			Self::Error(report) => write!(f, "Error({})", report.error),
		}
	}
}

/// identifies a listener registered with [`crate::EditorAdapter::on`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
