//! ### Errors
//! error types for each concern of the adapter, with a matching `Result` alias.

use crate::api::ChangeRecord;

pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

/// a batch of editor changes could not be expressed as an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
	#[error("change at offset {offset} starts before already consumed offset {skipped}")]
	OverlappingChange { offset: usize, skipped: usize },

	#[error("changes consumed {skipped} characters of a {length} characters document")]
	ChangeOutOfBounds { skipped: usize, length: usize },
}

/// diagnostic context published with [`crate::api::AdapterEvent::Error`].
#[derive(Debug, Clone)]
pub struct ErrorReport {
	/// what went wrong.
	pub error: TranslationError,
	/// forward operation built before the failure.
	pub operation: String,
	/// inverse operation built before the failure.
	pub inverse: String,
	/// record being processed when the failure happened, if any.
	pub change: Option<ChangeRecord>,
	/// length of the baseline document.
	pub content_length: usize,
}



pub type ApplyResult<T> = std::result::Result<T, ApplyError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
	#[error("operation expects a document of {expected} characters, editor holds {actual}")]
	LengthMismatch { expected: usize, actual: usize },
}



pub type ContractResult<T> = std::result::Result<T, ContractError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
	#[error("invalid argument `{name}`: {reason}")]
	InvalidArgument { name: &'static str, reason: &'static str },
}



pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
	#[error("given handler is not the one registered")]
	NotRegistered,

	#[error("model handler was replaced by someone else, original not restored")]
	Replaced,
}



// note that host listeners return this, so any concern may surface here

pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
	#[error("could not translate change: {0}")]
	Translation(#[from] TranslationError),

	#[error("could not apply operation: {0}")]
	Apply(#[from] ApplyError),

	#[error("contract violation: {0}")]
	Contract(#[from] ContractError),

	#[error("history override: {0}")]
	History(#[from] HistoryError),
}
