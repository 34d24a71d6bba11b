//! ### Prelude
//!
//! all-in-one imports with `use opbridge::prelude::*`

pub use crate::api::{
	AdapterEvent,
	ChangeRecord,
	Config,
	Cursor,
	Disposable,
	EventKind,
	HostEditor,
	Position,
	Range,
	Selection,
	TextModel,
};

pub use crate::{
	errors::AdapterError,
	errors::AdapterResult,
	headless::HeadlessEditor,
	headless::HeadlessModel,
	ot,
	EditorAdapter,
};
