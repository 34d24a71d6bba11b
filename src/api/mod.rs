//! # API
//! these types and traits represent the main `opbridge` library API.

/// coordinates inside a document
pub mod position;

/// a primitive edit reported by the editor
pub mod change;

/// representation for a user cursor
pub mod cursor;

/// events published by the adapter
pub mod event;

/// interfaces the adapter needs from the editor widget
pub mod host;

/// release handles
pub mod disposable;

/// adapter configuration
pub mod config;

pub use position::{Position, Range, Selection};
pub use change::ChangeRecord;
pub use cursor::Cursor;
pub use event::{AdapterEvent, EventKind, ListenerId};
pub use host::{
	ContentChangeEvent, CursorChangeReason, CursorMoveEvent, CursorWidget, Decoration, DecorationId,
	EditOperation, HistoryHandler, HistoryKind, HostEditor, HostEvent, HostEventKind, HostListener,
	Stickiness, TextModel,
};
pub use disposable::{Disposable, DisposableList};
pub use config::Config;
