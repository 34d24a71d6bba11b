//! # Host
//!
//! interfaces the adapter consumes from the concrete editing widget.
//!
//! editor plugins implement [`HostEditor`] and [`TextModel`] on top of their widget. both take
//! `&self` everywhere: widgets are shared handles and are expected to use interior mutability.
//! implementations must be able to handle calls coming from inside their own listeners, since
//! the adapter reacts to events by reading back content and selections.

use std::rc::Rc;

use crate::api::{ChangeRecord, Disposable, Position, Range, Selection};
use crate::errors::AdapterResult;

/// native events the adapter listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEventKind {
	Focus,
	Blur,
	ModelChange,
	ContentChange,
	CursorMove,
}

impl HostEventKind {
	pub const ALL: [HostEventKind; 5] = [
		HostEventKind::Focus,
		HostEventKind::Blur,
		HostEventKind::ModelChange,
		HostEventKind::ContentChange,
		HostEventKind::CursorMove,
	];
}

/// why the cursor moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorChangeReason {
	#[default]
	NotSet,
	ContentFlush,
	/// editor repositioned cursors after an edit, nothing the user did.
	RecoverFromMarkers,
	Explicit,
	Paste,
	Undo,
	Redo,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentChangeEvent {
	/// records in the order the editor reports them.
	pub changes: Vec<ChangeRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorMoveEvent {
	pub selection: Selection,
	pub reason: CursorChangeReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
	Focus,
	Blur,
	/// editor switched to a different model, read the new one with [`HostEditor::model`].
	ModelChange,
	ContentChange(ContentChangeEvent),
	CursorMove(CursorMoveEvent),
}

impl HostEvent {
	pub fn kind(&self) -> HostEventKind {
		match self {
			HostEvent::Focus => HostEventKind::Focus,
			HostEvent::Blur => HostEventKind::Blur,
			HostEvent::ModelChange => HostEventKind::ModelChange,
			HostEvent::ContentChange(_) => HostEventKind::ContentChange,
			HostEvent::CursorMove(_) => HostEventKind::CursorMove,
		}
	}
}

/// callback registered on the host. errors are for the host to handle.
pub type HostListener = Rc<dyn Fn(&HostEvent) -> AdapterResult<()>>;

/// one edit in a batch given to [`TextModel::apply_edits`].
///
/// all ranges in a batch refer to the content before the batch is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOperation {
	pub range: Range,
	pub text: String,
	/// push decorations and cursors sitting at the edit boundary along with the edit.
	pub force_move_markers: bool,
}

impl EditOperation {
	pub fn insert(at: Position, text: impl Into<String>) -> Self {
		EditOperation { range: Range::point(at), text: text.into(), force_move_markers: true }
	}

	pub fn delete(range: Range) -> Self {
		EditOperation { range, text: String::new(), force_move_markers: true }
	}

	pub fn replace(range: Range, text: impl Into<String>) -> Self {
		EditOperation { range, text: text.into(), force_move_markers: false }
	}
}

/// how a decoration reacts to typing right at its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stickiness {
	#[default]
	AlwaysGrowsWhenTypingAtEdges,
	NeverGrowsWhenTypingAtEdges,
	GrowsOnlyWhenTypingBefore,
	GrowsOnlyWhenTypingAfter,
}

pub type DecorationId = String;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
	pub range: Range,
	pub class_name: String,
	pub stickiness: Stickiness,
	pub hover_message: Option<String>,
}

/// label shown next to a remote user's cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorWidget {
	pub id: String,
	pub client_id: String,
	pub position: Position,
	pub label: String,
	pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HistoryKind {
	Undo,
	Redo,
}

/// undo or redo entry point of a model.
pub type HistoryHandler = Rc<dyn Fn()>;

/// the document held by an editor.
pub trait TextModel {
	/// whole content.
	fn value(&self) -> String;

	/// content length in chars.
	fn value_length(&self) -> usize {
		self.value().chars().count()
	}

	/// replace whole content, notifying listeners like any other edit.
	fn set_value(&self, text: &str);

	fn lines_content(&self) -> Vec<String>;

	fn eol(&self) -> String;

	fn offset_at(&self, position: Position) -> usize;

	fn position_at(&self, offset: usize) -> Position;

	/// apply a batch of edits, all expressed against content before the batch.
	fn apply_edits(&self, edits: &[EditOperation]);

	/// currently installed undo or redo handler.
	fn history_handler(&self, kind: HistoryKind) -> Option<HistoryHandler>;

	/// install an undo or redo handler, returning the previous one.
	fn set_history_handler(&self, kind: HistoryKind, handler: Option<HistoryHandler>) -> Option<HistoryHandler>;
}

/// the editing widget.
pub trait HostEditor {
	/// attached model, if any.
	fn model(&self) -> Option<Rc<dyn TextModel>>;

	/// register a listener for a native event.
	fn subscribe(&self, kind: HostEventKind, listener: HostListener) -> Disposable;

	fn selection(&self) -> Option<Selection>;

	fn set_selection(&self, selection: Selection);

	fn read_only(&self) -> bool;

	fn set_read_only(&self, read_only: bool);

	/// remove decorations with given ids and add new ones, returning ids of the new ones.
	fn delta_decorations(&self, old: &[DecorationId], new: Vec<Decoration>) -> Vec<DecorationId>;

	/// make a style rule available to decorations.
	fn add_style_rule(&self, class_name: &str, declarations: &str);

	fn add_widget(&self, widget: CursorWidget) -> Disposable;
}
