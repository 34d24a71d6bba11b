//! ### Headless
//!
//! an in-memory [`HostEditor`] and [`TextModel`], with no UI attached.
//!
//! useful to keep a replica of a shared document where no real editor exists (bots, replays,
//! server side previews), and to exercise adapters in tests. it behaves like common editor
//! widgets: edit batches are reported in descending offset order, a read-only editor refuses
//! edits, and decorations, style rules and widgets are just recorded.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::api::{
	ChangeRecord, ContentChangeEvent, CursorChangeReason, CursorMoveEvent, CursorWidget, Decoration,
	DecorationId, Disposable, EditOperation, HistoryHandler, HistoryKind, HostEditor, HostEvent,
	HostEventKind, HostListener, Position, Selection, TextModel,
};
use crate::errors::AdapterError;
use crate::snapshot::{Snapshot, DEFAULT_EOL};

type ModelListener = Rc<dyn Fn(&ContentChangeEvent)>;

/// an in-memory document.
pub struct HeadlessModel {
	content: RefCell<String>,
	eol: String,
	locked: Cell<bool>,
	edits: Cell<usize>,
	listeners: RefCell<Vec<(u64, ModelListener)>>,
	next_listener: Cell<u64>,
	undo: RefCell<Option<HistoryHandler>>,
	redo: RefCell<Option<HistoryHandler>>,
	native_undo: Rc<Cell<usize>>,
	native_redo: Rc<Cell<usize>>,
}

impl std::fmt::Debug for HeadlessModel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HeadlessModel")
			.field("content", &self.content.borrow())
			.field("eol", &self.eol)
			.field("locked", &self.locked.get())
			.finish()
	}
}

impl HeadlessModel {
	pub fn new(text: &str) -> Rc<Self> {
		HeadlessModel::with_eol(text, DEFAULT_EOL)
	}

	pub fn with_eol(text: &str, eol: &str) -> Rc<Self> {
		let native_undo = Rc::new(Cell::new(0));
		let native_redo = Rc::new(Cell::new(0));
		let undo_counter = native_undo.clone();
		let redo_counter = native_redo.clone();
		let undo: HistoryHandler = Rc::new(move || undo_counter.set(undo_counter.get() + 1));
		let redo: HistoryHandler = Rc::new(move || redo_counter.set(redo_counter.get() + 1));
		Rc::new(HeadlessModel {
			content: RefCell::new(text.to_string()),
			eol: if eol.is_empty() { DEFAULT_EOL.to_string() } else { eol.to_string() },
			locked: Cell::new(false),
			edits: Cell::new(0),
			listeners: RefCell::new(Vec::new()),
			next_listener: Cell::new(0),
			undo: RefCell::new(Some(undo)),
			redo: RefCell::new(Some(redo)),
			native_undo,
			native_redo,
		})
	}

	/// listen for content changes, returns an id for [`HeadlessModel::remove_listener`].
	pub fn on_did_change_content(&self, listener: impl Fn(&ContentChangeEvent) + 'static) -> u64 {
		let id = self.next_listener.get();
		self.next_listener.set(id + 1);
		self.listeners.borrow_mut().push((id, Rc::new(listener)));
		id
	}

	pub fn remove_listener(&self, id: u64) {
		self.listeners.borrow_mut().retain(|(x, _)| *x != id);
	}

	/// run current undo handler.
	pub fn undo(&self) {
		let handler = self.undo.borrow().clone();
		if let Some(cb) = handler { cb() }
	}

	/// run current redo handler.
	pub fn redo(&self) {
		let handler = self.redo.borrow().clone();
		if let Some(cb) = handler { cb() }
	}

	/// how many times the model's own undo ran.
	pub fn native_undo_count(&self) -> usize {
		self.native_undo.get()
	}

	/// how many times the model's own redo ran.
	pub fn native_redo_count(&self) -> usize {
		self.native_redo.get()
	}

	/// how many non empty edit batches were applied.
	pub fn edit_count(&self) -> usize {
		self.edits.get()
	}

	pub(crate) fn set_locked(&self, locked: bool) {
		self.locked.set(locked);
	}

	fn snapshot(&self) -> Snapshot {
		Snapshot::from_text(&self.content.borrow(), &self.eol)
	}

	fn emit(&self, event: ContentChangeEvent) {
		let listeners : Vec<ModelListener> = self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
		for listener in listeners {
			listener(&event);
		}
	}

	fn slot(&self, kind: HistoryKind) -> &RefCell<Option<HistoryHandler>> {
		match kind {
			HistoryKind::Undo => &self.undo,
			HistoryKind::Redo => &self.redo,
		}
	}
}

impl TextModel for HeadlessModel {
	fn value(&self) -> String {
		self.content.borrow().clone()
	}

	fn set_value(&self, text: &str) {
		let before = self.snapshot();
		let change = ChangeRecord::replacing(&before, 0..before.len(), text);
		*self.content.borrow_mut() = text.to_string();
		self.emit(ContentChangeEvent { changes: vec![change] });
	}

	fn lines_content(&self) -> Vec<String> {
		self.content.borrow().split(self.eol.as_str()).map(str::to_string).collect()
	}

	fn eol(&self) -> String {
		self.eol.clone()
	}

	fn offset_at(&self, position: Position) -> usize {
		self.snapshot().offset_at(position)
	}

	fn position_at(&self, offset: usize) -> Position {
		self.snapshot().position_at(offset)
	}

	fn apply_edits(&self, edits: &[EditOperation]) {
		if edits.is_empty() {
			return;
		}
		if self.locked.get() {
			tracing::warn!("model is read-only, dropping {} edits", edits.len());
			return;
		}

		let before = self.snapshot();
		let mut spans : Vec<(usize, usize, &str)> = edits
			.iter()
			.map(|edit| {
				let start = before.offset_at(edit.range.start);
				let end = before.offset_at(edit.range.end);
				(start, end.max(start), edit.text.as_str())
			})
			.collect();
		spans.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

		// touching edits are reported as one change, like editor widgets do
		let mut merged : Vec<(usize, usize, String)> = Vec::with_capacity(spans.len());
		for (start, end, text) in spans {
			match merged.last_mut() {
				Some(last) if start <= last.1 => {
					if start < last.1 {
						tracing::warn!("edits overlapping at {}, merging them", start);
					}
					last.1 = last.1.max(end);
					last.2.push_str(text);
				},
				_ => merged.push((start, end, text.to_string())),
			}
		}

		// bottom up, so each change leaves offsets of the following ones untouched
		let changes : Vec<ChangeRecord> = merged
			.into_iter()
			.rev()
			.map(|(start, end, text)| ChangeRecord::replacing(&before, start..end, text))
			.collect();

		let mut content = before.text();
		for change in &changes {
			content = change.apply(&content);
		}
		*self.content.borrow_mut() = content;
		self.edits.set(self.edits.get() + 1);
		self.emit(ContentChangeEvent { changes });
	}

	fn history_handler(&self, kind: HistoryKind) -> Option<HistoryHandler> {
		self.slot(kind).borrow().clone()
	}

	fn set_history_handler(&self, kind: HistoryKind, handler: Option<HistoryHandler>) -> Option<HistoryHandler> {
		self.slot(kind).replace(handler)
	}
}

#[derive(Default)]
struct ListenerTable {
	next: u64,
	entries: Vec<(u64, HostEventKind, HostListener)>,
}

/// an in-memory editor widget.
#[derive(Default)]
pub struct HeadlessEditor {
	model: RefCell<Option<Rc<HeadlessModel>>>,
	forwarder: Cell<Option<u64>>,
	listeners: Rc<RefCell<ListenerTable>>,
	subscriptions: RefCell<HashMap<HostEventKind, usize>>,
	errors: Rc<RefCell<Vec<AdapterError>>>,
	selection: Cell<Option<Selection>>,
	read_only: Cell<bool>,
	decorations: RefCell<BTreeMap<u64, (DecorationId, Decoration)>>,
	next_decoration: Cell<u64>,
	styles: RefCell<Vec<(String, String)>>,
	widgets: Rc<RefCell<BTreeMap<String, CursorWidget>>>,
}

impl HeadlessEditor {
	pub fn new(model: Option<Rc<HeadlessModel>>) -> Rc<Self> {
		let editor = Rc::new(HeadlessEditor::default());
		if let Some(model) = model {
			editor.attach(model);
		}
		editor
	}

	pub fn with_text(text: &str) -> Rc<Self> {
		HeadlessEditor::new(Some(HeadlessModel::new(text)))
	}

	/// concrete handle to the attached model.
	pub fn headless_model(&self) -> Option<Rc<HeadlessModel>> {
		self.model.borrow().clone()
	}

	/// swap attached model, notifying listeners.
	pub fn set_model(&self, model: Option<Rc<HeadlessModel>>) {
		self.detach();
		if let Some(model) = model {
			self.attach(model);
		}
		self.fire(HostEvent::ModelChange);
	}

	pub fn focus(&self) {
		self.fire(HostEvent::Focus);
	}

	pub fn blur(&self) {
		self.fire(HostEvent::Blur);
	}

	/// move the local cursor as if the user (or the editor, depending on reason) did it.
	pub fn move_cursor(&self, selection: Selection, reason: CursorChangeReason) {
		self.selection.set(Some(selection));
		self.fire(HostEvent::CursorMove(CursorMoveEvent { selection, reason }));
	}

	pub fn clear_selection(&self) {
		self.selection.set(None);
	}

	/// total subscribe calls received for given event kind.
	pub fn subscription_count(&self, kind: HostEventKind) -> usize {
		self.subscriptions.borrow().get(&kind).copied().unwrap_or(0)
	}

	/// listeners currently registered for given event kind.
	pub fn listener_count(&self, kind: HostEventKind) -> usize {
		self.listeners.borrow().entries.iter().filter(|(_, k, _)| *k == kind).count()
	}

	pub fn decorations(&self) -> Vec<(DecorationId, Decoration)> {
		self.decorations.borrow().values().cloned().collect()
	}

	pub fn styles(&self) -> Vec<(String, String)> {
		self.styles.borrow().clone()
	}

	pub fn widgets(&self) -> Vec<CursorWidget> {
		self.widgets.borrow().values().cloned().collect()
	}

	/// errors returned by listeners so far, draining them.
	pub fn take_errors(&self) -> Vec<AdapterError> {
		std::mem::take(&mut *self.errors.borrow_mut())
	}

	fn attach(&self, model: Rc<HeadlessModel>) {
		model.set_locked(self.read_only.get());
		let table = Rc::downgrade(&self.listeners);
		let errors = Rc::downgrade(&self.errors);
		let id = model.on_did_change_content(move |event| {
			if let (Some(table), Some(errors)) = (table.upgrade(), errors.upgrade()) {
				dispatch(&table, &errors, &HostEvent::ContentChange(event.clone()));
			}
		});
		self.forwarder.set(Some(id));
		*self.model.borrow_mut() = Some(model);
	}

	fn detach(&self) {
		let previous = self.model.borrow_mut().take();
		if let (Some(model), Some(id)) = (previous, self.forwarder.take()) {
			model.remove_listener(id);
			model.set_locked(false);
		}
	}

	/// deliver a native event to subscribed listeners, as the widget itself would.
	pub fn fire(&self, event: HostEvent) {
		dispatch(&self.listeners, &self.errors, &event);
	}
}

fn dispatch(table: &RefCell<ListenerTable>, errors: &RefCell<Vec<AdapterError>>, event: &HostEvent) {
	let kind = event.kind();
	let listeners : Vec<HostListener> = table
		.borrow()
		.entries
		.iter()
		.filter(|(_, k, _)| *k == kind)
		.map(|(_, _, l)| l.clone())
		.collect();
	for listener in listeners {
		if let Err(e) = listener(event) {
			tracing::warn!("listener failed handling {:?}: {}", kind, e);
			errors.borrow_mut().push(e);
		}
	}
}

impl HostEditor for HeadlessEditor {
	fn model(&self) -> Option<Rc<dyn TextModel>> {
		self.model.borrow().clone().map(|m| m as Rc<dyn TextModel>)
	}

	fn subscribe(&self, kind: HostEventKind, listener: HostListener) -> Disposable {
		*self.subscriptions.borrow_mut().entry(kind).or_default() += 1;
		let id = {
			let mut table = self.listeners.borrow_mut();
			let id = table.next;
			table.next += 1;
			table.entries.push((id, kind, listener));
			id
		};
		let table: Weak<RefCell<ListenerTable>> = Rc::downgrade(&self.listeners);
		Disposable::new(move || {
			if let Some(table) = table.upgrade() {
				table.borrow_mut().entries.retain(|(x, _, _)| *x != id);
			}
		})
	}

	fn selection(&self) -> Option<Selection> {
		self.selection.get()
	}

	fn set_selection(&self, selection: Selection) {
		self.selection.set(Some(selection));
	}

	fn read_only(&self) -> bool {
		self.read_only.get()
	}

	fn set_read_only(&self, read_only: bool) {
		self.read_only.set(read_only);
		if let Some(model) = self.model.borrow().as_ref() {
			model.set_locked(read_only);
		}
	}

	fn delta_decorations(&self, old: &[DecorationId], new: Vec<Decoration>) -> Vec<DecorationId> {
		let mut decorations = self.decorations.borrow_mut();
		decorations.retain(|_, (id, _)| !old.contains(id));
		new.into_iter()
			.map(|decoration| {
				let n = self.next_decoration.get();
				self.next_decoration.set(n + 1);
				let id = format!("decoration-{n}");
				decorations.insert(n, (id.clone(), decoration));
				id
			})
			.collect()
	}

	fn add_style_rule(&self, class_name: &str, declarations: &str) {
		self.styles.borrow_mut().push((class_name.to_string(), declarations.to_string()));
	}

	fn add_widget(&self, widget: CursorWidget) -> Disposable {
		let id = widget.id.clone();
		self.widgets.borrow_mut().insert(id.clone(), widget);
		let widgets = Rc::downgrade(&self.widgets);
		Disposable::new(move || {
			if let Some(widgets) = widgets.upgrade() {
				widgets.borrow_mut().remove(&id);
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::{HeadlessEditor, HeadlessModel};
	use crate::api::{EditOperation, HostEditor, HostEvent, HostEventKind, Position, Range, TextModel};
	use crate::errors::AdapterResult;

	#[test]
	fn batch_edits_resolve_against_previous_content() {
		let model = HeadlessModel::new("one two three");
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		model.on_did_change_content(move |ev| sink.borrow_mut().extend(ev.changes.iter().map(|c| c.range_offset)));
		model.apply_edits(&[
			EditOperation::delete(Range::new(Position::new(1, 1), Position::new(1, 4))),
			EditOperation::insert(Position::new(1, 5), "and "),
			EditOperation::replace(Range::new(Position::new(1, 9), Position::new(1, 14)), "3"),
		]);
		assert_eq!(model.value(), " and two 3");
		assert_eq!(*seen.borrow(), vec![8, 4, 0]);
		assert_eq!(model.edit_count(), 1);
	}

	#[test]
	fn insert_and_delete_at_same_point_keep_inserted_text() {
		let model = HeadlessModel::new("hello\nworld");
		model.apply_edits(&[
			EditOperation::insert(Position::new(1, 6), ", "),
			EditOperation::delete(Range::new(Position::new(1, 6), Position::new(2, 1))),
		]);
		assert_eq!(model.value(), "hello, world");
	}

	#[test]
	fn touching_edits_are_reported_as_one_change() {
		let model = HeadlessModel::new("hello\nworld");
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		model.on_did_change_content(move |ev| sink.borrow_mut().extend(ev.changes.iter().cloned()));
		model.apply_edits(&[
			EditOperation::delete(Range::new(Position::new(1, 6), Position::new(2, 1))),
			EditOperation::insert(Position::new(1, 6), ", "),
			EditOperation::insert(Position::new(2, 1), "big "),
		]);
		assert_eq!(model.value(), "hello, big world");
		let seen = seen.borrow();
		assert_eq!(seen.len(), 1);
		assert_eq!(seen[0].span(), 5..6);
		assert_eq!(seen[0].text, ", big ");
	}

	#[test]
	fn read_only_editor_refuses_edits() {
		let editor = HeadlessEditor::with_text("locked");
		editor.set_read_only(true);
		let model = editor.model().unwrap();
		model.apply_edits(&[EditOperation::insert(Position::new(1, 1), "un")]);
		assert_eq!(model.value(), "locked");
		editor.set_read_only(false);
		model.apply_edits(&[EditOperation::insert(Position::new(1, 1), "un")]);
		assert_eq!(model.value(), "unlocked");
	}

	#[test]
	fn content_changes_reach_editor_listeners() {
		let editor = HeadlessEditor::with_text("abc");
		let seen = Rc::new(RefCell::new(0));
		let sink = seen.clone();
		let handle = editor.subscribe(HostEventKind::ContentChange, Rc::new(move |ev: &HostEvent| -> AdapterResult<()> {
			assert!(matches!(ev, HostEvent::ContentChange(_)));
			*sink.borrow_mut() += 1;
			Ok(())
		}));
		editor.model().unwrap().set_value("xyz");
		assert_eq!(*seen.borrow(), 1);
		handle.dispose();
		editor.model().unwrap().set_value("abc");
		assert_eq!(*seen.borrow(), 1);
		assert_eq!(editor.listener_count(HostEventKind::ContentChange), 0);
	}

	#[test]
	fn swapped_out_model_stops_forwarding() {
		let editor = HeadlessEditor::with_text("first");
		let old = editor.headless_model().unwrap();
		let seen = Rc::new(RefCell::new(0));
		let sink = seen.clone();
		let _handle = editor.subscribe(HostEventKind::ContentChange, Rc::new(move |_: &HostEvent| -> AdapterResult<()> {
			*sink.borrow_mut() += 1;
			Ok(())
		}));
		editor.set_model(Some(HeadlessModel::new("second")));
		old.set_value("ignored");
		assert_eq!(*seen.borrow(), 0);
		editor.model().unwrap().set_value("counted");
		assert_eq!(*seen.borrow(), 1);
	}

	#[test]
	fn decorations_are_replaced_by_id() {
		let editor = HeadlessEditor::with_text("abc");
		let deco = crate::api::Decoration {
			range: Range::point(Position::new(1, 2)),
			class_name: "x".into(),
			stickiness: Default::default(),
			hover_message: None,
		};
		let ids = editor.delta_decorations(&[], vec![deco.clone(), deco.clone()]);
		assert_eq!(editor.decorations().len(), 2);
		editor.delta_decorations(&ids[..1], vec![]);
		assert_eq!(editor.decorations().len(), 1);
		assert_eq!(editor.decorations()[0].0, ids[1]);
	}
}
