//! ### Adapter
//!
//! the bridge between a [`HostEditor`] and a collaboration engine speaking operations.
//!
//! local edits reported by the editor are published as [`AdapterEvent::Change`], remote
//! operations are turned into editor edits with [`EditorAdapter::apply_operation`]. the adapter
//! keeps a [`Snapshot`] of the document as of the last processed change: editors report
//! changes after applying them, so the snapshot is the only place to read replaced text from.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use operational_transform::OperationSeq;

use crate::api::{AdapterEvent, Config, DisposableList, HostEditor, Selection, TextModel};
use crate::apply;
use crate::errors::{ApplyError, ApplyResult};
use crate::guard::{FlagGuard, WritableGuard};
use crate::snapshot::Snapshot;

pub(crate) mod events;
pub(crate) mod history;
pub(crate) mod cursor;


use cursor::RemoteCursors;
use events::Registry;
use history::HistoryOverride;

/// a handle to an editor adapter.
///
/// handles are cheap to clone and all refer to the same adapter. adapters live on the thread
/// driving the editor and are not `Send`. when the last handle is dropped the adapter is
/// disposed, see [`EditorAdapter::dispose`].
#[derive(Clone)]
pub struct EditorAdapter(pub(crate) Rc<AdapterInner>);

pub(crate) struct AdapterInner {
	editor: RefCell<Option<Rc<dyn HostEditor>>>,
	config: Config,
	snapshot: RefCell<Snapshot>,
	applying: Cell<bool>,
	initiated: Cell<bool>,
	disposed: Cell<bool>,
	bound: Cell<bool>,
	bindings: RefCell<DisposableList>,
	registry: RefCell<Option<Registry>>,
	last_selection: Cell<Option<Selection>>,
	undo: RefCell<Option<HistoryOverride>>,
	redo: RefCell<Option<HistoryOverride>>,
	remote: RefCell<RemoteCursors>,
	styles: RefCell<HashSet<String>>,
}

impl std::fmt::Debug for EditorAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EditorAdapter")
			.field("bound", &self.0.bound.get())
			.field("initiated", &self.0.initiated.get())
			.field("disposed", &self.0.disposed.get())
			.field("snapshot", &self.0.snapshot.borrow())
			.finish()
	}
}

impl EditorAdapter {
	/// wrap given editor. events are bound right away unless configured otherwise.
	pub fn new(editor: Rc<dyn HostEditor>, config: Config) -> Self {
		let snapshot = match editor.model() {
			Some(model) => Snapshot::capture(&*model),
			None => Snapshot::new(Vec::new(), config.default_eol()),
		};
		let bind = config.bind_events();
		let adapter = EditorAdapter(Rc::new(AdapterInner {
			editor: RefCell::new(Some(editor)),
			config,
			snapshot: RefCell::new(snapshot),
			applying: Cell::new(false),
			initiated: Cell::new(false),
			disposed: Cell::new(false),
			bound: Cell::new(false),
			bindings: RefCell::new(DisposableList::default()),
			registry: RefCell::new(Some(Registry::default())),
			last_selection: Cell::new(None),
			undo: RefCell::new(None),
			redo: RefCell::new(None),
			remote: RefCell::new(RemoteCursors::default()),
			styles: RefCell::new(HashSet::new()),
		}));
		if bind {
			adapter.set_events(true);
		}
		adapter
	}

	/// current editor content, empty if no model is attached.
	pub fn text(&self) -> String {
		self.0.model().map(|m| m.value()).unwrap_or_default()
	}

	/// replace whole editor content. this is reported back like any local edit.
	pub fn set_text(&self, text: &str) {
		if let Some(model) = self.0.model() {
			model.set_value(text);
		}
	}

	/// copy of the baseline the next local change will be translated against.
	pub fn snapshot(&self) -> Snapshot {
		self.0.snapshot.borrow().clone()
	}

	/// hash of the baseline content, to compare replicas.
	pub fn content_hash(&self) -> i64 {
		self.0.snapshot.borrow().hash()
	}

	/// apply a remote operation to the editor.
	///
	/// no-op operations are skipped without touching the editor. edits go through even if the
	/// editor is read-only, and are never reported back as local changes.
	pub fn apply_operation(&self, operation: &OperationSeq) -> ApplyResult<()> {
		if operation.is_noop() {
			tracing::trace!("skipping no-op operation");
			return Ok(());
		}
		let Some(editor) = self.0.editor() else { return Ok(()) };
		let Some(model) = editor.model() else { return Ok(()) };

		let actual = model.value_length();
		if operation.base_len() != actual {
			return Err(ApplyError::LengthMismatch { expected: operation.base_len(), actual });
		}

		let edits = apply::edits_from_operation(operation, &*model);
		tracing::trace!("applying {} edits ({} -> {} chars)", edits.len(), operation.base_len(), operation.target_len());

		let _writable = WritableGuard::unlock(&*editor);
		let _applying = FlagGuard::raise(&self.0.applying);
		model.apply_edits(&edits);
		self.0.refresh_snapshot(&*model);
		Ok(())
	}

	/// inverse of given operation, computed against the current baseline.
	pub fn invert_operation(&self, operation: &OperationSeq) -> OperationSeq {
		operation.invert(&self.0.snapshot.borrow().text())
	}

	/// start translating local changes.
	pub fn set_initiated(&self) {
		if !self.0.disposed.get() {
			self.0.initiated.set(true);
		}
	}

	/// stop translating local changes.
	pub fn reset_initiated(&self) {
		self.0.initiated.set(false);
	}

	pub fn is_initiated(&self) -> bool {
		self.0.initiated.get()
	}

	pub fn is_disposed(&self) -> bool {
		self.0.disposed.get()
	}

	/// release everything this adapter holds on the editor.
	///
	/// unbinds editor events, restores undo and redo handlers, removes remote cursors and
	/// drops all listeners. calling it again does nothing.
	pub fn dispose(&self) {
		self.0.teardown();
	}
}

impl AdapterInner {
	pub(crate) fn editor(&self) -> Option<Rc<dyn HostEditor>> {
		self.editor.borrow().clone()
	}

	pub(crate) fn model(&self) -> Option<Rc<dyn TextModel>> {
		self.editor()?.model()
	}

	pub(crate) fn refresh_snapshot(&self, model: &dyn TextModel) {
		*self.snapshot.borrow_mut() = Snapshot::capture(model);
	}

	fn teardown(&self) {
		if self.disposed.replace(true) {
			return;
		}
		self.unbind();
		self.release_history();
		self.release_remote_cursors();
		if let Some(mut registry) = self.registry.borrow_mut().take() {
			registry.clear();
		}
		self.initiated.set(false);
		self.editor.borrow_mut().take();
		tracing::debug!("editor adapter disposed");
	}
}

impl Drop for AdapterInner {
	fn drop(&mut self) {
		self.teardown();
	}
}

pub(crate) fn emit(inner: &AdapterInner, event: AdapterEvent) {
	let listeners = match inner.registry.borrow().as_ref() {
		Some(registry) => registry.listeners(event.kind()),
		None => return,
	};
	tracing::trace!("publishing {}", event);
	for listener in listeners {
		listener(&event);
	}
}
