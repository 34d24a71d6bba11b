//! ### Events
//!
//! native editor events in, adapter events out.

use std::collections::HashMap;
use std::rc::Rc;

use crate::api::{
	AdapterEvent, ChangeRecord, CursorChangeReason, CursorMoveEvent, EventKind, HostEvent,
	HostEventKind, HostListener, ListenerId, TextModel,
};
use crate::errors::AdapterResult;
use crate::translate::{self, Translation};

use super::{emit, AdapterInner, EditorAdapter};

pub(crate) type Listener = Rc<dyn Fn(&AdapterEvent)>;

/// listeners registered on an adapter, grouped by event kind.
#[derive(Default)]
pub(crate) struct Registry {
	next: u64,
	listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
}

impl Registry {
	fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next);
		self.next += 1;
		self.listeners.entry(kind).or_default().push((id, listener));
		id
	}

	fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
		let Some(list) = self.listeners.get_mut(&kind) else { return false };
		let before = list.len();
		list.retain(|(x, _)| *x != id);
		list.len() != before
	}

	/// listeners for given kind, cloned so they may register or remove listeners while running.
	pub(crate) fn listeners(&self, kind: EventKind) -> Vec<Listener> {
		self.listeners
			.get(&kind)
			.map(|list| list.iter().map(|(_, l)| l.clone()).collect())
			.unwrap_or_default()
	}

	pub(crate) fn clear(&mut self) {
		self.listeners.clear();
	}
}

impl EditorAdapter {
	/// register a listener for given event kind.
	///
	/// listeners run in registration order. after disposal nothing is registered and the
	/// returned id matches no listener.
	pub fn on(&self, kind: EventKind, listener: impl Fn(&AdapterEvent) + 'static) -> ListenerId {
		match self.0.registry.borrow_mut().as_mut() {
			Some(registry) => registry.add(kind, Rc::new(listener)),
			None => {
				tracing::warn!("adapter disposed, ignoring {:?} listener", kind);
				ListenerId(u64::MAX)
			},
		}
	}

	/// remove a listener, returns false if it was not registered for given kind.
	pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
		match self.0.registry.borrow_mut().as_mut() {
			Some(registry) => registry.remove(kind, id),
			None => false,
		}
	}

	/// whether editor events are currently bound.
	pub fn events(&self) -> bool {
		self.0.bound.get()
	}

	/// bind or unbind editor events. does nothing if already in requested state.
	///
	/// changes made while unbound are never published: binding again moves the baseline to
	/// current editor content.
	pub fn set_events(&self, enabled: bool) {
		if self.0.disposed.get() || self.0.bound.get() == enabled {
			return;
		}
		if enabled {
			self.bind();
		} else {
			self.0.unbind();
		}
	}

	fn bind(&self) {
		let Some(editor) = self.0.editor() else { return };
		let weak = Rc::downgrade(&self.0);
		let handles : Vec<_> = HostEventKind::ALL
			.into_iter()
			.map(|kind| {
				let weak = weak.clone();
				let listener: HostListener = Rc::new(move |event: &HostEvent| -> AdapterResult<()> {
					match weak.upgrade() {
						Some(inner) => inner.handle(event),
						None => Ok(()),
					}
				});
				editor.subscribe(kind, listener)
			})
			.collect();
		self.0.bindings.borrow_mut().extend(handles);
		self.0.bound.set(true);
		if let Some(model) = editor.model() {
			self.0.refresh_snapshot(&*model);
		}
		tracing::debug!("bound editor events");
	}
}

impl AdapterInner {
	pub(super) fn unbind(&self) {
		let mut bindings = std::mem::take(&mut *self.bindings.borrow_mut());
		bindings.dispose_all();
		if self.bound.replace(false) {
			tracing::debug!("unbound editor events");
		}
	}

	fn handle(&self, event: &HostEvent) -> AdapterResult<()> {
		match event {
			HostEvent::Focus => emit(self, AdapterEvent::Focus),
			HostEvent::Blur => self.on_blur(),
			HostEvent::ModelChange => return self.on_model_change(),
			HostEvent::ContentChange(ev) => return self.on_content_change(&ev.changes),
			HostEvent::CursorMove(ev) => self.on_cursor_move(ev),
		}
		Ok(())
	}

	fn on_blur(&self) {
		// blur also fires when focus moves inside the editor, keep selections visible
		let selected = self
			.editor()
			.and_then(|e| e.selection())
			.is_some_and(|s| !s.is_empty());
		if selected {
			tracing::trace!("editor blurred with a selection, not publishing");
		} else {
			emit(self, AdapterEvent::Blur);
		}
	}

	fn on_cursor_move(&self, event: &CursorMoveEvent) {
		if event.reason == CursorChangeReason::RecoverFromMarkers {
			return;
		}
		self.last_selection.set(Some(event.selection));
		emit(self, AdapterEvent::Cursor);
	}

	fn on_content_change(&self, changes: &[ChangeRecord]) -> AdapterResult<()> {
		if self.applying.get() {
			return Ok(());
		}
		let Some(model) = self.model() else { return Ok(()) };
		if !self.initiated.get() {
			self.refresh_snapshot(&*model);
			return Ok(());
		}
		self.publish(changes, &*model)
	}

	fn on_model_change(&self) -> AdapterResult<()> {
		let Some(model) = self.model() else { return Ok(()) };
		self.reinstall_history(&model);
		if self.applying.get() || !self.initiated.get() {
			self.refresh_snapshot(&*model);
			return Ok(());
		}
		let change = ChangeRecord::from_diff(&self.snapshot.borrow(), &model.value());
		tracing::debug!("model swapped, publishing difference at {}", change.range_offset);
		self.publish(&[change], &*model)
	}

	/// translate changes against the baseline, which is then moved to current content whatever
	/// the outcome.
	fn publish(&self, changes: &[ChangeRecord], model: &dyn TextModel) -> AdapterResult<()> {
		let outcome = translate::translate(changes, &self.snapshot.borrow());
		self.refresh_snapshot(model);
		match outcome {
			Ok(Translation { operation, inverse }) => {
				if !operation.is_noop() {
					emit(self, AdapterEvent::Change { operation, inverse });
				}
				Ok(())
			},
			Err(report) => {
				tracing::error!("could not translate {} changes: {}", changes.len(), report.error);
				let error = report.error.clone();
				emit(self, AdapterEvent::Error(*report));
				Err(error.into())
			},
		}
	}
}
