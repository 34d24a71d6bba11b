//! ### History
//!
//! replaces the model undo and redo entry points, so collaboration aware history can take over.
//! overrides follow the editor across model swaps and are removed on disposal.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{HistoryHandler, HistoryKind, TextModel};
use crate::errors::{HistoryError, HistoryResult};
use crate::ext::IgnorableError;

use super::{AdapterInner, EditorAdapter};

pub(crate) struct HistoryOverride {
	callback: HistoryHandler,
	installed: Option<Installed>,
}

struct Installed {
	model: Rc<dyn TextModel>,
	original: Option<HistoryHandler>,
}

impl HistoryOverride {
	fn install(&mut self, kind: HistoryKind, model: Rc<dyn TextModel>) {
		let original = model.set_history_handler(kind, Some(self.callback.clone()));
		self.installed = Some(Installed { model, original });
	}

	/// put back the handler found when installing, unless someone else took over meanwhile.
	fn uninstall(&mut self, kind: HistoryKind) -> HistoryResult<()> {
		let Some(Installed { model, original }) = self.installed.take() else { return Ok(()) };
		match model.history_handler(kind) {
			Some(current) if Rc::ptr_eq(&current, &self.callback) => {
				model.set_history_handler(kind, original);
				Ok(())
			},
			_ => Err(HistoryError::Replaced),
		}
	}
}

impl EditorAdapter {
	/// route model undo to given callback, until [`EditorAdapter::deregister_undo`].
	pub fn register_undo(&self, callback: HistoryHandler) {
		self.0.register(HistoryKind::Undo, callback);
	}

	/// route model redo to given callback, until [`EditorAdapter::deregister_redo`].
	pub fn register_redo(&self, callback: HistoryHandler) {
		self.0.register(HistoryKind::Redo, callback);
	}

	/// give model undo back to the model.
	///
	/// fails with [`HistoryError::NotRegistered`] if given callback is not the registered one,
	/// and with [`HistoryError::Replaced`] if the model handler was changed by someone else, in
	/// which case it is left alone.
	pub fn deregister_undo(&self, callback: &HistoryHandler) -> HistoryResult<()> {
		self.0.deregister(HistoryKind::Undo, callback)
	}

	/// give model redo back to the model, see [`EditorAdapter::deregister_undo`].
	pub fn deregister_redo(&self, callback: &HistoryHandler) -> HistoryResult<()> {
		self.0.deregister(HistoryKind::Redo, callback)
	}
}

impl AdapterInner {
	fn history_slot(&self, kind: HistoryKind) -> &RefCell<Option<HistoryOverride>> {
		match kind {
			HistoryKind::Undo => &self.undo,
			HistoryKind::Redo => &self.redo,
		}
	}

	fn register(&self, kind: HistoryKind, callback: HistoryHandler) {
		if self.disposed.get() {
			return;
		}
		let mut slot = self.history_slot(kind).borrow_mut();
		if let Some(mut previous) = slot.take() {
			previous.uninstall(kind).unwrap_or_warn("could not remove previous history override");
		}
		let mut entry = HistoryOverride { callback, installed: None };
		if let Some(model) = self.model() {
			entry.install(kind, model);
		}
		*slot = Some(entry);
	}

	fn deregister(&self, kind: HistoryKind, callback: &HistoryHandler) -> HistoryResult<()> {
		let mut slot = self.history_slot(kind).borrow_mut();
		match slot.take() {
			Some(mut entry) if Rc::ptr_eq(&entry.callback, callback) => entry.uninstall(kind),
			other => {
				*slot = other;
				Err(HistoryError::NotRegistered)
			},
		}
	}

	/// move overrides to given model, after the editor swapped it in.
	pub(super) fn reinstall_history(&self, model: &Rc<dyn TextModel>) {
		for kind in [HistoryKind::Undo, HistoryKind::Redo] {
			if let Some(entry) = self.history_slot(kind).borrow_mut().as_mut() {
				entry.uninstall(kind).unwrap_or_warn("could not restore history handler of previous model");
				entry.install(kind, model.clone());
			}
		}
	}

	pub(super) fn release_history(&self) {
		for kind in [HistoryKind::Redo, HistoryKind::Undo] {
			if let Some(mut entry) = self.history_slot(kind).borrow_mut().take() {
				entry.uninstall(kind).unwrap_or_warn("could not restore history handler");
			}
		}
	}
}
