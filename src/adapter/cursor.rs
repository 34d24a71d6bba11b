//! ### Cursor
//!
//! local cursor in offsets, and decorations standing for remote users' cursors.

use std::collections::HashMap;
use std::rc::Rc;

use crate::api::{
	Cursor, CursorWidget, Decoration, DecorationId, Disposable, HostEditor, Range, Selection,
	Stickiness,
};
use crate::errors::{ContractError, ContractResult};

use super::{AdapterInner, EditorAdapter};

/// what one remote cursor put on the editor.
pub(crate) struct RemoteCursor {
	decorations: Vec<DecorationId>,
	widget: Disposable,
}

impl RemoteCursor {
	fn clear(self, editor: &dyn HostEditor) {
		editor.delta_decorations(&self.decorations, Vec::new());
		self.widget.dispose();
	}
}

/// remote cursors by client id. a client may show more than one cursor at once.
#[derive(Default)]
pub(crate) struct RemoteCursors {
	next: u64,
	by_client: HashMap<String, Vec<(u64, RemoteCursor)>>,
}

impl RemoteCursors {
	fn insert(&mut self, client_id: &str, cursor: RemoteCursor) -> u64 {
		let key = self.next;
		self.next += 1;
		self.by_client.entry(client_id.to_string()).or_default().push((key, cursor));
		key
	}

	fn remove(&mut self, client_id: &str, key: u64) -> Option<RemoteCursor> {
		let list = self.by_client.get_mut(client_id)?;
		let index = list.iter().position(|(k, _)| *k == key)?;
		let (_, cursor) = list.remove(index);
		if list.is_empty() {
			self.by_client.remove(client_id);
		}
		Some(cursor)
	}

	fn drain(&mut self) -> Vec<RemoteCursor> {
		self.by_client
			.drain()
			.flat_map(|(_, list)| list.into_iter().map(|(_, c)| c))
			.collect()
	}

	pub(crate) fn count(&self, client_id: &str) -> usize {
		self.by_client.get(client_id).map_or(0, Vec::len)
	}
}

/// class name for a remote cursor: only ascii alphanumerics of the color make it in.
pub(crate) fn class_name(prefix: &str, color: &str, caret: bool) -> String {
	let shape = if caret { "cursor" } else { "selection" };
	let color : String = color.chars().filter(char::is_ascii_alphanumeric).collect();
	format!("{prefix}-{shape}-{color}")
}

impl EditorAdapter {
	/// local cursor as offsets, `None` without an editor model.
	///
	/// reads live editor selection, falling back to the last one seen moving.
	pub fn cursor(&self) -> Option<Cursor> {
		let editor = self.0.editor()?;
		let model = editor.model()?;
		let selection = editor.selection().or(self.0.last_selection.get())?;
		Some(Cursor::new(
			model.offset_at(selection.anchor),
			model.offset_at(selection.active),
		))
	}

	/// move local cursor.
	pub fn set_cursor(&self, cursor: &Cursor) {
		let Some(editor) = self.0.editor() else { return };
		let Some(model) = editor.model() else { return };
		let selection = Selection::new(
			model.position_at(cursor.position),
			model.position_at(cursor.selection_end),
		);
		editor.set_selection(selection);
	}

	/// show a remote user's cursor.
	///
	/// each call adds a new independent cursor, even for a client already shown. disposing the
	/// returned handle removes just this one; it does nothing once the adapter is disposed,
	/// which already removed everything.
	pub fn set_other_cursor(&self, client_id: &str, cursor: &Cursor, user_name: &str, color: &str) -> ContractResult<Disposable> {
		if client_id.is_empty() {
			return Err(ContractError::InvalidArgument { name: "client_id", reason: "must not be empty" });
		}
		if user_name.is_empty() {
			return Err(ContractError::InvalidArgument { name: "user_name", reason: "must not be empty" });
		}
		if !color.chars().any(|c| c.is_ascii_alphanumeric()) {
			return Err(ContractError::InvalidArgument { name: "color", reason: "must contain alphanumeric characters" });
		}

		let Some(editor) = self.0.editor() else { return Ok(Disposable::noop()) };
		let Some(model) = editor.model() else { return Ok(Disposable::noop()) };

		let caret = cursor.is_caret();
		let class_name = class_name(self.0.config.class_prefix(), color, caret);
		if self.0.styles.borrow_mut().insert(class_name.clone()) {
			let rule = if caret {
				format!("border-left: 2px solid {color};")
			} else {
				format!("background: {color};")
			};
			editor.add_style_rule(&class_name, &rule);
		}

		let span = cursor.span();
		let range = Range::new(model.position_at(span.start), model.position_at(span.end));
		let decorations = editor.delta_decorations(&[], vec![Decoration {
			range,
			class_name,
			stickiness: Stickiness::NeverGrowsWhenTypingAtEdges,
			hover_message: Some(user_name.to_string()),
		}]);
		let widget = editor.add_widget(CursorWidget {
			id: format!("{}-widget-{}", self.0.config.class_prefix(), uuid::Uuid::new_v4()),
			client_id: client_id.to_string(),
			position: model.position_at(cursor.position),
			label: user_name.to_string(),
			color: color.to_string(),
		});
		tracing::trace!("showing cursor of {} at {:?}", client_id, span);

		let key = self.0.remote.borrow_mut().insert(client_id, RemoteCursor { decorations, widget });
		let weak = Rc::downgrade(&self.0);
		let client_id = client_id.to_string();
		Ok(Disposable::new(move || {
			let Some(inner) = weak.upgrade() else { return };
			let Some(editor) = inner.editor() else { return };
			let removed = inner.remote.borrow_mut().remove(&client_id, key);
			if let Some(cursor) = removed {
				cursor.clear(&*editor);
			}
		}))
	}

	/// how many cursors are shown for given remote client.
	pub fn other_cursor_count(&self, client_id: &str) -> usize {
		self.0.remote.borrow().count(client_id)
	}
}

impl AdapterInner {
	pub(super) fn release_remote_cursors(&self) {
		let cursors = self.remote.borrow_mut().drain();
		let Some(editor) = self.editor() else { return };
		for cursor in cursors {
			cursor.clear(&*editor);
		}
	}
}

#[cfg(test)]
mod tests {
	#[test]
	fn class_names_keep_only_safe_color_chars() {
		assert_eq!(super::class_name("remote-client", "#ff00AA", true), "remote-client-cursor-ff00AA");
		assert_eq!(super::class_name("x", "rgb(1, 2, 3)", false), "x-selection-rgb123");
	}
}
