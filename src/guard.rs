//! ### Guards
//! scoped state changes, undone on every exit path including unwinding.

use std::cell::Cell;

use crate::api::HostEditor;

/// raises a flag for as long as it lives, restoring the previous value on drop.
#[derive(Debug)]
pub(crate) struct FlagGuard<'a> {
	flag: &'a Cell<bool>,
	previous: bool,
}

impl<'a> FlagGuard<'a> {
	pub(crate) fn raise(flag: &'a Cell<bool>) -> Self {
		let previous = flag.replace(true);
		FlagGuard { flag, previous }
	}
}

impl Drop for FlagGuard<'_> {
	fn drop(&mut self) {
		self.flag.set(self.previous);
	}
}

/// lifts editor read-only mode for as long as it lives.
pub(crate) struct WritableGuard<'a> {
	editor: &'a dyn HostEditor,
	was_read_only: bool,
}

impl<'a> WritableGuard<'a> {
	pub(crate) fn unlock(editor: &'a dyn HostEditor) -> Self {
		let was_read_only = editor.read_only();
		if was_read_only {
			editor.set_read_only(false);
		}
		WritableGuard { editor, was_read_only }
	}
}

impl Drop for WritableGuard<'_> {
	fn drop(&mut self) {
		if self.was_read_only {
			self.editor.set_read_only(true);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::FlagGuard;

	#[test]
	fn flag_is_lowered_when_guard_drops() {
		let flag = Cell::new(false);
		{
			let _guard = FlagGuard::raise(&flag);
			assert!(flag.get());
		}
		assert!(!flag.get());
	}

	#[test]
	fn nested_guards_restore_outer_state() {
		let flag = Cell::new(false);
		let outer = FlagGuard::raise(&flag);
		{
			let _inner = FlagGuard::raise(&flag);
		}
		assert!(flag.get());
		drop(outer);
		assert!(!flag.get());
	}

	#[test]
	fn flag_survives_unwinding() {
		let flag = Cell::new(false);
		let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			let _guard = FlagGuard::raise(&flag);
			panic!("editor blew up mid apply");
		}));
		assert!(res.is_err());
		assert!(!flag.get());
	}
}
