//! # Disposable
//!
//! release handles returned by side-effecting calls, such as event subscriptions or remote
//! cursor decorations.

/// a one-shot release handle.
///
/// invoking [`Disposable::dispose`] runs the cleanup exactly once. dropping the handle without
/// disposing it leaves the resource in place.
#[must_use = "dropping a Disposable never releases what it holds"]
pub struct Disposable(Option<Box<dyn FnOnce()>>);

impl Disposable {
	pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
		Disposable(Some(Box::new(cleanup)))
	}

	/// a handle with nothing to release.
	pub fn noop() -> Self {
		Disposable(None)
	}

	pub fn dispose(mut self) {
		if let Some(cleanup) = self.0.take() {
			cleanup();
		}
	}
}

impl std::fmt::Debug for Disposable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.0 {
			Some(cb) => write!(f, "Disposable {{ {:p} }}", cb),
			None => write!(f, "Disposable {{ noop }}"),
		}
	}
}

/// owned collection of [`Disposable`]s, released in reverse order of insertion.
#[derive(Debug, Default)]
pub struct DisposableList(Vec<Disposable>);

impl DisposableList {
	pub fn push(&mut self, handle: Disposable) {
		self.0.push(handle);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn dispose_all(&mut self) {
		while let Some(handle) = self.0.pop() {
			handle.dispose();
		}
	}
}

impl Extend<Disposable> for DisposableList {
	fn extend<I: IntoIterator<Item = Disposable>>(&mut self, iter: I) {
		self.0.extend(iter)
	}
}
