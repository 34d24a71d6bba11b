//! # opbridge
//! glue between a text editor widget and an operational transformation engine.
//!
//! an [`EditorAdapter`] wraps anything implementing [`api::HostEditor`]. it listens to native
//! editor events and publishes local edits as operations (with their inverse), and applies
//! remote operations back onto the editor without echoing them.
//!
//! ```
//! use opbridge::prelude::*;
//!
//! let editor = HeadlessEditor::with_text("hello\nworld");
//! let adapter = EditorAdapter::new(editor.clone(), Config::default());
//! adapter.set_initiated();
//! adapter.on(EventKind::Change, |event| {
//! 	if let AdapterEvent::Change { operation, .. } = event {
//! 		println!("local edit: {:?}", operation);
//! 	}
//! });
//!
//! let mut remote = ot::OperationSeq::default();
//! remote.retain(5);
//! remote.delete(1);
//! remote.insert(", ");
//! remote.retain(5);
//! adapter.apply_operation(&remote).expect("lengths match");
//! assert_eq!(adapter.text(), "hello, world");
//! ```
//!
//! all positions are 1-based line/column pairs, all offsets and lengths count chars.
//!
//! ## features
//! * `log` : provides [`ext::setup_tracing`] to print `tracing` output on stderr

/// public types and host interfaces
pub mod api;

/// errors for each concern
pub mod errors;

/// line based copy of document content
pub mod snapshot;

/// editor changes to operations
pub mod translate;

/// operations to editor edits
pub mod apply;

/// the adapter itself
pub mod adapter;

/// editor and model with no UI
pub mod headless;

/// crate utilities
pub mod ext;

/// all-in-one imports
pub mod prelude;

mod guard;

pub use adapter::EditorAdapter;
pub use errors::{AdapterError, AdapterResult};

pub use operational_transform as ot;
