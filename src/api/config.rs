//! # Config
//! data structure defining adapter configuration

/// configuration struct for an [`crate::EditorAdapter`]
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// bind editor events as soon as the adapter is created, default true
	pub bind_events: Option<bool>,
	/// line ending used while the editor has no model, default [`crate::snapshot::DEFAULT_EOL`]
	pub default_eol: Option<String>,
	/// prefix for remote cursor class names, default "remote-client"
	pub class_prefix: Option<String>,
}

impl Config {
	#[inline]
	pub(crate) fn bind_events(&self) -> bool {
		self.bind_events.unwrap_or(true)
	}

	#[inline]
	pub(crate) fn default_eol(&self) -> &str {
		self.default_eol.as_deref().unwrap_or(crate::snapshot::DEFAULT_EOL)
	}

	#[inline]
	pub(crate) fn class_prefix(&self) -> &str {
		self.class_prefix.as_deref().unwrap_or("remote-client")
	}
}
