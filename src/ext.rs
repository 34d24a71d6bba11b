//! ### Extensions
//! small helpers used across the crate.

/// hash given data with xxh3, as a signed integer so it survives any glue layer.
pub fn hash(data: impl AsRef<[u8]>) -> i64 {
	let hash = xxhash_rust::xxh3::xxh3_64(data.as_ref());
	i64::from_ne_bytes(hash.to_ne_bytes())
}

/// an error which can be ignored with just a warning entry.
pub trait IgnorableError {
	fn unwrap_or_warn(self, msg: &str);
}

impl<T, E> IgnorableError for std::result::Result<T, E>
where E : std::fmt::Debug {
	fn unwrap_or_warn(self, msg: &str) {
		match self {
			Ok(_) => {},
			Err(e) => tracing::warn!("{}: {:?}", msg, e),
		}
	}
}

/// install a global `tracing` subscriber printing on stderr.
///
/// returns false if a global subscriber was already set.
#[cfg(feature = "log")]
pub fn setup_tracing(debug: bool) -> bool {
	let level = if debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
	let format = tracing_subscriber::fmt::format()
		.with_level(true)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_source_location(false);

	tracing_subscriber::fmt()
		.event_format(format)
		.with_max_level(level)
		.with_writer(std::sync::Mutex::new(std::io::stderr()))
		.try_init()
		.is_ok()
}

#[cfg(test)]
mod tests {
	#[test]
	fn hash_is_stable_for_equal_content() {
		assert_eq!(super::hash("hello\nworld"), super::hash(String::from("hello\nworld")));
		assert_ne!(super::hash("hello\nworld"), super::hash("hello, world"));
	}

	#[test]
	fn ignorable_error_swallows_failures() {
		use super::IgnorableError;
		Err::<(), _>("boom").unwrap_or_warn("expected failure");
		Ok::<(), &str>(()).unwrap_or_warn("never logged");
	}

	#[cfg(feature = "log")]
	#[test]
	fn setup_tracing_only_installs_once() {
		super::setup_tracing(true);
		assert!(!super::setup_tracing(false));
	}
}
