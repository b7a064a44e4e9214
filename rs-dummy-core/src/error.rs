use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors raised by the sampler and the resolver.
///
/// Unknown keys and malformed templates are not errors: both resolve
/// on a best-effort basis (empty string, literal text).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
	/// A configured locale has no matching dictionary.
	#[error("missing definitions for locale: {0}")]
	MissingLocale(String),

	/// Two dictionaries were supplied for the same locale.
	#[error("definitions supplied more than once for locale: {0}")]
	DuplicateLocale(String),

	/// Invalid sampling bounds or chance arguments.
	#[error("invalid range: {0}")]
	InvalidRange(String),
}
