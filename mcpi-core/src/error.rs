//! Error types for the estimator crate.
use thiserror::Error;

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures surfaced by estimation and configuration.
#[derive(Debug, Error)]
pub enum Error {
	/// Reading or writing a config file failed.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Config could not be parsed or holds out-of-range values.
	#[error("config: {0}")]
	Config(String),
	/// Non-positive sample count, trial count or chunk size.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// Cancel flag observed between chunks.
	#[error("cancelled after {completed} samples")]
	Cancelled {
		/// Samples drawn before the flag was seen.
		completed: u64,
	},
}

impl Error {
	/// Build an [`Error::Config`].
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
	/// Build an [`Error::InvalidArgument`].
	pub fn invalid_argument(msg: impl Into<String>) -> Self { Self::InvalidArgument(msg.into()) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_messages() {
		assert_eq!(Error::invalid_argument("n must be positive").to_string(), "invalid argument: n must be positive");
		assert_eq!(Error::Cancelled { completed: 42 }.to_string(), "cancelled after 42 samples");
		assert_eq!(Error::config("bad").to_string(), "config: bad");
	}
}
