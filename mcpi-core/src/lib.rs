#![forbid(unsafe_code)]

//! Monte Carlo estimation of pi.
//!
//! Provided features:
//! - Quarter-disk sampling estimator over an explicitly passed generator
//! - Chunked variant with cooperative cancellation
//! - Host boundary validating signed sample counts
//! - TOML/env configuration for front ends

pub mod config;
pub mod error;
pub mod estimator;
pub mod host;

pub use config::EstimatorConfig;
pub use error::{Error, Result};
pub use estimator::{
	average_estimate, average_estimate_cancellable, count_inside, entropy_rng, estimate_pi, estimate_pi_cancellable, seeded_rng,
};
pub use host::{estimate_pi_host, pi_cpp, sample_count};
