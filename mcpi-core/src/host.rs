//! Host-facing entry points.
//!
//! Hosts hand over a signed integer sample count; this is where it becomes a
//! validated `u64`.

use rand::Rng;

use crate::error::{Error, Result};
use crate::estimator::estimate_pi;

/// Validate a host-supplied sample count.
pub fn sample_count(n: i64) -> Result<u64> {
	u64::try_from(n)
		.ok()
		.filter(|&v| v > 0)
		.ok_or_else(|| Error::invalid_argument(format!("sample count must be positive, got {n}")))
}

/// Estimate pi for a host-supplied sample count.
pub fn estimate_pi_host(n: i64, rng: &mut impl Rng) -> Result<f64> {
	estimate_pi(sample_count(n)?, rng)
}

/// Name the routine was first exported under.
pub use self::estimate_pi_host as pi_cpp;
