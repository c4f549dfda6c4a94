//! Monte Carlo estimation of pi.
//!
//! Points are drawn uniformly from the unit square `[0, 1) x [0, 1)`. The
//! quarter-disk of radius 1 covers `pi / 4` of that square, so four times the
//! fraction of points landing inside it approximates pi.
//!
//! Every sample consumes exactly two draws from the generator (`x` then `y`),
//! which keeps results reproducible for a seeded generator regardless of how
//! the loop is chunked.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

/// Generator seeded for reproducible estimates.
pub fn seeded_rng(seed: u64) -> StdRng {
	StdRng::seed_from_u64(seed)
}

/// Generator seeded from OS entropy.
pub fn entropy_rng() -> StdRng {
	StdRng::from_entropy()
}

/// Draw `n` points and return how many fall strictly inside the quarter-disk.
pub fn count_inside(n: u64, rng: &mut impl Rng) -> u64 {
	let mut inside = 0u64;
	for _ in 0..n {
		let x: f64 = rng.gen();
		let y: f64 = rng.gen();
		if x * x + y * y < 1.0 {
			inside += 1;
		}
	}
	inside
}

fn ratio(inside: u64, n: u64) -> f64 {
	4.0 * inside as f64 / n as f64
}

/// Estimate pi from `n` random samples.
///
/// Returns [`Error::InvalidArgument`] for `n == 0` instead of dividing by zero.
pub fn estimate_pi(n: u64, rng: &mut impl Rng) -> Result<f64> {
	if n == 0 {
		return Err(Error::invalid_argument("sample count must be positive"));
	}
	let inside = count_inside(n, rng);
	let estimate = ratio(inside, n);
	debug!(samples = n, inside, estimate, "pi estimated");
	Ok(estimate)
}

/// Same as [`estimate_pi`], but checks `cancel` before every chunk of
/// `chunk_size` samples.
///
/// Draw order matches [`estimate_pi`], so an uncancelled run returns the same
/// value for the same generator state.
pub fn estimate_pi_cancellable(
	n: u64,
	chunk_size: u64,
	rng: &mut impl Rng,
	cancel: &AtomicBool,
) -> Result<f64> {
	if n == 0 {
		return Err(Error::invalid_argument("sample count must be positive"));
	}
	if chunk_size == 0 {
		return Err(Error::invalid_argument("chunk size must be positive"));
	}

	let mut completed = 0u64;
	let mut inside = 0u64;
	while completed < n {
		if cancel.load(Ordering::Relaxed) {
			warn!(completed, samples = n, "estimation cancelled");
			return Err(Error::Cancelled { completed });
		}
		let chunk = chunk_size.min(n - completed);
		inside += count_inside(chunk, rng);
		completed += chunk;
		trace!(completed, inside, "chunk done");
	}

	let estimate = ratio(inside, n);
	debug!(samples = n, inside, estimate, "pi estimated");
	Ok(estimate)
}

/// Mean of `trials` consecutive estimates drawn from the same generator.
pub fn average_estimate(n: u64, trials: u32, rng: &mut impl Rng) -> Result<f64> {
	if trials == 0 {
		return Err(Error::invalid_argument("trial count must be positive"));
	}
	let mut sum = 0.0;
	for _ in 0..trials {
		sum += estimate_pi(n, rng)?;
	}
	Ok(sum / f64::from(trials))
}

/// [`average_estimate`] built on [`estimate_pi_cancellable`].
///
/// On cancellation `completed` counts samples across all trials.
pub fn average_estimate_cancellable(
	n: u64,
	trials: u32,
	chunk_size: u64,
	rng: &mut impl Rng,
	cancel: &AtomicBool,
) -> Result<f64> {
	if trials == 0 {
		return Err(Error::invalid_argument("trial count must be positive"));
	}
	let mut sum = 0.0;
	for trial in 0..trials {
		sum += match estimate_pi_cancellable(n, chunk_size, rng, cancel) {
			Err(Error::Cancelled { completed }) => {
				let completed = n.saturating_mul(u64::from(trial)).saturating_add(completed);
				return Err(Error::Cancelled { completed });
			}
			res => res?,
		};
		debug!(trial, "trial finished");
	}
	Ok(sum / f64::from(trials))
}
