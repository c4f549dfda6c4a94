//! Run settings shared by estimator front ends.
//!
//! Layers are applied without validation (`from_file`, `apply_env_from`) so a
//! caller can stack defaults, file, environment and flags, then call
//! [`EstimatorConfig::validate`] once on the result.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Largest integer a TOML document can hold.
pub const MAX_TOML_INT: u64 = i64::MAX as u64;

/// Estimator run settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
	/// One of trace, debug, info, warn, error.
	pub log_level: String,
	/// Samples per trial.
	pub samples: u64,
	/// Fixed generator seed. `None` seeds from OS entropy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub seed: Option<u64>,
	/// Number of estimates averaged into the reported value.
	pub trials: u32,
	/// Samples drawn between two cancellation checks.
	pub chunk_size: u64,
}

impl Default for EstimatorConfig {
	fn default() -> Self {
		Self { log_level: "warn".into(), samples: 1_000_000, seed: None, trials: 1, chunk_size: 65_536 }
	}
}

fn parse_env<T: std::str::FromStr>(key: &str, v: &str) -> Result<T> {
	v.trim().parse().map_err(|_| Error::config(format!("{key}: cannot parse {v:?}")))
}

impl EstimatorConfig {
	/// Parse a TOML file without validating the values.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))
	}

	/// Parse and validate a TOML file.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let cfg = Self::from_file(path)?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Validate, then write as TOML.
	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		self.validate()?;
		let data = toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml serialize error: {e}")))?;
		fs::write(path, data)?;
		Ok(())
	}

	/// Defaults overlaid with the process environment, validated.
	pub fn from_env() -> Result<Self> {
		let mut cfg = Self::default();
		cfg.apply_env()?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Overlay `MCPI_*` variables from the process environment.
	pub fn apply_env(&mut self) -> Result<()> {
		self.apply_env_from(|key| std::env::var(key).ok())
	}

	/// Overlay `MCPI_*` variables obtained through `lookup`.
	///
	/// Values are parsed but not validated.
	pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
		if let Some(v) = lookup("MCPI_LOG_LEVEL") { self.log_level = v; }
		if let Some(v) = lookup("MCPI_SAMPLES") { self.samples = parse_env("MCPI_SAMPLES", &v)?; }
		if let Some(v) = lookup("MCPI_SEED") { self.seed = Some(parse_env("MCPI_SEED", &v)?); }
		if let Some(v) = lookup("MCPI_TRIALS") { self.trials = parse_env("MCPI_TRIALS", &v)?; }
		if let Some(v) = lookup("MCPI_CHUNK_SIZE") { self.chunk_size = parse_env("MCPI_CHUNK_SIZE", &v)?; }
		Ok(())
	}

	/// Check value ranges. Integers must also fit in a TOML integer.
	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace","debug","info","warn","error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if !(1..=MAX_TOML_INT).contains(&self.samples) {
			return Err(Error::config(format!("samples must be in 1..={MAX_TOML_INT}")));
		}
		if self.seed.is_some_and(|s| s > MAX_TOML_INT) {
			return Err(Error::config(format!("seed must be at most {MAX_TOML_INT}")));
		}
		if self.trials == 0 { return Err(Error::config("trials must be positive")); }
		if !(1..=MAX_TOML_INT).contains(&self.chunk_size) {
			return Err(Error::config(format!("chunk_size must be in 1..={MAX_TOML_INT}")));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn default_is_valid() {
		EstimatorConfig::default().validate().unwrap();
	}

	#[test]
	fn partial_toml_keeps_defaults() {
		let cfg: EstimatorConfig = toml::from_str("samples = 500\nseed = 9\n").unwrap();
		assert_eq!(cfg.samples, 500);
		assert_eq!(cfg.seed, Some(9));
		assert_eq!(cfg.trials, 1);
		assert_eq!(cfg.log_level, "warn");
	}

	#[test]
	fn rejects_bad_values() {
		let bad = [
			EstimatorConfig { log_level: "loud".into(), ..Default::default() },
			EstimatorConfig { samples: 0, ..Default::default() },
			EstimatorConfig { samples: MAX_TOML_INT + 1, ..Default::default() },
			EstimatorConfig { seed: Some(u64::MAX), ..Default::default() },
			EstimatorConfig { trials: 0, ..Default::default() },
			EstimatorConfig { chunk_size: 0, ..Default::default() },
		];
		for cfg in bad {
			assert!(matches!(cfg.validate(), Err(Error::Config(_))), "{cfg:?}");
		}
	}

	#[test]
	fn largest_toml_seed_accepted() {
		let cfg = EstimatorConfig { seed: Some(MAX_TOML_INT), ..Default::default() };
		cfg.validate().unwrap();
		let back: EstimatorConfig = toml::from_str(&toml::to_string_pretty(&cfg).unwrap()).unwrap();
		assert_eq!(back.seed, Some(MAX_TOML_INT));
	}

	#[test]
	fn env_overlay_is_not_validated() {
		let env: HashMap<&str, &str> = [("MCPI_SAMPLES", "0"), ("MCPI_SEED", "3")].into_iter().collect();
		let mut cfg = EstimatorConfig::default();
		cfg.apply_env_from(|k| env.get(k).map(|v| v.to_string())).unwrap();
		assert_eq!(cfg.samples, 0);
		assert_eq!(cfg.seed, Some(3));
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn unparsable_env_value_rejected() {
		let mut cfg = EstimatorConfig::default();
		let res = cfg.apply_env_from(|k| (k == "MCPI_TRIALS").then(|| "lots".to_string()));
		assert!(matches!(res, Err(Error::Config(_))));
	}
}
