use std::str::FromStr;

use derive_more::Display;
use serde::Serialize;

use crate::VersyncError;
use crate::VersyncResult;

/// A `major.minor.patch` version triple.
///
/// Only the plain three component form is accepted. Pre-release and build
/// metadata (`1.2.3-rc.1`, `1.2.3+build`) are rejected rather than trimmed.
///
/// ```rust
/// use versync_core::Version;
///
/// let version: Version = "2.4.10".parse().unwrap();
/// assert_eq!(version, Version::new(2, 4, 10));
/// assert_eq!(version.to_string(), "2.4.10");
/// ```
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[display("{major}.{minor}.{patch}")]
pub struct Version {
	pub major: u64,
	pub minor: u64,
	pub patch: u64,
}

impl Version {
	pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
		Self {
			major,
			minor,
			patch,
		}
	}
}

impl FromStr for Version {
	type Err = VersyncError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let parts: Vec<&str> = value.split('.').collect();
		let [major, minor, patch] = parts.as_slice() else {
			return Err(invalid_version(
				value,
				format!(
					"expected 3 dot-separated components, found {}",
					parts.len()
				),
			));
		};

		Ok(Self {
			major: parse_component(value, "major", major)?,
			minor: parse_component(value, "minor", minor)?,
			patch: parse_component(value, "patch", patch)?,
		})
	}
}

/// Parse a dotted `major.minor.patch` string into a [`Version`].
pub fn parse_version(value: &str) -> VersyncResult<Version> {
	value.parse()
}

fn parse_component(value: &str, label: &str, component: &str) -> VersyncResult<u64> {
	if component.is_empty() {
		return Err(invalid_version(value, format!("{label} component is empty")));
	}

	// `u64::from_str` accepts a leading `+`, which is not part of a version.
	if !component.bytes().all(|byte| byte.is_ascii_digit()) {
		return Err(invalid_version(
			value,
			format!("{label} component `{component}` is not a non-negative integer"),
		));
	}

	component.parse().map_err(|_| {
		invalid_version(
			value,
			format!("{label} component `{component}` does not fit in 64 bits"),
		)
	})
}

fn invalid_version(value: &str, reason: String) -> VersyncError {
	VersyncError::InvalidVersion {
		version: value.to_string(),
		reason,
	}
}
