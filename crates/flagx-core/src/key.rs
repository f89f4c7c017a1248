// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Composite cache key for flag evaluation results.

use std::fmt;

/// Cache key for a single flag evaluation.
///
/// A key is the pair of the flag key and the optional target id, with an
/// absent target id normalized to the empty string. Because the key is a
/// structured pair rather than a joined string, two distinct
/// `(flag_key, target_id)` pairs always map to distinct keys, even when one
/// of the fields contains a separator character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
	flag_key: String,
	target_id: String,
}

impl CacheKey {
	/// Creates a key from a flag key and an optional target id.
	///
	/// `None` and `Some("")` produce the same key: both mean "no target".
	pub fn new(flag_key: &str, target_id: Option<&str>) -> Self {
		Self {
			flag_key: flag_key.to_string(),
			target_id: target_id.unwrap_or("").to_string(),
		}
	}

	/// The flag key component.
	pub fn flag_key(&self) -> &str {
		&self.flag_key
	}

	/// The target id component, empty when no target was given.
	pub fn target_id(&self) -> &str {
		&self.target_id
	}
}

impl fmt::Display for CacheKey {
	/// Log-friendly rendering. Not used for keying, which is structural.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.flag_key, self.target_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absent_target_equals_empty_target() {
		assert_eq!(CacheKey::new("feature.test", None), CacheKey::new("feature.test", Some("")));
	}

	#[test]
	fn different_targets_produce_different_keys() {
		let a = CacheKey::new("feature.test", Some("u1"));
		let b = CacheKey::new("feature.test", Some("u2"));
		assert_ne!(a, b);
	}

	#[test]
	fn separator_in_fields_does_not_collide() {
		// "a:b" with no target vs "a" targeting "b" would collide under
		// naive string concatenation.
		let a = CacheKey::new("a:b", None);
		let b = CacheKey::new("a", Some("b"));
		assert_ne!(a, b);
	}

	#[test]
	fn accessors_return_components() {
		let key = CacheKey::new("beta", Some("session-9"));
		assert_eq!(key.flag_key(), "beta");
		assert_eq!(key.target_id(), "session-9");

		let untargeted = CacheKey::new("beta", None);
		assert_eq!(untargeted.target_id(), "");
	}

	#[test]
	fn display_includes_both_components() {
		let key = CacheKey::new("beta", Some("u1"));
		assert_eq!(key.to_string(), "beta:u1");
	}
}

#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		#[test]
		fn key_is_deterministic(flag in "[a-z][a-z0-9_.:-]{0,30}", target in prop::option::of("[a-z0-9:-]{0,20}")) {
			let a = CacheKey::new(&flag, target.as_deref());
			let b = CacheKey::new(&flag, target.as_deref());
			prop_assert_eq!(a, b);
		}

		#[test]
		fn distinct_pairs_never_collide(
			flag_a in "[a-z][a-z0-9_.:-]{0,30}",
			target_a in "[a-z0-9:-]{0,20}",
			flag_b in "[a-z][a-z0-9_.:-]{0,30}",
			target_b in "[a-z0-9:-]{0,20}",
		) {
			let a = CacheKey::new(&flag_a, Some(&target_a));
			let b = CacheKey::new(&flag_b, Some(&target_b));
			if flag_a != flag_b || target_a != target_b {
				prop_assert_ne!(a, b);
			} else {
				prop_assert_eq!(a, b);
			}
		}

		#[test]
		fn none_normalizes_to_empty(flag in "[a-z][a-z0-9_.]{0,30}") {
			prop_assert_eq!(CacheKey::new(&flag, None), CacheKey::new(&flag, Some("")));
		}
	}
}
