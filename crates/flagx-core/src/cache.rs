// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded, TTL-expiring cache for flag evaluation results.
//!
//! The cache is thread-safe and may be shared between tasks by cloning;
//! clones operate on the same underlying store. All operations are
//! in-memory and never touch the network.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::key::CacheKey;

/// A single cached evaluation result.
///
/// Entries are never mutated in place: a fresh `put` replaces the entry and
/// resets its age.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
	value: bool,
	inserted_at: Instant,
}

/// In-memory cache of flag evaluation results.
///
/// Capacity is enforced with least-recently-used eviction; entries older
/// than the time-to-live are treated as absent and evicted lazily when
/// observed. No background sweep runs.
pub struct FlagCache {
	inner: Arc<Mutex<LruCache<CacheKey, CacheEntry>>>,
	ttl: Duration,
}

impl std::fmt::Debug for FlagCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlagCache")
			.field("ttl", &self.ttl)
			.finish_non_exhaustive()
	}
}

impl FlagCache {
	/// Creates an empty cache with the given capacity and time-to-live.
	pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
		Self {
			inner: Arc::new(Mutex::new(LruCache::new(capacity))),
			ttl,
		}
	}

	/// Returns the cached value for `key` if present and not expired.
	///
	/// An expired entry is removed on observation and reported as absent.
	/// A hit counts as a use for eviction ordering.
	pub async fn get(&self, key: &CacheKey) -> Option<bool> {
		let mut inner = self.inner.lock().await;
		let found = inner
			.get(key)
			.map(|entry| (entry.value, entry.inserted_at.elapsed() < self.ttl));
		match found {
			Some((value, true)) => Some(value),
			Some((_, false)) => {
				inner.pop(key);
				None
			}
			None => None,
		}
	}

	/// Inserts or replaces the entry for `key`, resetting its age to zero.
	///
	/// When the cache is full and `key` is new, the least recently used
	/// entry is evicted first.
	pub async fn put(&self, key: CacheKey, value: bool) {
		let entry = CacheEntry {
			value,
			inserted_at: Instant::now(),
		};
		self.inner.lock().await.put(key, entry);
	}

	/// Removes the entry for `key` if present. No-op when absent.
	pub async fn delete(&self, key: &CacheKey) {
		self.inner.lock().await.pop(key);
	}

	/// Removes all entries unconditionally.
	pub async fn clear(&self) {
		self.inner.lock().await.clear();
	}

	/// Returns the number of stored entries.
	///
	/// May include entries that have expired but have not yet been observed
	/// and evicted.
	pub async fn len(&self) -> usize {
		self.inner.lock().await.len()
	}

	/// Returns true if the cache holds no entries.
	pub async fn is_empty(&self) -> bool {
		self.inner.lock().await.is_empty()
	}
}

impl Clone for FlagCache {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
			ttl: self.ttl,
		}
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashSet;

	fn arb_keys() -> impl Strategy<Value = Vec<(String, bool)>> {
		prop::collection::vec(("[a-z][a-z0-9_.]{1,20}", proptest::bool::ANY), 1..30)
	}

	proptest! {
		#[test]
		fn cache_within_capacity_preserves_all_entries(entries in arb_keys()) {
			let rt = tokio::runtime::Runtime::new().unwrap();
			rt.block_on(async {
				let cache = FlagCache::new(
					NonZeroUsize::new(64).unwrap(),
					Duration::from_secs(300),
				);

				// Deduplicate: later puts replace earlier ones.
				let mut expected: Vec<(String, bool)> = Vec::new();
				for (key, value) in &entries {
					expected.retain(|(k, _)| k != key);
					expected.push((key.clone(), *value));
					cache.put(CacheKey::new(key, None), *value).await;
				}

				for (key, value) in &expected {
					prop_assert_eq!(cache.get(&CacheKey::new(key, None)).await, Some(*value));
				}

				Ok(())
			})?;
		}

		#[test]
		fn cache_never_exceeds_capacity(entries in arb_keys(), capacity in 1usize..8) {
			let rt = tokio::runtime::Runtime::new().unwrap();
			rt.block_on(async {
				let cache = FlagCache::new(
					NonZeroUsize::new(capacity).unwrap(),
					Duration::from_secs(300),
				);

				let distinct: HashSet<&String> = entries.iter().map(|(k, _)| k).collect();
				for (key, value) in &entries {
					cache.put(CacheKey::new(key, None), *value).await;
				}

				let len = cache.len().await;
				prop_assert!(len <= capacity);
				prop_assert!(len <= distinct.len());

				Ok(())
			})?;
		}
	}
}
