// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cache store for the FeatureFlagX SDK.
//!
//! This crate provides the local caching layer used by the `flagx` client:
//! a bounded, TTL-expiring map from `(flag_key, target_id)` pairs to boolean
//! evaluation results. It performs no network I/O; the remote FeatureFlagX
//! API remains the source of truth and cached values are best-effort.
//!
//! # Overview
//!
//! - [`CacheKey`] is the composite lookup key. It is a structured pair, so
//!   distinct `(flag_key, target_id)` pairs can never collide.
//! - [`FlagCache`] is the store itself: least-recently-used eviction once the
//!   configured capacity is reached, and lazy expiry once an entry outlives
//!   the configured time-to-live.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use std::time::Duration;
//!
//! use flagx_core::{CacheKey, FlagCache};
//!
//! # tokio_test::block_on(async {
//! let cache = FlagCache::new(NonZeroUsize::new(100).unwrap(), Duration::from_secs(300));
//! let key = CacheKey::new("checkout.new_flow", Some("user123"));
//!
//! cache.put(key.clone(), true).await;
//! assert_eq!(cache.get(&key).await, Some(true));
//!
//! cache.delete(&key).await;
//! assert_eq!(cache.get(&key).await, None);
//! # });
//! ```

pub mod cache;
pub mod key;

pub use cache::FlagCache;
pub use key::CacheKey;
