// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature Flags Rust SDK for FeatureFlagX.
//!
//! This crate provides a client library for evaluating feature flags against
//! the FeatureFlagX API. Evaluations are cached locally to reduce network
//! load; the API remains the source of truth and the cache is a best-effort,
//! availability-favoring read-through layer.
//!
//! # Features
//!
//! - **Local Caching**: bounded, TTL-expiring cache of evaluation results
//! - **Failure-safe Defaults**: evaluation never fails; any fetch failure
//!   degrades to a caller-supplied or configured default value
//! - **Explicit Invalidation**: per-entry invalidation and bulk clear
//! - **Connection Reuse**: one shared HTTP transport per client
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use flagx::FlagClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FlagClient::builder()
//!         .base_url("https://flags.example.com")
//!         .cache_ttl(Duration::from_secs(300))
//!         .default_value_on_error(false)
//!         .build()?;
//!
//!     // Evaluate a flag for a specific target
//!     if client.is_enabled("checkout.new_flow", Some("user123"), None).await {
//!         // new flow
//!     }
//!
//!     // Caller-supplied default wins over the configured one on failure
//!     let beta = client.is_enabled("beta", None, Some(true)).await;
//!
//!     // Drop a stale entry, forcing the next lookup to refetch
//!     client.invalidate("checkout.new_flow", Some("user123")).await;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{ClientConfig, FlagClient, FlagClientBuilder};
pub use error::{FlagsError, Result};

// Re-export cache store types for convenience
pub use flagx_core::{CacheKey, FlagCache};
