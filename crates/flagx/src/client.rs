// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature flags client for evaluating flags against the FeatureFlagX API.

use std::num::NonZeroUsize;
use std::time::Duration;

use flagx_core::{CacheKey, FlagCache};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{FlagsError, Result};

/// Configuration for the flags client.
///
/// Resolved once at construction and owned exclusively by one
/// [`FlagClient`] instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Base URL of the FeatureFlagX API.
	pub base_url: String,
	/// Timeout for establishing a connection.
	pub connect_timeout: Duration,
	/// Timeout for reading the response.
	pub read_timeout: Duration,
	/// Maximum number of cached evaluation results.
	pub cache_capacity: usize,
	/// Time-to-live for cached evaluation results.
	pub cache_ttl: Duration,
	/// Value returned when no cached or freshly fetched value is available
	/// and the caller supplied no default.
	pub default_value_on_error: bool,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:8080".to_string(),
			connect_timeout: Duration::from_secs(5),
			read_timeout: Duration::from_secs(5),
			cache_capacity: 1000,
			cache_ttl: Duration::from_secs(300),
			default_value_on_error: false,
		}
	}
}

/// Builder for constructing a [`FlagClient`].
pub struct FlagClientBuilder {
	config: ClientConfig,
}

impl FlagClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			config: ClientConfig::default(),
		}
	}

	/// Sets the base URL for the FeatureFlagX API.
	///
	/// Example: `https://flags.example.com`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.base_url = url.into();
		self
	}

	/// Sets the connect timeout.
	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.config.connect_timeout = timeout;
		self
	}

	/// Sets the read timeout.
	pub fn read_timeout(mut self, timeout: Duration) -> Self {
		self.config.read_timeout = timeout;
		self
	}

	/// Sets the maximum number of cached evaluation results.
	pub fn cache_capacity(mut self, capacity: usize) -> Self {
		self.config.cache_capacity = capacity;
		self
	}

	/// Sets the time-to-live for cached evaluation results.
	pub fn cache_ttl(mut self, ttl: Duration) -> Self {
		self.config.cache_ttl = ttl;
		self
	}

	/// Sets the value returned on evaluation failure when the caller
	/// supplies no default.
	pub fn default_value_on_error(mut self, value: bool) -> Self {
		self.config.default_value_on_error = value;
		self
	}

	/// Builds the [`FlagClient`].
	pub fn build(self) -> Result<FlagClient> {
		FlagClient::new(self.config)
	}
}

impl Default for FlagClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Client for evaluating feature flags against the FeatureFlagX API.
///
/// The client is a read-through cache: lookups are served from the local
/// [`FlagCache`] when possible and fall back to a single remote fetch on a
/// miss. Any fetch failure degrades to a default value; the remote service
/// remains the source of truth and the cache is best-effort.
pub struct FlagClient {
	config: ClientConfig,
	http_client: Client,
	cache: FlagCache,
}

impl FlagClient {
	/// Creates a new builder for constructing a `FlagClient`.
	pub fn builder() -> FlagClientBuilder {
		FlagClientBuilder::new()
	}

	/// Creates a client from the given configuration.
	///
	/// # Errors
	///
	/// Returns [`FlagsError::InvalidBaseUrl`] when the base URL is blank,
	/// [`FlagsError::InvalidCacheCapacity`] when the cache capacity is
	/// zero, and [`FlagsError::ConnectionFailed`] when the HTTP client
	/// cannot be constructed.
	pub fn new(mut config: ClientConfig) -> Result<Self> {
		if config.base_url.trim().is_empty() {
			return Err(FlagsError::InvalidBaseUrl);
		}

		// Normalize base URL (remove trailing slash)
		config.base_url = config.base_url.trim_end_matches('/').to_string();

		let capacity =
			NonZeroUsize::new(config.cache_capacity).ok_or(FlagsError::InvalidCacheCapacity)?;

		let http_client = Client::builder()
			.user_agent(concat!("flagx/", env!("CARGO_PKG_VERSION")))
			.connect_timeout(config.connect_timeout)
			.read_timeout(config.read_timeout)
			.build()
			.map_err(FlagsError::ConnectionFailed)?;

		let cache = FlagCache::new(capacity, config.cache_ttl);

		Ok(Self {
			config,
			http_client,
			cache,
		})
	}

	/// Checks whether a feature flag is enabled.
	///
	/// Serves from the local cache when a fresh entry exists; otherwise
	/// performs exactly one remote fetch and caches a successful result.
	/// Never fails: any fetch failure is logged and degrades to
	/// `default_value` when supplied, else the configured
	/// `default_value_on_error`.
	///
	/// # Arguments
	///
	/// * `flag_key` - The flag key to evaluate
	/// * `target_id` - Optional target (user/session) for per-target rules
	/// * `default_value` - Overrides the configured default on failure
	pub async fn is_enabled(
		&self,
		flag_key: &str,
		target_id: Option<&str>,
		default_value: Option<bool>,
	) -> bool {
		if let Err(e) = validate_flag_key(flag_key) {
			warn!(
				flag_key = flag_key,
				target_id = target_id.unwrap_or(""),
				error = %e,
				"refusing flag evaluation, returning default"
			);
			return self.resolve_default(default_value);
		}

		let key = CacheKey::new(flag_key, target_id);

		if let Some(value) = self.cache.get(&key).await {
			debug!(
				flag_key = flag_key,
				target_id = key.target_id(),
				value = value,
				"flag served from cache"
			);
			return value;
		}

		match self.fetch_remote(flag_key, key.target_id()).await {
			Ok(value) => {
				debug!(
					flag_key = flag_key,
					target_id = key.target_id(),
					value = value,
					"flag fetched from server"
				);
				self.cache.put(key, value).await;
				value
			}
			Err(e) => {
				warn!(
					flag_key = flag_key,
					target_id = key.target_id(),
					error = %e,
					"flag fetch failed, returning default"
				);
				self.resolve_default(default_value)
			}
		}
	}

	/// Removes a single flag evaluation from the local cache.
	///
	/// No-op when the entry is absent. Never touches the network.
	pub async fn invalidate(&self, flag_key: &str, target_id: Option<&str>) {
		let key = CacheKey::new(flag_key, target_id);
		self.cache.delete(&key).await;
		info!(
			flag_key = flag_key,
			target_id = key.target_id(),
			"invalidated cached flag"
		);
	}

	/// Clears the entire local flag cache. Never touches the network.
	pub async fn clear_cache(&self) {
		self.cache.clear().await;
		info!("local flag cache cleared");
	}

	/// The resolved client configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the number of cached evaluation results.
	pub async fn cached_entry_count(&self) -> usize {
		self.cache.len().await
	}

	/// Fetches a flag evaluation from the server.
	///
	/// Every failure mode - transport error, non-success status,
	/// undecodable body - is reported as an error kind; `is_enabled`
	/// degrades all of them to the default value without distinction.
	async fn fetch_remote(&self, flag_key: &str, target_id: &str) -> Result<bool> {
		let url = format!("{}/flags/evaluate/{}", self.config.base_url, flag_key);

		let mut request = self.http_client.get(&url);
		if !target_id.is_empty() {
			request = request.query(&[("targetId", target_id)]);
		}

		let response = request.send().await.map_err(FlagsError::RequestFailed)?;

		if !response.status().is_success() {
			return Err(FlagsError::ServerError {
				status: response.status().as_u16(),
				message: response.text().await.unwrap_or_default(),
			});
		}

		let body = response.text().await.map_err(FlagsError::RequestFailed)?;

		// The API contract is a bare JSON boolean literal; anything else is
		// a fetch failure.
		serde_json::from_str::<bool>(&body).map_err(|e| FlagsError::ParseFailed(e.to_string()))
	}

	/// Caller-supplied default when present, configured default otherwise.
	fn resolve_default(&self, default_value: Option<bool>) -> bool {
		default_value.unwrap_or(self.config.default_value_on_error)
	}
}

/// Validates that a flag key is non-empty and not whitespace-only.
fn validate_flag_key(flag_key: &str) -> Result<()> {
	if flag_key.trim().is_empty() {
		return Err(FlagsError::EmptyFlagKey);
	}
	Ok(())
}
