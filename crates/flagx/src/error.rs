// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the feature flags SDK.

use thiserror::Error;

/// Result type alias for the flags SDK.
pub type Result<T> = std::result::Result<T, FlagsError>;

/// Errors that can occur in the feature flags SDK.
///
/// None of these surface from [`crate::FlagClient::is_enabled`], which
/// always degrades to a default value; they are returned by the builder and
/// logged when a fetch fails.
#[derive(Error, Debug)]
pub enum FlagsError {
	/// Base URL is missing or blank.
	#[error("Invalid or missing base URL")]
	InvalidBaseUrl,

	/// Cache capacity must be greater than zero.
	#[error("Cache capacity must be greater than zero")]
	InvalidCacheCapacity,

	/// Failed to construct the HTTP client.
	#[error("Failed to construct HTTP client: {0}")]
	ConnectionFailed(#[source] reqwest::Error),

	/// Flag key was empty or whitespace-only.
	#[error("Flag key must not be empty or blank")]
	EmptyFlagKey,

	/// HTTP request failed at the transport level (DNS, connection
	/// refused, timeout, reset).
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[source] reqwest::Error),

	/// Server returned a non-success status.
	#[error("Server returned an error: {status} - {message}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Error message from server.
		message: String,
	},

	/// Response body was not a JSON boolean literal.
	#[error("Failed to parse server response: {0}")]
	ParseFailed(String),
}

impl FlagsError {
	/// Returns true if this error is a fetch failure.
	///
	/// Fetch failures are degraded uniformly to the default value: the
	/// caller of `is_enabled` observes no distinction between a transport
	/// error, a server error, and an undecodable body.
	pub fn is_fetch_failure(&self) -> bool {
		matches!(
			self,
			FlagsError::RequestFailed(_)
				| FlagsError::ServerError { .. }
				| FlagsError::ParseFailed(_)
		)
	}
}
