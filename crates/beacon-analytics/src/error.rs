// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics encoder.

use thiserror::Error;

/// Analytics encoder errors.
///
/// These can only surface while constructing an encoder; once built, no
/// operation fails.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// No device identifier was supplied.
	#[error("missing device ID: every user encoder requires a device identifier")]
	MissingDeviceId,

	/// No transport was supplied.
	#[error("missing transport: the encoder cannot hand off requests without one")]
	MissingTransport,
}

/// Result type alias for analytics encoder operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
