// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session begin markers and heartbeat decomposition.

use beacon_analytics_core::Request;
use serde_json::Value;

/// The wire protocol caps one heartbeat at 60 seconds of elapsed time.
pub(crate) const MAX_HEARTBEAT_SECS: u64 = 60;

/// Everything a session submission needs from the owning encoder.
pub(crate) struct SessionContext<'a> {
	pub metrics: Value,
	pub seconds: u64,
	pub timestamp: Option<i64>,
	pub country_code: Option<&'a str>,
	pub city: Option<&'a str>,
	pub ip_address: Option<&'a str>,
}

/// Splits an elapsed duration into heartbeat slices of at most 60 seconds.
///
/// Produces `ceil(seconds / 60)` slices whose sum is exactly `seconds`.
pub(crate) fn heartbeat_slices(seconds: u64) -> Vec<u64> {
	let beats = seconds.div_ceil(MAX_HEARTBEAT_SECS);
	let mut slices = Vec::with_capacity(beats as usize);
	let mut remaining = seconds;
	for _ in 0..beats {
		slices.push(remaining.min(MAX_HEARTBEAT_SECS));
		remaining = remaining.saturating_sub(MAX_HEARTBEAT_SECS);
	}
	slices
}

/// Builds the ordered session submission: one begin marker followed by one
/// heartbeat per slice.
///
/// Heartbeat timestamps stay on the 60 second grid relative to the session
/// start, even for a final slice that records less than 60 seconds.
pub(crate) fn build_session_requests(context: SessionContext<'_>) -> Vec<Request> {
	let slices = heartbeat_slices(context.seconds);
	let mut requests = Vec::with_capacity(slices.len() + 1);

	let mut begin = Request::new();
	begin.insert("begin_session", 1);
	begin.insert("metrics", context.metrics);
	if let Some(country_code) = context.country_code {
		begin.insert("country_code", country_code);
	}
	if let Some(city) = context.city {
		begin.insert("city", city);
	}
	if let Some(timestamp) = context.timestamp {
		begin.insert("timestamp", timestamp);
	}
	requests.push(begin);

	for (index, slice) in slices.into_iter().enumerate() {
		let mut heartbeat = Request::new();
		heartbeat.insert("session_duration", slice);
		if let Some(ip_address) = context.ip_address {
			heartbeat.insert("ip_address", ip_address);
		}
		if let Some(timestamp) = context.timestamp {
			heartbeat.insert("timestamp", timestamp + (index as i64 + 1) * 60);
		}
		requests.push(heartbeat);
	}

	requests
}
