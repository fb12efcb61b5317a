// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The transport seam between the encoder and the delivery layer.

use beacon_analytics_core::{Event, Request};

/// Handler for delivering encoded requests to the collection service.
///
/// The encoder builds finished payloads and hands them off through this
/// trait; everything past the handoff (queueing across users, batching,
/// retry, backoff, authentication, network I/O) belongs to the
/// implementation. Handoffs are fire-and-forget: the encoder observes no
/// response and never retries.
pub trait Transport: Send + Sync {
	/// Enqueues one payload for eventual delivery.
	fn submit_request(&self, request: Request);

	/// Enqueues an ordered list of payloads as one logical unit.
	fn submit_bulk(&self, requests: Vec<Request>);

	/// Enqueues one event for the given device, bypassing request shaping.
	fn record_event(&self, device_id: &str, event: Event);
}
