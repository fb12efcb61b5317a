// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-user request encoder for Beacon product analytics.
//!
//! This crate turns high-level user actions (session start, custom event,
//! profile update, view, rating, crash, campaign conversion) into finished
//! collection requests, and hands them to a caller-supplied [`Transport`]
//! for batched delivery. It is a pure, synchronous payload builder: no
//! network I/O, no persistence, no queueing of its own. One [`UserEncoder`]
//! is created per logical user and carries only two pieces of state, the
//! remembered session start and the pending custom property accumulator.
//!
//! # Architecture
//!
//! - [`UserEncoder`] stamps every payload with the owning user's identity
//!   (device identifier, network origin) and drives the action builders.
//! - The session module decomposes an elapsed session duration into a begin
//!   marker plus heartbeats of at most 60 seconds each, submitted as one
//!   bulk unit.
//! - [`Transport`] is the narrow seam to the delivery layer: one payload,
//!   one bulk list, or one event keyed by device.
//! - Payload types live in [`beacon_analytics_core`] and are re-exported
//!   here for convenience.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use beacon_analytics::{Transport, UserEncoder};
//! use beacon_analytics_core::{Event, Request, SessionMetrics, View};
//!
//! struct Discard;
//!
//! impl Transport for Discard {
//!     fn submit_request(&self, _request: Request) {}
//!     fn submit_bulk(&self, _requests: Vec<Request>) {}
//!     fn record_event(&self, _device_id: &str, _event: Event) {}
//! }
//!
//! # fn main() -> beacon_analytics::Result<()> {
//! let mut user = UserEncoder::builder()
//!     .device_id("device-1")
//!     .transport(Arc::new(Discard))
//!     .build()?;
//!
//! user.begin_session(SessionMetrics::default(), Duration::from_secs(150), Some(1000))
//!     .track_view(View::new("/home", "web").start())
//!     .record_event(Event::new("purchase").with_sum(9.99))
//!     .custom_increment("logins")
//!     .save_custom_properties();
//! # Ok(())
//! # }
//! ```

mod error;
mod session;

pub mod encoder;
pub mod transport;

pub use encoder::{UserEncoder, UserEncoderBuilder};
pub use error::{AnalyticsError, Result};
pub use transport::Transport;

// Re-export the payload types at the crate root for convenience.
pub use beacon_analytics_core::{
	Conversion, CrashReport, CustomProperties, Event, Modifier, Rating, Request, Segmentation,
	SessionMetrics, UserDetails, View, STAR_RATING_EVENT_KEY, VIEW_EVENT_KEY,
};
