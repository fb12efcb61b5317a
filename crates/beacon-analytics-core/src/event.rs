// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event payloads, including the reserved view and rating event keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved event key for view tracking.
pub const VIEW_EVENT_KEY: &str = "[CLY]_view";

/// Reserved event key for star ratings.
pub const STAR_RATING_EVENT_KEY: &str = "[CLY]_star_rating";

/// A single analytics event.
///
/// Only `key` and `count` are always present on the wire; every other field
/// is omitted when unset. `count` defaults to 1, one occurrence per report.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::{Event, Segmentation};
///
/// let event = Event::new("purchase")
///     .with_sum(99.99)
///     .with_segmentation(Segmentation::new().insert("currency", "USD"));
/// assert_eq!(event.count, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	pub key: String,
	#[serde(default = "default_count")]
	pub count: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sum: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dur: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub segmentation: Option<Value>,
}

fn default_count() -> u64 {
	1
}

impl Event {
	/// Creates an event with the given key and a count of 1.
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			count: 1,
			sum: None,
			dur: None,
			timestamp: None,
			segmentation: None,
		}
	}

	/// Sets the occurrence count.
	pub fn with_count(mut self, count: u64) -> Self {
		self.count = count;
		self
	}

	/// Sets the value sum reported with the event.
	pub fn with_sum(mut self, sum: f64) -> Self {
		self.sum = Some(sum);
		self
	}

	/// Sets the duration reported with the event, in seconds.
	pub fn with_dur(mut self, dur: f64) -> Self {
		self.dur = Some(dur);
		self
	}

	/// Sets the event timestamp as unix seconds.
	pub fn with_timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);
		self
	}

	/// Sets the event timestamp from a `DateTime`.
	pub fn with_time(self, time: DateTime<Utc>) -> Self {
		self.with_timestamp(time.timestamp())
	}

	/// Sets the event segmentation.
	pub fn with_segmentation(mut self, segmentation: impl Into<Value>) -> Self {
		self.segmentation = Some(segmentation.into());
		self
	}
}

impl From<Event> for Value {
	fn from(event: Event) -> Self {
		serde_json::to_value(&event).unwrap_or(Value::Null)
	}
}
