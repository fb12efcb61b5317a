// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Device and platform metrics reported when a session begins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Device and platform descriptor attached to the session begin marker.
///
/// Every field is optional and omitted from the wire when unset. The wire
/// keys carry the protocol's underscore prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
	#[serde(rename = "_os", default, skip_serializing_if = "Option::is_none")]
	pub os: Option<String>,
	#[serde(rename = "_os_version", default, skip_serializing_if = "Option::is_none")]
	pub os_version: Option<String>,
	#[serde(rename = "_app_version", default, skip_serializing_if = "Option::is_none")]
	pub app_version: Option<String>,
	#[serde(rename = "_device", default, skip_serializing_if = "Option::is_none")]
	pub device: Option<String>,
	#[serde(rename = "_resolution", default, skip_serializing_if = "Option::is_none")]
	pub resolution: Option<String>,
	#[serde(rename = "_carrier", default, skip_serializing_if = "Option::is_none")]
	pub carrier: Option<String>,
	#[serde(rename = "_density", default, skip_serializing_if = "Option::is_none")]
	pub density: Option<String>,
	#[serde(rename = "_locale", default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	#[serde(rename = "_store", default, skip_serializing_if = "Option::is_none")]
	pub store: Option<String>,
}

impl SessionMetrics {
	/// Creates an empty metrics descriptor.
	pub fn new() -> Self {
		Self::default()
	}
}

impl From<SessionMetrics> for Value {
	fn from(metrics: SessionMetrics) -> Self {
		serde_json::to_value(&metrics).unwrap_or(Value::Null)
	}
}
