// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash report payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A crash descriptor, forwarded to the collection service verbatim.
///
/// Only the error text is expected on every report; the remaining diagnostic
/// fields describe device state at crash time and are omitted when unset.
/// No field is validated here, the receiving service interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrashReport {
	/// Error message with stack trace.
	#[serde(rename = "_error")]
	pub error: String,
	/// True when the crash was caught and the app kept running.
	#[serde(rename = "_nonfatal", default)]
	pub nonfatal: bool,
	/// Exception or crash name.
	#[serde(rename = "_name", default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Log lines leading up to the crash.
	#[serde(rename = "_logs", default, skip_serializing_if = "Option::is_none")]
	pub logs: Option<String>,
	/// Seconds the app had been running.
	#[serde(rename = "_run", default, skip_serializing_if = "Option::is_none")]
	pub run: Option<u64>,
	#[serde(rename = "_os", default, skip_serializing_if = "Option::is_none")]
	pub os: Option<String>,
	#[serde(rename = "_os_version", default, skip_serializing_if = "Option::is_none")]
	pub os_version: Option<String>,
	#[serde(rename = "_manufacture", default, skip_serializing_if = "Option::is_none")]
	pub manufacture: Option<String>,
	#[serde(rename = "_device", default, skip_serializing_if = "Option::is_none")]
	pub device: Option<String>,
	#[serde(rename = "_resolution", default, skip_serializing_if = "Option::is_none")]
	pub resolution: Option<String>,
	#[serde(rename = "_app_version", default, skip_serializing_if = "Option::is_none")]
	pub app_version: Option<String>,
	#[serde(rename = "_cpu", default, skip_serializing_if = "Option::is_none")]
	pub cpu: Option<String>,
	#[serde(rename = "_opengl", default, skip_serializing_if = "Option::is_none")]
	pub opengl: Option<String>,
	#[serde(rename = "_ram_current", default, skip_serializing_if = "Option::is_none")]
	pub ram_current: Option<u64>,
	#[serde(rename = "_ram_total", default, skip_serializing_if = "Option::is_none")]
	pub ram_total: Option<u64>,
	#[serde(rename = "_disk_current", default, skip_serializing_if = "Option::is_none")]
	pub disk_current: Option<u64>,
	#[serde(rename = "_disk_total", default, skip_serializing_if = "Option::is_none")]
	pub disk_total: Option<u64>,
	/// Battery level, 0.0 to 1.0.
	#[serde(rename = "_bat", default, skip_serializing_if = "Option::is_none")]
	pub battery: Option<f64>,
	#[serde(rename = "_orientation", default, skip_serializing_if = "Option::is_none")]
	pub orientation: Option<String>,
	#[serde(rename = "_online", default, skip_serializing_if = "Option::is_none")]
	pub online: Option<bool>,
	#[serde(rename = "_muted", default, skip_serializing_if = "Option::is_none")]
	pub muted: Option<bool>,
	#[serde(rename = "_background", default, skip_serializing_if = "Option::is_none")]
	pub background: Option<bool>,
	/// Free-form custom crash properties.
	#[serde(rename = "_custom", default, skip_serializing_if = "Option::is_none")]
	pub custom: Option<Value>,
}

impl CrashReport {
	/// Creates a fatal crash report with the given error text.
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			..Default::default()
		}
	}

	/// Marks the crash as handled.
	pub fn nonfatal(mut self) -> Self {
		self.nonfatal = true;
		self
	}
}

impl From<CrashReport> for Value {
	fn from(crash: CrashReport) -> Self {
		serde_json::to_value(&crash).unwrap_or(Value::Null)
	}
}
