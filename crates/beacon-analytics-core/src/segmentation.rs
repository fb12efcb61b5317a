// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helper for building event segmentation.

use serde_json::{Map, Value};

/// A builder for constructing event segmentation.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::Segmentation;
///
/// let segmentation = Segmentation::new()
///     .insert("name", "/checkout")
///     .insert("visit", 1)
///     .insert("segment", "web");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
	inner: Map<String, Value>,
}

impl Segmentation {
	/// Creates a new empty Segmentation builder.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair into the segmentation.
	///
	/// The value can be any type that implements `Into<serde_json::Value>`,
	/// including strings, numbers, booleans, arrays, and nested objects.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Merges another Segmentation into this one.
	///
	/// If both contain the same key, the value from `other` takes precedence.
	pub fn merge(mut self, other: Segmentation) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Returns true if the segmentation is empty.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of segmentation entries.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Converts the segmentation into a `serde_json::Value`.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Segmentation> for Value {
	fn from(segmentation: Segmentation) -> Self {
		segmentation.into_value()
	}
}

impl From<Value> for Segmentation {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Segmentation {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}
