// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The request fragment handed to the transport layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One structured request payload destined for the transport layer.
///
/// A request is a flat mapping from protocol field name to value. Optional
/// fields are only present when set; an absent field never serializes as
/// null or an empty placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request {
	fields: Map<String, Value>,
}

impl Request {
	/// Creates an empty request.
	pub fn new() -> Self {
		Self { fields: Map::new() }
	}

	/// Sets a protocol field, replacing any previous value.
	pub fn insert<K, V>(&mut self, field: K, value: V) -> &mut Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.fields.insert(field.into(), value.into());
		self
	}

	/// Returns true if the field is already set.
	pub fn contains(&self, field: &str) -> bool {
		self.fields.contains_key(field)
	}

	/// Gets a field value by name.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.fields.get(field)
	}

	/// Returns true if no fields are set.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Returns the number of fields set.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Borrows the underlying field map.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.fields
	}

	/// Converts the request into a `serde_json::Value`.
	pub fn into_value(self) -> Value {
		Value::Object(self.fields)
	}
}

impl From<Map<String, Value>> for Request {
	fn from(fields: Map<String, Value>) -> Self {
		Self { fields }
	}
}

impl From<Request> for Value {
	fn from(request: Request) -> Self {
		request.into_value()
	}
}
