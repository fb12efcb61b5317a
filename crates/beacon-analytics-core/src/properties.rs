// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Accumulator for pending custom user property mutations.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A modifier operator, naming how the collection service combines a
/// submitted value with its stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Modifier {
	#[serde(rename = "$setOnce")]
	SetOnce,
	#[serde(rename = "$inc")]
	Increment,
	#[serde(rename = "$mul")]
	Multiply,
	#[serde(rename = "$min")]
	Min,
	#[serde(rename = "$max")]
	Max,
	#[serde(rename = "$push")]
	Push,
	#[serde(rename = "$addToSet")]
	PushUnique,
	#[serde(rename = "$pull")]
	Pull,
}

impl Modifier {
	/// The operator's wire name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Modifier::SetOnce => "$setOnce",
			Modifier::Increment => "$inc",
			Modifier::Multiply => "$mul",
			Modifier::Min => "$min",
			Modifier::Max => "$max",
			Modifier::Push => "$push",
			Modifier::PushUnique => "$addToSet",
			Modifier::Pull => "$pull",
		}
	}
}

impl std::fmt::Display for Modifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// The value slot a modifier operator holds within one key's entry.
///
/// Single-slot operators hold a scalar; list operators accumulate values in
/// call order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModifierValue {
	Scalar(Value),
	List(Vec<Value>),
}

/// The resolved entry for one property key.
///
/// A key holds either a plain replacement value or a document of modifier
/// operators, never both. Whichever mutator ran last for the key decides the
/// variant; assigning a new variant discards the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
	Value(Value),
	Modifiers(BTreeMap<Modifier, ModifierValue>),
}

/// Pending custom user property mutations awaiting flush.
///
/// Successive mutator calls collapse into one merged patch document. Scalar
/// operators keep a single slot per key and operator, so repeated calls
/// overwrite rather than combine; the collection service applies the
/// combining semantics per submitted request. List operators append in call
/// order.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::CustomProperties;
///
/// let mut properties = CustomProperties::new();
/// properties
///     .set("plan", "pro")
///     .increment("logins")
///     .push("tags", "beta");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomProperties {
	entries: BTreeMap<String, PropertyValue>,
}

impl CustomProperties {
	/// Creates an empty accumulator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if no mutations are pending.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the number of keys with pending mutations.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Gets the pending entry for a key.
	pub fn get(&self, key: &str) -> Option<&PropertyValue> {
		self.entries.get(key)
	}

	/// Replaces the key's value with a plain scalar.
	///
	/// Unlike the modifier mutators this stores the raw value directly; any
	/// modifier document previously accumulated for the key is discarded.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.entries.insert(key.into(), PropertyValue::Value(value.into()));
		self
	}

	/// Records that the key should be set only if not already stored.
	///
	/// Only a presence marker is sent; the stored value is 1.
	pub fn set_once(&mut self, key: impl Into<String>) -> &mut Self {
		self.assign(key, Modifier::SetOnce, 1)
	}

	/// Increments the key by 1.
	pub fn increment(&mut self, key: impl Into<String>) -> &mut Self {
		self.assign(key, Modifier::Increment, 1)
	}

	/// Increments the key by the given amount.
	pub fn increment_by(&mut self, key: impl Into<String>, by: impl Into<Value>) -> &mut Self {
		self.assign(key, Modifier::Increment, by)
	}

	/// Multiplies the key by the given amount.
	pub fn multiply(&mut self, key: impl Into<String>, by: impl Into<Value>) -> &mut Self {
		self.assign(key, Modifier::Multiply, by)
	}

	/// Stores the value if larger than the one already stored.
	pub fn max(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.assign(key, Modifier::Max, value)
	}

	/// Stores the value if smaller than the one already stored.
	pub fn min(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.assign(key, Modifier::Min, value)
	}

	/// Appends a value to the key's list.
	pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.append(key, Modifier::Push, value)
	}

	/// Appends a value to the key's list, deduplicated by the service.
	pub fn push_unique(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.append(key, Modifier::PushUnique, value)
	}

	/// Appends a value to the key's removal list.
	pub fn pull(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.append(key, Modifier::Pull, value)
	}

	/// Takes the accumulated document, leaving the accumulator empty.
	pub fn take(&mut self) -> CustomProperties {
		std::mem::take(self)
	}

	/// Assigns a single-slot operator value, overwriting any previous value
	/// for that operator on the key.
	fn assign(
		&mut self,
		key: impl Into<String>,
		op: Modifier,
		value: impl Into<Value>,
	) -> &mut Self {
		let key = key.into();
		let value = value.into();
		match self.entries.get_mut(&key) {
			Some(PropertyValue::Modifiers(modifiers)) => {
				modifiers.insert(op, ModifierValue::Scalar(value));
			}
			// No entry, or a plain scalar: the key's entry is replaced wholesale.
			_ => {
				let mut modifiers = BTreeMap::new();
				modifiers.insert(op, ModifierValue::Scalar(value));
				self.entries.insert(key, PropertyValue::Modifiers(modifiers));
			}
		}
		self
	}

	/// Appends to a list operator slot in call order.
	fn append(
		&mut self,
		key: impl Into<String>,
		op: Modifier,
		value: impl Into<Value>,
	) -> &mut Self {
		let key = key.into();
		let value = value.into();
		match self.entries.get_mut(&key) {
			Some(PropertyValue::Modifiers(modifiers)) => match modifiers.get_mut(&op) {
				Some(ModifierValue::List(items)) => items.push(value),
				_ => {
					modifiers.insert(op, ModifierValue::List(vec![value]));
				}
			},
			_ => {
				let mut modifiers = BTreeMap::new();
				modifiers.insert(op, ModifierValue::List(vec![value]));
				self.entries.insert(key, PropertyValue::Modifiers(modifiers));
			}
		}
		self
	}
}

impl From<CustomProperties> for Value {
	fn from(properties: CustomProperties) -> Self {
		serde_json::to_value(&properties).unwrap_or(Value::Null)
	}
}
