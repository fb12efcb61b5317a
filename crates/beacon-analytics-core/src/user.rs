// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User profile details.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile fields accepted by the user details endpoint.
///
/// The protocol accepts exactly these fields; anything else present in an
/// incoming document is silently dropped when deserializing. All fields are
/// optional and absent fields never serialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub organization: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// URL of the user's profile picture.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// Birth year.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub byear: Option<i32>,
	/// Free-form custom profile properties.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom: Option<Value>,
}

impl UserDetails {
	/// Creates an empty user details document.
	pub fn new() -> Self {
		Self::default()
	}
}

impl From<UserDetails> for Value {
	fn from(details: UserDetails) -> Self {
		serde_json::to_value(&details).unwrap_or(Value::Null)
	}
}
