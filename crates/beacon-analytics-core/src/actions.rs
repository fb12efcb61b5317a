// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inputs for the view, rating, and conversion reporting operations.

use chrono::{DateTime, Utc};

/// A tracked view of a screen or page.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
	/// View name, for example a route or screen identifier.
	pub name: String,
	/// Platform segment the view was recorded on.
	pub platform: String,
	/// True when this is the first view of the session.
	pub start: bool,
	/// True when the user left the app from this view.
	pub exit: bool,
	/// True when the user bounced without further interaction.
	pub bounce: bool,
	/// View timestamp as unix seconds.
	pub timestamp: Option<i64>,
}

impl View {
	/// Creates a view with all flags cleared.
	pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			platform: platform.into(),
			start: false,
			exit: false,
			bounce: false,
			timestamp: None,
		}
	}

	/// Marks this view as the first of the session.
	pub fn start(mut self) -> Self {
		self.start = true;
		self
	}

	/// Marks this view as the last before leaving the app.
	pub fn exit(mut self) -> Self {
		self.exit = true;
		self
	}

	/// Marks this view as a bounce.
	pub fn bounce(mut self) -> Self {
		self.bounce = true;
		self
	}

	/// Sets the view timestamp as unix seconds.
	pub fn with_timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);
		self
	}

	/// Sets the view timestamp from a `DateTime`.
	pub fn with_time(self, time: DateTime<Utc>) -> Self {
		self.with_timestamp(time.timestamp())
	}
}

/// A star rating left by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
	/// Platform the rating was collected on.
	pub platform: String,
	/// Application version the rating applies to.
	pub app_version: String,
	/// The rating itself, conventionally 1 to 5.
	pub rating: u32,
	/// Rating timestamp as unix seconds.
	pub timestamp: Option<i64>,
}

impl Rating {
	/// Creates a rating.
	pub fn new(platform: impl Into<String>, app_version: impl Into<String>, rating: u32) -> Self {
		Self {
			platform: platform.into(),
			app_version: app_version.into(),
			rating,
			timestamp: None,
		}
	}

	/// Sets the rating timestamp as unix seconds.
	pub fn with_timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);
		self
	}

	/// Sets the rating timestamp from a `DateTime`.
	pub fn with_time(self, time: DateTime<Utc>) -> Self {
		self.with_timestamp(time.timestamp())
	}
}

/// A campaign conversion attribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
	/// Campaign the conversion is attributed to.
	pub campaign_id: Option<String>,
	/// Campaign-specific user identifier.
	pub campaign_user: Option<String>,
	/// Conversion timestamp as unix seconds. When unset, the encoder falls
	/// back to the remembered session start, or omits the field entirely.
	pub timestamp: Option<i64>,
}

impl Conversion {
	/// Creates an empty conversion.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the campaign identifier.
	pub fn with_campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
		self.campaign_id = Some(campaign_id.into());
		self
	}

	/// Sets the campaign-specific user identifier.
	pub fn with_campaign_user(mut self, campaign_user: impl Into<String>) -> Self {
		self.campaign_user = Some(campaign_user.into());
		self
	}

	/// Sets the conversion timestamp as unix seconds.
	pub fn with_timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);
		self
	}

	/// Sets the conversion timestamp from a `DateTime`.
	pub fn with_time(self, time: DateTime<Utc>) -> Self {
		self.with_timestamp(time.timestamp())
	}
}
