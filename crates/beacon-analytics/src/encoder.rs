// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The per-user request encoder.

use std::sync::Arc;
use std::time::Duration;

use beacon_analytics_core::{
	Conversion, CrashReport, CustomProperties, Event, Rating, Request, Segmentation,
	SessionMetrics, UserDetails, View, STAR_RATING_EVENT_KEY, VIEW_EVENT_KEY,
};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::error::{AnalyticsError, Result};
use crate::session::{build_session_requests, SessionContext};
use crate::transport::Transport;

/// Builder for constructing a [`UserEncoder`].
pub struct UserEncoderBuilder {
	device_id: Option<String>,
	country_code: Option<String>,
	city: Option<String>,
	ip_address: Option<String>,
	transport: Option<Arc<dyn Transport>>,
}

impl UserEncoderBuilder {
	/// Creates a new builder with nothing configured.
	pub fn new() -> Self {
		Self {
			device_id: None,
			country_code: None,
			city: None,
			ip_address: None,
			transport: None,
		}
	}

	/// Sets the device identifier the encoder stamps on every request.
	///
	/// Required, and immutable for the encoder's lifetime.
	pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
		self.device_id = Some(device_id.into());
		self
	}

	/// Sets the ISO country code reported on session begin markers.
	pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
		self.country_code = Some(country_code.into());
		self
	}

	/// Sets the city reported on session begin markers.
	pub fn city(mut self, city: impl Into<String>) -> Self {
		self.city = Some(city.into());
		self
	}

	/// Sets the network origin stamped on outgoing requests.
	pub fn ip_address(mut self, ip_address: impl Into<String>) -> Self {
		self.ip_address = Some(ip_address.into());
		self
	}

	/// Sets the transport that receives every encoded request.
	///
	/// Required.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Builds the encoder.
	///
	/// Fails when the device identifier or the transport is missing; there
	/// is no usable instance on failure.
	pub fn build(self) -> Result<UserEncoder> {
		let Some(device_id) = self.device_id else {
			error!("user encoder construction failed: missing device ID");
			return Err(AnalyticsError::MissingDeviceId);
		};
		let Some(transport) = self.transport else {
			error!(device_id = %device_id, "user encoder construction failed: missing transport");
			return Err(AnalyticsError::MissingTransport);
		};

		info!(device_id = %device_id, "User encoder initialized");

		Ok(UserEncoder {
			device_id,
			country_code: self.country_code,
			city: self.city,
			ip_address: self.ip_address,
			transport,
			session_start: None,
			custom: CustomProperties::new(),
		})
	}
}

impl Default for UserEncoderBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Encodes one user's analytics actions into collection requests.
///
/// Every action method builds a finished payload, stamps it with the user's
/// identity, and hands it to the configured [`Transport`] in the same call.
/// Methods return `&mut Self` so calls chain fluently. Instance state is
/// limited to the remembered session start and the pending custom property
/// accumulator.
///
/// The encoder performs no synchronization of its own; callers drive one
/// instance from one thread at a time (which `&mut self` already enforces
/// for safe code).
///
/// # Example
///
/// ```ignore
/// let mut user = UserEncoder::builder()
///     .device_id("device-1")
///     .ip_address("203.0.113.7")
///     .transport(transport)
///     .build()?;
///
/// user.begin_session(metrics, Duration::from_secs(150), Some(1000))
///     .track_view(View::new("/home", "web").start())
///     .custom_increment("logins")
///     .save_custom_properties();
/// ```
pub struct UserEncoder {
	device_id: String,
	country_code: Option<String>,
	city: Option<String>,
	ip_address: Option<String>,
	transport: Arc<dyn Transport>,
	session_start: Option<i64>,
	custom: CustomProperties,
}

impl UserEncoder {
	/// Creates a new builder for constructing a UserEncoder.
	pub fn builder() -> UserEncoderBuilder {
		UserEncoderBuilder::new()
	}

	/// The device identifier this encoder stamps on every request.
	pub fn device_id(&self) -> &str {
		&self.device_id
	}

	/// Reports a session that lasted `duration`, optionally starting at
	/// `timestamp` (unix seconds).
	///
	/// Emits one begin marker carrying `metrics`, followed by one heartbeat
	/// per started minute of `duration`, and submits the whole list as one
	/// bulk unit. A provided start timestamp is remembered as the default
	/// for later conversion reports.
	pub fn begin_session(
		&mut self,
		metrics: SessionMetrics,
		duration: Duration,
		timestamp: Option<i64>,
	) -> &mut Self {
		if timestamp.is_some() {
			self.session_start = timestamp;
		}

		let requests = build_session_requests(SessionContext {
			metrics: metrics.into(),
			seconds: duration.as_secs(),
			timestamp,
			country_code: self.country_code.as_deref(),
			city: self.city.as_deref(),
			ip_address: self.ip_address.as_deref(),
		});
		let requests: Vec<Request> = requests
			.into_iter()
			.map(|request| self.prepare_query(request))
			.collect();

		debug!(device_id = %self.device_id, count = requests.len(), "Submitting session batch");
		self.transport.submit_bulk(requests);
		self
	}

	/// Records a custom event.
	///
	/// The event passes through to the transport's event entry point
	/// unchanged, keyed by this encoder's device identifier.
	pub fn record_event(&mut self, event: Event) -> &mut Self {
		debug!(device_id = %self.device_id, key = %event.key, "Recording event");
		self.transport.record_event(&self.device_id, event);
		self
	}

	/// Updates the user's profile details.
	pub fn user_details(&mut self, details: UserDetails, timestamp: Option<i64>) -> &mut Self {
		let mut request = Request::new();
		request.insert("user_details", details);
		if let Some(timestamp) = timestamp {
			request.insert("timestamp", timestamp);
		}
		self.submit(request);
		self
	}

	/// Tracks a view of a screen or page.
	pub fn track_view(&mut self, view: View) -> &mut Self {
		let mut segmentation = Segmentation::new()
			.insert("name", view.name)
			.insert("visit", 1)
			.insert("segment", view.platform);
		if view.start {
			segmentation = segmentation.insert("start", 1);
		}
		if view.exit {
			segmentation = segmentation.insert("exit", 1);
		}
		if view.bounce {
			segmentation = segmentation.insert("bounce", 1);
		}

		let mut event = Event::new(VIEW_EVENT_KEY).with_segmentation(segmentation);
		if let Some(timestamp) = view.timestamp {
			event = event.with_timestamp(timestamp);
		}
		self.submit_event(event);
		self
	}

	/// Reports a star rating.
	pub fn report_rating(&mut self, rating: Rating) -> &mut Self {
		let segmentation = Segmentation::new()
			.insert("rating", rating.rating)
			.insert("app_version", rating.app_version)
			.insert("platform", rating.platform);

		let mut event = Event::new(STAR_RATING_EVENT_KEY).with_segmentation(segmentation);
		if let Some(timestamp) = rating.timestamp {
			event = event.with_timestamp(timestamp);
		}
		self.submit_event(event);
		self
	}

	/// Reports a crash. The descriptor is forwarded verbatim.
	pub fn report_crash(&mut self, crash: CrashReport, timestamp: Option<i64>) -> &mut Self {
		let mut request = Request::new();
		request.insert("crash", crash);
		if let Some(timestamp) = timestamp {
			request.insert("timestamp", timestamp);
		}
		self.submit(request);
		self
	}

	/// Reports a campaign conversion.
	///
	/// When the conversion carries no timestamp, the remembered session
	/// start is used; when neither is available the field is omitted.
	pub fn report_conversion(&mut self, conversion: Conversion) -> &mut Self {
		let mut request = Request::new();
		if let Some(campaign_id) = conversion.campaign_id {
			request.insert("campaign_id", campaign_id);
		}
		if let Some(campaign_user) = conversion.campaign_user {
			request.insert("campaign_user", campaign_user);
		}
		if let Some(timestamp) = conversion.timestamp.or(self.session_start) {
			request.insert("timestamp", timestamp);
		}
		self.submit(request);
		self
	}

	/// Replaces a custom property with a plain value.
	pub fn custom_set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.custom.set(key, value);
		self
	}

	/// Asks the service to set a custom property only if not already stored.
	///
	/// Only a presence marker is sent, not a value.
	pub fn custom_set_once(&mut self, key: impl Into<String>) -> &mut Self {
		self.custom.set_once(key);
		self
	}

	/// Increments a custom property by 1.
	pub fn custom_increment(&mut self, key: impl Into<String>) -> &mut Self {
		self.custom.increment(key);
		self
	}

	/// Increments a custom property by the given amount.
	pub fn custom_increment_by(
		&mut self,
		key: impl Into<String>,
		by: impl Into<Value>,
	) -> &mut Self {
		self.custom.increment_by(key, by);
		self
	}

	/// Multiplies a custom property by the given amount.
	pub fn custom_multiply(&mut self, key: impl Into<String>, by: impl Into<Value>) -> &mut Self {
		self.custom.multiply(key, by);
		self
	}

	/// Keeps the larger of the stored and submitted values.
	pub fn custom_max(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.custom.max(key, value);
		self
	}

	/// Keeps the smaller of the stored and submitted values.
	pub fn custom_min(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.custom.min(key, value);
		self
	}

	/// Appends a value to a custom property list.
	pub fn custom_push(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.custom.push(key, value);
		self
	}

	/// Appends a value to a custom property list, deduplicated by the
	/// service.
	pub fn custom_push_unique(
		&mut self,
		key: impl Into<String>,
		value: impl Into<Value>,
	) -> &mut Self {
		self.custom.push_unique(key, value);
		self
	}

	/// Appends a value to a custom property removal list.
	pub fn custom_pull(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.custom.pull(key, value);
		self
	}

	/// Flushes the pending custom property mutations as one request and
	/// resets the accumulator.
	///
	/// An empty accumulator still submits an empty patch.
	pub fn save_custom_properties(&mut self) -> &mut Self {
		let custom = self.custom.take();

		let mut user_details = Map::new();
		user_details.insert("custom".to_string(), custom.into());

		let mut request = Request::new();
		request.insert("user_details", Value::Object(user_details));

		debug!(device_id = %self.device_id, "Submitting custom property patch");
		self.submit(request);
		self
	}

	/// Stamps the user's identity onto a request without overwriting fields
	/// the fragment already carries.
	fn prepare_query(&self, mut request: Request) -> Request {
		if !request.contains("device_id") {
			request.insert("device_id", self.device_id.as_str());
		}
		if let Some(ip_address) = &self.ip_address {
			if !request.contains("ip_address") {
				request.insert("ip_address", ip_address.as_str());
			}
		}
		request
	}

	fn submit(&self, request: Request) {
		let request = self.prepare_query(request);
		debug!(device_id = %self.device_id, "Submitting analytics request");
		self.transport.submit_request(request);
	}

	fn submit_event(&self, event: Event) {
		let mut request = Request::new();
		request.insert("events", vec![Value::from(event)]);
		self.submit(request);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	#[derive(Default)]
	struct RecordingTransport {
		requests: Mutex<Vec<Request>>,
		bulks: Mutex<Vec<Vec<Request>>>,
		events: Mutex<Vec<(String, Event)>>,
	}

	impl RecordingTransport {
		fn new() -> Arc<Self> {
			Arc::new(Self::default())
		}

		fn requests(&self) -> Vec<Request> {
			self.requests.lock().unwrap().clone()
		}

		fn bulks(&self) -> Vec<Vec<Request>> {
			self.bulks.lock().unwrap().clone()
		}

		fn events(&self) -> Vec<(String, Event)> {
			self.events.lock().unwrap().clone()
		}
	}

	impl Transport for RecordingTransport {
		fn submit_request(&self, request: Request) {
			self.requests.lock().unwrap().push(request);
		}

		fn submit_bulk(&self, requests: Vec<Request>) {
			self.bulks.lock().unwrap().push(requests);
		}

		fn record_event(&self, device_id: &str, event: Event) {
			self.events.lock().unwrap().push((device_id.to_string(), event));
		}
	}

	fn encoder(transport: Arc<RecordingTransport>) -> UserEncoder {
		UserEncoder::builder()
			.device_id("device-1")
			.transport(transport)
			.build()
			.unwrap()
	}

	#[test]
	fn build_requires_device_id() {
		let result = UserEncoder::builder()
			.transport(RecordingTransport::new())
			.build();
		assert!(matches!(result, Err(AnalyticsError::MissingDeviceId)));
	}

	#[test]
	fn build_requires_transport() {
		let result = UserEncoder::builder().device_id("device-1").build();
		assert!(matches!(result, Err(AnalyticsError::MissingTransport)));
	}

	#[test]
	fn build_succeeds_with_device_id_and_transport() {
		let user = encoder(RecordingTransport::new());
		assert_eq!(user.device_id(), "device-1");
	}

	#[test]
	fn begin_session_submits_one_bulk_unit() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.begin_session(
			SessionMetrics::default(),
			Duration::from_secs(150),
			Some(1000),
		);

		let bulks = transport.bulks();
		assert_eq!(bulks.len(), 1);
		assert!(transport.requests().is_empty());

		let requests = &bulks[0];
		assert_eq!(requests.len(), 4);

		assert_eq!(requests[0].get("begin_session"), Some(&serde_json::json!(1)));
		assert_eq!(requests[0].get("metrics"), Some(&serde_json::json!({})));
		assert_eq!(requests[0].get("timestamp"), Some(&serde_json::json!(1000)));

		for (request, (duration, timestamp)) in
			requests[1..].iter().zip([(60, 1060), (60, 1120), (30, 1180)])
		{
			assert_eq!(
				request.get("session_duration"),
				Some(&serde_json::json!(duration))
			);
			assert_eq!(request.get("timestamp"), Some(&serde_json::json!(timestamp)));
		}

		for request in requests {
			assert_eq!(
				request.get("device_id"),
				Some(&serde_json::json!("device-1"))
			);
		}
	}

	#[test]
	fn zero_duration_session_submits_begin_marker_only() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.begin_session(SessionMetrics::default(), Duration::ZERO, None);

		let bulks = transport.bulks();
		assert_eq!(bulks[0].len(), 1);
		assert!(bulks[0][0].contains("begin_session"));
	}

	#[test]
	fn begin_session_passes_metrics_through() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		let metrics = SessionMetrics {
			os: Some("Android".to_string()),
			app_version: Some("2.1.0".to_string()),
			..Default::default()
		};
		user.begin_session(metrics, Duration::from_secs(30), None);

		assert_eq!(
			transport.bulks()[0][0].get("metrics"),
			Some(&serde_json::json!({"_os": "Android", "_app_version": "2.1.0"}))
		);
	}

	#[test]
	fn conversion_defaults_to_remembered_session_start() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.begin_session(SessionMetrics::default(), Duration::ZERO, Some(5000))
			.report_conversion(Conversion::new().with_campaign_id("launch"));

		let requests = transport.requests();
		assert_eq!(requests.len(), 1);
		assert_eq!(
			requests[0].get("campaign_id"),
			Some(&serde_json::json!("launch"))
		);
		assert_eq!(requests[0].get("timestamp"), Some(&serde_json::json!(5000)));
	}

	#[test]
	fn conversion_explicit_timestamp_wins_over_session_start() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.begin_session(SessionMetrics::default(), Duration::ZERO, Some(5000))
			.report_conversion(Conversion::new().with_timestamp(7777));

		assert_eq!(
			transport.requests()[0].get("timestamp"),
			Some(&serde_json::json!(7777))
		);
	}

	#[test]
	fn conversion_without_any_timestamp_omits_the_field() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.report_conversion(Conversion::new().with_campaign_user("u42"));

		let requests = transport.requests();
		assert!(!requests[0].contains("timestamp"));
		assert_eq!(
			requests[0].get("campaign_user"),
			Some(&serde_json::json!("u42"))
		);
	}

	#[test]
	fn record_event_passes_through_keyed_by_device() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		let event = Event::new("purchase").with_sum(9.99);
		user.record_event(event.clone());

		let events = transport.events();
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].0, "device-1");
		assert_eq!(events[0].1, event);
		assert!(transport.requests().is_empty());
	}

	#[test]
	fn user_details_are_wrapped_and_stamped() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		let details = UserDetails {
			name: Some("Alice".to_string()),
			..Default::default()
		};
		user.user_details(details, Some(123));

		let requests = transport.requests();
		assert_eq!(
			requests[0].get("user_details"),
			Some(&serde_json::json!({"name": "Alice"}))
		);
		assert_eq!(requests[0].get("timestamp"), Some(&serde_json::json!(123)));
		assert_eq!(
			requests[0].get("device_id"),
			Some(&serde_json::json!("device-1"))
		);
	}

	#[test]
	fn track_view_synthesizes_the_reserved_view_event() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.track_view(View::new("/home", "web"));

		let requests = transport.requests();
		assert_eq!(
			requests[0].get("events"),
			Some(&serde_json::json!([{
				"key": "[CLY]_view",
				"count": 1,
				"segmentation": {"name": "/home", "visit": 1, "segment": "web"}
			}]))
		);
	}

	#[test]
	fn track_view_adds_flags_only_when_set() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.track_view(View::new("/landing", "web").start().bounce().with_timestamp(42));

		let events = transport.requests()[0].get("events").cloned().unwrap();
		assert_eq!(
			events,
			serde_json::json!([{
				"key": "[CLY]_view",
				"count": 1,
				"timestamp": 42,
				"segmentation": {
					"name": "/landing",
					"visit": 1,
					"segment": "web",
					"start": 1,
					"bounce": 1
				}
			}])
		);
	}

	#[test]
	fn report_rating_synthesizes_the_star_rating_event() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.report_rating(Rating::new("ios", "2.1.0", 5));

		assert_eq!(
			transport.requests()[0].get("events"),
			Some(&serde_json::json!([{
				"key": "[CLY]_star_rating",
				"count": 1,
				"segmentation": {"rating": 5, "app_version": "2.1.0", "platform": "ios"}
			}]))
		);
	}

	#[test]
	fn report_crash_wraps_the_descriptor_verbatim() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.report_crash(CrashReport::new("stack overflow").nonfatal(), Some(99));

		let requests = transport.requests();
		assert_eq!(
			requests[0].get("crash"),
			Some(&serde_json::json!({"_error": "stack overflow", "_nonfatal": true}))
		);
		assert_eq!(requests[0].get("timestamp"), Some(&serde_json::json!(99)));
	}

	#[test]
	fn save_custom_properties_flushes_and_resets() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.custom_set("plan", "pro")
			.custom_increment("logins")
			.custom_push("tags", "beta")
			.save_custom_properties();

		let requests = transport.requests();
		assert_eq!(
			requests[0].get("user_details"),
			Some(&serde_json::json!({"custom": {
				"plan": "pro",
				"logins": {"$inc": 1},
				"tags": {"$push": ["beta"]}
			}}))
		);

		// the accumulator is empty now; a second save submits an empty patch
		user.save_custom_properties();
		let requests = transport.requests();
		assert_eq!(
			requests[1].get("user_details"),
			Some(&serde_json::json!({"custom": {}}))
		);
	}

	#[test]
	fn custom_mutators_keep_last_call_per_key() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.custom_set("k", 5)
			.custom_increment("k")
			.save_custom_properties();

		assert_eq!(
			transport.requests()[0].get("user_details"),
			Some(&serde_json::json!({"custom": {"k": {"$inc": 1}}}))
		);
	}

	#[test]
	fn ip_address_is_stamped_when_configured() {
		let transport = RecordingTransport::new();
		let mut user = UserEncoder::builder()
			.device_id("device-1")
			.ip_address("203.0.113.7")
			.transport(transport.clone())
			.build()
			.unwrap();

		user.report_conversion(Conversion::new());

		assert_eq!(
			transport.requests()[0].get("ip_address"),
			Some(&serde_json::json!("203.0.113.7"))
		);
	}

	#[test]
	fn ip_address_is_absent_when_not_configured() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.report_conversion(Conversion::new());

		assert!(!transport.requests()[0].contains("ip_address"));
	}

	#[test]
	fn prepare_query_never_overwrites_caller_fields() {
		let transport = RecordingTransport::new();
		let user = UserEncoder::builder()
			.device_id("device-1")
			.ip_address("203.0.113.7")
			.transport(transport)
			.build()
			.unwrap();

		let mut request = Request::new();
		request.insert("device_id", "other-device");
		request.insert("ip_address", "198.51.100.1");

		let prepared = user.prepare_query(request);
		assert_eq!(
			prepared.get("device_id"),
			Some(&serde_json::json!("other-device"))
		);
		assert_eq!(
			prepared.get("ip_address"),
			Some(&serde_json::json!("198.51.100.1"))
		);
	}

	#[test]
	fn begin_session_location_comes_from_the_instance() {
		let transport = RecordingTransport::new();
		let mut user = UserEncoder::builder()
			.device_id("device-1")
			.country_code("AU")
			.city("Sydney")
			.transport(transport.clone())
			.build()
			.unwrap();

		user.begin_session(SessionMetrics::default(), Duration::from_secs(90), None);

		let bulk = &transport.bulks()[0];
		assert_eq!(bulk[0].get("country_code"), Some(&serde_json::json!("AU")));
		assert_eq!(bulk[0].get("city"), Some(&serde_json::json!("Sydney")));
	}

	#[test]
	fn action_methods_chain_fluently() {
		let transport = RecordingTransport::new();
		let mut user = encoder(transport.clone());

		user.begin_session(SessionMetrics::default(), Duration::from_secs(61), Some(1000))
			.track_view(View::new("/home", "web").start())
			.record_event(Event::new("purchase"))
			.custom_increment("logins")
			.save_custom_properties()
			.report_conversion(Conversion::new());

		assert_eq!(transport.bulks().len(), 1);
		assert_eq!(transport.events().len(), 1);
		assert_eq!(transport.requests().len(), 3);
	}
}
