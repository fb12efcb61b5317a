// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core payload types for the Beacon analytics collection protocol.
//!
//! This crate defines the wire-facing documents exchanged with the Beacon
//! collection service: request fragments, event payloads, session metrics,
//! user profile details, crash reports, and the custom-property patch
//! document. It is pure data, no I/O and no transport concerns; the encoder
//! SDK (`beacon-analytics`) assembles these types into requests.
//!
//! # Overview
//!
//! - [`Request`] is one flat field-to-value payload handed to the transport.
//! - [`Event`] and [`Segmentation`] describe analytics events, including the
//!   reserved view and star-rating event keys.
//! - [`SessionMetrics`], [`UserDetails`], and [`CrashReport`] are the typed
//!   descriptors for session begin markers, profile updates, and crash
//!   reports, all serializing sparsely to the protocol's wire keys.
//! - [`CustomProperties`] accumulates property mutations (`set`, `$inc`,
//!   `$push`, ...) into a single merged patch document awaiting flush.

pub mod actions;
pub mod crash;
pub mod event;
pub mod metrics;
pub mod properties;
pub mod request;
pub mod segmentation;
pub mod user;

pub use actions::{Conversion, Rating, View};
pub use crash::CrashReport;
pub use event::{Event, STAR_RATING_EVENT_KEY, VIEW_EVENT_KEY};
pub use metrics::SessionMetrics;
pub use properties::{CustomProperties, Modifier, ModifierValue, PropertyValue};
pub use request::Request;
pub use segmentation::Segmentation;
pub use user::UserDetails;
