//! Room identity and access resolution for two-party chat and call rooms.
//!
//! A room between two users is identified by the users themselves: both
//! sides derive the same canonical identifier without asking a server to
//! create anything. This crate provides:
//! - **Room identifiers**: commutative encoding of a participant pair, and
//!   decoding of an inbound path segment relative to the requesting user
//! - **Session gate**: turning a session token into an authenticated context
//! - **Access control**: the per-request admit / redirect / not-found decision
//! - **Trust boundary**: tainted inputs that must be validated before use
//!
//! # Core Types
//!
//! - [`RoomCodec`](room::RoomCodec) / [`RoomIdentifier`](room::RoomIdentifier)
//! - [`SessionGate`] and the [`SessionStore`] it reads from
//! - [`RoomAccessController`](room::RoomAccessController) and [`AccessDecision`](room::AccessDecision)
//! - [`Ctx`]: explicit per-request context, `Ctx<Unauthed>` or `Ctx<Authed>`
//! - [`Tainted<T>`] / [`Verified<T>`]: untrusted and validated values
//!
//! # Examples
//!
//! ```
//! use room_gate::{Tainted, room::RoomCodec};
//!
//! let codec = RoomCodec::default();
//!
//! // Either participant derives the same room.
//! let room = codec.encode("u2", "u1").unwrap();
//! assert_eq!(room, codec.encode("u1", "u2").unwrap());
//!
//! // And each resolves the other from it.
//! let segment = room.path_segment();
//! assert_eq!(codec.decode(Tainted::new(segment.clone()), "u1").unwrap().other_id, "u2");
//! assert_eq!(codec.decode(Tainted::new(segment), "u2").unwrap().other_id, "u1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod context;
mod error;
mod gate;
mod logging;
pub mod policy;
pub mod preferences;
mod request;
pub mod room;
mod sanitizer;
mod secret;
mod state;
mod tainted;
mod verified;
pub mod web;

pub use config::GateConfig;
pub use context::Ctx;
pub use error::{Violation, ViolationKind};
pub use gate::{SessionGate, SessionStore, SessionStoreError};
pub use logging::RequestLog;
pub use policy::{RouteFamily, SelfRoomPolicy, Surface};
pub use request::{Principal, RequestMeta, UserProfile};
pub use sanitizer::{SanitizationError, SanitizationErrorKind, Sanitizer, StringSanitizer};
pub use secret::Secret;
pub use state::{Authed, Unauthed};
pub use tainted::Tainted;
pub use verified::Verified;
