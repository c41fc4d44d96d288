//! Two-party room identity and access resolution.
//!
//! This module provides:
//! - `RoomCodec`: canonical encoding of a participant pair into a room identifier, and
//!   decoding of an inbound path segment back into participants
//! - `ParticipantResolver`: lookup of the other participant's public profile
//! - `RoomAccessController`: the per-request admit / redirect / not-found decision
//!
//! A room is the pair of participants itself, not a stored entity. Both
//! participants derive the same identifier independently, so nothing has to
//! "create" a room before either side can join it.

mod codec;
mod controller;
mod resolver;

pub use codec::{ParticipantPair, RoomCodec, RoomIdentifier, DELIMITER, SELF_SENTINEL};
pub use controller::{AccessDecision, Handoff, RoomAccessController};
pub use resolver::{ParticipantResolver, UserDirectory};
