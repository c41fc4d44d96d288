//! Extractor functions for building request contexts from HTTP requests.
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code builds RequestAdapter
//!   ↓
//! extract_unauthed()
//!   ↓
//! (Ctx<Unauthed>, TaintedInputs)
//! ```
//!
//! Authentication is not an extraction step: room routes hand the request
//! metadata to [`RoomAccessController`](crate::room::RoomAccessController),
//! whose session gate is the only source of `Ctx<Authed>`.

use crate::context::Ctx;
use crate::state::Unauthed;

use super::{ExtractTaintedInputs, RequestAdapter, TaintedInputs};

/// An unauthenticated context paired with the request's tainted inputs.
#[derive(Debug)]
pub struct UnauthenticatedExtraction {
    /// The unauthenticated context
    pub context: Ctx<Unauthed>,
    /// All untrusted inputs from the request
    pub inputs: TaintedInputs,
}

/// Extracts an unauthenticated context from a request adapter.
///
/// Used by public endpoints such as the preference cookies. The session
/// token, if any, is not consulted.
///
/// # Examples
///
/// ```
/// use room_gate::web::{RequestAdapter, extract_unauthed};
///
/// let mut adapter = RequestAdapter::new("req-public".to_string());
/// adapter.add_query_param("theme".to_string(), "dark".to_string());
///
/// let extraction = extract_unauthed(&adapter);
/// assert_eq!(extraction.context.request_id(), "req-public");
/// assert!(extraction.inputs.query_param("theme").is_some());
/// ```
pub fn extract_unauthed(adapter: &RequestAdapter) -> UnauthenticatedExtraction {
    UnauthenticatedExtraction {
        context: Ctx::new_unauthed(adapter.request_id().to_string()),
        inputs: adapter.extract_tainted_inputs(),
    }
}
