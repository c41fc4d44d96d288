//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and room resolution:
//! - Mapping HTTP requests to domain types (`RequestMeta`)
//! - Introducing taint at the boundary (path segments, query params)
//! - Abstracting the framework's response primitives (`Responder`)
//! - Route handlers for the chat, call, profile and preference endpoints
//!
//! It contains no framework-specific code. Glue for a concrete framework
//! builds a `RequestAdapter`, implements `Responder`, and calls a handler.
//!
//! # Example Flow
//!
//! ```ignore
//! let mut adapter = RequestAdapter::new(request_id);
//! adapter.set_cookie_header(cookie_header);
//! adapter.add_path_param("room".into(), segment.into());
//!
//! let mut responder = MyFrameworkResponder::default();
//! handle_chat_room(&controller, &adapter, &mut responder).await;
//! responder.into_response()
//! ```

mod adapter;
mod extract;
pub mod handlers;
mod middleware;
mod respond;

pub use adapter::{RequestAdapter, TaintedInputs, SESSION_COOKIE};
pub use extract::{ExtractMetadata, ExtractTaintedInputs};
pub use handlers::{
    handle_call_room, handle_chat_room, handle_profile, handle_room,
    handle_set_animated_background, handle_set_theme, RouteOutcome,
};
pub use middleware::{extract_unauthed, UnauthenticatedExtraction};
pub use respond::{RecordedResponse, RecordingResponder, Responder};
