//! Response capabilities the route handlers need from a web framework.

use crate::policy::Surface;
use crate::preferences::PreferenceCookie;
use crate::room::Handoff;

/// The framework's response primitives, as seen by the route handlers.
///
/// Keeping these behind a trait lets the handlers run without a web server.
pub trait Responder {
    /// Sends the client elsewhere.
    fn redirect(&mut self, target: &str);

    /// Renders the "recipient unavailable" page.
    fn render_not_found(&mut self, message: &str);

    /// Renders a generic failure page.
    fn render_failure(&mut self, message: &str);

    /// Hands an admitted room to a presentation surface.
    fn present(&mut self, surface: Surface, handoff: Handoff);

    /// Writes a cookie on the response.
    fn set_cookie(&mut self, cookie: PreferenceCookie);
}

/// A response captured by [`RecordingResponder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedResponse {
    /// `redirect(target)`
    Redirect(String),
    /// `render_not_found(message)`
    NotFound(String),
    /// `render_failure(message)`
    Failure(String),
    /// `present(surface, handoff)`
    Present(Surface, Box<Handoff>),
    /// `set_cookie(cookie)`
    SetCookie(PreferenceCookie),
}

/// Responder that records every call instead of writing HTTP.
///
/// Useful for tests and for frameworks that want to translate the calls
/// after the handler returns.
///
/// # Examples
///
/// ```
/// use room_gate::web::{RecordingResponder, RecordedResponse, Responder};
///
/// let mut responder = RecordingResponder::new();
/// responder.redirect("/login");
/// assert_eq!(responder.last(), Some(RecordedResponse::Redirect("/login".to_string())));
/// ```
#[derive(Debug, Default)]
pub struct RecordingResponder {
    responses: Vec<RecordedResponse>,
}

impl RecordingResponder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded responses, oldest first.
    pub fn responses(&self) -> &[RecordedResponse] {
        &self.responses
    }

    /// Returns the most recent response.
    pub fn last(&self) -> Option<RecordedResponse> {
        self.responses.last().cloned()
    }

    /// Number of recorded responses.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    fn push(&mut self, response: RecordedResponse) {
        self.responses.push(response);
    }
}

impl Responder for RecordingResponder {
    fn redirect(&mut self, target: &str) {
        self.push(RecordedResponse::Redirect(target.to_string()));
    }

    fn render_not_found(&mut self, message: &str) {
        self.push(RecordedResponse::NotFound(message.to_string()));
    }

    fn render_failure(&mut self, message: &str) {
        self.push(RecordedResponse::Failure(message.to_string()));
    }

    fn present(&mut self, surface: Surface, handoff: Handoff) {
        self.push(RecordedResponse::Present(surface, Box::new(handoff)));
    }

    fn set_cookie(&mut self, cookie: PreferenceCookie) {
        self.push(RecordedResponse::SetCookie(cookie));
    }
}
