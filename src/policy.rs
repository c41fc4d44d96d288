//! Route families and their self-room handling.
//!
//! Chat, call and profile routes share one identity resolution and differ
//! only in the [`SelfRoomPolicy`] they pass to the controller.

use std::fmt;

/// What to do when a room identifier resolves to the requesting principal alone.
///
/// Chat and call rooms treat this as a valid "notes to self" room. Profile
/// routes treat it as a redundant view of the principal's own page and send
/// them to the dashboard instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfRoomPolicy {
    /// Admit the principal into a room with themselves
    AllowSelfRoom,
    /// Redirect the principal to their dashboard
    RedirectToDashboard,
}

/// Presentation surface that receives an admitted room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Text chat
    Chat,
    /// Voice/video call
    Call,
    /// Profile page of the other participant
    Profile,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Chat => write!(f, "chat"),
            Surface::Call => write!(f, "call"),
            Surface::Profile => write!(f, "profile"),
        }
    }
}

/// Family of routes that resolve a two-party room identifier.
///
/// All families share the same identity resolution; they differ only in
/// self-room handling and in where an admitted request is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFamily {
    /// `/chat/{room}`
    Chat,
    /// `/call/{room}`
    Call,
    /// `/profile/{room}`
    Profile,
}

impl RouteFamily {
    /// Self-room handling for this family.
    pub fn self_policy(&self) -> SelfRoomPolicy {
        match self {
            RouteFamily::Chat | RouteFamily::Call => SelfRoomPolicy::AllowSelfRoom,
            RouteFamily::Profile => SelfRoomPolicy::RedirectToDashboard,
        }
    }

    /// Presentation surface for admitted requests.
    pub fn surface(&self) -> Surface {
        match self {
            RouteFamily::Chat => Surface::Chat,
            RouteFamily::Call => Surface::Call,
            RouteFamily::Profile => Surface::Profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_routes_allow_self_rooms() {
        assert_eq!(RouteFamily::Chat.self_policy(), SelfRoomPolicy::AllowSelfRoom);
        assert_eq!(RouteFamily::Call.self_policy(), SelfRoomPolicy::AllowSelfRoom);
    }

    #[test]
    fn profile_route_redirects_self() {
        assert_eq!(
            RouteFamily::Profile.self_policy(),
            SelfRoomPolicy::RedirectToDashboard
        );
    }

    #[test]
    fn surfaces_display_lowercase() {
        assert_eq!(RouteFamily::Call.surface().to_string(), "call");
    }
}
