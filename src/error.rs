use std::fmt;

use crate::sanitizer::SanitizationError;

/// A room access violation with details about what failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Diagnostic message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text safe to show the end user for this violation.
    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

impl From<SanitizationError> for Violation {
    fn from(e: SanitizationError) -> Self {
        Violation::new(ViolationKind::InvalidInput, e.to_string())
    }
}

/// The kind of room access violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// No valid session accompanies the request
    Unauthenticated,
    /// The room identifier does not name exactly two participants
    MalformedRoomIdentifier,
    /// The identifier is well formed but the other participant is gone
    RecipientNotFound,
    /// A participant id cannot be encoded into a room identifier
    InvalidParticipant,
    /// A request input failed validation
    InvalidInput,
}

impl ViolationKind {
    /// Returns the user-facing message for this kind.
    ///
    /// Malformed links and unreachable recipients are worded differently so
    /// users can tell "this link is broken" apart from "this person is gone".
    pub fn user_message(&self) -> &'static str {
        match self {
            ViolationKind::Unauthenticated => "Please sign in to continue.",
            ViolationKind::MalformedRoomIdentifier => "This link is broken.",
            ViolationKind::RecipientNotFound => "This person can't be reached.",
            ViolationKind::InvalidParticipant | ViolationKind::InvalidInput => {
                "Something went wrong."
            }
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::MalformedRoomIdentifier => write!(f, "Malformed room identifier"),
            ViolationKind::RecipientNotFound => write!(f, "Recipient not found"),
            ViolationKind::InvalidParticipant => write!(f, "Invalid participant"),
            ViolationKind::InvalidInput => write!(f, "Invalid input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizer::SanitizationErrorKind;

    #[test]
    fn violation_display_includes_kind_and_message() {
        let v = Violation::new(ViolationKind::MalformedRoomIdentifier, "3 tokens");
        assert_eq!(v.to_string(), "Malformed room identifier: 3 tokens");
    }

    #[test]
    fn broken_link_and_missing_recipient_read_differently() {
        assert_ne!(
            ViolationKind::MalformedRoomIdentifier.user_message(),
            ViolationKind::RecipientNotFound.user_message()
        );
    }

    #[test]
    fn sanitization_error_converts_to_invalid_input() {
        let e = SanitizationError::new(SanitizationErrorKind::Empty, "empty");
        let v: Violation = e.into();
        assert_eq!(v.kind, ViolationKind::InvalidInput);
    }
}
