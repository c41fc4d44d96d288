use std::fmt;

use crate::{Tainted, Verified};

/// Error returned when sanitization fails.
///
/// The error describes why a tainted value was rejected without echoing the
/// rejected input back.
///
/// # Examples
///
/// ```
/// use room_gate::{SanitizationError, SanitizationErrorKind};
///
/// let error = SanitizationError::new(SanitizationErrorKind::TooLong, "value too long");
/// assert_eq!(error.kind(), SanitizationErrorKind::TooLong);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SanitizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sanitization failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SanitizationError {}

/// Kind of sanitization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// Input format is malformed.
    MalformedInput,
    /// Input is empty or contains only whitespace.
    Empty,
    /// Input exceeds maximum allowed length.
    TooLong,
    /// Input contains control or non-printable characters.
    ContainsControlChars,
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput => write!(f, "malformed input"),
            Self::Empty => write!(f, "empty input"),
            Self::TooLong => write!(f, "input too long"),
            Self::ContainsControlChars => write!(f, "contains control characters"),
        }
    }
}

/// Converts tainted values into verified values.
///
/// Implementations validate the input, call `Verified::new_unchecked` only
/// after validation succeeds, and never leak the rejected value in errors.
/// [`StringSanitizer`] and the room codec are the implementations in this crate.
pub trait Sanitizer<T> {
    /// The verified type produced on success.
    type Output;

    /// Sanitizes a tainted value, returning a verified value on success.
    ///
    /// # Errors
    ///
    /// Returns `SanitizationError` if the input fails validation.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<Self::Output>, SanitizationError>;
}

/// Returns `true` for control and non-printable characters.
pub(crate) fn is_control_char(c: char) -> bool {
    c.is_control() || c == '\u{007F}'
}

/// A string sanitizer for short opaque values such as preference settings.
///
/// - Trims leading and trailing whitespace
/// - Rejects empty strings (after trimming)
/// - Rejects control or non-printable characters
/// - Enforces a maximum length in characters
///
/// # Examples
///
/// ```
/// use room_gate::{Tainted, Sanitizer, StringSanitizer};
///
/// let sanitizer = StringSanitizer::new(64);
/// let verified = sanitizer.sanitize(Tainted::new("  dark  ".to_string())).unwrap();
/// assert_eq!(verified.as_ref(), "dark");
///
/// assert!(sanitizer.sanitize(Tainted::new("   ".to_string())).is_err());
/// assert!(sanitizer.sanitize(Tainted::new("da\nrk".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StringSanitizer {
    max_len: usize,
}

impl StringSanitizer {
    /// Creates a new string sanitizer with the specified maximum length.
    ///
    /// A `max_len` of 0 is raised to 1.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
        }
    }

    /// Maximum accepted length in characters.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Sanitizer<String> for StringSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "input is empty or contains only whitespace",
            ));
        }

        if trimmed.chars().any(is_control_char) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "input contains control or non-printable characters",
            ));
        }

        if trimmed.chars().count() > self.max_len {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("input exceeds maximum length of {}", self.max_len),
            ));
        }

        Ok(Verified::new_unchecked(trimmed.to_string()))
    }
}
