use std::fmt;

/// A wrapper that prevents accidental exposure of sensitive values.
///
/// Session tokens travel through the request adapter and the session gate in
/// a `Secret`, so they cannot end up in logs or error messages by accident.
///
/// # Examples
///
/// ```
/// use room_gate::Secret;
///
/// let token = Secret::new("sess-1234567890".to_string());
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "sess-1234567890");
/// ```
// Do NOT add Clone, Copy or Default derives: they let tokens be duplicated carelessly.
pub struct Secret<T> {
    // Must stay private, otherwise redaction is bypassed.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value in a `Secret`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Only the session store should need this. Do not log the result.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_redacts_debug() {
        let token = Secret::new("hunter2".to_string());
        let debug_output = format!("{:?}", token);

        assert_eq!(debug_output, "[REDACTED]");
        assert!(!debug_output.contains("String"));
    }

    #[test]
    fn secret_redacts_display() {
        let token = Secret::new("sess-1234567890");
        assert_eq!(format!("{}", token), "[REDACTED]");
    }

    #[test]
    fn secret_exposes_when_explicit() {
        let secret = Secret::new(42);
        assert_eq!(*secret.expose_secret(), 42);
    }
}
