use std::fmt;

/// A wrapper for untrusted data that must be validated before use.
///
/// Every value that crosses the HTTP boundary (path segments and query
/// parameters) is wrapped in `Tainted` by the request adapter. The
/// only way out is a [`Sanitizer`](crate::Sanitizer) such as the room codec.
///
/// # Examples
///
/// ```
/// use room_gate::Tainted;
///
/// let segment = Tainted::new("u1%3Au2".to_string());
/// println!("{:?}", segment); // Tainted { inner: "u1%3Au2" }
/// ```
#[derive(Clone)]
pub struct Tainted<T> {
    // Must stay private: public access would skip validation entirely.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Extracts the inner value for validation.
    ///
    /// Only sanitizer implementations inside this crate call this, and only
    /// on the way to producing a `Verified<T>`.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// No Deref, AsRef, Borrow, From<T> or Into<T>: they would let raw input skip validation.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tainted_wraps_value() {
        let tainted = Tainted::new("u1:u2".to_string());
        assert_eq!(tainted.into_inner(), "u1:u2");
    }

    #[test]
    fn tainted_debug_marks_origin() {
        let tainted = Tainted::new("x");
        assert!(format!("{:?}", tainted).starts_with("Tainted"));
    }
}
