/// A wrapper for data that has passed validation.
///
/// `Verified<T>` has no public constructor. Values only come out of a
/// [`Sanitizer`](crate::Sanitizer), so holding one proves the input went
/// through a controlled validation path.
///
/// ```compile_fail
/// use room_gate::Verified;
///
/// let verified = Verified::new("data".to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Creates a `Verified<T>` without performing validation.
    ///
    /// Callers inside this crate must have validated `value` first.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_as_ref_borrows() {
        let v = Verified::new_unchecked("dark".to_string());
        assert_eq!(v.as_ref(), "dark");
    }

    #[test]
    fn verified_into_inner_moves() {
        let v = Verified::new_unchecked(vec![1, 2]);
        assert_eq!(v.into_inner(), vec![1, 2]);
    }
}
