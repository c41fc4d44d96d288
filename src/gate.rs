use std::fmt;

use crate::{
    context::Ctx,
    error::Violation,
    request::{Principal, RequestMeta},
    state::Authed,
    Secret,
};

/// Failure reported by a session store backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStoreError {
    message: String,
}

impl SessionStoreError {
    /// Creates a new store error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session store unavailable: {}", self.message)
    }
}

impl std::error::Error for SessionStoreError {}

/// Backing store of authenticated sessions, owned by the auth provider.
///
/// `load` is a pure read. `Ok(None)` means the token is unknown or expired.
pub trait SessionStore {
    /// Looks up the principal bound to a session token.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the store cannot be reached.
    fn load(&self, token: &Secret<String>) -> Result<Option<Principal>, SessionStoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn load(&self, token: &Secret<String>) -> Result<Option<Principal>, SessionStoreError> {
        (**self).load(token)
    }
}

/// The session gate.
///
/// `SessionGate` is the only way to obtain a `Ctx<Authed>` from request
/// metadata. A missing token, an unknown token and an unreachable store all
/// produce the same `Unauthenticated` violation: callers must treat each of
/// them as "sign in first".
///
/// # Examples
///
/// ```
/// use room_gate::{Principal, RequestMeta, Secret, SessionGate, SessionStore, SessionStoreError};
///
/// struct OneUser;
///
/// impl SessionStore for OneUser {
///     fn load(&self, token: &Secret<String>) -> Result<Option<Principal>, SessionStoreError> {
///         Ok((token.expose_secret() == "sess-1").then(|| Principal::new("u1", "Alice")))
///     }
/// }
///
/// let gate = SessionGate::new(OneUser);
/// let meta = RequestMeta {
///     request_id: "req-123".to_string(),
///     session_token: Some(Secret::new("sess-1".to_string())),
/// };
///
/// let ctx = gate.resolve_principal(meta).expect("session is valid");
/// assert_eq!(ctx.principal().id, "u1");
/// ```
#[derive(Debug, Clone)]
pub struct SessionGate<S> {
    store: S,
}

impl<S: SessionStore> SessionGate<S> {
    /// Creates a gate backed by the given session store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolves the principal for a request.
    ///
    /// # Errors
    ///
    /// Returns a `Violation` of kind `Unauthenticated` when no principal can
    /// be resolved, whatever the reason.
    pub fn resolve_principal(&self, meta: RequestMeta) -> Result<Ctx<Authed>, Violation> {
        let ctx = Ctx::new_unauthed(meta.request_id);

        let principal = match meta.session_token {
            None => {
                ctx.log()
                    .debug(format_args!("no session token presented"));
                None
            }
            Some(token) => match self.store.load(&token) {
                Ok(found) => {
                    if found.is_none() {
                        ctx.log()
                            .debug(format_args!("session token {} not recognised", token));
                    }
                    found
                }
                Err(e) => {
                    ctx.log().warn(format_args!(
                        "treating request as unauthenticated: {}",
                        e
                    ));
                    None
                }
            },
        };

        ctx.authenticate(principal)
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
