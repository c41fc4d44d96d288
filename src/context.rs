use crate::error::{Violation, ViolationKind};
use crate::logging::RequestLog;
use crate::request::Principal;
use crate::state::{Authed, Unauthed};

/// Per-request execution context.
///
/// `Ctx<S>` is generic over its authentication state:
/// - `Ctx<Unauthed>`: request id only
/// - `Ctx<Authed>`: request id and the principal resolved by the session gate
///
/// # Type-State Progression
///
/// ```text
/// Ctx<Unauthed> --authenticate--> Ctx<Authed>
/// ```
///
/// The context is passed explicitly to every downstream step. Nothing in this
/// crate reads an ambient "current session".
///
/// # Construction
///
/// `Ctx` cannot be constructed by user code. A `Ctx<Authed>` only comes out
/// of [`SessionGate`](crate::SessionGate); [`web`](crate::web) extractors
/// hand out `Ctx<Unauthed>`.
///
/// # Examples
///
/// ```
/// use room_gate::{Principal, RequestMeta, Secret, SessionGate, SessionStore, SessionStoreError};
///
/// struct OneUser;
///
/// impl SessionStore for OneUser {
///     fn load(&self, _token: &Secret<String>) -> Result<Option<Principal>, SessionStoreError> {
///         Ok(Some(Principal::new("u1", "Alice")))
///     }
/// }
///
/// let ctx = SessionGate::new(OneUser)
///     .resolve_principal(RequestMeta {
///         request_id: "req-1".to_string(),
///         session_token: Some(Secret::new("sess-1".to_string())),
///     })
///     .expect("session is valid");
/// assert_eq!(ctx.principal().id, "u1");
/// ```
///
/// An unauthenticated context cannot be promoted by hand:
///
/// ```compile_fail
/// use room_gate::{Principal, web::{RequestAdapter, extract_unauthed}};
///
/// let ctx = extract_unauthed(&RequestAdapter::new("req-1".to_string())).context;
/// let forged = ctx.authenticate(Some(Principal::new("victim", "Victim")));
/// ```
#[derive(Debug, Clone)]
pub struct Ctx<S = Authed> {
    request_id: String,
    state: S,
}

impl<S> Ctx<S> {
    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns a logger that tags every event with this request's id.
    pub fn log(&self) -> RequestLog<'_> {
        RequestLog::new(&self.request_id)
    }
}

impl Ctx<Unauthed> {
    /// Creates a new unauthenticated context with only a request ID.
    pub(crate) fn new_unauthed(request_id: String) -> Self {
        Self {
            request_id,
            state: Unauthed::new(),
        }
    }

    /// Authenticates the context with the principal loaded by the session gate.
    ///
    /// Crate-private: [`SessionGate`](crate::SessionGate) is the only caller.
    ///
    /// # Errors
    ///
    /// Returns a `Violation` of kind `Unauthenticated` if `principal` is `None`.
    pub(crate) fn authenticate(
        self,
        principal: Option<Principal>,
    ) -> Result<Ctx<Authed>, Violation> {
        match principal {
            Some(p) => Ok(Ctx {
                request_id: self.request_id,
                state: Authed::new(p),
            }),
            None => Err(Violation::new(
                ViolationKind::Unauthenticated,
                "Authentication required: principal not provided",
            )),
        }
    }
}

impl Ctx<Authed> {
    /// Returns the authenticated principal.
    pub fn principal(&self) -> &Principal {
        self.state.principal()
    }

    /// Consumes the context, returning the principal.
    pub fn into_principal(self) -> Principal {
        self.state.into_principal()
    }
}
