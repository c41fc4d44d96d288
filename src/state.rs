//! Type-state markers for context progression.
//!
//! These markers encode at compile time whether a request context has passed
//! the session gate.

use crate::request::Principal;

/// Marker type for an unauthenticated context.
///
/// `Ctx<Unauthed>` has no principal and cannot be used to resolve rooms.
#[derive(Debug, Clone, Copy)]
pub struct Unauthed {
    _private: (),
}

impl Unauthed {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// State of an authenticated context.
///
/// `Ctx<Authed>` carries the principal resolved by the session gate. Only this
/// state is accepted by the participant resolver.
#[derive(Debug, Clone)]
pub struct Authed {
    principal: Principal,
}

impl Authed {
    pub(crate) fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub(crate) fn principal(&self) -> &Principal {
        &self.principal
    }

    pub(crate) fn into_principal(self) -> Principal {
        self.principal
    }
}
