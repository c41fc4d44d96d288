use std::future::Future;

use crate::context::Ctx;
use crate::error::{Violation, ViolationKind};
use crate::request::UserProfile;
use crate::state::Authed;

use super::ParticipantPair;

/// Read access to user profiles, owned by the persistence layer.
///
/// `find_user` is a single-shot read. `None` means the user does not exist
/// (deleted account, stale link); it is a final answer, not a transient
/// fault. Timeouts and retries, if any, belong to the implementation.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use room_gate::{UserProfile, room::UserDirectory};
///
/// struct InMemory(HashMap<String, UserProfile>);
///
/// impl UserDirectory for InMemory {
///     async fn find_user(&self, id: &str) -> Option<UserProfile> {
///         self.0.get(id).cloned()
///     }
/// }
/// ```
pub trait UserDirectory {
    /// Fetches the public profile of a user by id.
    fn find_user(&self, id: &str) -> impl Future<Output = Option<UserProfile>> + Send;
}

/// Resolves the other participant of a room to a public profile.
#[derive(Debug, Clone)]
pub struct ParticipantResolver<D> {
    directory: D,
}

impl<D: UserDirectory> ParticipantResolver<D> {
    /// Creates a resolver backed by the given directory.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Returns the backing directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Resolves the recipient for `pair`.
    ///
    /// A room with oneself resolves to the principal's own public profile
    /// without a directory call. Otherwise the directory is asked exactly
    /// once.
    ///
    /// # Errors
    ///
    /// Returns `RecipientNotFound` if the directory has no such user.
    pub async fn resolve(
        &self,
        ctx: &Ctx<Authed>,
        pair: &ParticipantPair,
    ) -> Result<UserProfile, Violation> {
        if pair.is_self_room() {
            return Ok(UserProfile::from(ctx.principal()));
        }

        match self.directory.find_user(&pair.other_id).await {
            Some(profile) => Ok(profile),
            None => {
                ctx.log()
                    .debug(format_args!("recipient {} has no profile", pair.other_id));
                Err(Violation::new(
                    ViolationKind::RecipientNotFound,
                    format!("no participant with id {}", pair.other_id),
                ))
            }
        }
    }
}
