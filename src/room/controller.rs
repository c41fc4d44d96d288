use serde::Serialize;

use crate::config::GateConfig;
use crate::error::{Violation, ViolationKind};
use crate::gate::{SessionGate, SessionStore};
use crate::policy::SelfRoomPolicy;
use crate::request::{Principal, RequestMeta, UserProfile};
use crate::Tainted;

use super::{ParticipantResolver, RoomCodec, RoomIdentifier, UserDirectory};

/// What a presentation surface receives for an admitted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handoff {
    /// Canonical room of the principal and the recipient
    pub room: RoomIdentifier,
    /// The other participant
    pub recipient: UserProfile,
    /// The requesting principal
    pub principal: Principal,
}

/// Terminal outcome of a room access request.
///
/// Computed fresh for every request and never cached: the recipient may
/// disappear and the session may expire between two requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the room
    Admit(Handoff),
    /// No valid session; send the user to sign in
    RedirectLogin,
    /// The room resolves to the principal alone on a route that does not
    /// allow it; send them to their dashboard
    RedirectSelf,
    /// The other participant does not exist
    NotFound,
}

/// Decides, per request, who may enter which room and as whom.
///
/// ```text
/// session --> decode --> resolve --> Admit
///    |          |           |
///    |          |           +--> NotFound
///    |          +--> RedirectSelf / Err(MalformedRoomIdentifier)
///    +--> RedirectLogin
/// ```
///
/// The steps run strictly in order. A request without a session never
/// reaches decode, and neither a malformed identifier nor a principal id
/// that cannot form a room ever reaches the directory.
#[derive(Debug, Clone)]
pub struct RoomAccessController<S, D> {
    config: GateConfig,
    gate: SessionGate<S>,
    codec: RoomCodec,
    resolver: ParticipantResolver<D>,
}

impl<S: SessionStore, D: UserDirectory> RoomAccessController<S, D> {
    /// Creates a controller from its collaborators.
    pub fn new(sessions: S, directory: D, config: &GateConfig) -> Self {
        Self {
            config: config.clone(),
            gate: SessionGate::new(sessions),
            codec: RoomCodec::from_config(config),
            resolver: ParticipantResolver::new(directory),
        }
    }

    /// Returns the configuration the controller was built with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Returns the codec used to decode and encode identifiers.
    pub fn codec(&self) -> &RoomCodec {
        &self.codec
    }

    /// Returns the session gate.
    pub fn gate(&self) -> &SessionGate<S> {
        &self.gate
    }

    /// Returns the participant resolver.
    pub fn resolver(&self) -> &ParticipantResolver<D> {
        &self.resolver
    }

    /// Computes the access decision for one request.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRoomIdentifier` if `raw_room` is structurally
    /// invalid or does not include the principal, and `InvalidParticipant`
    /// if the principal's own id cannot be encoded into a room.
    pub async fn decide(
        &self,
        meta: RequestMeta,
        raw_room: Tainted<String>,
        policy: SelfRoomPolicy,
    ) -> Result<AccessDecision, Violation> {
        let ctx = match self.gate.resolve_principal(meta) {
            Ok(ctx) => ctx,
            Err(_) => return Ok(AccessDecision::RedirectLogin),
        };
        let log = ctx.log();

        let pair = match self.codec.decode(raw_room, &ctx.principal().id) {
            Ok(pair) => pair,
            Err(v) => {
                log.warn(format_args!("rejecting room identifier: {}", v.message));
                return Err(v);
            }
        };

        let room = match self.codec.encode(&pair.self_id, &pair.other_id) {
            Ok(room) => room,
            Err(v) => {
                log.warn(format_args!("cannot build room for principal: {}", v.message));
                return Err(v);
            }
        };

        if pair.is_self_room() && policy == SelfRoomPolicy::RedirectToDashboard {
            log.debug(format_args!("self room on redirecting route"));
            return Ok(AccessDecision::RedirectSelf);
        }

        let recipient = match self.resolver.resolve(&ctx, &pair).await {
            Ok(profile) => profile,
            Err(v) if v.kind == ViolationKind::RecipientNotFound => {
                return Ok(AccessDecision::NotFound);
            }
            Err(v) => return Err(v),
        };

        log.debug(format_args!("admitting to room {}", room));

        Ok(AccessDecision::Admit(Handoff {
            room,
            recipient,
            principal: ctx.into_principal(),
        }))
    }
}
