//! Route handlers for room and preference endpoints.
//!
//! Room handlers differ only in their [`RouteFamily`]; identity resolution
//! is shared. Each handler drives a [`Responder`] exactly once and returns
//! the [`RouteOutcome`] for the framework's own logging.

use crate::config::GateConfig;
use crate::error::{Violation, ViolationKind};
use crate::gate::SessionStore;
use crate::policy::RouteFamily;
use crate::preferences::{animated_background_cookie, theme_cookie, PreferenceCookie};
use crate::room::{AccessDecision, RoomAccessController, UserDirectory};
use crate::Tainted;

use super::{extract_unauthed, ExtractMetadata, RequestAdapter, Responder};

/// Path parameter holding the room identifier.
pub const ROOM_PARAM: &str = "room";

/// Query/form parameter holding the theme name.
pub const THEME_PARAM: &str = "theme";

/// Query/form parameter holding the animated background toggle.
pub const ANIMATED_BACKGROUND_PARAM: &str = "enabled";

/// What a handler did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Rendered a presentation surface
    Presented,
    /// Redirected to the login page
    RedirectedToLogin,
    /// Redirected to the dashboard
    RedirectedToDashboard,
    /// Rendered the "recipient unavailable" page
    RecipientUnavailable,
    /// Rendered a generic failure
    Failed(ViolationKind),
    /// Wrote a preference cookie
    CookieSet,
}

/// Handles `/chat/{room}`. A room with oneself is a valid notes room.
pub async fn handle_chat_room<S, D, R>(
    controller: &RoomAccessController<S, D>,
    adapter: &RequestAdapter,
    responder: &mut R,
) -> RouteOutcome
where
    S: SessionStore,
    D: UserDirectory,
    R: Responder,
{
    handle_room(controller, adapter, RouteFamily::Chat, responder).await
}

/// Handles `/call/{room}`. Same resolution as chat, rendered as a call.
pub async fn handle_call_room<S, D, R>(
    controller: &RoomAccessController<S, D>,
    adapter: &RequestAdapter,
    responder: &mut R,
) -> RouteOutcome
where
    S: SessionStore,
    D: UserDirectory,
    R: Responder,
{
    handle_room(controller, adapter, RouteFamily::Call, responder).await
}

/// Handles `/profile/{room}`. Viewing oneself redirects to the dashboard.
pub async fn handle_profile<S, D, R>(
    controller: &RoomAccessController<S, D>,
    adapter: &RequestAdapter,
    responder: &mut R,
) -> RouteOutcome
where
    S: SessionStore,
    D: UserDirectory,
    R: Responder,
{
    handle_room(controller, adapter, RouteFamily::Profile, responder).await
}

/// Resolves the room in the `room` path parameter and responds for `route`.
///
/// A missing parameter is handled as an empty, and therefore malformed,
/// identifier, after the session check.
pub async fn handle_room<S, D, R>(
    controller: &RoomAccessController<S, D>,
    adapter: &RequestAdapter,
    route: RouteFamily,
    responder: &mut R,
) -> RouteOutcome
where
    S: SessionStore,
    D: UserDirectory,
    R: Responder,
{
    let extraction = extract_unauthed(adapter);
    let log = extraction.context.log();
    let raw_room = extraction
        .inputs
        .path_param(ROOM_PARAM)
        .unwrap_or_else(|| Tainted::new(String::new()));

    let decision = controller
        .decide(adapter.extract_metadata(), raw_room, route.self_policy())
        .await;

    let config = controller.config();
    let outcome = match decision {
        Ok(AccessDecision::Admit(handoff)) => {
            responder.present(route.surface(), handoff);
            RouteOutcome::Presented
        }
        Ok(AccessDecision::RedirectLogin) => {
            responder.redirect(&config.login_path);
            RouteOutcome::RedirectedToLogin
        }
        Ok(AccessDecision::RedirectSelf) => {
            responder.redirect(&config.dashboard_path);
            RouteOutcome::RedirectedToDashboard
        }
        Ok(AccessDecision::NotFound) => {
            responder.render_not_found(ViolationKind::RecipientNotFound.user_message());
            RouteOutcome::RecipientUnavailable
        }
        Err(v) => {
            responder.render_failure(v.user_message());
            RouteOutcome::Failed(v.kind)
        }
    };

    log.info(format_args!("{:?} route finished: {:?}", route, outcome));
    outcome
}

/// Handles the theme preference endpoint.
pub fn handle_set_theme<R: Responder>(
    adapter: &RequestAdapter,
    config: &GateConfig,
    responder: &mut R,
) -> RouteOutcome {
    handle_preference(adapter, THEME_PARAM, responder, |value| {
        theme_cookie(value, config)
    })
}

/// Handles the animated background preference endpoint.
pub fn handle_set_animated_background<R: Responder>(
    adapter: &RequestAdapter,
    config: &GateConfig,
    responder: &mut R,
) -> RouteOutcome {
    handle_preference(adapter, ANIMATED_BACKGROUND_PARAM, responder, |value| {
        animated_background_cookie(value, config)
    })
}

fn handle_preference<R: Responder>(
    adapter: &RequestAdapter,
    param: &str,
    responder: &mut R,
    build: impl FnOnce(Tainted<String>) -> Result<PreferenceCookie, Violation>,
) -> RouteOutcome {
    let extraction = extract_unauthed(adapter);
    let log = extraction.context.log();

    let cookie = extraction
        .inputs
        .query_param(param)
        .ok_or_else(|| {
            Violation::new(
                ViolationKind::InvalidInput,
                format!("missing parameter '{}'", param),
            )
        })
        .and_then(build);

    match cookie {
        Ok(cookie) => {
            log.debug(format_args!("setting preference cookie {}", cookie.name));
            responder.set_cookie(cookie);
            RouteOutcome::CookieSet
        }
        Err(v) => {
            log.warn(format_args!("preference rejected: {}", v));
            responder.render_failure(v.user_message());
            RouteOutcome::Failed(v.kind)
        }
    }
}
