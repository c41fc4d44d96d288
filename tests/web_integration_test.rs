//! Integration tests for the route handlers.
//!
//! These drive the handlers through a `RecordingResponder`, the same way a
//! framework integration would, without a running server.

use std::collections::HashMap;
use std::sync::Once;

use room_gate::room::{RoomAccessController, UserDirectory};
use room_gate::web::{
    handle_call_room, handle_chat_room, handle_profile, handle_set_animated_background,
    handle_set_theme, RecordedResponse, RecordingResponder, RequestAdapter, RouteOutcome,
};
use room_gate::{
    GateConfig, Principal, Secret, SessionStore, SessionStoreError, Surface, UserProfile,
    ViolationKind,
};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("room_gate=debug")
            .with_test_writer()
            .try_init();
    });
}

struct Sessions;

impl SessionStore for Sessions {
    fn load(&self, token: &Secret<String>) -> Result<Option<Principal>, SessionStoreError> {
        match token.expose_secret().as_str() {
            "sess-alice" => Ok(Some(Principal::new("alice", "Alice"))),
            "sess-outage" => Err(SessionStoreError::new("redis down")),
            _ => Ok(None),
        }
    }
}

struct Directory(HashMap<String, UserProfile>);

impl UserDirectory for Directory {
    async fn find_user(&self, id: &str) -> Option<UserProfile> {
        self.0.get(id).cloned()
    }
}

fn controller(config: &GateConfig) -> RoomAccessController<Sessions, Directory> {
    let bob = Principal::new("bob", "Bob");
    let directory = Directory(HashMap::from([("bob".to_string(), UserProfile::from(&bob))]));
    RoomAccessController::new(Sessions, directory, config)
}

fn request(session: Option<&str>, room: Option<&str>) -> RequestAdapter {
    let mut adapter = RequestAdapter::new("req-web".to_string());
    if let Some(token) = session {
        adapter.set_cookie_header(&format!("theme=dark; session={}", token));
    }
    if let Some(room) = room {
        adapter.add_path_param("room".to_string(), room.to_string());
    }
    adapter
}

#[tokio::test]
async fn chat_route_presents_chat_surface() {
    init_tracing();
    let c = controller(&GateConfig::default());
    let mut responder = RecordingResponder::new();

    let outcome = handle_chat_room(
        &c,
        &request(Some("sess-alice"), Some("alice%3Abob")),
        &mut responder,
    )
    .await;

    assert_eq!(outcome, RouteOutcome::Presented);
    match responder.last() {
        Some(RecordedResponse::Present(Surface::Chat, handoff)) => {
            assert_eq!(handoff.recipient.id, "bob");
            assert_eq!(handoff.principal.id, "alice");
        }
        other => panic!("expected chat surface, got {:?}", other),
    }
}

#[tokio::test]
async fn call_route_resolves_like_chat() {
    init_tracing();
    let c = controller(&GateConfig::default());

    let mut chat = RecordingResponder::new();
    handle_chat_room(&c, &request(Some("sess-alice"), Some("bob:alice")), &mut chat).await;
    let mut call = RecordingResponder::new();
    handle_call_room(&c, &request(Some("sess-alice"), Some("bob:alice")), &mut call).await;

    match (chat.last(), call.last()) {
        (
            Some(RecordedResponse::Present(Surface::Chat, a)),
            Some(RecordedResponse::Present(Surface::Call, b)),
        ) => assert_eq!(a.room, b.room),
        other => panic!("unexpected responses {:?}", other),
    }
}

#[tokio::test]
async fn chat_route_allows_notes_to_self() {
    init_tracing();
    let c = controller(&GateConfig::default());
    let mut responder = RecordingResponder::new();

    handle_chat_room(
        &c,
        &request(Some("sess-alice"), Some("alice%3A%40me")),
        &mut responder,
    )
    .await;

    match responder.last() {
        Some(RecordedResponse::Present(_, handoff)) => {
            assert_eq!(handoff.recipient.id, "alice");
            assert_eq!(handoff.room.to_string(), "alice:@me");
        }
        other => panic!("expected self room, got {:?}", other),
    }
}

#[tokio::test]
async fn profile_route_redirects_self_to_configured_dashboard() {
    init_tracing();
    let config = GateConfig {
        dashboard_path: "/channels/@me".to_string(),
        ..GateConfig::default()
    };
    let c = controller(&config);
    let mut responder = RecordingResponder::new();

    let outcome = handle_profile(
        &c,
        &request(Some("sess-alice"), Some("alice:@me")),
        &mut responder,
    )
    .await;

    assert_eq!(outcome, RouteOutcome::RedirectedToDashboard);
    assert_eq!(
        responder.last(),
        Some(RecordedResponse::Redirect("/channels/@me".to_string()))
    );
}

#[tokio::test]
async fn store_outage_redirects_to_login() {
    init_tracing();
    let c = controller(&GateConfig::default());
    let mut responder = RecordingResponder::new();

    let outcome = handle_chat_room(
        &c,
        &request(Some("sess-outage"), Some("alice:bob")),
        &mut responder,
    )
    .await;

    assert_eq!(outcome, RouteOutcome::RedirectedToLogin);
    assert_eq!(
        responder.responses(),
        &[RecordedResponse::Redirect("/login".to_string())]
    );
}

#[tokio::test]
async fn broken_link_and_missing_user_render_differently() {
    init_tracing();
    let c = controller(&GateConfig::default());

    let mut broken = RecordingResponder::new();
    let a = handle_chat_room(
        &c,
        &request(Some("sess-alice"), Some("alice:bob:carol")),
        &mut broken,
    )
    .await;

    let mut missing = RecordingResponder::new();
    let b = handle_chat_room(
        &c,
        &request(Some("sess-alice"), Some("alice:ghost")),
        &mut missing,
    )
    .await;

    assert_eq!(a, RouteOutcome::Failed(ViolationKind::MalformedRoomIdentifier));
    assert_eq!(b, RouteOutcome::RecipientUnavailable);
    assert_eq!(
        broken.last(),
        Some(RecordedResponse::Failure("This link is broken.".to_string()))
    );
    assert_eq!(
        missing.last(),
        Some(RecordedResponse::NotFound(
            "This person can't be reached.".to_string()
        ))
    );
}

#[tokio::test]
async fn missing_room_param_is_malformed_once_signed_in() {
    init_tracing();
    let c = controller(&GateConfig::default());

    let mut signed_in = RecordingResponder::new();
    let outcome = handle_chat_room(&c, &request(Some("sess-alice"), None), &mut signed_in).await;
    assert_eq!(outcome, RouteOutcome::Failed(ViolationKind::MalformedRoomIdentifier));

    let mut anonymous = RecordingResponder::new();
    let outcome = handle_chat_room(&c, &request(None, None), &mut anonymous).await;
    assert_eq!(outcome, RouteOutcome::RedirectedToLogin);
}

#[test]
fn preference_endpoints_need_no_session() {
    init_tracing();
    let config = GateConfig::default();

    let mut adapter = RequestAdapter::new("req-pref".to_string());
    adapter.add_query_param("theme".to_string(), "light".to_string());
    adapter.add_query_param("enabled".to_string(), "off".to_string());

    let mut responder = RecordingResponder::new();
    assert_eq!(
        handle_set_theme(&adapter, &config, &mut responder),
        RouteOutcome::CookieSet
    );
    assert_eq!(
        handle_set_animated_background(&adapter, &config, &mut responder),
        RouteOutcome::CookieSet
    );

    let headers: Vec<String> = responder
        .responses()
        .iter()
        .filter_map(|r| match r {
            RecordedResponse::SetCookie(c) => Some(c.header_value()),
            _ => None,
        })
        .collect();
    assert_eq!(
        headers,
        vec![
            "theme=light; Path=/; Max-Age=2592000; SameSite=Lax".to_string(),
            "animatedBackground=false; Path=/; Max-Age=2592000; SameSite=Lax".to_string(),
        ]
    );
}
