//! Request adapter for mapping HTTP requests to room-gate types.

use std::collections::HashMap;

use crate::request::RequestMeta;
use crate::{Secret, Tainted};

use super::{ExtractMetadata, ExtractTaintedInputs};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Framework-agnostic view of an inbound HTTP request.
///
/// Holds simple owned data so it does not couple to any framework's request
/// type. Framework glue fills it in and hands it to the route handlers.
///
/// # Examples
///
/// ```
/// use room_gate::web::{RequestAdapter, ExtractMetadata, ExtractTaintedInputs};
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.set_cookie_header("theme=dark; session=sess-abc");
/// adapter.add_path_param("room".to_string(), "u1%3Au2".to_string());
///
/// let meta = adapter.extract_metadata();
/// assert_eq!(meta.request_id, "req-12345");
/// assert!(meta.session_token.is_some());
///
/// let inputs = adapter.extract_tainted_inputs();
/// assert!(inputs.path_param("room").is_some());
/// ```
#[derive(Debug)]
pub struct RequestAdapter {
    request_id: String,
    session_token: Option<Secret<String>>,
    query_params: HashMap<String, String>,
    path_params: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates a new request adapter with the given request ID.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            session_token: None,
            query_params: HashMap::new(),
            path_params: HashMap::new(),
        }
    }

    /// Sets the session token presented by the client.
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token.map(Secret::new);
    }

    /// Parses a `Cookie` header for the session token.
    ///
    /// Only the `session` cookie is read; other pairs are ignored.
    pub fn set_cookie_header(&mut self, header: &str) {
        let token = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| name.trim() == SESSION_COOKIE)
            .map(|(_, value)| value.trim().to_string());

        if token.is_some() {
            self.set_session_token(token);
        }
    }

    /// Adds a query or form parameter.
    pub fn add_query_param(&mut self, key: String, value: String) {
        self.query_params.insert(key, value);
    }

    /// Adds a path parameter captured by the router.
    pub fn add_path_param(&mut self, key: String, value: String) {
        self.path_params.insert(key, value);
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns `true` if a session token was presented.
    pub fn has_session_token(&self) -> bool {
        self.session_token.is_some()
    }
}

impl ExtractMetadata for RequestAdapter {
    fn extract_metadata(&self) -> RequestMeta {
        RequestMeta {
            request_id: self.request_id.clone(),
            session_token: self
                .session_token
                .as_ref()
                .map(|t| Secret::new(t.expose_secret().clone())),
        }
    }
}

impl ExtractTaintedInputs for RequestAdapter {
    fn extract_tainted_inputs(&self) -> TaintedInputs {
        fn taint(map: &HashMap<String, String>) -> HashMap<String, Tainted<String>> {
            map.iter()
                .map(|(k, v)| (k.clone(), Tainted::new(v.clone())))
                .collect()
        }

        TaintedInputs {
            query_params: taint(&self.query_params),
            path_params: taint(&self.path_params),
        }
    }
}

/// Untrusted inputs extracted from a request.
///
/// Read-only; every value is wrapped in `Tainted` and must go through a
/// sanitizer before use.
#[derive(Debug, Clone, Default)]
pub struct TaintedInputs {
    query_params: HashMap<String, Tainted<String>>,
    path_params: HashMap<String, Tainted<String>>,
}

impl TaintedInputs {
    /// Returns a copy of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<Tainted<String>> {
        self.query_params.get(key).cloned()
    }

    /// Returns a copy of a path parameter.
    pub fn path_param(&self, key: &str) -> Option<Tainted<String>> {
        self.path_params.get(key).cloned()
    }

    /// Number of query parameters.
    pub fn query_params_count(&self) -> usize {
        self.query_params.len()
    }

    /// Number of path parameters.
    pub fn path_params_count(&self) -> usize {
        self.path_params.len()
    }
}
