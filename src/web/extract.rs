//! Extraction boundary traits for web integration.

use crate::request::RequestMeta;

use super::TaintedInputs;

/// Extracts request metadata from a framework-specific request.
///
/// Implementations only map framework types to [`RequestMeta`]: a request id
/// and the raw session token. They do not authenticate; that is the
/// [`SessionGate`](crate::SessionGate)'s job.
///
/// # Examples
///
/// ```
/// use room_gate::web::ExtractMetadata;
/// use room_gate::{RequestMeta, Secret};
///
/// struct MyFrameworkRequest {
///     id: String,
///     session_cookie: Option<String>,
/// }
///
/// impl ExtractMetadata for MyFrameworkRequest {
///     fn extract_metadata(&self) -> RequestMeta {
///         RequestMeta {
///             request_id: self.id.clone(),
///             session_token: self.session_cookie.clone().map(Secret::new),
///         }
///     }
/// }
/// ```
pub trait ExtractMetadata {
    /// Extracts request metadata for the session gate.
    fn extract_metadata(&self) -> RequestMeta;
}

/// Extracts untrusted inputs from a framework-specific request.
///
/// Every extracted value must be wrapped in `Tainted`.
pub trait ExtractTaintedInputs {
    /// Extracts all untrusted inputs from the request.
    fn extract_tainted_inputs(&self) -> TaintedInputs;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Secret;

    struct TestRequest {
        id: String,
        token: Option<String>,
    }

    impl ExtractMetadata for TestRequest {
        fn extract_metadata(&self) -> RequestMeta {
            RequestMeta {
                request_id: self.id.clone(),
                session_token: self.token.clone().map(Secret::new),
            }
        }
    }

    impl ExtractTaintedInputs for TestRequest {
        fn extract_tainted_inputs(&self) -> TaintedInputs {
            TaintedInputs::default()
        }
    }

    #[test]
    fn extract_metadata_trait_works() {
        let req = TestRequest {
            id: "test-1".to_string(),
            token: Some("sess".to_string()),
        };

        let meta = req.extract_metadata();
        assert_eq!(meta.request_id, "test-1");
        assert!(meta.session_token.is_some());
    }

    #[test]
    fn extract_tainted_inputs_trait_works() {
        let req = TestRequest {
            id: "test-2".to_string(),
            token: None,
        };
        assert_eq!(req.extract_tainted_inputs().query_params_count(), 0);
    }
}
