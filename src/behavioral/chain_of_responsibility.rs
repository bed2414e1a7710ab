//! # Chain of Responsibility: HTTP request middleware
//!
//! A request travels through logging, authentication, authorization and a final
//! handler. Any link may stop the chain by answering with a [`Response`];
//! otherwise it hands the (possibly enriched) request to its successor.

use std::collections::HashMap;

use tracing::{debug, info, warn};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const VALID_TOKEN: &str = "valid_token";

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    pub path: String,
    pub headers: HashMap<String, String>,
    pub required_role: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// What a handler produced: either an answer, or the request itself when the
/// chain ran out of handlers before anyone answered.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    Response(Response),
    Continue(Request),
}

impl HandlerOutcome {
    pub fn response(self) -> Option<Response> {
        match self {
            HandlerOutcome::Response(response) => Some(response),
            HandlerOutcome::Continue(_) => None,
        }
    }
}

/// Builds a request, attaching the token as an `Authorization` header.
pub fn make_request(path: &str, token: Option<&str>, required_role: Option<&str>) -> Request {
    let mut headers = HashMap::new();
    if let Some(token) = token {
        headers.insert(AUTHORIZATION_HEADER.to_string(), token.to_string());
    }

    Request {
        path: path.to_string(),
        headers,
        required_role: required_role.map(str::to_string),
        user: None,
    }
}

// =============================================================================
// Handler trait
// =============================================================================

pub trait Handler {
    fn handle(&self, request: Request) -> HandlerOutcome;
}

type Next = Option<Box<dyn Handler>>;

fn forward(next: &Next, request: Request) -> HandlerOutcome {
    match next {
        Some(handler) => handler.handle(request),
        None => HandlerOutcome::Continue(request),
    }
}

macro_rules! linkable {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                pub fn new() -> Self {
                    Self { next: None }
                }

                /// Sets the successor and returns the linked handler.
                pub fn with_next(mut self, next: impl Handler + 'static) -> Self {
                    self.next = Some(Box::new(next));
                    self
                }
            }

            impl Default for $ty {
                fn default() -> Self {
                    Self::new()
                }
            }
        )*
    };
}

// =============================================================================
// Concrete handlers
// =============================================================================

pub struct LoggingMiddleware {
    next: Next,
}

pub struct AuthenticationMiddleware {
    next: Next,
}

pub struct AuthorizationMiddleware {
    next: Next,
}

linkable!(LoggingMiddleware, AuthenticationMiddleware, AuthorizationMiddleware);

impl Handler for LoggingMiddleware {
    fn handle(&self, request: Request) -> HandlerOutcome {
        info!(path = %request.path, "received request");
        forward(&self.next, request)
    }
}

impl Handler for AuthenticationMiddleware {
    fn handle(&self, mut request: Request) -> HandlerOutcome {
        debug!("checking authentication");
        let authenticated = request
            .headers
            .get(AUTHORIZATION_HEADER)
            .is_some_and(|token| token == VALID_TOKEN);

        if !authenticated {
            warn!(path = %request.path, "authentication failed, aborting request");
            return HandlerOutcome::Response(Response::new(401, "Unauthorized"));
        }

        info!("authentication successful");
        request.user = Some(User {
            id: 123,
            role: "admin".to_string(),
        });
        forward(&self.next, request)
    }
}

impl Handler for AuthorizationMiddleware {
    fn handle(&self, request: Request) -> HandlerOutcome {
        debug!("checking authorization");
        let Some(user) = &request.user else {
            warn!("no user on request, aborting");
            return HandlerOutcome::Response(Response::new(401, "Authentication Required"));
        };

        match request.required_role.as_deref() {
            None => {
                info!("no specific role required");
                forward(&self.next, request)
            }
            Some(role) if role == user.role => {
                info!(role, "authorization successful");
                forward(&self.next, request)
            }
            Some(role) => {
                warn!(user_role = %user.role, required_role = role, "authorization failed");
                HandlerOutcome::Response(Response::new(403, "Forbidden"))
            }
        }
    }
}

/// Terminal handler: always answers.
#[derive(Debug, Default)]
pub struct FinalHandler;

impl Handler for FinalHandler {
    fn handle(&self, request: Request) -> HandlerOutcome {
        let user_id = request
            .user
            .as_ref()
            .map(|user| user.id.to_string())
            .unwrap_or_else(|| "anonymous".to_string());

        info!(path = %request.path, "processing request");
        HandlerOutcome::Response(Response::new(
            200,
            format!(
                "Successfully processed request for path: {} for user {}",
                request.path, user_id
            ),
        ))
    }
}

/// Logging -> Authentication -> Authorization -> Final.
pub fn default_chain() -> LoggingMiddleware {
    LoggingMiddleware::new().with_next(
        AuthenticationMiddleware::new()
            .with_next(AuthorizationMiddleware::new().with_next(FinalHandler)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(request: Request) -> Response {
        default_chain()
            .handle(request)
            .response()
            .expect("full chain always answers")
    }

    #[test]
    fn test_successful_request_with_matching_role() {
        let response = run(make_request("/admin", Some(VALID_TOKEN), Some("admin")));
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            "Successfully processed request for path: /admin for user 123"
        );
    }

    #[test]
    fn test_no_role_required_passes() {
        let response = run(make_request("/home", Some(VALID_TOKEN), None));
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        let response = run(make_request("/admin", Some("bad"), Some("admin")));
        assert_eq!(response, Response::new(401, "Unauthorized"));
    }

    #[test]
    fn test_missing_token_is_unauthorized() {
        let response = run(make_request("/admin", None, None));
        assert_eq!(response.status_code, 401);
    }

    #[test]
    fn test_role_mismatch_is_forbidden() {
        let response = run(make_request("/billing", Some(VALID_TOKEN), Some("accountant")));
        assert_eq!(response, Response::new(403, "Forbidden"));
    }

    #[test]
    fn test_authorization_without_user() {
        let chain = AuthorizationMiddleware::new().with_next(FinalHandler);
        let outcome = chain.handle(make_request("/x", None, None));
        assert_eq!(
            outcome.response(),
            Some(Response::new(401, "Authentication Required"))
        );
    }

    #[test]
    fn test_chain_end_returns_enriched_request() {
        let chain = AuthenticationMiddleware::new();
        match chain.handle(make_request("/x", Some(VALID_TOKEN), None)) {
            HandlerOutcome::Continue(request) => {
                assert_eq!(request.user.map(|u| u.id), Some(123));
            }
            other => panic!("expected Continue, got {other:?}"),
        }
    }

    #[test]
    fn test_final_handler_anonymous_user() {
        let outcome = FinalHandler.handle(make_request("/public", None, None));
        assert_eq!(
            outcome.response().map(|r| r.body),
            Some("Successfully processed request for path: /public for user anonymous".into())
        );
    }
}
