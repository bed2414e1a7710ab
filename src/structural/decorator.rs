//! # Decorator: request pipeline
//!
//! Middleware wraps a [`RequestHandler`] and is itself a `RequestHandler`,
//! so layers stack in any order around the [`BaseHandler`].

use std::cell::Cell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

pub const DEFAULT_MAX_REQUESTS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub path: String,
    pub method: String,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self {
            headers: BTreeMap::new(),
            body,
            path: path.into(),
            method: method.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

impl Response {
    fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "error": message }),
        }
    }
}

pub trait RequestHandler {
    fn handle(&self, request: &Request) -> Response;
}

#[derive(Debug, Default)]
pub struct BaseHandler;

impl RequestHandler for BaseHandler {
    fn handle(&self, _request: &Request) -> Response {
        Response {
            status_code: 200,
            body: json!({ "message": "Request processed successfully" }),
        }
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Rejects requests without an `Authorization` header.
pub struct AuthMiddleware {
    inner: Box<dyn RequestHandler>,
}

impl AuthMiddleware {
    pub fn new(inner: impl RequestHandler + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl RequestHandler for AuthMiddleware {
    fn handle(&self, request: &Request) -> Response {
        if !request.headers.contains_key("Authorization") {
            return Response::error(401, "Unauthorized");
        }
        self.inner.handle(request)
    }
}

pub struct LoggingMiddleware {
    inner: Box<dyn RequestHandler>,
}

impl LoggingMiddleware {
    pub fn new(inner: impl RequestHandler + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl RequestHandler for LoggingMiddleware {
    fn handle(&self, request: &Request) -> Response {
        info!(
            method = %request.method,
            path = %request.path,
            headers = ?request.headers,
            body = %request.body,
            "request received"
        );
        let response = self.inner.handle(request);
        info!(status = response.status_code, body = %response.body, "response sent");
        response
    }
}

/// Counts every request it sees, including rejected ones. The count never
/// resets.
pub struct RateLimitMiddleware {
    inner: Box<dyn RequestHandler>,
    max_requests: u32,
    request_count: Cell<u32>,
}

impl RateLimitMiddleware {
    pub fn new(inner: impl RequestHandler + 'static) -> Self {
        Self::with_limit(inner, DEFAULT_MAX_REQUESTS)
    }

    pub fn with_limit(inner: impl RequestHandler + 'static, max_requests: u32) -> Self {
        Self {
            inner: Box::new(inner),
            max_requests,
            request_count: Cell::new(0),
        }
    }

    pub fn request_count(&self) -> u32 {
        self.request_count.get()
    }
}

impl RequestHandler for RateLimitMiddleware {
    fn handle(&self, request: &Request) -> Response {
        let count = self.request_count.get().saturating_add(1);
        self.request_count.set(count);
        if count > self.max_requests {
            info!(count, max = self.max_requests, "rate limit exceeded");
            return Response::error(429, "Too many requests");
        }
        self.inner.handle(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Request {
        Request::new("POST", "/api/test", json!({"data": "test"}))
            .with_header("Content-Type", "application/json")
    }

    fn authorized() -> Request {
        request().with_header("Authorization", "Bearer valid-token")
    }

    #[test]
    fn test_base_handler() {
        let response = BaseHandler.handle(&request());
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, json!({"message": "Request processed successfully"}));
    }

    #[test]
    fn test_auth_middleware() {
        let handler = AuthMiddleware::new(BaseHandler);
        let rejected = handler.handle(&request());
        assert_eq!(rejected.status_code, 401);
        assert_eq!(rejected.body, json!({"error": "Unauthorized"}));

        assert_eq!(handler.handle(&authorized()).status_code, 200);
    }

    #[test]
    fn test_rate_limit() {
        let handler = RateLimitMiddleware::with_limit(BaseHandler, 2);
        assert_eq!(handler.handle(&request()).status_code, 200);
        assert_eq!(handler.handle(&request()).status_code, 200);

        let limited = handler.handle(&request());
        assert_eq!(limited.status_code, 429);
        assert_eq!(limited.body, json!({"error": "Too many requests"}));
        assert_eq!(handler.request_count(), 3);
    }

    #[test]
    fn test_rate_limit_default() {
        let handler = RateLimitMiddleware::new(BaseHandler);
        for _ in 0..DEFAULT_MAX_REQUESTS {
            assert_eq!(handler.handle(&request()).status_code, 200);
        }
        assert_eq!(handler.handle(&request()).status_code, 429);
    }

    #[test]
    fn test_middleware_chain() {
        let handler = AuthMiddleware::new(RateLimitMiddleware::with_limit(
            LoggingMiddleware::new(BaseHandler),
            2,
        ));
        assert_eq!(handler.handle(&authorized()).status_code, 200);
        assert_eq!(handler.handle(&request()).status_code, 401);
        assert_eq!(handler.handle(&authorized()).status_code, 200);
        assert_eq!(handler.handle(&authorized()).status_code, 429);
    }

    #[test]
    fn test_logging_passes_response_through() {
        let handler = LoggingMiddleware::new(AuthMiddleware::new(BaseHandler));
        assert_eq!(handler.handle(&request()).status_code, 401);
    }
}
