//! Error classification and response dispatch.
//!
//! Every domain error that escapes a service is mapped to an HTTP response by
//! an [`ErrorDispatcher`]: a registry from error kind to a response-building
//! strategy, with a fixed default for anything unregistered. The registry is
//! an explicit object built once at startup and carried in app state; there
//! is no global registration side channel.

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use atrium_core::{DomainError, ErrorKind};

/// User-facing text for validation failures.
pub const VALIDATION_MESSAGE: &str =
    "Your request contains invalid data. Please check the provided details.";

/// User-facing text for failed deletions.
pub const DELETE_FAILED_MESSAGE: &str =
    "Couldn't delete the resource. Please try again or contact support if the issue persists.";

/// User-facing text for authentication failures.
pub const AUTH_MESSAGE: &str = "Authentication failed. Please sign in again.";

/// User-facing text for authorization failures.
pub const PERMISSION_MESSAGE: &str = "You don't have permission to perform this action.";

/// User-facing text for missing resources.
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";

/// User-facing text for everything else.
pub const DEFAULT_MESSAGE: &str = "Something went wrong. Please contact Atrium Support.";

/// Structured result of dispatching an error: an HTTP status plus a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Response-building strategy for one error kind.
pub type ErrorHandler = Box<dyn Fn(&DomainError) -> ErrorResponse + Send + Sync>;

/// Attempt to register a second handler for a kind that already has one.
///
/// This is a programming error: registration happens once at startup and the
/// first registration always wins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("error handler for kind '{0}' is already registered")]
pub struct DuplicateHandler(pub ErrorKind);

/// Registry mapping error kinds to response strategies.
///
/// Lookup is by exact kind: an unregistered kind falls through to the default
/// strategy rather than inheriting from some "nearby" kind, so new kinds must
/// be mapped deliberately.
pub struct ErrorDispatcher {
    handlers: HashMap<ErrorKind, ErrorHandler>,
}

impl ErrorDispatcher {
    /// An empty registry: everything dispatches to the default strategy.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The registry used by the application, with the built-in policies below.
    ///
    /// | Kind        | Status | Body                                  |
    /// |-------------|--------|---------------------------------------|
    /// | Validation  | 400    | `{message, detail}`                   |
    /// | DeleteFailed| 500    | `{success: false, message, detail}`   |
    /// | Auth        | 401    | `{message, detail}`                   |
    /// | Permission  | 403    | `{message, detail}`                   |
    /// | NotFound    | 404    | `{message, detail}`                   |
    /// | (default)   | 500    | `{message, detail}`                   |
    ///
    /// `detail` always carries the raw error text.
    pub fn with_builtin_handlers() -> Self {
        let mut dispatcher = Self::new();

        // The kinds below are distinct, so these registrations cannot collide;
        // expect() documents that a conflict here is a startup-fatal bug.
        dispatcher
            .register(ErrorKind::Validation, |error| ErrorResponse {
                status: StatusCode::BAD_REQUEST,
                body: json!({
                    "message": VALIDATION_MESSAGE,
                    "detail": error.detail(),
                }),
            })
            .expect("builtin handler registered twice");

        dispatcher
            .register(ErrorKind::DeleteFailed, |error| ErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: json!({
                    "success": false,
                    "message": DELETE_FAILED_MESSAGE,
                    "detail": error.detail(),
                }),
            })
            .expect("builtin handler registered twice");

        dispatcher
            .register(ErrorKind::Auth, |error| ErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                body: json!({
                    "message": AUTH_MESSAGE,
                    "detail": error.detail(),
                }),
            })
            .expect("builtin handler registered twice");

        dispatcher
            .register(ErrorKind::Permission, |error| ErrorResponse {
                status: StatusCode::FORBIDDEN,
                body: json!({
                    "message": PERMISSION_MESSAGE,
                    "detail": error.detail(),
                }),
            })
            .expect("builtin handler registered twice");

        dispatcher
            .register(ErrorKind::NotFound, |error| ErrorResponse {
                status: StatusCode::NOT_FOUND,
                body: json!({
                    "message": NOT_FOUND_MESSAGE,
                    "detail": error.detail(),
                }),
            })
            .expect("builtin handler registered twice");

        dispatcher
    }

    /// Associate `kind` with a response strategy.
    ///
    /// Fails if `kind` already has a handler; the existing handler is kept.
    pub fn register<H>(&mut self, kind: ErrorKind, handler: H) -> Result<(), DuplicateHandler>
    where
        H: Fn(&DomainError) -> ErrorResponse + Send + Sync + 'static,
    {
        if self.handlers.contains_key(&kind) {
            return Err(DuplicateHandler(kind));
        }
        self.handlers.insert(kind, Box::new(handler));
        Ok(())
    }

    /// Map an error to its response. Total: unregistered kinds get the default.
    pub fn dispatch(&self, error: &DomainError) -> ErrorResponse {
        match self.handlers.get(&error.kind()) {
            Some(handler) => handler(error),
            None => default_response(error),
        }
    }
}

impl Default for ErrorDispatcher {
    fn default() -> Self {
        Self::with_builtin_handlers()
    }
}

fn default_response(error: &DomainError) -> ErrorResponse {
    ErrorResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({
            "message": DEFAULT_MESSAGE,
            "detail": error.detail(),
        }),
    }
}

/// Log a failed request and map it through the dispatcher.
pub fn error_response(
    dispatcher: &ErrorDispatcher,
    error: &DomainError,
) -> axum::response::Response {
    tracing::error!(error = %error, "request failed");
    dispatcher.dispatch(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_kind_uses_its_handler() {
        let dispatcher = ErrorDispatcher::with_builtin_handlers();
        let response =
            dispatcher.dispatch(&DomainError::validation("phone_number must be 12 digits"));

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            json!({
                "message": VALIDATION_MESSAGE,
                "detail": "phone_number must be 12 digits",
            })
        );
    }

    #[test]
    fn delete_failed_body_carries_success_flag() {
        let dispatcher = ErrorDispatcher::with_builtin_handlers();
        let response = dispatcher.dispatch(&DomainError::delete_failed("row locked"));

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["success"], json!(false));
        assert_eq!(response.body["message"], json!(DELETE_FAILED_MESSAGE));
        assert_eq!(response.body["detail"], json!("row locked"));
    }

    #[test]
    fn unregistered_kind_falls_through_to_default() {
        let dispatcher = ErrorDispatcher::with_builtin_handlers();
        let response = dispatcher.dispatch(&DomainError::storage("connection reset"));

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["message"], json!(DEFAULT_MESSAGE));
        assert_eq!(response.body["detail"], json!("connection reset"));
    }

    #[test]
    fn empty_registry_dispatches_everything_to_default() {
        let dispatcher = ErrorDispatcher::new();
        let response = dispatcher.dispatch(&DomainError::validation("nope"));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["message"], json!(DEFAULT_MESSAGE));
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_the_first() {
        let mut dispatcher = ErrorDispatcher::new();
        dispatcher
            .register(ErrorKind::Validation, |_| ErrorResponse {
                status: StatusCode::BAD_REQUEST,
                body: json!({"first": true}),
            })
            .unwrap();

        let result = dispatcher.register(ErrorKind::Validation, |_| ErrorResponse {
            status: StatusCode::IM_A_TEAPOT,
            body: json!({"second": true}),
        });
        assert_eq!(result, Err(DuplicateHandler(ErrorKind::Validation)));

        let response = dispatcher.dispatch(&DomainError::validation("x"));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, json!({"first": true}));
    }

    #[test]
    fn auth_and_permission_map_to_401_and_403() {
        let dispatcher = ErrorDispatcher::with_builtin_handlers();
        assert_eq!(
            dispatcher.dispatch(&DomainError::auth("bad token")).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            dispatcher
                .dispatch(&DomainError::permission("account blocked"))
                .status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            dispatcher.dispatch(&DomainError::not_found()).status,
            StatusCode::NOT_FOUND
        );
    }
}
