pub mod admin;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::{Error, PlatformError};

pub const NEW_USERS_PATH: &str = "/ckan-admin/new-users";
pub const ASSIGN_USER_PATH: &str = "/ckan-admin/new-users/assign_user";

/// Generic mapping for failures the endpoints do not handle themselves.
pub fn error_response(err: Error) -> Response {
    warn!("{}", err);
    match err {
        Error::Platform(PlatformError::OrganizationNotFound(_) | PlatformError::UserNotFound(_)) => {
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
    }
}
