//! Error taxonomy for backend calls.
//!
//! Every failure a view can see falls into one of these buckets; all of them
//! are non-fatal and surface through the status banner.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Network unreachable, request timed out, or the backend fell over.
    #[error("connection error: {0}")]
    Transport(String),

    /// The backend rejected the request payload.
    #[error("{0}")]
    Validation(String),

    /// Missing/expired token or a bad admin password.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Unknown student or similar missing resource.
    #[error("{0}")]
    NotFound(String),

    /// The response body didn't parse as the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps an HTTP status onto the taxonomy, carrying the backend's own
    /// message where one was decodable.
    pub(crate) fn from_status(code: u16, message: String) -> Self {
        match code {
            400 | 409 | 422 => Self::Validation(message),
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            _ => Self::Transport(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        assert_eq!(
            ApiError::from_status(400, "missing name".into()),
            ApiError::Validation("missing name".into())
        );
        assert_eq!(
            ApiError::from_status(403, "bad password".into()),
            ApiError::Unauthorized("bad password".into())
        );
        assert_eq!(
            ApiError::from_status(404, "student not found".into()),
            ApiError::NotFound("student not found".into())
        );
        assert_eq!(
            ApiError::from_status(502, "bad gateway".into()),
            ApiError::Transport("bad gateway".into())
        );
    }
}
