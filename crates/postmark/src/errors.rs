//! Error types for the Postmark client

use std::path::PathBuf;

use thiserror::Error;

use crate::reply::Reply;

/// A required message field is missing.
///
/// Raised before any I/O; the first failing check wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Cannot send e-mail without a sender (sender field)")]
    MissingSender,

    #[error("Cannot send e-mail without a recipient (to field)")]
    MissingRecipient,

    #[error("Cannot send e-mail without a subject (subject field)")]
    MissingSubject,

    #[error("Cannot send e-mail without an HTML body, text body or both")]
    MissingBody,
}

/// A file could not be captured as an attachment
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Attachment not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read attachment {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Attachment {name} is {size} bytes, exceeding the {limit} byte limit")]
    SizeLimitExceeded { name: String, size: u64, limit: u64 },
}

#[derive(Error, Debug)]
pub enum PostmarkError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    #[error("Invalid custom header: {name}")]
    InvalidHeader { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("[Postmark] HTTP error {status} : Missing headers")]
    Auth { status: u16 },

    #[error("[Postmark] HTTP error {status} : Page not found")]
    NotFound { status: u16 },

    #[error("[Postmark] HTTP error {status} : Bad JSON")]
    MalformedRequest { status: u16 },

    #[error("[Postmark] HTTP error {status} : Server error")]
    Server { status: u16 },

    #[error("Error Code: {}: {}", .0.error_code, .0.message)]
    Remote(Box<Reply>),
}

impl PostmarkError {
    /// HTTP status behind a mapped status failure
    pub fn status(&self) -> Option<u16> {
        match self {
            PostmarkError::Auth { status }
            | PostmarkError::NotFound { status }
            | PostmarkError::MalformedRequest { status }
            | PostmarkError::Server { status } => Some(*status),
            PostmarkError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Reply decoded from the API when it reported a non-zero error code
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            PostmarkError::Remote(reply) => Some(reply.as_ref()),
            _ => None,
        }
    }

    /// Maps the statuses Postmark documents as failures; anything else is
    /// left to the reply body.
    pub(crate) fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(PostmarkError::Auth { status }),
            404 => Some(PostmarkError::NotFound { status }),
            422 => Some(PostmarkError::MalformedRequest { status }),
            500 => Some(PostmarkError::Server { status }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            PostmarkError::from_status(401),
            Some(PostmarkError::Auth { status: 401 })
        ));
        assert!(matches!(
            PostmarkError::from_status(404),
            Some(PostmarkError::NotFound { status: 404 })
        ));
        assert!(matches!(
            PostmarkError::from_status(422),
            Some(PostmarkError::MalformedRequest { status: 422 })
        ));
        assert!(matches!(
            PostmarkError::from_status(500),
            Some(PostmarkError::Server { status: 500 })
        ));
        assert!(PostmarkError::from_status(200).is_none());
        assert!(PostmarkError::from_status(400).is_none());
        assert!(PostmarkError::from_status(503).is_none());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(PostmarkError::Server { status: 500 }.status(), Some(500));
        assert_eq!(
            PostmarkError::Validation(ValidationError::MissingSender).status(),
            None
        );
    }

    #[test]
    fn test_remote_error_display() {
        let reply = Reply {
            error_code: 300,
            message: "Invalid email request".to_string(),
            ..Default::default()
        };
        let err = PostmarkError::Remote(Box::new(reply));

        assert_eq!(err.to_string(), "Error Code: 300: Invalid email request");
        assert_eq!(err.reply().map(|r| r.error_code), Some(300));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: PostmarkError = ValidationError::MissingBody.into();
        assert!(matches!(
            err,
            PostmarkError::Validation(ValidationError::MissingBody)
        ));
    }
}
