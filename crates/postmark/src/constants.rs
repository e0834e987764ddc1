//! Fixed values of the Postmark API contract

/// Postmark single-message endpoint
pub const POSTMARK_URL: &str = "https://api.postmarkapp.com/email";

/// Library version reported in the user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the server API token
pub const SERVER_TOKEN_HEADER: &str = "x-postmark-server-token";

/// Largest attachment accepted, in bytes
pub const MAX_ATTACHMENT_SIZE: u64 = 10_000_000;

/// Content type used when the file extension maps to nothing
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("Rust (postmark library version {})", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_version() {
        assert!(user_agent().ends_with(&format!("version {})", VERSION)));
    }
}
