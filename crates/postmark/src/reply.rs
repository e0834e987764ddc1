//! Postmark API response

use serde::{Deserialize, Serialize};

/// Acknowledgment returned by Postmark after a send attempt.
///
/// Every field defaults to its zero value when absent from the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Reply {
    /// 0 on success, a Postmark API error code otherwise
    pub error_code: i64,
    /// Human-readable status
    pub message: String,
    /// Identifier assigned to the message by Postmark
    #[serde(rename = "MessageID")]
    pub message_id: String,
    /// Submission timestamp, as sent by the API
    pub submitted_at: String,
    /// Recipient echoed back
    pub to: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_deserialization() {
        let json = r#"{
            "ErrorCode": 0,
            "Message": "OK",
            "MessageID": "b7bc2f4a-e38e-4336-af7d-e6c392c2f817",
            "SubmittedAt": "2010-11-26T12:01:05.1794748-05:00",
            "To": "receiver@example.com"
        }"#;

        let reply: Reply = serde_json::from_str(json).unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.message, "OK");
        assert_eq!(reply.message_id, "b7bc2f4a-e38e-4336-af7d-e6c392c2f817");
        assert_eq!(reply.submitted_at, "2010-11-26T12:01:05.1794748-05:00");
        assert_eq!(reply.to, "receiver@example.com");
    }

    #[test]
    fn test_reply_missing_fields_default() {
        let reply: Reply =
            serde_json::from_str(r#"{"ErrorCode": 300, "Message": "Invalid email", "Extra": 1}"#)
                .unwrap();

        assert!(!reply.is_success());
        assert_eq!(reply.error_code, 300);
        assert_eq!(reply.message, "Invalid email");
        assert!(reply.message_id.is_empty());
        assert!(reply.to.is_empty());
    }
}
