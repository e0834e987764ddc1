//! Postmark client
//!
//! This crate composes transactional emails and sends them to the
//! Postmark API (`https://api.postmarkapp.com/email`):
//! - Message composition with custom headers and file attachments
//! - Payload validation and JSON building
//! - HTTP status and reply code mapping to typed errors
//!
//! ```no_run
//! # async fn run() -> Result<(), postmark::PostmarkError> {
//! let mut message = postmark::Message::new("server-token");
//! message.sender = "sender@example.com".to_string();
//! message.to = "receiver@example.com".to_string();
//! message.subject = "Hello".to_string();
//! message.text_body = "Hello from Postmark".to_string();
//!
//! let reply = message.send().await?;
//! println!("{}", reply.message_id);
//! # Ok(())
//! # }
//! ```

pub mod attachment;
pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod message;
pub mod reply;

// Re-export main types
pub use attachment::{Attachment, Header};
pub use client::PostmarkClient;
pub use config::ClientConfig;
pub use errors::{AttachmentError, PostmarkError, ValidationError};
pub use message::Message;
pub use reply::Reply;
