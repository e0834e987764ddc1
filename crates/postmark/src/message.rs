//! Outgoing message composition and payload building

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::attachment::{Attachment, Header};
use crate::client::PostmarkClient;
use crate::constants::user_agent;
use crate::errors::{PostmarkError, ValidationError};
use crate::reply::Reply;

/// One outgoing email.
///
/// Address fields hold one string each; several recipients are written
/// comma-separated and are passed through untouched. Optional fields are
/// sent only when non-empty, so a blank field and an unset one are the same.
#[derive(Clone)]
pub struct Message {
    api_key: String,
    user_agent: String,
    custom_headers: Vec<Header>,
    attachments: Vec<Attachment>,

    pub sender: String,
    pub reply_to: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub tag: String,
    pub html_body: String,
    pub text_body: String,
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("api_key", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .field("custom_headers", &self.custom_headers)
            .field("attachments", &self.attachments.len())
            .field("sender", &self.sender)
            .field("reply_to", &self.reply_to)
            .field("to", &self.to)
            .field("cc", &self.cc)
            .field("bcc", &self.bcc)
            .field("subject", &self.subject)
            .field("tag", &self.tag)
            .field("html_body", &self.html_body)
            .field("text_body", &self.text_body)
            .finish()
    }
}

/// JSON body of `POST /email`
#[derive(Serialize)]
struct MessagePayload<'a> {
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "ReplyTo", skip_serializing_if = "str::is_empty")]
    reply_to: &'a str,
    #[serde(rename = "Cc", skip_serializing_if = "str::is_empty")]
    cc: &'a str,
    #[serde(rename = "Bcc", skip_serializing_if = "str::is_empty")]
    bcc: &'a str,
    #[serde(rename = "Tag", skip_serializing_if = "str::is_empty")]
    tag: &'a str,
    #[serde(rename = "HtmlBody", skip_serializing_if = "str::is_empty")]
    html_body: &'a str,
    #[serde(rename = "TextBody", skip_serializing_if = "str::is_empty")]
    text_body: &'a str,
    #[serde(rename = "Attachments", skip_serializing_if = "<[Attachment]>::is_empty")]
    attachments: &'a [Attachment],
    #[serde(rename = "Headers", skip_serializing_if = "<[Header]>::is_empty")]
    headers: &'a [Header],
}

impl Message {
    /// Creates an empty message bound to a Postmark server token
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_agent: user_agent(),
            custom_headers: Vec::new(),
            attachments: Vec::new(),
            sender: String::new(),
            reply_to: String::new(),
            to: String::new(),
            cc: String::new(),
            bcc: String::new(),
            subject: String::new(),
            tag: String::new(),
            html_body: String::new(),
            text_body: String::new(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn custom_headers(&self) -> &[Header] {
        &self.custom_headers
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Appends a header. Repeated names are kept as separate entries.
    pub fn add_custom_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.custom_headers.push(Header {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Reads, encodes and appends the file at `path`.
    ///
    /// Nothing is appended on failure.
    pub fn add_attachment(&mut self, path: impl AsRef<Path>) -> Result<(), PostmarkError> {
        let attachment = Attachment::from_path(path)?;
        self.attachments.push(attachment);
        Ok(())
    }

    /// Appends in-memory content as an attachment named `name`
    pub fn add_attachment_data(
        &mut self,
        name: impl Into<String>,
        content: &[u8],
    ) -> Result<(), PostmarkError> {
        let attachment = Attachment::from_bytes(name, content)?;
        self.attachments.push(attachment);
        Ok(())
    }

    /// Checks sender, recipient, subject and body, in that order, and
    /// reports the first one missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sender.is_empty() {
            return Err(ValidationError::MissingSender);
        }
        if self.to.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }
        if self.subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if self.html_body.is_empty() && self.text_body.is_empty() {
            return Err(ValidationError::MissingBody);
        }
        Ok(())
    }

    /// Validates the message and serializes the JSON body sent to Postmark
    pub fn build_payload(&self) -> Result<Vec<u8>, PostmarkError> {
        self.validate()?;

        let payload = MessagePayload {
            from: &self.sender,
            to: &self.to,
            subject: &self.subject,
            reply_to: &self.reply_to,
            cc: &self.cc,
            bcc: &self.bcc,
            tag: &self.tag,
            html_body: &self.html_body,
            text_body: &self.text_body,
            attachments: &self.attachments,
            headers: &self.custom_headers,
        };

        Ok(serde_json::to_vec(&payload)?)
    }

    /// Sends through a client for the default Postmark endpoint
    pub async fn send(&self) -> Result<Reply, PostmarkError> {
        PostmarkClient::new()?.send(self).await
    }
}
