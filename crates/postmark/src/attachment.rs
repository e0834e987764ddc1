//! Attachment and custom header records as they appear in the payload

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_CONTENT_TYPE, MAX_ATTACHMENT_SIZE};
use crate::errors::AttachmentError;

/// File content captured at attach time.
///
/// The content is base64 encoded once; the source file is never read again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    /// File display name
    pub name: String,
    /// Base64 (standard alphabet, padded) file content
    pub content: String,
    /// MIME type derived from the file extension
    pub content_type: String,
}

/// Custom header, sent both in the payload and on the HTTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Attachment {
    /// Reads and encodes the file at `path`.
    ///
    /// Files whose metadata reports more than the limit are not read. The
    /// read itself stops one byte past the limit, so files that grow or
    /// report no length are still rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| {
            if source.kind() == ErrorKind::NotFound {
                AttachmentError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                AttachmentError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        };

        let file = File::open(path).map_err(io_error)?;
        let metadata = file.metadata().map_err(io_error)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        check_size(&name, metadata.len())?;

        let content = read_limited(file, &name).map_err(io_error)??;
        debug!("Attached {} ({} bytes)", name, content.len());

        Ok(Self::encode(name, &content, path))
    }

    /// Encodes in-memory content under the given file name
    pub fn from_bytes(name: impl Into<String>, content: &[u8]) -> Result<Self, AttachmentError> {
        let name = name.into();
        check_size(&name, content.len() as u64)?;

        let content_type = content_type_for(Path::new(&name));
        Ok(Self {
            content: STANDARD.encode(content),
            content_type,
            name,
        })
    }

    fn encode(name: String, content: &[u8], path: &Path) -> Self {
        Self {
            name,
            content: STANDARD.encode(content),
            content_type: content_type_for(path),
        }
    }
}

/// Reads at most one byte past the limit. `Ok(Err(_))` means the content
/// was too large.
fn read_limited(
    reader: impl Read,
    name: &str,
) -> std::io::Result<Result<Vec<u8>, AttachmentError>> {
    let mut content = Vec::new();
    reader
        .take(MAX_ATTACHMENT_SIZE + 1)
        .read_to_end(&mut content)?;

    Ok(check_size(name, content.len() as u64).map(|_| content))
}

fn check_size(name: &str, size: u64) -> Result<(), AttachmentError> {
    if size > MAX_ATTACHMENT_SIZE {
        return Err(AttachmentError::SizeLimitExceeded {
            name: name.to_string(),
            size,
            limit: MAX_ATTACHMENT_SIZE,
        });
    }
    Ok(())
}

fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}
