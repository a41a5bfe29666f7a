use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_file_extension;
use actix_multipart::Multipart;
use futures::StreamExt;

/// Multipart field that carries the uploaded file.
pub const FILE_FIELD: &str = "file";

/// An uploaded file, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Rejects empty filenames and filenames without the expected extension.
    pub fn ensure_extension(&self, extension: &str) -> Result<()> {
        if self.filename.is_empty() {
            return Err(ConvertError::upload("Empty filename"));
        }
        validate_file_extension(&self.filename, &[extension])
    }
}

/// Reads the `file` part of a multipart body, skipping any other parts.
///
/// Fails once more than `limit` bytes have been received for the file.
pub async fn read_upload(mut payload: Multipart, limit: usize) -> Result<Upload> {
    while let Some(field) = payload.next().await {
        let mut field = field?;

        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        let filename = match (name.as_deref(), filename) {
            (Some(FILE_FIELD), Some(filename)) => filename,
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
                continue;
            }
        };

        let mut content = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if content.len() + chunk.len() > limit {
                tracing::warn!("Upload '{}' exceeds {} bytes", filename, limit);
                return Err(ConvertError::PayloadTooLarge { limit });
            }
            content.extend_from_slice(&chunk);
        }

        return Ok(Upload { filename, content });
    }

    Err(ConvertError::upload("No file provided"))
}
