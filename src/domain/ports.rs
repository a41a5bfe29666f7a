use crate::domain::model::FileInfo;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Handle to an upload persisted by a [`FileGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub original_name: String,
}

impl StoredFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Transient storage for uploaded bytes. Every saved handle must be deleted
/// by the caller once the conversion returns, whatever the outcome.
#[async_trait]
pub trait FileGateway: Send + Sync {
    async fn save(&self, content: &[u8], filename: &str) -> Result<StoredFile>;
    async fn read_to_string(&self, file: &StoredFile) -> Result<String>;
    async fn file_info(&self, file: &StoredFile) -> Result<FileInfo>;
    /// Removing an already missing file is not an error.
    async fn delete(&self, file: &StoredFile) -> Result<()>;
}

/// Source of enrichment timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub trait ServiceSettings: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn api_prefix(&self) -> &str;
    fn upload_folder(&self) -> &str;
    fn max_content_length(&self) -> usize;
    fn title_case_fields(&self) -> &[String];
}
