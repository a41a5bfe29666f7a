use crate::domain::model::FileInfo;
use crate::domain::ports::{FileGateway, StoredFile};
use crate::utils::error::{ConvertError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores uploads as uniquely named files inside one folder.
#[derive(Debug, Clone)]
pub struct LocalFileGateway {
    base_path: PathBuf,
}

impl LocalFileGateway {
    /// Creates the folder if it does not exist yet.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Strips directory components and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`. Leading dots are dropped.
pub fn secure_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl FileGateway for LocalFileGateway {
    async fn save(&self, content: &[u8], filename: &str) -> Result<StoredFile> {
        let safe_name = secure_filename(filename);
        let path = Path::new(&safe_name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload");
        let suffix = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let prefix = format!("{}-", stem);

        // Reserve a unique name so concurrent uploads of the same file never collide.
        let reserved = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .rand_bytes(8)
            .tempfile_in(&self.base_path)?;
        let (_, stored_path) = reserved.keep().map_err(|e| ConvertError::IoError(e.error))?;

        if let Err(e) = tokio::fs::write(&stored_path, content).await {
            let _ = tokio::fs::remove_file(&stored_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            "Stored upload '{}' ({} bytes) at {}",
            filename,
            content.len(),
            stored_path.display()
        );

        Ok(StoredFile {
            path: stored_path,
            original_name: filename.to_string(),
        })
    }

    async fn read_to_string(&self, file: &StoredFile) -> Result<String> {
        let bytes = tokio::fs::read(file.path()).await?;
        String::from_utf8(bytes).map_err(|_| {
            ConvertError::upload(format!(
                "File '{}' is not valid UTF-8 text",
                file.original_name
            ))
        })
    }

    async fn file_info(&self, file: &StoredFile) -> Result<FileInfo> {
        let metadata = tokio::fs::metadata(file.path()).await?;
        let created = metadata.created().or_else(|_| metadata.modified())?;

        Ok(FileInfo {
            size: metadata.len(),
            created_at: DateTime::<Utc>::from(created),
            mime_type: mime_type_for(file.path()).to_string(),
        })
    }

    async fn delete(&self, file: &StoredFile) -> Result<()> {
        match tokio::fs::remove_file(file.path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
