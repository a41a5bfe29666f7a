use crate::app::upload::Upload;
use crate::core::converter::Converter;
use crate::domain::model::RecordBatch;
use crate::domain::ports::FileGateway;
use crate::utils::error::Result;
use std::sync::Arc;

/// Persists an upload, converts its text and removes the stored copy.
#[derive(Clone)]
pub struct ConversionService {
    converter: Converter,
    gateway: Arc<dyn FileGateway>,
}

impl ConversionService {
    pub fn new(converter: Converter, gateway: Arc<dyn FileGateway>) -> Self {
        Self { converter, gateway }
    }

    pub async fn csv_to_json(&self, upload: &Upload) -> Result<RecordBatch> {
        self.convert_stored(upload, |content| self.converter.csv_to_json(content))
            .await
    }

    pub async fn json_to_csv(&self, upload: &Upload) -> Result<String> {
        self.convert_stored(upload, |content| self.converter.json_to_csv(content))
            .await
    }

    /// The stored file is deleted on every path once it has been saved.
    async fn convert_stored<T, F>(&self, upload: &Upload, convert: F) -> Result<T>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let stored = self.gateway.save(&upload.content, &upload.filename).await?;
        if let Ok(info) = self.gateway.file_info(&stored).await {
            tracing::debug!(
                "Received '{}' ({} bytes, {})",
                stored.original_name,
                info.size,
                info.mime_type
            );
        }

        let outcome = match self.gateway.read_to_string(&stored).await {
            Ok(content) => convert(&content),
            Err(e) => Err(e),
        };

        if let Err(e) = self.gateway.delete(&stored).await {
            tracing::error!(
                "Failed to remove stored upload {}: {}",
                stored.path().display(),
                e
            );
        }

        outcome
    }
}
