#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::rules::DEFAULT_TITLE_CASE_FIELDS;
use crate::core::ServiceSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

/// Resolved service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub upload_folder: String,
    pub max_content_length: usize,
    pub title_case_fields: Vec<String>,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            title_case_fields: DEFAULT_TITLE_CASE_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Overlays every value present in the file.
    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(server) = &file.server {
            if let Some(host) = &server.host {
                self.host = host.clone();
            }
            if let Some(port) = server.port {
                self.port = port;
            }
            if let Some(prefix) = &server.api_prefix {
                self.api_prefix = prefix.clone();
            }
        }
        if let Some(upload) = &file.upload {
            if let Some(folder) = &upload.folder {
                self.upload_folder = folder.clone();
            }
            if let Some(limit) = upload.max_content_length {
                self.max_content_length = limit;
            }
        }
        if let Some(fields) = file
            .normalization
            .as_ref()
            .and_then(|n| n.title_case_fields.clone())
        {
            self.title_case_fields = fields;
        }
        if let Some(json) = file.json_logs() {
            self.json_logs = json;
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl ServiceSettings for AppConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    fn upload_folder(&self) -> &str {
        &self.upload_folder
    }

    fn max_content_length(&self) -> usize {
        self.max_content_length
    }

    fn title_case_fields(&self) -> &[String] {
        &self.title_case_fields
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_range("server.port", self.port, 1, u16::MAX)?;
        validate_path("upload.folder", &self.upload_folder)?;
        validate_positive_number("upload.max_content_length", self.max_content_length, 1)?;
        for field in &self.title_case_fields {
            validate_non_empty_string("normalization.title_case_fields", field)?;
        }
        Ok(())
    }
}
