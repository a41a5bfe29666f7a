pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{FixedClock, LocalFileGateway, SystemClock};
pub use app::routes::{configure, AppState};
pub use app::service::ConversionService;
pub use config::AppConfig;
pub use crate::core::{converter::Converter, rules::NormalizationRules, transformer::Transformer};
pub use domain::model::{Record, RecordBatch, ValidationResult};
pub use utils::error::{ConvertError, Result};
