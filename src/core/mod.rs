pub mod converter;
pub mod csv_writer;
pub mod rules;
pub mod transformer;
pub mod validator;

pub use crate::domain::model::{Record, RecordBatch, ValidationResult};
pub use crate::domain::ports::{Clock, FileGateway, ServiceSettings};
pub use crate::utils::error::Result;
