use crate::adapters::{LocalFileGateway, SystemClock};
use crate::app::service::ConversionService;
use crate::app::upload::{read_upload, Upload};
use crate::config::AppConfig;
use crate::core::converter::Converter;
use crate::core::rules::NormalizationRules;
use crate::core::transformer::Transformer;
use crate::core::ServiceSettings;
use crate::domain::model::RecordBatch;
use crate::utils::error::{ConvertError, Result};
use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

pub const CSV_DOWNLOAD_NAME: &str = "converted.csv";

pub struct AppState {
    pub service: ConversionService,
    pub max_content_length: usize,
}

impl AppState {
    pub fn new(service: ConversionService, max_content_length: usize) -> Self {
        Self {
            service,
            max_content_length,
        }
    }

    /// Wires the local upload folder, the configured rule table and the system clock.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let gateway = LocalFileGateway::new(config.upload_folder())?;
        let rules = NormalizationRules::with_title_case_fields(config.title_case_fields());
        let converter = Converter::new(Transformer::new(rules, Arc::new(SystemClock)));

        Ok(Self::new(
            ConversionService::new(converter, Arc::new(gateway)),
            config.max_content_length(),
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub data: RecordBatch,
    pub message: &'static str,
}

/// Registers `/health` and the conversion routes under `api_prefix`.
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>, api_prefix: &str) {
    cfg.app_data(state)
        .route("/health", web::get().to(health))
        .service(
            web::scope(api_prefix)
                .route("/convert/csv-to-json", web::post().to(convert_csv_to_json))
                .route("/convert/json-to-csv", web::post().to(convert_json_to_csv)),
        );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

async fn receive(payload: Multipart, limit: usize, extension: &str) -> Result<Upload> {
    let upload = read_upload(payload, limit).await?;
    upload.ensure_extension(extension)?;
    Ok(upload)
}

async fn convert_csv_to_json(
    state: web::Data<AppState>,
    payload: Multipart,
) -> std::result::Result<HttpResponse, ConvertError> {
    let upload = receive(payload, state.max_content_length, "csv").await?;
    let data = state.service.csv_to_json(&upload).await?;

    tracing::info!("Converted '{}' into {} JSON records", upload.filename, data.len());
    Ok(HttpResponse::Ok().json(ConversionResponse {
        data,
        message: "Conversion successful",
    }))
}

async fn convert_json_to_csv(
    state: web::Data<AppState>,
    payload: Multipart,
) -> std::result::Result<HttpResponse, ConvertError> {
    let upload = receive(payload, state.max_content_length, "json").await?;
    let csv = state.service.json_to_csv(&upload).await?;

    tracing::info!("Converted '{}' into {} bytes of CSV", upload.filename, csv.len());
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(CSV_DOWNLOAD_NAME.to_string())],
        })
        .body(csv))
}
