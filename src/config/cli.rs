use crate::config::toml_config::TomlConfig;
use crate::config::{
    AppConfig, DEFAULT_HOST, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_PORT, DEFAULT_UPLOAD_FOLDER,
};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "record-converter")]
#[command(about = "HTTP service converting CSV uploads to JSON and JSON uploads to CSV")]
pub struct CliConfig {
    #[arg(long, help = format!("Bind host [default: {}]", DEFAULT_HOST))]
    pub host: Option<String>,

    #[arg(long, help = format!("Bind port [default: {}]", DEFAULT_PORT))]
    pub port: Option<u16>,

    #[arg(long, help = format!("Folder for stored uploads [default: {}]", DEFAULT_UPLOAD_FOLDER))]
    pub upload_folder: Option<String>,

    #[arg(
        long,
        help = format!("Maximum upload size in bytes [default: {}]", DEFAULT_MAX_CONTENT_LENGTH)
    )]
    pub max_content_length: Option<usize>,

    /// Optional TOML file; flags given on the command line take precedence over it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Built-in defaults, then the TOML file, then explicit flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            config.apply_toml(&file);
        }

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(folder) = &self.upload_folder {
            config.upload_folder = folder.clone();
        }
        if let Some(limit) = self.max_content_length {
            config.max_content_length = limit;
        }
        if self.json_logs {
            config.json_logs = true;
        }

        Ok(config)
    }
}
