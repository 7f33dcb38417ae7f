use clap::Parser;
use manuals_core::PDF_MIME_TYPE;
use manuals_gdrive::DEFAULT_API_BASE_URL;

/// Configuration for the manuals-web server.
#[derive(Parser, Debug, Clone)]
#[command(name = "manuals-web")]
#[command(about = "Lists PDF manuals from a Google Drive folder tree and serves a search page")]
pub struct Config {
    /// TCP host to bind to
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// TCP port to bind to
    #[arg(long, default_value = "3000", env = "HTTP_PORT")]
    pub port: u16,

    /// Google service-account key (raw JSON)
    #[arg(long, env = "GOOGLE_SERVICE_KEY", hide_env_values = true)]
    pub google_service_key: Option<String>,

    /// Drive folder ID the catalog is rooted at
    #[arg(long, env = "GOOGLE_DRIVE_FOLDER_ID")]
    pub google_drive_folder_id: Option<String>,

    /// MIME type of the files to collect
    #[arg(long, default_value = PDF_MIME_TYPE, env = "MANUALS_MIME_TYPE")]
    pub mime_type: String,

    /// Google APIs base URL
    #[arg(long, default_value = DEFAULT_API_BASE_URL, env = "GOOGLE_DRIVE_API_URL")]
    pub drive_api_url: String,

    /// Timeout for outbound HTTP calls (seconds)
    #[arg(long, default_value = "60", env = "HTTP_CLIENT_TIMEOUT")]
    pub request_timeout_secs: u64,
}
