use std::path::PathBuf;

use clap::Parser;

/// Configuration for the gourmet-api server.
#[derive(Parser, Debug, Clone)]
#[command(name = "gourmet-api")]
#[command(about = "HTTP API server for the gourmet place directory")]
pub struct Config {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0", env = "API_HOST")]
    pub host: String,

    /// Port to bind to
    #[arg(long, default_value = "8081", env = "API_PORT")]
    pub port: u16,

    /// Path to the places JSON file
    #[arg(long, default_value = "places.json", env = "PLACES_PATH")]
    pub places_path: PathBuf,
}
