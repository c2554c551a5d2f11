pub mod app;
pub mod config;
pub mod server;

use config::ServerConfig;

/// Load `.env` and build the runtime config.
pub fn init_config() -> ServerConfig {
    config::load_dotenv();
    let config = ServerConfig::load();
    tracing::info!(
        addr = %config.bind_addr(),
        canvas_width = config.canvas_width,
        canvas_height = config.canvas_height,
        margin = config.margin,
        "Settings loaded"
    );
    config
}
