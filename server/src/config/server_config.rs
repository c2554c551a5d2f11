//! Runtime server configuration loaded from the environment.

use quote_engine::{CanvasSize, ComposeOptions, DEFAULT_CANVAS_SIZE, DEFAULT_MARGIN};
use serde::Serialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub margin: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparseable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| lookup(key).unwrap_or_default();
        let d = Self::default();

        Self {
            host: {
                let h = g("QUOTE_SERVER_HOST");
                if h.trim().is_empty() { d.host } else { h.trim().to_string() }
            },
            port: parse_or("QUOTE_SERVER_PORT", &g("QUOTE_SERVER_PORT"), d.port),
            max_upload_bytes: parse_or(
                "QUOTE_MAX_UPLOAD_BYTES",
                &g("QUOTE_MAX_UPLOAD_BYTES"),
                d.max_upload_bytes,
            ),
            canvas_width: parse_or("QUOTE_CANVAS_WIDTH", &g("QUOTE_CANVAS_WIDTH"), d.canvas_width),
            canvas_height: parse_or(
                "QUOTE_CANVAS_HEIGHT",
                &g("QUOTE_CANVAS_HEIGHT"),
                d.canvas_height,
            ),
            margin: parse_or("QUOTE_MARGIN", &g("QUOTE_MARGIN"), d.margin),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            canvas: CanvasSize::new(self.canvas_width, self.canvas_height),
            margin: self.margin,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, s: &str, default: T) -> T {
    let s = s.trim();
    if s.is_empty() {
        return default;
    }
    match s.parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(key, value = s, "Invalid config value, using default");
            default
        }
    }
}
