//! Quote card generation API.

use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use quote_engine::pipeline::{
    DEFAULT_AUTHOR_FONT_SIZE, DEFAULT_QUOTE_FONT_SIZE, DEFAULT_SHADOW_BLUR_RADIUS,
    DEFAULT_TEXT_COLOR, MAX_FONT_SIZE, MAX_SHADOW_BLUR_RADIUS,
};
use quote_engine::{CompositionError, CompositionRequest};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::app::SharedState;

use super::err_json;

type ApiError = (StatusCode, Json<Value>);

/// Header listing font fields that fell back to the embedded font.
pub const FONT_FALLBACK_HEADER: &str = "x-font-fallback";

/// Raw multipart fields before validation.
#[derive(Debug, Default)]
struct QuoteForm {
    quote: Option<String>,
    author: Option<String>,
    quote_font_size: Option<String>,
    author_font_size: Option<String>,
    quote_text_color: Option<String>,
    author_text_color: Option<String>,
    shadow_blur_radius: Option<String>,
    background_image: Option<Vec<u8>>,
    overlay_image: Option<Vec<u8>>,
    quote_font_file: Option<Vec<u8>>,
    author_font_file: Option<Vec<u8>>,
}

impl QuoteForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| err_json(400, &e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "background_image" | "overlay_image" | "quote_font_file" | "author_font_file" => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| err_json(400, &e.to_string()))?
                        .to_vec();
                    let slot = match name.as_str() {
                        "background_image" => &mut form.background_image,
                        "overlay_image" => &mut form.overlay_image,
                        "quote_font_file" => &mut form.quote_font_file,
                        _ => &mut form.author_font_file,
                    };
                    *slot = Some(data);
                }
                _ => {
                    let slot = match name.as_str() {
                        "quote" => &mut form.quote,
                        "author" => &mut form.author,
                        "quote_font_size" => &mut form.quote_font_size,
                        "author_font_size" => &mut form.author_font_size,
                        "quote_text_color" => &mut form.quote_text_color,
                        "author_text_color" => &mut form.author_text_color,
                        "shadow_blur_radius" => &mut form.shadow_blur_radius,
                        _ => {
                            tracing::debug!(field = %name, "Ignoring unknown form field");
                            continue;
                        }
                    };
                    let text = field
                        .text()
                        .await
                        .map_err(|e| err_json(400, &e.to_string()))?;
                    *slot = Some(text);
                }
            }
        }

        Ok(form)
    }

    fn into_request(self) -> Result<CompositionRequest, ApiError> {
        let quote = required_text(self.quote, "quote")?;
        let author = required_text(self.author, "author")?;

        Ok(CompositionRequest {
            quote,
            author,
            quote_font_size: font_size(
                self.quote_font_size,
                "quote_font_size",
                DEFAULT_QUOTE_FONT_SIZE,
            )?,
            author_font_size: font_size(
                self.author_font_size,
                "author_font_size",
                DEFAULT_AUTHOR_FONT_SIZE,
            )?,
            quote_color: self
                .quote_text_color
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            author_color: self
                .author_text_color
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            shadow_blur_radius: bounded_int(
                self.shadow_blur_radius,
                "shadow_blur_radius",
                DEFAULT_SHADOW_BLUR_RADIUS,
                MAX_SHADOW_BLUR_RADIUS,
            )?,
            background: required_file(self.background_image, "background_image")?,
            overlay: required_file(self.overlay_image, "overlay_image")?,
            quote_font: required_file(self.quote_font_file, "quote_font_file")?,
            author_font: required_file(self.author_font_file, "author_font_file")?,
        })
    }
}

fn required_text(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(err_json(400, &format!("Missing required field: {name}"))),
    }
}

fn required_file(value: Option<Vec<u8>>, name: &str) -> Result<Vec<u8>, ApiError> {
    value.ok_or_else(|| err_json(400, &format!("Missing required file: {name}")))
}

fn parse_int(value: Option<String>, name: &str, default: u32) -> Result<u32, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| err_json(400, &format!("Invalid integer for {name}: {v}"))),
    }
}

fn bounded_int(
    value: Option<String>,
    name: &str,
    default: u32,
    max: u32,
) -> Result<u32, ApiError> {
    match parse_int(value, name, default)? {
        n if n > max => Err(err_json(400, &format!("{name} must be at most {max}"))),
        n => Ok(n),
    }
}

fn font_size(value: Option<String>, name: &str, default: u32) -> Result<u32, ApiError> {
    match bounded_int(value, name, default, MAX_FONT_SIZE)? {
        0 => Err(err_json(400, &format!("{name} must be greater than 0"))),
        n => Ok(n),
    }
}

fn composition_status(err: &CompositionError) -> u16 {
    match err {
        CompositionError::Encode(_) => 500,
        _ => 422,
    }
}

/// POST /generate-quote-image/ – Render a quote card PNG
pub async fn generate_quote_image(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);

    async move {
        let request = QuoteForm::read(&mut multipart).await?.into_request()?;
        let options = state.compose_options();

        let result = tokio::task::spawn_blocking(move || {
            quote_engine::compose_with(&request, &options)
        })
        .await
        .map_err(|e| err_json(500, &e.to_string()))?
        .map_err(|e| {
            tracing::warn!(error = %e, "Quote image composition failed");
            err_json(composition_status(&e), &e.to_string())
        })?;

        for warning in &result.warnings {
            tracing::warn!(%warning, "Font fallback");
        }
        tracing::info!(bytes = result.png.len(), "Quote image generated");

        let mut builder = Response::builder()
            .header(header::CONTENT_TYPE, "image/png")
            .header(header::CONTENT_DISPOSITION, "attachment; filename=\"quote.png\"");
        if result.is_degraded() {
            let fields: Vec<String> = result.warnings.iter().map(|w| w.field.to_string()).collect();
            builder = builder.header(FONT_FALLBACK_HEADER, fields.join(","));
        }

        builder
            .body(Body::from(result.png))
            .map_err(|e| err_json(500, &e.to_string()))
    }
    .instrument(span)
    .await
}
