//! Embedded static assets
//!
//! Files under `static/` are compiled into the binary and served under
//! `/static/`. Paths are checked against a conservative allow-list before
//! lookup; anything else is a plain 404 without an HTML error page.
//! Missing menu thumbnails (`samples/<Name>-thumb.jpg`) get a placeholder
//! image instead of a broken link.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

/// Served when a menu thumbnail has not been drawn yet
const PLACEHOLDER_THUMB: &str = "nothing.svg";

/// Serve one file from the embedded static tree
pub fn serve(path: &str) -> Response {
    if !allowed_path(path) {
        return not_found();
    }
    if let Some(file) = StaticAssets::get(path) {
        return asset_response(content_type(path), file.data.into_owned());
    }
    if is_thumbnail(path) {
        if let Some(file) = StaticAssets::get(PLACEHOLDER_THUMB) {
            return asset_response(content_type(PLACEHOLDER_THUMB), file.data.into_owned());
        }
    }
    not_found()
}

fn asset_response(content_type: &'static str, data: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        data,
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

/// Allow-list for asset paths: `/`-separated segments of letters, digits,
/// `_`, `-` and `.`, no leading dots, and the final segment must carry an
/// alphanumeric extension.
fn allowed_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let mut last = "";
    for segment in path.split('/') {
        if segment.is_empty() || segment.starts_with('.') {
            return false;
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return false;
        }
        if segment.contains("..") {
            return false;
        }
        last = segment;
    }
    match last.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

/// Menu thumbnail pattern: `samples/<Name>-thumb.jpg`
fn is_thumbnail(path: &str) -> bool {
    path.strip_prefix("samples/")
        .and_then(|file| file.strip_suffix("-thumb.jpg"))
        .is_some_and(|name| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn content_type(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match extension {
        "css" => "text/css",
        "html" => "text/html",
        "ico" => "image/x-icon",
        "jpeg" | "jpg" => "image/jpeg",
        "js" => "text/javascript",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
