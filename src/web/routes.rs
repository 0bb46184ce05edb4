//! Request routing and handlers
//!
//! One route table covers the whole front end: the menu at `/`, embedded
//! assets under `/static/`, two JSON endpoints under `/api/`, and a
//! fallback that treats any other path as a generator name. Unknown names
//! fall back to the menu instead of a 404, matching how people link to
//! generators by hand.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::{assets, pages};
use crate::args::{ArgSpec, ArgType, ParsedArgs, QueryValues};
use crate::generator::{run_generator, GeneratorEntry, Registry};
use crate::i18n::{self, Locale};
use crate::render::RenderedDocument;

/// Application state shared across handlers
pub struct AppState {
    pub registry: Arc<Registry>,
    pub default_language: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(registry: Registry, default_language: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(registry),
            default_language: default_language.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }
}

/// Build the route table
pub fn app_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(menu))
        .route("/static/{*path}", get(static_asset))
        .route("/api/health", get(health_check))
        .route("/api/generators", get(generator_index))
        .fallback(dispatch)
}

fn resolve_locale(state: &AppState, query: &QueryValues, headers: &HeaderMap) -> Locale {
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    i18n::resolve(query.get("language"), accept, &state.default_language)
}

/// `GET /`: the generator menu
async fn menu(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Html<String> {
    let query = QueryValues::new(pairs);
    let locale = resolve_locale(&state, &query, &headers);
    Html(pages::menu_page(&state.registry, &locale))
}

/// `GET /static/{*path}`: embedded assets
async fn static_asset(Path(path): Path<String>) -> Response {
    assets::serve(&path)
}

/// Fallback: the path names a generator, or the menu is shown.
///
/// Without a render flag (or with `render=0`) the argument form is served,
/// `render=1` downloads the document, `render=2` shows it inline, and any
/// other flag value is a parameter error.
async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    // the whole front end is GET-only
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let query = QueryValues::new(pairs);
    let locale = resolve_locale(&state, &query, &headers);

    let name = uri.path().trim_matches('/');
    let Some(entry) = state.registry.get(name) else {
        return Html(pages::menu_page(&state.registry, &locale)).into_response();
    };

    match query.get("render").unwrap_or("0") {
        "0" => Html(pages::form_page(entry, &query, &locale)).into_response(),
        "1" => render_document(entry, &query, &locale, Disposition::Attachment),
        "2" => render_document(entry, &query, &locale, Disposition::Inline),
        other => parameter_error(
            &locale,
            &format!("`render` must be 0, 1 or 2, got {other:?}"),
        ),
    }
}

/// How the produced document is delivered to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Attachment,
    Inline,
}

/// Parse the submitted arguments, run the generator once, and wrap the
/// produced document. No error leaves this function as a transport fault.
fn render_document(
    entry: &GeneratorEntry,
    query: &QueryValues,
    locale: &Locale,
    disposition: Disposition,
) -> Response {
    let gen = entry.instantiate();
    let args = match ParsedArgs::from_query(gen.arg_groups(), query) {
        Ok(args) => args,
        Err(e) => return parameter_error(locale, &e.to_string()),
    };
    match run_generator(gen.as_ref(), &args) {
        Ok(document) => DocumentResponse {
            filename: format!("{}.{}", entry.name(), document.format().extension()),
            disposition,
            document,
        }
        .into_response(),
        Err(e) if e.is_value_error() => parameter_error(locale, &e.to_string()),
        Err(e) => {
            tracing::error!(generator = entry.name(), error = %e, "generation failed");
            generation_error(locale, &e.to_string())
        }
    }
}

/// A rejected submission renders as a regular page, the way the original
/// front end answered it.
fn parameter_error(locale: &Locale, message: &str) -> Response {
    Html(pages::error_page(locale, "Invalid parameter", message)).into_response()
}

fn generation_error(locale: &Locale, message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::error_page(locale, "Error", message)),
    )
        .into_response()
}

/// A finished document on its way to the browser
#[derive(Debug)]
struct DocumentResponse {
    filename: String,
    disposition: Disposition,
    document: RenderedDocument,
}

impl IntoResponse for DocumentResponse {
    fn into_response(self) -> Response {
        let disposition = match self.disposition {
            Disposition::Attachment => format!("attachment; filename=\"{}\"", self.filename),
            Disposition::Inline => format!("inline; filename=\"{}\"", self.filename),
        };
        (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    self.document.format().content_type().to_string(),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.document.into_bytes(),
        )
            .into_response()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub generators: usize,
    pub uptime_secs: i64,
}

/// `GET /api/health`
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        generators: state.registry.len(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// One registry entry in the JSON index
#[derive(Debug, Serialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub group: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub args: Vec<ArgInfo>,
}

/// One declared argument in the JSON index
#[derive(Debug, Serialize)]
pub struct ArgInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub arg_type: String,
    pub default: String,
    pub help: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl ArgInfo {
    fn from_spec(spec: &ArgSpec) -> Self {
        let choices = match &spec.arg_type {
            ArgType::Choice(choices) => choices.clone(),
            _ => Vec::new(),
        };
        Self {
            name: spec.name.clone(),
            arg_type: spec.arg_type.name().to_string(),
            default: spec.default.to_form_value(),
            help: spec.help.clone(),
            choices,
        }
    }
}

/// `GET /api/generators`: the visible registry for programmatic consumers
async fn generator_index(State(state): State<Arc<AppState>>) -> Json<Vec<GeneratorInfo>> {
    let index = state
        .registry
        .visible()
        .map(|entry| {
            let gen = entry.instantiate();
            GeneratorInfo {
                name: entry.name().to_string(),
                group: entry.group().title().to_string(),
                summary: entry.summary().to_string(),
                description: entry.description().map(str::to_string),
                args: gen
                    .arg_groups()
                    .iter()
                    .flat_map(|group| &group.args)
                    .map(ArgInfo::from_spec)
                    .collect(),
            }
        })
        .collect();
    Json(index)
}
