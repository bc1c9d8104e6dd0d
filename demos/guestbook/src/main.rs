//! Guestbook demo wiring the Inertia adapter end to end.
//!
//! `GET /` renders the page: a raw JSON envelope for protocol navigations,
//! an HTML shell with the envelope embedded in `data-page` otherwise.
//! `POST /sign` validates the form, flashes errors or a thank-you note,
//! and redirects back; the flash survives exactly that one redirect.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLock};

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use clap::Parser;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use inertia_axum::{respond, InertiaRequest};
use inertia_response::{InertiaConfig, RenderError, ResponseBuilder};
use inertia_session::{FlashStore, InMemorySessionStore, SessionError};
use inertia_types::Props;

const SESSION_COOKIE: &str = "guestbook_session";

#[derive(Debug, Parser)]
#[command(name = "guestbook", version, about = "Inertia adapter guestbook demo")]
struct Cli {
    /// Socket address to bind, e.g. 127.0.0.1:8087
    #[arg(long, default_value = "127.0.0.1:8087", env = "GUESTBOOK_LISTEN")]
    listen: SocketAddr,
    /// Asset version stamped on every envelope.
    #[arg(long, default_value = "dev", env = "GUESTBOOK_ASSET_VERSION")]
    asset_version: String,
}

/// One signed guestbook entry.
#[derive(Debug, Clone)]
struct Entry {
    name: String,
    message: String,
}

/// One in-memory session store per visitor, keyed by session cookie.
#[derive(Default)]
struct SessionRegistry {
    stores: RwLock<HashMap<String, Arc<InMemorySessionStore>>>,
}

impl SessionRegistry {
    fn store_for(&self, id: &str) -> Arc<InMemorySessionStore> {
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(id) {
            return Arc::clone(store);
        }
        drop(stores);
        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(stores.entry(id.to_string()).or_default())
    }
}

#[derive(Clone)]
struct AppState {
    builder: ResponseBuilder,
    sessions: Arc<SessionRegistry>,
    entries: Arc<RwLock<Vec<Entry>>>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Flash store for the visitor's session, plus a fresh session id to set
/// as a cookie when the request did not carry one.
fn session(state: &AppState, headers: &HeaderMap) -> (FlashStore, Option<String>) {
    match session_id(headers) {
        Some(id) => (flash_for(state, &id), None),
        None => {
            let id = Uuid::new_v4().to_string();
            let flash = flash_for(state, &id);
            (flash, Some(id))
        }
    }
}

fn flash_for(state: &AppState, id: &str) -> FlashStore {
    let store = state.sessions.store_for(id);
    FlashStore::new(store, state.builder.config().flash_namespace())
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

fn with_session_cookie(mut response: Response, new_id: Option<String>) -> Response {
    if let Some(id) = new_id {
        let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: InertiaRequest,
) -> Result<Response, AppError> {
    let (flash, new_session) = session(&state, &headers);
    let errors = flash.pull("errors")?.unwrap_or(Value::Null);
    let notices = flash.pull("notices")?.unwrap_or(Value::Null);

    let listed: Vec<Value> = {
        let entries = state.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|entry| json!({ "name": entry.name, "message": entry.message }))
            .collect()
    };

    // A partial reload that skips "stats" never takes this lock.
    let stats_entries = Arc::clone(&state.entries);
    let props = Props::new()
        .with("entries", Value::Array(listed))
        .with("errors", errors)
        .with("notices", notices)
        .with_deferred("stats", move || {
            let entries = stats_entries.read().unwrap_or_else(PoisonError::into_inner);
            let longest = entries.iter().map(|e| e.message.len()).max().unwrap_or(0);
            json!({ "total": entries.len(), "longest_message": longest })
        });

    let mut view_data = Map::new();
    view_data.insert("title".to_string(), json!("Guestbook"));

    let rendered = state
        .builder
        .render_with_view(&request, "guestbook/index", props, view_data)?;
    let response = respond(rendered, |view| {
        let title = view
            .extra()
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Guestbook")
            .to_string();
        let page = Value::Object(view.into_map());
        Html(page_shell(&title, &page)).into_response()
    });
    Ok(with_session_cookie(response, new_session))
}

#[derive(Debug, Deserialize)]
struct SignForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

async fn sign(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SignForm>,
) -> Result<Response, AppError> {
    let (flash, new_session) = session(&state, &headers);

    let name = form.name.trim().to_string();
    let message = form.message.trim().to_string();
    let field_errors = validate(&name, &message);

    if field_errors.is_empty() {
        {
            let mut entries = state.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.push(Entry {
                name: name.clone(),
                message,
            });
        }
        flash.append("notices", json!(format!("Thanks for signing, {}!", name)))?;
        info!(name = %name, "guestbook entry added");
    } else {
        flash.merge("errors", Value::Object(field_errors))?;
    }

    Ok(with_session_cookie(
        Redirect::to("/").into_response(),
        new_session,
    ))
}

fn validate(name: &str, message: &str) -> Map<String, Value> {
    let mut errors = Map::new();
    if name.is_empty() {
        errors.insert("name".to_string(), json!("Name is required"));
    } else if name.len() > 60 {
        errors.insert("name".to_string(), json!("Name is too long"));
    }
    if message.is_empty() {
        errors.insert("message".to_string(), json!("Message is required"));
    } else if message.len() > 500 {
        errors.insert("message".to_string(), json!("Message is too long"));
    }
    errors
}

fn page_shell(title: &str, page: &Value) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<div id=\"app\" data-page=\"{}\"></div>\n</body>\n</html>\n",
        html_escape(title),
        html_escape(&page.to_string()),
    )
}

fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn build_app(asset_version: &str) -> Router {
    let builder = ResponseBuilder::new(
        InertiaConfig::new()
            .with_version(asset_version)
            .with_shared(Props::new().with("app_name", "Guestbook")),
    );
    let state = AppState {
        builder,
        sessions: Arc::new(SessionRegistry::default()),
        entries: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route("/", get(index))
        .route("/sign", post(sign))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "guestbook=info,info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let app = build_app(&cli.asset_version);

    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!("guestbook listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
