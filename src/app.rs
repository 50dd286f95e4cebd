use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::InvitationContent;
use crate::countdown::{Countdown, CountdownState, pad2};
use crate::error::Result;
use crate::guest::GuestName;
use crate::page::{PageRenderer, PageVariant};
use crate::widget::{Clock, SystemClock};

pub struct AppState {
    content: InvitationContent,
    renderer: PageRenderer,
    clock: Box<dyn Clock>,
}

impl AppState {
    pub fn new(content: InvitationContent) -> Result<Self> {
        Self::with_clock(content, Box::new(SystemClock))
    }

    pub fn with_clock(content: InvitationContent, clock: Box<dyn Clock>) -> Result<Self> {
        Ok(Self {
            content,
            renderer: PageRenderer::new()?,
            clock,
        })
    }
}

/// Where the server listens and what it serves
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub assets_dir: PathBuf,
    pub pkg_dir: PathBuf,
}

#[derive(Serialize)]
struct CountdownResponse {
    arrived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minutes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seconds: Option<String>,
}

pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(serve_cover))
        .route("/undangan", get(serve_invitation))
        .route("/api/countdown", get(get_countdown))
        .route("/api/content", get(get_content))
        .nest_service("/assets", ServeDir::new(&config.assets_dir))
        .nest_service("/pkg", ServeDir::new(&config.pkg_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(
    content: InvitationContent,
    config: ServerConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app_state = Arc::new(AppState::new(content)?);
    let app = router(app_state, &config);

    let listener = TcpListener::bind(config.bind).await?;
    log::info!("Listening on http://{}", config.bind);
    if config.bind.ip().is_unspecified() {
        match local_ip_address::local_ip() {
            Ok(ip) => log::info!(
                "Share invitations as http://{}:{}/?to=Nama+Tamu",
                ip,
                config.bind.port()
            ),
            Err(e) => log::debug!("no LAN address to show: {}", e),
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

fn render_page(state: &AppState, query: Option<String>, variant: PageVariant) -> Response {
    let guest = GuestName::from_query(query.as_deref(), &state.content.default_guest);

    match state
        .renderer
        .render(&state.content, &guest, variant, state.clock.now())
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("failed to render invitation for {:?}: {}", guest.as_str(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Undangan tidak dapat ditampilkan").into_response()
        }
    }
}

async fn serve_cover(RawQuery(query): RawQuery, State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, query, PageVariant::Cover)
}

async fn serve_invitation(
    RawQuery(query): RawQuery,
    State(state): State<Arc<AppState>>,
) -> Response {
    render_page(&state, query, PageVariant::Main)
}

async fn get_countdown(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let countdown = Countdown::new(state.content.countdown_target(), state.clock.now());

    let response = match countdown.state() {
        CountdownState::Counting(left) => CountdownResponse {
            arrived: false,
            days: Some(pad2(left.days)),
            hours: Some(pad2(left.hours)),
            minutes: Some(pad2(left.minutes)),
            seconds: Some(pad2(left.seconds)),
        },
        CountdownState::Arrived => CountdownResponse {
            arrived: true,
            days: None,
            hours: None,
            minutes: None,
            seconds: None,
        },
    };

    Json(response)
}

async fn get_content(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.content.clone())
}
