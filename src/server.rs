//! Local dashboard server.
//!
//! Each route is one dashboard event: `/upload` selects a file, `/analyze`
//! starts an analysis in the background and `/export` downloads the report.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use log::{debug, info, warn};
use tokio::net::TcpListener;

use crate::dashboard::Dashboard;
use crate::error::{ReviewDashError, Result};
use crate::providers::Analyzer;
use crate::render::{export, interactive};

const UPLOAD_FIELD: &str = "document";

pub struct AppState {
    dashboard: Mutex<Dashboard>,
    analyzer: Arc<dyn Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            dashboard: Mutex::new(Dashboard::new()),
            analyzer,
        }
    }

    // Poisoned locks are recovered; dashboard state is always left consistent.
    fn lock(&self) -> MutexGuard<'_, Dashboard> {
        self.dashboard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/analyze", post(analyze))
        .route("/export", get(export_report))
        // Review files are read whole; no local size cap
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Dashboard available at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| ReviewDashError::Server(e.to_string()))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(interactive::page(&state.lock(), None))
}

async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Redirect {
    let (filename, contents) = match read_document(&mut multipart).await {
        Some(selection) => selection,
        None => {
            debug!("Upload carried no file, ignoring");
            return Redirect::to("/");
        }
    };

    if let Err(e) = state.lock().select_file(&filename, contents) {
        debug!("File selection rejected: {e}");
    }
    Redirect::to("/")
}

/// Pulls the `document` part out of the form. `None` means nothing was
/// selected; an unreadable or non-UTF-8 part is returned as a read error.
async fn read_document(
    multipart: &mut Multipart,
) -> Option<(String, std::io::Result<String>)> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read upload body: {e}");
                return Some((String::new(), Err(invalid_data(e))));
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let contents = match field.bytes().await {
            Ok(bytes) if bytes.is_empty() && filename.is_empty() => return None,
            Ok(bytes) => String::from_utf8(bytes.to_vec()).map_err(invalid_data),
            Err(e) => Err(invalid_data(e)),
        };
        return Some((filename, contents));
    }
}

fn invalid_data<E>(err: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::InvalidData, err)
}

async fn analyze(State(state): State<Arc<AppState>>) -> Redirect {
    let ticket = match state.lock().begin_analysis() {
        Ok(ticket) => ticket,
        Err(e) => {
            debug!("Analyze request rejected: {e}");
            return Redirect::to("/");
        }
    };

    let worker = Arc::clone(&state);
    tokio::spawn(async move {
        let outcome = worker.analyzer.analyze(ticket.document()).await;
        if let Err(e) = worker.lock().finish_analysis(ticket, outcome) {
            debug!("Analysis finished with error: {e}");
        }
    });

    Redirect::to("/")
}

async fn export_report(State(state): State<Arc<AppState>>) -> Response {
    let dashboard = state.lock();

    match export::export(dashboard.report()) {
        Ok(artifact) => {
            info!("Serving report export ({} bytes)", artifact.body.len());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, artifact.content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", artifact.filename),
                    ),
                ],
                artifact.body,
            )
                .into_response()
        }
        Err(e) => {
            warn!("Export requested without a report");
            let page = interactive::page(&dashboard, Some(&e.user_message()));
            (StatusCode::NOT_FOUND, Html(page)).into_response()
        }
    }
}
