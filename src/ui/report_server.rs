use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use serde_json::json;
use tokio::sync::oneshot;
use warp::http::{StatusCode, Uri};
use warp::reply::Response;
use warp::{Filter, Reply};
use crate::config::constants::{DEFAULT_SERVER_PORT_RANGE_END, MAX_REPORT_ID_LENGTH};
use crate::errors::{RepolyzerError, RepolyzerResult};
use crate::helpers::html_helper::escape_html;
use crate::ui::report_store::ReportStore;

pub struct ReportServer {
    store: Arc<ReportStore>,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ReportServer {
    pub fn new(store: Arc<ReportStore>) -> Self {
        Self {
            store,
            port: None,
            shutdown_tx: None,
        }
    }

    pub fn url(&self) -> Option<String> {
        self.port.map(|port| format!("http://127.0.0.1:{}/", port))
    }

    /// Binds the first free port at or above `preferred_port` and serves in the background.
    pub async fn start(&mut self, preferred_port: u16) -> RepolyzerResult<u16> {
        let end = DEFAULT_SERVER_PORT_RANGE_END.max(preferred_port.saturating_add(1));

        for port in preferred_port..end {
            let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
            let addr: SocketAddr = ([127, 0, 0, 1], port).into();
            let bound = warp::serve(routes(Arc::clone(&self.store)))
                .try_bind_with_graceful_shutdown(addr, Self::shutdown_signal(shutdown_rx));

            match bound {
                Ok((_, server)) => {
                    tokio::spawn(server);
                    self.port = Some(port);
                    self.shutdown_tx = Some(shutdown_tx);
                    log::info!("🌐 Report server started on http://127.0.0.1:{}", port);
                    return Ok(port);
                }
                Err(e) => log::debug!("Port {} unavailable: {}", port, e),
            }
        }

        Err(RepolyzerError::system_error(
            "start report server",
            &format!("no free port between {} and {}", preferred_port, end - 1),
        ))
    }

    async fn shutdown_signal(shutdown_rx: oneshot::Receiver<()>) {
        shutdown_rx.await.ok();
    }

    pub async fn shutdown(&mut self) -> RepolyzerResult<()> {
        log::info!("🛑 Shutting down report server...");
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_| {
                RepolyzerError::system_error("shutdown", "Failed to send shutdown signal")
            })?;
        }
        self.port = None;
        log::info!("✅ Report server shutdown complete");
        Ok(())
    }
}

/// `/` redirects to the latest report, `/reports/<id>` serves one, `/api/reports` lists them.
pub fn routes(store: Arc<ReportStore>) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || Arc::clone(&store));

    let index = warp::path::end()
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(index_handler);

    let report = warp::path!("reports" / String)
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(report_handler);

    let list = warp::path!("api" / "reports")
        .and(warp::get())
        .and(store_filter)
        .and_then(list_handler);

    index.or(report).unify().or(list).unify()
}

fn sanitize_report_id(report_id: &str) -> String {
    report_id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(MAX_REPORT_ID_LENGTH)
        .collect()
}

async fn index_handler(store: Arc<ReportStore>) -> Result<Response, Infallible> {
    let latest = store.latest_id().and_then(|id| format!("/reports/{}", id).parse::<Uri>().ok());
    match latest {
        Some(uri) => Ok(warp::redirect::temporary(uri).into_response()),
        None => Ok(warp::reply::with_status(
            warp::reply::html("<!DOCTYPE html><html><body><p>No reports have been stored yet.</p></body></html>".to_string()),
            StatusCode::NOT_FOUND,
        ).into_response()),
    }
}

async fn report_handler(report_id: String, store: Arc<ReportStore>) -> Result<Response, Infallible> {
    let sanitized_report_id = sanitize_report_id(&report_id);
    match store.get(&sanitized_report_id) {
        Some(report) => Ok(warp::reply::html(report.html).into_response()),
        None => Ok(warp::reply::with_status(
            warp::reply::html(format!(
                "<!DOCTYPE html><html><body><p>Report {} not found.</p></body></html>",
                escape_html(&sanitized_report_id)
            )),
            StatusCode::NOT_FOUND,
        ).into_response()),
    }
}

async fn list_handler(store: Arc<ReportStore>) -> Result<Response, Infallible> {
    let reports: Vec<serde_json::Value> = store
        .list()
        .into_iter()
        .map(|(id, title)| json!({ "id": id, "title": title, "url": format!("/reports/{}", id) }))
        .collect();
    Ok(warp::reply::json(&json!({ "reports": reports })).into_response())
}
