//! The `framecap serve` command: the cloud handler behind an axum server.

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use clap::Args;
use framecap_core::{
    handle_event, CaptionGenerator, CaptionResponse, Config, HttpEvent, HttpResponse,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (defaults to server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (defaults to server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub overrides: super::ModelOverrides,
}

/// Largest request body accepted, matching the synchronous Lambda payload cap.
pub const MAX_EVENT_BYTES: usize = 6 * 1024 * 1024;

/// Build the router. `/` and `/caption` both accept `POST` and `OPTIONS`.
pub fn router(generator: Arc<CaptionGenerator>) -> Router {
    Router::new()
        .route("/", any(caption))
        .route("/caption", any(caption))
        .layer(DefaultBodyLimit::max(MAX_EVENT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(generator)
}

async fn caption(
    State(generator): State<Arc<CaptionGenerator>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // Body failures still answer with JSON and CORS headers
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            return into_response(HttpResponse::json(
                rejection.status().as_u16(),
                &CaptionResponse::error(rejection.body_text()),
            ));
        }
    };
    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Request body is not UTF-8: {e}");
            return into_response(HttpResponse::json(
                500,
                &CaptionResponse::error(format!("Request body is not valid UTF-8: {e}")),
            ));
        }
    };

    let event = HttpEvent::new(method.as_str(), body);
    into_response(handle_event(&generator, event).await)
}

fn into_response(response: HttpResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut out = Response::new(Body::from(response.body));
    *out.status_mut() = status;
    for (name, value) in response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().insert(name, value);
            }
            _ => tracing::warn!("Dropping invalid response header {name}: {value}"),
        }
    }
    out
}

/// Bind a listener. `host` may be an IP address or a host name like `localhost`.
async fn bind(host: &str, port: u16) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port)).await
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    args.overrides.apply(&mut config);
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let generator = Arc::new(CaptionGenerator::new(&config).await);
    let app = router(generator);

    let listener = bind(&host, port).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
