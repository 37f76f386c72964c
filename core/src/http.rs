//! HTTP plumbing shared by the services.
//!
//! # Design
//! Every service mounts `docs_router` next to its own routes, so the
//! generated OpenAPI document and an interactive UI over it come for free.
//! `serve` owns the accept loop and stops on Ctrl+C or SIGTERM. Tests call
//! the service's `run(listener)` on a throwaway runtime and never send a
//! signal, so the loop simply lives as long as the test thread.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::{error, info, Level};
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wrap a router with per-request INFO spans; 5xx responses are logged at ERROR.
pub fn with_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}

/// Swagger UI at `/docs`, backed by `doc` served as `/openapi.json`.
pub fn docs_router(doc: OpenApi) -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", doc))
}

/// Serve `app` on `listener` until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use utoipa::openapi::{InfoBuilder, OpenApiBuilder};

    fn demo_doc() -> OpenApi {
        OpenApiBuilder::new()
            .info(InfoBuilder::new().title("demo").version("1.0.0").build())
            .build()
    }

    fn get_request(uri: &str) -> Request<String> {
        Request::builder().uri(uri).body(String::new()).unwrap()
    }

    #[tokio::test]
    async fn openapi_route_serves_the_document() {
        let app = with_tracing(docs_router(demo_doc()));

        let resp = app.oneshot(get_request("/openapi.json")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["info"]["title"], "demo");
        assert!(json["openapi"].as_str().unwrap().starts_with("3."));
    }

    #[tokio::test]
    async fn docs_redirects_to_the_ui_page() {
        let app = docs_router(demo_doc());

        let resp = app.clone().oneshot(get_request("/docs")).await.unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers()[header::LOCATION], "/docs/");

        let resp = app.oneshot(get_request("/docs/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
