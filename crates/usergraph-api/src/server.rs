//! HTTP server: one `/graphql` path. POST and GET with a `query` parameter
//! execute documents; a bare GET serves GraphiQL.

use std::future::Future;

use async_graphql::http::{parse_query_string, GraphiQLSource};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result;
use crate::schema::AppSchema;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the application router.
pub fn router(schema: AppSchema) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_handler))
        .with_state(schema)
}

async fn graphql_handler(
    State(schema): State<AppSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(execute(&schema, request).await)
}

/// `GET /graphql?query=...` executes the document; without `query` the
/// GraphiQL page is served instead.
async fn graphql_get(State(schema): State<AppSchema>, RawQuery(raw): RawQuery) -> Response {
    let Some(raw) = raw.filter(|q| has_query_param(q)) else {
        return graphiql().await.into_response();
    };
    match parse_query_string(&raw) {
        Ok(request) => Json(execute(&schema, request).await).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

fn has_query_param(raw: &str) -> bool {
    raw.split('&').any(|pair| pair.split('=').next() == Some("query"))
}

async fn execute(schema: &AppSchema, request: async_graphql::Request) -> async_graphql::Response {
    let response = schema.execute(request).await;
    if response.is_err() {
        tracing::warn!(errors = ?response.errors, "GraphQL request failed");
    }
    response
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, schema: AppSchema, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "GraphQL server listening at http://{addr}{GRAPHQL_PATH}");

    axum::serve(listener, router(schema))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("GraphQL server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
    info!("Shutdown signal received");
}
