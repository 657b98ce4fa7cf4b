//! Libris backend — GraphQL book catalog service.
//!
//! All operations are exposed via GraphQL at /graphql; subscriptions go
//! over WebSocket at /graphql/ws.

use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};
use axum::Router;
use axum::extract::{State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use libris::catalog::CatalogService;
use libris::config::Config;
use libris::db::{MemoryStore, seed};
use libris::graphql::{CatalogSchema, build_schema};
use libris::services::{AuthConfig, AuthService, EventHub};

/// Application state shared across all handlers
#[derive(Clone)]
struct AppState {
    schema: CatalogSchema,
    auth: Arc<AuthService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libris=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting libris backend");

    let store = Arc::new(MemoryStore::new());
    if config.seed_demo {
        seed::load_demo_catalog(store.as_ref()).await?;
    }

    let events = EventHub::new(config.event_capacity);
    let auth = Arc::new(AuthService::new(
        store.clone(),
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_lifetime: config.token_lifetime,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        },
    ));
    let catalog = Arc::new(CatalogService::new(store, events.clone()));

    let schema = build_schema(catalog, auth.clone(), events);
    let state = AppState { schema, auth };

    let app = Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| h.starts_with("Bearer "))
        .map(|h| h[7..].to_string())
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/graphql/ws")
            .finish(),
    )
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(token) = extract_token(&headers) {
        match state.auth.verify_token(&token) {
            Ok(user) => {
                tracing::debug!(user_id = %user.user_id, "request authenticated");
                request = request.data(user);
            }
            Err(e) => {
                // Invalid token just means the request runs unauthenticated.
                tracing::debug!(error = %e, "token verification failed");
            }
        }
    }
    state.schema.execute(request).await.into()
}

async fn graphql_ws_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    protocol: GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let auth_user = extract_token(&headers).and_then(|t| state.auth.verify_token(&t).ok());
    let auth = state.auth.clone();

    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| {
            let mut ws = GraphQLWebSocket::new(socket, state.schema.clone(), protocol);
            if let Some(user) = auth_user {
                let mut data = async_graphql::Data::default();
                data.insert(user);
                ws = ws.with_data(data);
            }
            ws.on_connection_init(move |params| {
                let auth = auth.clone();
                async move {
                    if let Some(token) = params
                        .get("Authorization")
                        .or_else(|| params.get("authorization"))
                        .and_then(|v| v.as_str())
                    {
                        let token = token.strip_prefix("Bearer ").unwrap_or(token);
                        if let Ok(user) = auth.verify_token(token) {
                            let mut data = async_graphql::Data::default();
                            data.insert(user);
                            return Ok(data);
                        }
                    }
                    Ok(async_graphql::Data::default())
                }
            })
            .serve()
        })
}
