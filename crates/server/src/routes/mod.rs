use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use deadpool_sqlite::Pool;
use rusqlite::Connection;
use shared::{api::Object, model::User, types::Uuid};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::{cli::Cli, AppState};

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// Builds the full application: api routes, the landing page and the http
/// layers
pub fn app(state: AppState, args: &Cli) -> Result<Router, anyhow::Error> {
    Ok(Router::new()
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserExercises.path(), post(add_exercise))
        .route(Object::UserLogs.path(), get(fetch_log))
        .route(Object::Ping.path(), get(ping))
        .fallback_service(ServeDir::new(&args.assets_dir))
        .layer(cors_layer(args)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state))
}

fn cors_layer(args: &Cli) -> Result<CorsLayer, anyhow::Error> {
    Ok(match &args.cors_origin {
        None => CorsLayer::permissive(),
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE]),
    })
}

/// Health check, fails if no database connection can be acquired
pub async fn ping(State(pool): State<Pool>) -> (StatusCode, Json<()>) {
    match pool.get().await {
        Ok(_) => (StatusCode::OK, Json(())),
        Err(e) => {
            warn!("Ping failed to get a database connection: {e:?}");
            (StatusCode::SERVICE_UNAVAILABLE, Json(()))
        },
    }
}

/// Resolves the user id from a route path. Ids that aren't uuids can't belong
/// to any user
fn lookup_user(conn: &Connection, id: &str) -> Result<Option<User>, rusqlite::Error> {
    match Uuid::parse(id) {
        Ok(id) => User::fetch_maybe_by_id(conn, &id),
        Err(_) => Ok(None),
    }
}
