use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod forward;
pub mod handlers;
pub mod response;
pub mod session;

use forward::Forwarder;
use session::SessionProvider;

/// Shared per-process state. The forwarder and session provider are the only
/// long-lived pieces; nothing here is mutated by request handling.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(forwarder: Forwarder, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
            sessions,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let server = &config::config().server;

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(handlers::health::health_get))
        // Authenticated proxy routes
        .merge(job_routes())
        .merge(community_routes())
        .with_state(state);

    // Global middleware, driven by the server config section
    if server.enable_cors {
        router = router.layer(cors_layer(&server.cors_origins));
    }
    if server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    // An empty or unparseable origin list falls back to a wide-open policy
    if parsed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn job_routes() -> Router<AppState> {
    use handlers::{job_applications, jobs, resume, users};

    Router::new()
        // Job browsing and applications
        .route("/api/jobs", get(jobs::jobs_get))
        .route("/api/jobs/:id", get(jobs::job_get))
        .route("/api/job-applications", post(job_applications::job_application_post))
        // Career tooling
        .route("/api/users/:id/cv", get(users::user_cv_get))
        .route("/api/resume/match-job", post(resume::match_job_post))
}

fn community_routes() -> Router<AppState> {
    use handlers::community;

    Router::new()
        .route(
            "/api/community/posts",
            get(community::posts_get).post(community::post_create),
        )
        .route("/api/community/posts/:id", get(community::post_get))
        .route(
            "/api/community/posts/:id/comments",
            post(community::comment_create),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "data": {
            "name": "Forsa Gateway",
            "version": version,
            "description": "Server-side API gateway forwarding authenticated requests to the Forsa backend",
            "timestamp": chrono::Utc::now(),
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public - proxied backend probe)",
                "jobs": "/api/jobs[/:id] (authenticated)",
                "job_applications": "/api/job-applications (authenticated)",
                "users": "/api/users/:id/cv (authenticated)",
                "resume": "/api/resume/match-job (authenticated)",
                "community": "/api/community/posts[/:id[/comments]] (authenticated)",
            }
        }
    }))
}
