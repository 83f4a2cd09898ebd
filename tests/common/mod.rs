use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use reqwest::StatusCode as ClientStatus;
use serde_json::{json, Value};

use forsa_gateway::forward::Forwarder;
use forsa_gateway::session::{HeaderSessionProvider, SessionProvider};
use forsa_gateway::{app, AppState};

/// One gateway instance plus an in-process stub upstream, both on unused
/// ports. Each test spawns its own harness so upstream hit counts stay
/// isolated.
pub struct TestHarness {
    pub gateway_url: String,
    upstream_hits: Arc<AtomicUsize>,
}

impl TestHarness {
    /// Number of requests the stub upstream has actually received on
    /// `/job-applications`. Used to prove short-circuit paths issue zero
    /// network calls.
    pub fn job_application_hits(&self) -> usize {
        self.upstream_hits.load(Ordering::SeqCst)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.gateway_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == ClientStatus::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!(
            "gateway did not become ready on {} within {:?}",
            self.gateway_url,
            timeout
        )
    }
}

#[derive(Clone)]
struct StubState {
    job_application_hits: Arc<AtomicUsize>,
}

#[derive(Debug, serde::Deserialize)]
struct PageQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

/// Canned backend API, mounted under the real `/api/v1` base path.
fn stub_router(job_application_hits: Arc<AtomicUsize>) -> Router {
    let state = StubState { job_application_hits };

    Router::new()
        .route("/api/v1/health", get(|| async { Json(json!({"ok": true})) }))
        .route(
            "/api/v1/job-applications",
            post(|State(state): State<StubState>, Json(body): Json<Value>| async move {
                state.job_application_hits.fetch_add(1, Ordering::SeqCst);
                (
                    StatusCode::CREATED,
                    Json(json!({"data": {"id": "app-1", "received": body}})),
                )
            }),
        )
        // The jobs collection is permanently broken, for upstream-error tests
        .route(
            "/api/v1/jobs",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "db down"})),
                )
            }),
        )
        .route(
            "/api/v1/jobs/:id",
            get(|Path(id): Path<i64>| async move { Json(json!({"data": {"id": id}})) }),
        )
        .route(
            "/api/v1/users/:id/cv",
            get(|Path(id): Path<String>| async move {
                Json(json!({"data": {"userId": id, "sections": []}}))
            }),
        )
        // Deliberately slower than a normal route; finishes well inside the
        // extended match-job timeout
        .route(
            "/api/v1/resume/match-job",
            post(|Json(body): Json<Value>| async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Json(json!({"data": {"score": 87, "jobTitle": body["jobTitle"]}}))
            }),
        )
        .route(
            "/api/v1/community/posts/:id",
            get(|Path(id): Path<String>| async move { Json(json!({"data": {"id": id}})) }),
        )
        .route(
            "/api/v1/community/posts/:id/comments",
            post(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({"data": {"postId": id, "text": body["text"]}})),
                )
            }),
        )
        .route(
            "/api/v1/community/posts",
            get(|Query(query): Query<PageQuery>| async move {
                Json(json!({
                    "data": {
                        "posts": [],
                        "pagination": {
                            "page": query.page.unwrap_or(0),
                            "limit": query.limit.unwrap_or(0),
                        }
                    }
                }))
            }),
        )
        .with_state(state)
}

async fn serve(router: Router) -> Result<u16> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    Ok(port)
}

pub async fn spawn() -> Result<TestHarness> {
    spawn_with_provider(Arc::new(HeaderSessionProvider)).await
}

/// Spawn a gateway with a caller-supplied session provider, for tests that
/// exercise the provider seam directly.
pub async fn spawn_with_provider(sessions: Arc<dyn SessionProvider>) -> Result<TestHarness> {
    let upstream_hits = Arc::new(AtomicUsize::new(0));

    let upstream_port = serve(stub_router(upstream_hits.clone())).await?;
    let upstream_base = format!("http://127.0.0.1:{}/api/v1", upstream_port);

    let forwarder = Forwarder::new(&upstream_base, Duration::from_secs(5))?;
    let state = AppState::new(forwarder, sessions);

    let gateway_port = serve(app(state)).await?;

    let harness = TestHarness {
        gateway_url: format!("http://127.0.0.1:{}", gateway_port),
        upstream_hits,
    };
    harness.wait_ready(Duration::from_secs(10)).await?;
    Ok(harness)
}
