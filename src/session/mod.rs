use async_trait::async_trait;
use axum::http::HeaderMap;

/// Access/refresh token pair identifying the current user to the backend.
///
/// Supplied per-request by a [`SessionProvider`]; never persisted by the
/// gateway. Lifetime is one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
}

/// Resolves the caller's credential for one inbound request.
///
/// Injected into the application state so route handlers stay decoupled from
/// where tokens actually come from. Handlers resolve the credential up front
/// and pass it explicitly into the forwarder.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Credential>;
}

/// Production provider: reads the bearer token from the inbound
/// `Authorization` header, plus an optional `x-refresh-token` header.
#[derive(Debug, Default)]
pub struct HeaderSessionProvider;

#[async_trait]
impl SessionProvider for HeaderSessionProvider {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Credential> {
        let access_token = extract_bearer_from_headers(headers)?;

        let refresh_token = headers
            .get("x-refresh-token")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        Some(Credential {
            access_token,
            refresh_token,
        })
    }
}

/// Test/support provider that always resolves the same credential (or none).
#[derive(Debug, Default)]
pub struct StaticSessionProvider {
    credential: Option<Credential>,
}

impl StaticSessionProvider {
    pub fn new(credential: Option<Credential>) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn resolve(&self, _headers: &HeaderMap) -> Option<Credential> {
        self.credential.clone()
    }
}

/// Extract a bearer token from the Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let auth_str = auth_header.to_str().ok()?;

    let token = auth_str.strip_prefix("Bearer ")?;
    if token.trim().is_empty() {
        return None;
    }
    Some(token.to_string())
}
