use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Backend API base, including the version prefix (e.g. `http://localhost:4050/api/v1`)
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extended timeout for the long-running resume matching call
    pub match_job_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("GATEWAY_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }
        if let Ok(v) = env::var("SERVER_CORS_ORIGINS") {
            self.server.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Upstream overrides
        if let Ok(v) = env::var("UPSTREAM_BASE_URL").or_else(|_| env::var("API_BASE_URL")) {
            self.upstream.base_url = v;
        }
        if let Ok(v) = env::var("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }
        if let Ok(v) = env::var("UPSTREAM_MATCH_JOB_TIMEOUT_SECS") {
            self.upstream.match_job_timeout_secs =
                v.parse().unwrap_or(self.upstream.match_job_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 4080,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:3001".to_string(),
                ],
                enable_request_logging: true,
            },
            upstream: UpstreamConfig {
                base_url: "http://localhost:4050/api/v1".to_string(),
                timeout_secs: 30,
                match_job_timeout_secs: 300, // 5 minutes
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 4080,
                enable_cors: true,
                cors_origins: vec!["https://staging.forsa.example.com".to_string()],
                enable_request_logging: true,
            },
            upstream: UpstreamConfig {
                base_url: "https://api-staging.forsa.example.com/api/v1".to_string(),
                timeout_secs: 30,
                match_job_timeout_secs: 300,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 4080,
                enable_cors: true,
                cors_origins: vec!["https://app.forsa.example.com".to_string()],
                enable_request_logging: false,
            },
            upstream: UpstreamConfig {
                base_url: "https://api.forsa.example.com/api/v1".to_string(),
                timeout_secs: 30,
                match_job_timeout_secs: 300,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
