use safehike_core::Agent;
use safehike_session::SessionService;
use std::{sync::Arc, time::Duration};

/// Security configuration for the SafeHike server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all, which is NOT
    /// recommended for production).
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Flat per-request timeout; this is the only time bound the service
    /// applies, including to streaming runs.
    pub request_timeout: Duration,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_body_size: 1024 * 1024,
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Configuration for the SafeHike server.
#[derive(Clone)]
pub struct ServerConfig {
    pub agent: Arc<dyn Agent>,
    pub session_service: Arc<dyn SessionService>,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn new(agent: Arc<dyn Agent>, session_service: Arc<dyn SessionService>) -> Self {
        Self { agent, session_service, security: SecurityConfig::default() }
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.security.allowed_origins = origins;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.security.request_timeout = timeout;
        self
    }
}
