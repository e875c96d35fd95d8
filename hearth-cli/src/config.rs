//! App config: database, logging, and the signed-in user. Loaded from env.

use std::env;

use anyhow::Result;

use hearth_core::AuthContext;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DATABASE_URL (sqlite://path or sqlite::memory:)
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// HEARTH_USER; the authenticated viewer id, if any
    pub viewer: Option<String>,
}

impl AppConfig {
    /// Load from environment variables. `user` overrides HEARTH_USER if
    /// provided.
    pub fn load(user: Option<String>) -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://hearth.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/hearth.log".to_string());
        let viewer = user.or_else(|| env::var("HEARTH_USER").ok());

        Ok(Self {
            database_url,
            log_file,
            viewer,
        })
    }

    pub fn auth_context(&self) -> AuthContext {
        match &self.viewer {
            Some(viewer) => AuthContext::authenticated(viewer),
            None => AuthContext::anonymous(),
        }
    }
}
