//! Application configuration.
//!
//! Values are resolved with priority: environment (including `.env`) >
//! `config.toml` > built-in defaults. Nothing is ever written back.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ==================== Defaults ====================

/// Server address to bind to
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Simulated sign-in latency in milliseconds
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

// ==================== config.toml ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<ServerSection>,
    auth: Option<AuthSection>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct AuthSection {
    login_delay_ms: Option<u64>,
}

// ==================== Resolved config ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub server_addr: String,
    pub server_port: u16,
    pub login_delay_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
        }
    }
}

impl PortalConfig {
    /// Load from `.env`, the process environment and `config.toml`.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::from_file(Path::new(CONFIG_FILE));
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Defaults overlaid with the file at `path`, if it exists and parses.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Defaults overlaid with a TOML document. Invalid documents are logged
    /// and ignored.
    pub fn from_toml_str(contents: &str) -> Self {
        let mut config = Self::default();
        let file = match toml::from_str::<FileConfig>(contents) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
                FileConfig::default()
            }
        };

        if let Some(server) = file.server {
            if let Some(addr) = server.addr {
                config.server_addr = addr;
            }
            if let Some(port) = server.port {
                config.server_port = port;
            }
        }
        if let Some(login_delay_ms) = file.auth.and_then(|auth| auth.login_delay_ms) {
            config.login_delay_ms = login_delay_ms;
        }
        config
    }

    /// Override with `PORTAL_ADDR`, `PORT` and `LOGIN_DELAY_MS`.
    /// Unparseable numbers are logged and skipped.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = var("PORTAL_ADDR") {
            self.server_addr = addr;
        }
        if let Some(port) = var("PORT") {
            match port.parse() {
                Ok(port) => self.server_port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT: {}", port),
            }
        }
        if let Some(delay) = var("LOGIN_DELAY_MS") {
            match delay.parse() {
                Ok(delay) => self.login_delay_ms = delay,
                Err(_) => tracing::warn!("Ignoring invalid LOGIN_DELAY_MS: {}", delay),
            }
        }
    }

    /// Full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
