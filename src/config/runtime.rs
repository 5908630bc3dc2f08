//! Runtime settings taken from the environment

use std::net::SocketAddr;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Dev,
    Prod,
}

impl Env {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Env::Prod,
            _ => Env::Dev,
        }
    }
}

/// Process-level settings: where to listen and how to log
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub env: Env,
    /// Listen address, either `host:port` or `:port`
    pub addr: String,
    pub base_url: String,
    pub show_drafts: bool,
    pub json_logs: bool,
}

impl RuntimeConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read settings through `var`; empty values count as unset
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let env = ["APP_ENV", "GO_ENV", "ENV"]
            .iter()
            .find_map(|key| var(*key))
            .map(|v| Env::parse(&v))
            .unwrap_or(Env::Dev);

        let addr = var("ADDR")
            .or_else(|| var("PORT").map(|port| format!(":{}", port.trim())))
            .unwrap_or_else(|| ":8080".to_string());

        let base_url = var("BASE_URL").unwrap_or_else(|| {
            if addr.starts_with(':') {
                format!("http://localhost{}", addr)
            } else {
                format!("http://{}", addr)
            }
        });

        let show_drafts = var("SHOW_DRAFTS")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let json_logs = env == Env::Prod || var("LOG_FORMAT").as_deref() == Some("json");

        Self {
            env,
            addr,
            base_url,
            show_drafts,
            json_logs,
        }
    }

    /// Socket address to bind, turning `:port` into `0.0.0.0:port`
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr).parse()
        } else {
            self.addr.parse()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
