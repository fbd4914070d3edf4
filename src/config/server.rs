use super::parse_env;
use axum::http::HeaderValue;
use std::env;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The only origin allowed to make cross-origin (credentialed) requests.
    pub cors_origin: HeaderValue,
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("PORT", 8000);

        let raw_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = parse_origin(&raw_origin)?;

        let json_logs = env::var("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            cors_origin,
            json_logs,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_origin(raw: &str) -> anyhow::Result<HeaderValue> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed == "*" {
        return Err(anyhow::anyhow!(
            "CORS_ORIGIN must name a single origin, got '{}'",
            raw
        ));
    }
    trimmed
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS_ORIGIN '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origin_accepts_single_origin() {
        let origin = parse_origin("http://192.168.0.3:3000").unwrap();
        assert_eq!(origin, "http://192.168.0.3:3000");
    }

    #[test]
    fn parse_origin_strips_trailing_slash() {
        let origin = parse_origin(" http://localhost:3000/ ").unwrap();
        assert_eq!(origin, "http://localhost:3000");
    }

    #[test]
    fn parse_origin_rejects_wildcard() {
        assert!(parse_origin("*").is_err());
        assert!(parse_origin("").is_err());
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let cfg = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            json_logs: false,
        };
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8000");
    }
}
