use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/siparhanud".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "siparhanud-secret-key-change-in-production".to_string());

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid BIND_ADDR value"))?;

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let config = Config::load().expect("config loads");
        assert!(config.jwt_expiration_hours > 0);
        assert!(!config.jwt_secret.is_empty());
    }
}
