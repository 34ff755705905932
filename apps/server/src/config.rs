use std::{net::SocketAddr, time::Duration};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;

/// Server configuration, read once at startup from `PL_*` environment
/// variables (with `.env` support).
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid PL_LISTEN_ADDR");
        let db_path = std::env::var("PL_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("PL_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("PL_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = match std::env::var("PL_JWT_SECRET") {
            Ok(raw) => decode_secret_key(&raw).expect("Invalid PL_JWT_SECRET"),
            Err(_) => {
                // Ephemeral secret: sessions won't survive a restart.
                tracing::warn!(
                    "PL_JWT_SECRET is not set; using an ephemeral secret, issued tokens will not survive a restart"
                );
                let mut bytes = [0u8; 32];
                rand::rngs::OsRng.fill_bytes(&mut bytes);
                bytes.to_vec()
            }
        };
        let token_ttl_secs: u64 = std::env::var("PL_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| (7 * 24 * 60 * 60).to_string())
            .parse()
            .unwrap_or(7 * 24 * 60 * 60);

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
        }
    }
}

/// Accepts a base64-encoded secret or a raw 32-byte ASCII string; either way
/// the decoded key must be exactly 32 bytes.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}
