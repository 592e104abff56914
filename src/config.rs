//! Server settings from the environment.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), ADMIN_TOKEN (unset = admin
//! routes open), BRACKET_SEED (u64, fixes the shuffle for reproducible runs).
//! Log filtering uses RUST_LOG via env_logger.

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_token: Option<String>,
    pub bracket_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_token: None,
            bracket_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = non_empty("HOST").unwrap_or_else(default_host);
        let port = match non_empty("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}, using {}", raw, default_port());
                default_port()
            }),
            None => default_port(),
        };
        let bracket_seed = non_empty("BRACKET_SEED").and_then(|raw| match raw.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                log::warn!("Ignoring invalid BRACKET_SEED {:?}", raw);
                None
            }
        });

        Self {
            host,
            port,
            admin_token: non_empty("ADMIN_TOKEN"),
            bracket_seed,
        }
    }
}
