use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|raw| match raw.parse() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("PORT value '{}' is not a valid port, using default", raw);
                        None
                    }
                })
                .unwrap_or(4000),
            allowed_origin: env::var("SIGNALING_ALLOWED_ORIGIN").unwrap_or_else(|_| {
                warn!("SIGNALING_ALLOWED_ORIGIN not set, allowing any origin");
                String::new()
            }),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origin.is_empty()
    }
}
