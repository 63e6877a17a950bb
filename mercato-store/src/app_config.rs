use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub platform: PlatformConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlatformConfig {
    /// Brand name used on platform-fulfilled line items; such items bypass
    /// the packing gate.
    pub brand_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// From-address for the mail channel. Channel disabled when unset.
    #[serde(default)]
    pub sender_email: Option<String>,
    /// Registered sender id for the message channel. Channel disabled when
    /// unset.
    #[serde(default)]
    pub message_sender_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Then the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Then a local file that shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Finally the environment, e.g. MERCATO__SERVER__PORT=8080
            .add_source(config::Environment::with_prefix("MERCATO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
