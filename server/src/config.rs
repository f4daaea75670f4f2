//! Layered server configuration.
//!
//! Built-in defaults, then an optional `tasklist.toml` in the working
//! directory, then `TASKLIST__*` environment variables
//! (e.g. `TASKLIST__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub telemetry: TelemetrySettings,
    pub testing: TestingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    /// Emit log lines as JSON objects instead of human-readable text.
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TestingSettings {
    /// Expose `POST /test/reset`, which wipes every task.
    pub enable_reset: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(
            File::with_name("tasklist").required(false),
            environment(),
        )
    }

    fn load(
        file: File<FileSourceFile, FileFormat>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5111)?
            .set_default("database.url", "sqlite://tasks.db")?
            .set_default("database.max_connections", 5)?
            .set_default("telemetry.log_level", "info")?
            .set_default("telemetry.json", false)?
            .set_default("testing.enable_reset", false)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `TASKLIST__*` variables, with numbers and booleans parsed from text.
fn environment() -> Environment {
    Environment::with_prefix("TASKLIST")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// The production environment source, fed from `vars` instead of the process.
    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(source))
    }

    fn missing_file() -> File<FileSourceFile, FileFormat> {
        File::with_name("does-not-exist/tasklist").required(false)
    }

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::load(missing_file(), env(&[])).unwrap();
        assert_eq!(settings.bind_address(), "127.0.0.1:5111");
        assert_eq!(settings.database.url, "sqlite://tasks.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.telemetry.log_level, "info");
        assert!(!settings.telemetry.json);
        assert!(!settings.testing.enable_reset);
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let settings =
            Settings::load(missing_file(), env(&[("SERVER__PORT", "9000")])).unwrap();
        assert_eq!(settings.server.port, 5111);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::load(
            missing_file(),
            env(&[
                ("TASKLIST__SERVER__PORT", "8080"),
                ("TASKLIST__DATABASE__URL", "sqlite::memory:"),
                ("TASKLIST__TESTING__ENABLE_RESET", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert!(settings.testing.enable_reset);
    }
}
