use crate::presentation::config::Environment;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: Environment, json_format: bool) -> Self {
        Self {
            environment,
            json_format,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::from_env(),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}
