use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, sourced from the environment. Everything has a
/// workable default so a bare `demixer` starts locally.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub limits: LimitSettings,
    pub storage: StorageSettings,
    pub retention: RetentionSettings,
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LimitSettings {
    /// Uploads measured above this are rejected at admission.
    pub max_duration_secs: f64,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub artifact_root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RetentionSettings {
    pub capacity: usize,
    pub floor: usize,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub binary: PathBuf,
    pub model_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub json_format: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("HOST", "0.0.0.0"),
                port: env_parse("PORT", 3000),
            },
            limits: LimitSettings {
                max_duration_secs: env_parse("MAX_DURATION_SECS", 600.0),
            },
            storage: StorageSettings {
                artifact_root: PathBuf::from(env_or("ARTIFACT_ROOT", "data/jobs")),
            },
            retention: RetentionSettings {
                capacity: env_parse("RETENTION_CAPACITY", 100),
                floor: env_parse("RETENTION_FLOOR", 50),
            },
            engine: EngineSettings {
                binary: PathBuf::from(env_or("SEPARATOR_BIN", "demucs")),
                model_dir: PathBuf::from(env_or("SEPARATOR_MODEL_DIR", "models")),
            },
            logging: LoggingSettings {
                json_format: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
