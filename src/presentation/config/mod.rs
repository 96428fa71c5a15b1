mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    EngineSettings, LimitSettings, LoggingSettings, RetentionSettings, ServerSettings, Settings,
    StorageSettings,
};
