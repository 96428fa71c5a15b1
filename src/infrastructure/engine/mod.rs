mod mock_engine;
mod process_engine;

pub use mock_engine::{MockEngineBuilder, MockSeparationEngine};
pub use process_engine::{ProcessEngineBuilder, ProcessEngineConfig, ProcessSeparationEngine};
