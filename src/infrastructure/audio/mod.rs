mod mock_probe;
mod symphonia_probe;

pub use mock_probe::MockAudioProbe;
pub use symphonia_probe::SymphoniaProbe;
