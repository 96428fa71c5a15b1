/// Technical facts about an uploaded track, as reported by the audio probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFacts {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: usize,
}
