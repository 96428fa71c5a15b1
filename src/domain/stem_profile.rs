use std::fmt;

/// Separation configuration accepted by the engine. The allow-list is fixed:
/// heavier profiles cost proportionally more engine memory, and only one
/// engine instance may be resident at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StemProfile {
    TwoStems,
    FourStems,
}

impl StemProfile {
    /// Normalizes a client-supplied stem parameter. Unsupported values are
    /// downgraded to the nearest supported, cheaper profile rather than
    /// rejected: a five-stem request runs as four stems, anything
    /// unrecognized runs as the two-stem default.
    pub fn from_param(raw: &str) -> Self {
        match raw.trim() {
            "4" | "4stems" | "5" | "5stems" => Self::FourStems,
            _ => Self::TwoStems,
        }
    }

    pub fn stem_count(&self) -> usize {
        match self {
            Self::TwoStems => 2,
            Self::FourStems => 4,
        }
    }

    /// Artifact names the engine produces for this profile.
    pub fn stem_names(&self) -> &'static [&'static str] {
        match self {
            Self::TwoStems => &["vocals.wav", "accompaniment.wav"],
            Self::FourStems => &["vocals.wav", "drums.wav", "bass.wav", "other.wav"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoStems => "2stems",
            Self::FourStems => "4stems",
        }
    }
}

impl Default for StemProfile {
    fn default() -> Self {
        Self::TwoStems
    }
}

impl fmt::Display for StemProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
