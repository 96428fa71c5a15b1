use std::io::Cursor;

use async_trait::async_trait;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioProbe, ProbeError};
use crate::domain::TrackFacts;

/// Container-level probe. Reads headers only where the container declares a
/// frame count; otherwise demuxes packets without decoding them, which is
/// still far cheaper than a full decode.
pub struct SymphoniaProbe;

#[async_trait]
impl AudioProbe for SymphoniaProbe {
    async fn probe(&self, data: &[u8]) -> Result<TrackFacts, ProbeError> {
        probe_facts(data)
    }
}

fn probe_facts(data: &[u8]) -> Result<TrackFacts, ProbeError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let hint = Hint::new();
    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| ProbeError::UnrecognizedFormat(e.to_string()))?;

    let mut reader = probed.format;

    let track = reader.default_track().ok_or(ProbeError::NoAudioTrack)?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let sample_rate = params.sample_rate.ok_or(ProbeError::UnknownDuration)?;
    let channels = params.channels.map(|c| c.count()).unwrap_or(1);

    let duration_secs = match params.n_frames {
        Some(frames) => frames as f64 / f64::from(sample_rate),
        // Streams like raw MP3 do not declare a frame count up front; sum
        // packet durations instead.
        None => {
            let mut duration_ts: u64 = 0;
            loop {
                let packet = match reader.next_packet() {
                    Ok(p) => p,
                    Err(symphonia::core::errors::Error::IoError(ref e))
                        if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                    {
                        break;
                    }
                    Err(e) => return Err(ProbeError::DemuxFailed(e.to_string())),
                };
                if packet.track_id() == track_id {
                    duration_ts += packet.dur();
                }
            }
            match params.time_base {
                Some(tb) => {
                    let time = tb.calc_time(duration_ts);
                    time.seconds as f64 + time.frac
                }
                None => duration_ts as f64 / f64::from(sample_rate),
            }
        }
    };

    if duration_secs <= 0.0 {
        return Err(ProbeError::UnknownDuration);
    }

    Ok(TrackFacts {
        duration_secs,
        sample_rate,
        channels,
    })
}
