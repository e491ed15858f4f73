//! Audio decoding using Symphonia
//!
//! Decodes any container/codec Symphonia was built with and keeps the first
//! channel. Integer formats are normalized to [-1.0, 1.0].

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::DetectionError;
use crate::io::source::Waveform;
use crate::preprocessing::channel_mixer::first_channel;

fn decoding_error(context: &str, err: SymphoniaError) -> DetectionError {
    DetectionError::DecodingError(format!("{}: {}", context, err))
}

/// Decode an audio file to its first channel
///
/// # Arguments
///
/// * `path` - Path to audio file
///
/// # Returns
///
/// `Waveform` holding the first channel and the track's sample rate
///
/// # Errors
///
/// Returns `DetectionError::IoError` if the file cannot be opened and
/// `DetectionError::DecodingError` if no decodable audio track is found
pub fn decode_first_channel(path: &Path) -> Result<Waveform, DetectionError> {
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)
        .map_err(|e| DetectionError::IoError(format!("{}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decoding_error("unsupported format", e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| {
            DetectionError::DecodingError("No supported audio tracks found".to_string())
        })?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
        DetectionError::DecodingError("Track does not declare a sample rate".to_string())
    })?;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decoding_error("unsupported codec", e))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decoding_error("reading packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let channels = spec.channels.count();
                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                samples.extend(first_channel(buf.samples(), channels)?);
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                // Corrupted packets are skipped
                skipped_packets += 1;
                log::warn!("Skipping undecodable packet: {}", msg);
            }
            Err(e) => return Err(decoding_error("decoding packet", e)),
        }
    }

    log::debug!(
        "Decoded {} samples at {} Hz ({} packets skipped)",
        samples.len(),
        sample_rate,
        skipped_packets
    );

    Ok(Waveform::new(samples, sample_rate))
}
