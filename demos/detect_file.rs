//! Example: Detect redacted regions in a single audio file
//!
//! Usage:
//!   cargo run --release --example detect_file -- [--json] [--config config.json] <file>
//!
//! Prints one `start<TAB>end` line per segment, or the full detection result as
//! JSON with `--json`.

use redaction_dsp::io::decoder::decode_first_channel;
use redaction_dsp::io::writer::format_segments;
use redaction_dsp::{analyze_redactions, DetectionConfig};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut config_path: Option<PathBuf> = None;
    let mut path: Option<PathBuf> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--config" => {
                let v = args.first().ok_or("--config requires a value")?;
                config_path = Some(PathBuf::from(v));
                args.remove(0);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: detect_file [--json] [--config FILE] <audio file>\n\
                     \n\
                     --json          Emit the full detection result as JSON\n\
                     --config FILE   Detection parameters as JSON (missing fields use defaults)\n"
                );
                return Ok(());
            }
            _ => path = Some(PathBuf::from(a)),
        }
    }

    let Some(path) = path else {
        eprintln!("ERROR: Provide an audio file path. Use --help for usage.");
        std::process::exit(2);
    };

    let config = match config_path {
        Some(p) => serde_json::from_str::<DetectionConfig>(&std::fs::read_to_string(p)?)?,
        None => DetectionConfig::default(),
    };

    let waveform = decode_first_channel(&path)?;
    let result = analyze_redactions(&waveform.samples, waveform.sample_rate, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_segments(&result.segments));
    }

    eprintln!(
        "{}: {:.1}s, {:.1}% of frames masked, {} segments ({:.2}s redacted), {} candidates rejected, {:.1} ms",
        path.display(),
        result.metadata.duration_seconds,
        result.metadata.mask_coverage() * 100.0,
        result.segments.len(),
        result.redacted_seconds(),
        result.rejected_count(),
        result.metadata.processing_time_ms
    );

    Ok(())
}
