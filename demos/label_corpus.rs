//! Example: Write redaction label files for a numbered corpus in parallel
//!
//! Usage:
//!   cargo run --release --example label_corpus -- [--wav-dir DIR] [--out-dir DIR]
//!       [--overrides FILE] [--prefix SBC] [--first 1] [--last 60] [--jobs N]
//!
//! For every recording `<prefix><NNN>` in `[first, last]` this reads
//! `<wav-dir>/<id>.wav`, detects filtered regions, applies the manual override
//! table and writes `<out-dir>/<id>.txt` (one `start<TAB>end` line per segment).
//!
//! Notes:
//! - Parallelism is across recordings. Each recording is still processed single-threaded.
//! - Recordings marked `skip` in the override table get an empty label file without
//!   being decoded.

use rayon::prelude::*;
use redaction_dsp::io::writer::write_segments;
use redaction_dsp::{
    detect_waveform, DetectionConfig, DirectorySource, OverrideTable, WaveformSource,
};
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn default_overrides() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("sbc_overrides.json")
}

struct ItemOut {
    id: String,
    segments: usize,
    skipped: bool,
    processing_ms: f64,
    error: Option<String>,
}

fn next_value(args: &mut Vec<String>, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    if args.is_empty() {
        return Err(format!("{} requires a value", flag).into());
    }
    Ok(args.remove(0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut wav_dir = PathBuf::from("./../WAV/");
    let mut out_dir = PathBuf::from("./redactions");
    let mut overrides_path = default_overrides();
    let mut prefix = "SBC".to_string();
    let mut first: u32 = 1;
    let mut last: u32 = 60;
    let mut jobs: Option<usize> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--wav-dir" => wav_dir = PathBuf::from(next_value(&mut args, &a)?),
            "--out-dir" => out_dir = PathBuf::from(next_value(&mut args, &a)?),
            "--overrides" => overrides_path = PathBuf::from(next_value(&mut args, &a)?),
            "--prefix" => prefix = next_value(&mut args, &a)?,
            "--first" => first = next_value(&mut args, &a)?.parse()?,
            "--last" => last = next_value(&mut args, &a)?.parse()?,
            "--jobs" => jobs = Some(std::cmp::max(1, next_value(&mut args, &a)?.parse()?)),
            "--help" | "-h" => {
                eprintln!(
                    "Usage: label_corpus [--wav-dir DIR] [--out-dir DIR] [--overrides FILE]\n\
                     \x20                   [--prefix SBC] [--first 1] [--last 60] [--jobs N]\n\
                     \n\
                     --wav-dir DIR     Directory holding <id>.wav (default: ./../WAV/)\n\
                     --out-dir DIR     Directory for <id>.txt label files (default: ./redactions)\n\
                     --overrides FILE  Override table JSON (default: demos/sbc_overrides.json)\n\
                     --jobs N          Parallel workers (default: CPU-1)\n"
                );
                return Ok(());
            }
            other => {
                eprintln!("ERROR: Unknown argument {:?}. Use --help for usage.", other);
                std::process::exit(2);
            }
        }
    }

    if first > last {
        eprintln!("ERROR: --first ({}) is greater than --last ({})", first, last);
        std::process::exit(2);
    }

    std::fs::create_dir_all(&out_dir)?;
    let table = OverrideTable::from_path(&overrides_path)?;
    let source = DirectorySource::new(&wav_dir);
    let config = DetectionConfig::default();

    let ids: Vec<String> = (first..=last).map(|i| format!("{}{:03}", prefix, i)).collect();
    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!(
        "Labeling {} recordings from {}, jobs={}",
        ids.len(),
        source.dir().display(),
        jobs
    );

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        ids.par_iter()
            .map(|id| {
                let started = Instant::now();
                let label_path = out_dir.join(format!("{}.txt", id));

                let result = if table.is_skipped(id) {
                    write_segments(&label_path, &[]).map(|_| (0, true))
                } else {
                    source
                        .load(id)
                        .and_then(|waveform| detect_waveform(&waveform, &config))
                        .and_then(|detected| {
                            let segments = table.apply(id, detected);
                            write_segments(&label_path, &segments).map(|_| (segments.len(), false))
                        })
                };

                let processing_ms = started.elapsed().as_secs_f64() * 1000.0;
                match result {
                    Ok((segments, skipped)) => ItemOut {
                        id: id.clone(),
                        segments,
                        skipped,
                        processing_ms,
                        error: None,
                    },
                    Err(e) => ItemOut {
                        id: id.clone(),
                        segments: 0,
                        skipped: false,
                        processing_ms,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        match &o.error {
            None if o.skipped => {
                println!("[{}/{}] {}: skipped (no filtered regions)", idx + 1, outs.len(), o.id)
            }
            None => println!(
                "[{}/{}] {}: {} segments, time={:.0}ms",
                idx + 1,
                outs.len(),
                o.id,
                o.segments,
                o.processing_ms
            ),
            Some(e) => println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), o.id, e),
        }
    }

    let failed = outs.iter().filter(|o| o.error.is_some()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        outs.len() - failed,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
