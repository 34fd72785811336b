//! Example: Analyze many feature-vector files in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] [--json] <file1.json> <file2.json> ...
//!
//! Parallelism is across files. Each analysis reads only shared constant
//! tables, so workers never coordinate.

use loopify_analysis::{analyze_features, FeatureVector};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct ItemOut {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raga: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overall_confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn analyze_path(path: &str) -> ItemOut {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| format!("read failed: {e}"))
        .and_then(|json| FeatureVector::from_json(&json).map_err(|e| e.to_string()));

    match loaded {
        Ok(features) => {
            let res = analyze_features(&features);
            ItemOut {
                file: path.to_string(),
                scale: Some(res.scale),
                raga: Some(res.raga.raga.name().to_string()),
                emotion: Some(res.emotion.emotion.to_string()),
                genre: Some(res.genre.genre.to_string()),
                overall_confidence: Some(res.confidence.overall),
                error: None,
            }
        }
        Err(e) => ItemOut {
            file: path.to_string(),
            scale: None,
            raga: None,
            emotion: None,
            genre: None,
            overall_confidence: None,
            error: Some(e),
        },
    }
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] [--json] <file1.json> <file2.json> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one feature file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| paths.par_iter().map(|p| analyze_path(p)).collect());

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match &o.error {
            None => println!(
                "[{}/{}] {}: {} / {} / {} / {} (overall={:.3})",
                idx + 1,
                outs.len(),
                o.file,
                o.scale.as_deref().unwrap_or("-"),
                o.raga.as_deref().unwrap_or("-"),
                o.emotion.as_deref().unwrap_or("-"),
                o.genre.as_deref().unwrap_or("-"),
                o.overall_confidence.unwrap_or(0.0)
            ),
            Some(e) => println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), o.file, e),
        }
    }

    let ok = outs.iter().filter(|o| o.error.is_none()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
