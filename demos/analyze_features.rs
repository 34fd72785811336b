//! Example: Analyze a feature-vector JSON file
//!
//! Usage: `cargo run --example analyze_features -- path/to/features.json`
//!
//! Without a path the neutral placeholder vector is analysed. Set
//! `RUST_LOG=debug` to see per-detector scores.

use loopify_analysis::{analyze_features, FeatureVector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let features = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            FeatureVector::from_json(&json)?
        }
        None => {
            eprintln!("No feature file given; using the placeholder vector");
            FeatureVector::placeholder()
        }
    };

    let result = analyze_features(&features);

    // Print summary
    eprintln!("Analysis Results:");
    eprintln!("  Scale: {} (confidence: {:.2})", result.scale, result.confidence.scale);
    eprintln!(
        "  Mode: {} (confidence: {:.2})",
        result.extended_mode.scale, result.extended_mode.confidence
    );
    eprintln!("  Raga: {} (confidence: {:.2})", result.raga.raga.name(), result.raga.confidence);
    eprintln!("  Chords: {} ({})", result.chords.progression.join(" - "), result.chords.difficulty);
    eprintln!("  Emotion / genre: {} / {}", result.emotion.emotion, result.genre.genre);
    eprintln!(
        "  Overall: {:.2} ({})",
        result.confidence.overall,
        result.confidence.confidence_level()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
