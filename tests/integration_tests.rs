//! Integration tests for the analysis engine

use loopify_analysis::features::chords::{assess_difficulty, build_timeline, Difficulty};
use loopify_analysis::features::classification::{Emotion, Genre};
use loopify_analysis::features::key::{detect_key, ScaleMode};
use loopify_analysis::features::raga::{detect_raga_from_chroma, Raga};
use loopify_analysis::{
    analyze_features, analyze_features_with_config, analyze_tonality, detect_chords, detect_extended_mode,
    detect_raga, get_chord_info, match_chord_from_chroma, summarize_tonality, AnalysisConfig, AnalysisError,
    AnalysisFlag, FeatureVector, KeyMode, PitchClass,
};
use std::path::PathBuf;

const C_MAJOR_CHROMA: [f32; 12] = [1.0, 0.2, 0.8, 0.2, 0.9, 0.7, 0.2, 0.9, 0.2, 0.7, 0.2, 0.3];

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn load_fixture(filename: &str) -> FeatureVector {
    let json = std::fs::read_to_string(fixture_path(filename)).expect("Failed to read fixture");
    FeatureVector::from_json(&json).expect("Fixture should decode")
}

/// Deterministic pseudo-random chroma in [0, 1)
fn chroma_from_seed(seed: u32) -> [f32; 12] {
    let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
    let mut chroma = [0.0f32; 12];
    for c in chroma.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *c = (state % 1000) as f32 / 1000.0;
    }
    chroma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_scenario() {
        let features = FeatureVector {
            chroma: Some(C_MAJOR_CHROMA.to_vec()),
            tempo: Some(120.0),
            ..Default::default()
        };

        let result = analyze_features(&features);

        assert_eq!(result.key.tonic, PitchClass::C);
        assert_eq!(result.key.mode, KeyMode::Major);
        assert_eq!(result.scale, "C Major");
        assert_eq!(result.chords.progression, ["C", "G", "Am", "F"]);

        let first = &result.chords.timeline[0];
        assert_eq!(first.chord, "C");
        assert_eq!(first.start_time, 0.0);
        assert_eq!(first.duration, 4.0);
        assert_eq!(first.notes, ["C", "E", "G"]);

        assert!(result.confidence.scale > 0.9);
        assert!(!result.confidence.flags.contains(&AnalysisFlag::NeutralChroma));
        assert!(!result.metadata.chroma_fallback);
    }

    #[test]
    fn test_malformed_chroma_scenario() {
        for chroma in [None, Some(vec![]), Some(vec![0.5, 0.1, 0.9]), Some(vec![1.0; 24])] {
            let features = FeatureVector {
                chroma,
                tempo: Some(120.0),
                duration: Some(180.0),
                ..Default::default()
            };

            let result = analyze_features(&features);

            assert_eq!(result.key.tonic, PitchClass::C);
            assert_eq!(result.key.mode, KeyMode::Major);
            assert!(result.confidence.scale.is_finite());
            assert!((0.0..=1.0).contains(&result.confidence.overall));
            assert_eq!(result.chords.timeline.len(), 45);
            assert!(result.confidence.flags.contains(&AnalysisFlag::NeutralChroma));
            assert!(result.confidence.flags.contains(&AnalysisFlag::WeakTonality));
            assert!(result.metadata.chroma_fallback);
            assert_eq!(result.metadata.warnings.len(), 1);
        }
    }

    #[test]
    fn test_non_numeric_chroma_json() {
        let features =
            FeatureVector::from_json(r#"{"chroma": ["a", "b"], "tempo": 120, "duration": 180}"#).unwrap();
        assert!(features.chroma.is_none());

        let result = analyze_features(&features);
        assert_eq!(result.key.tonic, PitchClass::C);
        assert!(result.metadata.chroma_fallback);
    }

    #[test]
    fn test_am_template_match() {
        let template = get_chord_info("Am").template;
        let matched = match_chord_from_chroma(&template);
        assert_eq!(matched.chord, "Am");
        assert!((matched.confidence - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fixture_front_end_keys() {
        let features = load_fixture("g_major_bright.json");
        assert_eq!(features.sample_rate, Some(44100));
        assert_eq!(features.mfcc_mean.as_ref().map(|m| m.len()), Some(13));

        let result = analyze_features(&features);

        assert_eq!(result.key.tonic, PitchClass::G);
        assert_eq!(result.key.mode, KeyMode::Major);
        assert_eq!(result.extended_mode.scale, "G Major");
        assert_eq!(result.raga.raga, Raga::Shankarabharanam);
        assert_eq!(result.raga.tonic, PitchClass::G);
        assert_eq!(result.chords.progression, ["G", "D", "Em", "C"]);
        assert_eq!(result.chords.difficulty, Difficulty::Beginner);
        // 60 / 128 * 8 = 3.75 s per chord over 60 s
        assert_eq!(result.chords.timeline.len(), 16);
        assert_eq!(result.chords.timeline[1].start_time, 3.75);
        assert_eq!(result.emotion.emotion, Emotion::Joyful);
        assert_eq!(result.genre.genre, Genre::Electronic);
        assert_eq!(result.features.rms_energy, 0.22);
        assert_eq!(result.metadata.sample_rate, Some(44100));
        assert!(result.metadata.warnings.is_empty());

        assert_eq!(
            result.explanation,
            "This track is in G Major with a tempo of approximately 128 BPM. \
             The melodic patterns suggest characteristics of Shankarabharanam raga in Indian classical music. \
             The overall mood is joyful, which is common in electronic music. \
             The bright tonal quality indicates significant high-frequency content."
        );
    }

    #[test]
    fn test_empty_feature_vector_uses_defaults() {
        let result = analyze_features(&FeatureVector::default());

        assert_eq!(result.tempo, 120.0);
        assert_eq!(result.chords.tempo, 120.0);
        // default duration 120 s
        assert_eq!(result.chords.timeline.len(), 30);
        assert_eq!(result.features.spectral_centroid, 2000.0);
        assert_eq!(result.features.zero_crossing_rate, 0.1);
        assert_eq!(result.features.rms_energy, 0.2);
        assert_eq!(result.metadata.sample_rate, None);
        assert!(result.metadata.tempo_fallback);
        assert!(result.confidence.flags.contains(&AnalysisFlag::DefaultTempo));
        assert_eq!(result.emotion.emotion, Emotion::Romantic);
        assert_eq!(result.genre.genre, Genre::Fusion);
    }

    #[test]
    fn test_invalid_tempo_is_replaced() {
        for tempo in [0.0, -90.0, f32::NAN, f32::INFINITY] {
            let features = FeatureVector {
                chroma: Some(C_MAJOR_CHROMA.to_vec()),
                tempo: Some(tempo),
                duration: Some(40.0),
                ..Default::default()
            };
            let result = analyze_features(&features);
            assert_eq!(result.tempo, 120.0);
            assert_eq!(result.chords.timeline.len(), 10);
            assert!(result.metadata.tempo_fallback);
        }
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let features = load_fixture("g_major_bright.json");
        let first = analyze_features(&features);
        let second = analyze_features(&features);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_parallel_analyses_agree() {
        let inputs: Vec<FeatureVector> = (0..8u32)
            .map(|seed| FeatureVector {
                chroma: Some(chroma_from_seed(seed).to_vec()),
                tempo: Some(80.0 + seed as f32 * 10.0),
                duration: Some(90.0),
                ..Default::default()
            })
            .collect();

        let sequential: Vec<_> = inputs.iter().map(analyze_features).collect();
        let parallel: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|features| scope.spawn(move || analyze_features(features)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_detector_ranges_over_many_inputs() {
        for seed in 0..200u32 {
            let chroma = chroma_from_seed(seed);

            let key = detect_key(&chroma);
            assert!((0.0..=1.0).contains(&key.confidence));
            assert!(key.key.tonic.index() < 12);

            let raga = detect_raga_from_chroma(&chroma);
            assert!(raga.confidence >= 0.2 && raga.confidence <= 1.0);
        }
    }

    #[test]
    fn test_timeline_invariants() {
        let progression: Vec<String> = ["Am", "F", "C", "G"].iter().map(|c| c.to_string()).collect();
        for (tempo, duration) in [(60.0, 30.0), (87.5, 200.0), (120.0, 180.0), (174.0, 400.0)] {
            let timeline = build_timeline(&progression, tempo, duration);
            assert!(!timeline.is_empty());
            assert_eq!(timeline[0].start_time, 0.0);
            for pair in timeline.windows(2) {
                assert!(pair[1].start_time > pair[0].start_time);
                assert_eq!(pair[1].duration, pair[0].duration);
            }
            let cap = f32::min(duration, 300.0);
            assert!(timeline.last().unwrap().start_time < cap);
        }
    }

    #[test]
    fn test_difficulty_monotonic_in_tier() {
        let rate = |chords: &[&str]| {
            let progression: Vec<String> = chords.iter().map(|c| c.to_string()).collect();
            assess_difficulty(&progression)
        };
        assert_eq!(rate(&["C", "G", "D", "A"]), Difficulty::Beginner);
        assert_eq!(rate(&["Am", "Em", "Dm", "F"]), Difficulty::Intermediate);
        assert_eq!(rate(&["C7", "G7", "Am7", "Cmaj7"]), Difficulty::Advanced);
        assert_eq!(rate(&["Bdim", "Cdim", "Caug"]), Difficulty::Expert);
        assert!(Difficulty::Beginner < Difficulty::Expert);
    }

    #[test]
    fn test_entry_points_agree_with_full_analysis() {
        let features = FeatureVector::placeholder();
        let result = analyze_features(&features);

        let tonality = analyze_tonality(&features);
        assert_eq!(tonality, result.tonality);
        assert_eq!(detect_extended_mode(&features), result.extended_mode);
        assert_eq!(detect_raga(&features), result.raga);
        assert_eq!(detect_chords(&features), result.chords);

        let summary = summarize_tonality(&features);
        assert_eq!(summary.key, PitchClass::C);
        assert_eq!(summary.mode, ScaleMode::Major);
        assert_eq!(summary.confidence, tonality.confidence.max(result.extended_mode.confidence));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalysisConfig {
            beats_per_bar: 0,
            ..AnalysisConfig::default()
        };
        let err = analyze_features_with_config(&FeatureVector::placeholder(), &config).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_overflowing_bar_layout_is_rejected() {
        let config = AnalysisConfig {
            beats_per_bar: u32::MAX,
            bars_per_chord: 2,
            ..AnalysisConfig::default()
        };
        let err = analyze_features_with_config(&FeatureVector::placeholder(), &config).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_extreme_tempo_analysis_terminates() {
        let features = FeatureVector {
            tempo: Some(1e20),
            duration: Some(1.0),
            ..FeatureVector::placeholder()
        };
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(analyze_features(&features));
        });
        let result = rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("analysis should finish");
        assert_eq!(result.chords.timeline.len(), 20);
        for pair in result.chords.timeline.windows(2) {
            assert!(pair[1].start_time > pair[0].start_time);
        }
    }

    #[test]
    fn test_raga_threshold_config() {
        let config = AnalysisConfig {
            raga_mention_threshold: 0.9,
            ..AnalysisConfig::default()
        };
        let result = analyze_features_with_config(&FeatureVector::placeholder(), &config).unwrap();
        assert!(!result.explanation.contains("raga"));
    }

    #[test]
    fn test_malformed_json_is_a_decoding_error() {
        let err = FeatureVector::from_json("{\"tempo\": ").unwrap_err();
        assert!(matches!(err, AnalysisError::DecodingError(_)));
    }

    #[test]
    fn test_result_json_shape() {
        let result = analyze_features(&FeatureVector::placeholder());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["key"]["tonic"], "C");
        assert_eq!(json["key"]["mode"], "major");
        assert_eq!(json["scale"], "C Major");
        assert_eq!(json["extendedMode"]["mode"], "major");
        assert_eq!(json["raga"]["raga"], "Shankarabharanam");
        assert_eq!(json["raga"]["westernEquivalent"], "major");
        assert_eq!(json["chords"]["timeline"][0]["startTime"], 0.0);
        assert_eq!(json["chords"]["difficulty"], "beginner");
        assert_eq!(json["emotion"]["emotion"], "Romantic");
        assert_eq!(json["genre"]["genre"], "Fusion");
        assert_eq!(json["features"]["spectralCentroid"], 2200.0);
        assert_eq!(json["metadata"]["algorithmVersion"], env!("CARGO_PKG_VERSION"));

        let decoded: loopify_analysis::AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, result);
    }
}
