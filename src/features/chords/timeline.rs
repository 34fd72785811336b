//! Chord timeline
//!
//! Lays a progression on the time axis: every chord lasts a fixed number of
//! bars at the track tempo, and the progression repeats until the track (or
//! the timeline cap) ends.

use super::catalog::chord_notes;
use crate::analysis::result::ChordEvent;
use crate::config::AnalysisConfig;

/// Shortest chord the timeline lays out (s)
pub const MIN_CHORD_SECONDS: f64 = 0.05;

/// Upper bound on emitted events, whatever the cap and tempo
pub const MAX_TIMELINE_EVENTS: usize = 10_000;

/// Seconds one chord lasts at `tempo` BPM
pub fn chord_duration(tempo: f32, config: &AnalysisConfig) -> f64 {
    let seconds_per_beat = 60.0 / tempo as f64;
    seconds_per_beat * config.beats_per_chord() as f64
}

/// Build a timeline with the default bar layout (4 beats per bar, 2 bars per
/// chord, 300 s cap)
///
/// # Example
///
/// ```
/// use loopify_analysis::features::chords::build_timeline;
///
/// let progression: Vec<String> = ["C", "G", "Am", "F"].iter().map(|c| c.to_string()).collect();
/// let timeline = build_timeline(&progression, 120.0, 8.0);
/// assert_eq!(timeline.len(), 2);
/// assert_eq!(timeline[1].chord, "G");
/// assert_eq!(timeline[1].start_time, 4.0);
/// ```
pub fn build_timeline(progression: &[String], tempo: f32, duration: f32) -> Vec<ChordEvent> {
    build_timeline_with_config(progression, tempo, duration, &AnalysisConfig::default())
}

/// Build a timeline with an explicit bar layout and cap
///
/// Events start at 0 and cycle through `progression`. Event `i` starts at
/// `i * chord_duration`, and events are emitted while that start lies before
/// `min(duration, max_timeline_seconds)`. Start times and durations are
/// rounded to 2 decimals. Chords shorter than [`MIN_CHORD_SECONDS`] are
/// stretched to it, and at most [`MAX_TIMELINE_EVENTS`] events are emitted.
/// An empty progression or a tempo that gives no positive chord length
/// yields an empty timeline.
pub fn build_timeline_with_config(
    progression: &[String],
    tempo: f32,
    duration: f32,
    config: &AnalysisConfig,
) -> Vec<ChordEvent> {
    if progression.is_empty() {
        return Vec::new();
    }

    let step = chord_duration(tempo, config);
    if !step.is_finite() || step <= 0.0 {
        log::warn!("Tempo {} gives no usable chord length, timeline left empty", tempo);
        return Vec::new();
    }

    let end = (duration as f64).min(config.max_timeline_seconds as f64);
    if !end.is_finite() || end <= 0.0 {
        return Vec::new();
    }

    // Steps below one rounding unit would repeat start times
    let step = step.max(MIN_CHORD_SECONDS);
    let rounded_step = round2(step);
    let count = ((end / step).ceil() as usize).min(MAX_TIMELINE_EVENTS);

    let timeline: Vec<ChordEvent> = (0..count)
        .map(|i| {
            let chord = &progression[i % progression.len()];
            ChordEvent {
                chord: chord.clone(),
                start_time: round2(i as f64 * step),
                duration: rounded_step,
                notes: chord_notes(chord),
            }
        })
        .collect();

    log::debug!(
        "Timeline: {} events of {:.2}s up to {:.2}s",
        timeline.len(),
        step,
        end
    );

    timeline
}

fn round2(value: f64) -> f32 {
    ((value * 100.0).round() / 100.0) as f32
}
