//! Natural-language summary of an analysis

use crate::features::classification::{EmotionClassification, GenreClassification};
use crate::features::raga::RagaDetection;

/// Centroid above which the summary calls the track bright (Hz)
const BRIGHT_CENTROID_HZ: f32 = 3000.0;

/// Centroid below which the summary calls the track warm (Hz)
const WARM_CENTROID_HZ: f32 = 1500.0;

/// Compose the explanation sentence by sentence
///
/// The raga is named only when its confidence is strictly above
/// `raga_threshold`.
///
/// # Example
///
/// ```
/// use loopify_analysis::analysis::explanation::compose_explanation;
/// use loopify_analysis::features::classification::{classify_emotion, classify_genre};
/// use loopify_analysis::features::raga::detect_raga;
/// use loopify_analysis::io::FeatureVector;
///
/// let features = FeatureVector::placeholder();
/// let text = compose_explanation(
///     "C Major",
///     120.0,
///     &detect_raga(&features),
///     &classify_emotion(&features),
///     &classify_genre(&features),
///     2200.0,
///     0.5,
/// );
/// assert!(text.starts_with("This track is in C Major with a tempo of approximately 120 BPM."));
/// ```
pub fn compose_explanation(
    scale_label: &str,
    tempo: f32,
    raga: &RagaDetection,
    emotion: &EmotionClassification,
    genre: &GenreClassification,
    spectral_centroid: f32,
    raga_threshold: f32,
) -> String {
    let mut parts = vec![format!(
        "This track is in {} with a tempo of approximately {} BPM.",
        scale_label,
        tempo.trunc() as i64
    )];

    if raga.confidence > raga_threshold {
        parts.push(format!(
            "The melodic patterns suggest characteristics of {} raga in Indian classical music.",
            raga.raga.name()
        ));
    }

    parts.push(format!(
        "The overall mood is {}, which is common in {} music.",
        emotion.emotion.name().to_lowercase(),
        genre.genre.name().to_lowercase()
    ));

    if spectral_centroid > BRIGHT_CENTROID_HZ {
        parts.push("The bright tonal quality indicates significant high-frequency content.".to_string());
    } else if spectral_centroid < WARM_CENTROID_HZ {
        parts.push("The warm tonal quality suggests emphasis on lower frequencies.".to_string());
    }

    parts.join(" ")
}
