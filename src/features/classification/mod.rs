//! Rule-based classification
//!
//! Emotion and genre labels from tempo, brightness and energy.

pub mod descriptors;
pub mod emotion;
pub mod genre;

pub use descriptors::TimbreDescriptors;
pub use emotion::{
    classify_emotion, classify_emotion_from_descriptors, Emotion, EmotionClassification,
    EmotionProfile, EMOTION_PROFILES,
};
pub use genre::{
    classify_genre, classify_genre_from_descriptors, Genre, GenreClassification, GenreProfile,
    TimbrePattern, GENRE_PROFILES,
};
