//! Input data contract
//!
//! The feature vector produced by the audio front-end, with JSON decoding and
//! point-of-use defaults.

pub mod feature_vector;

pub use feature_vector::FeatureVector;
