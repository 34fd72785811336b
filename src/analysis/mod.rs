//! Analysis and result aggregation modules
//!
//! Combines all detector and classifier outputs into the final analysis:
//! - Confidence scoring
//! - Explanation text
//! - Result types
//! - Metadata

pub mod confidence;
pub mod explanation;
pub mod metadata;
pub mod result;
