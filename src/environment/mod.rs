//! Environment detection.
//!
//! Determines which declared environment (development, staging,
//! production, or custom) the current request belongs to. The priority
//! chain is:
//!
//! 1. Explicit override (`--env` flag or the configured override variable)
//! 2. Weighted scoring of every declared environment
//! 3. Fallback to "development"

pub mod detection;
pub mod rule;
pub mod scorer;

pub use detection::{detect, Detection, DetectionSource, EnvironmentDetector, FALLBACK_ENVIRONMENT};
pub use scorer::{EnvironmentScore, ScoreBoard, ScoreBreakdown};
