//! Per-frame quality metrics and their scored form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One sampled quality measurement at a single timestamp.
///
/// Metrics arrive pre-computed from the decoding/analysis stage: `blur_score`
/// is a Laplacian-variance sharpness value (higher = sharper), `brightness`
/// is mean pixel intensity on a 0-255 scale, `contrast` is the intensity
/// standard deviation, and `motion_score` is the mean absolute frame
/// difference against the previous sample (0.0 for the first sample).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameMetric {
    /// Seconds from the start of the asset
    pub timestamp: f64,

    /// Sharpness score, >= 0 (higher = sharper)
    pub blur_score: f64,

    /// Mean pixel intensity (0-255)
    pub brightness: f64,

    /// Intensity standard deviation, >= 0
    pub contrast: f64,

    /// Frame difference against the previous sample, >= 0
    pub motion_score: f64,
}

impl FrameMetric {
    /// Create a new frame metric.
    pub fn new(
        timestamp: f64,
        blur_score: f64,
        brightness: f64,
        contrast: f64,
        motion_score: f64,
    ) -> Self {
        Self {
            timestamp,
            blur_score,
            brightness,
            contrast,
            motion_score,
        }
    }
}

/// A frame metric extended with its derived quality score and flags.
///
/// Derived deterministically from exactly one [`FrameMetric`]; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredFrame {
    /// Seconds from the start of the asset
    pub timestamp: f64,

    /// Sharpness score, >= 0 (higher = sharper)
    pub blur_score: f64,

    /// Mean pixel intensity (0-255)
    pub brightness: f64,

    /// Intensity standard deviation, >= 0
    pub contrast: f64,

    /// Frame difference against the previous sample, >= 0
    pub motion_score: f64,

    /// Synthetic quality score in [0, 1]
    pub quality_score: f64,

    /// Brightness below the dark threshold
    pub is_dark: bool,

    /// Brightness above the bright threshold
    pub is_overexposed: bool,

    /// Sharpness below the blur threshold
    pub is_blurry: bool,

    /// Motion inside the rewarded band
    pub has_good_motion: bool,

    /// Motion above the excessive ceiling
    pub has_excessive_motion: bool,
}
