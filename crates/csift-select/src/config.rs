//! Configuration for scoring, selection, and tagging.
//!
//! Every threshold, band, penalty, and bonus in the pipeline is a named
//! field here. The short-run absorption and long-run split behaviors are
//! heuristics, and these are the knobs most likely to need tuning per
//! dataset. All values are validated up front; nothing is processed on an
//! invalid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SelectError, SelectResult};

/// Per-frame scoring thresholds and weights.
///
/// Scoring starts from a 1.0 baseline, applies every matching penalty or
/// bonus, and clamps to [0, 1]. The brightness bands must not overlap:
/// dark < dim <= good-exposure low < good-exposure high <= bright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Sharpness below this is flagged blurry (Laplacian-variance scale).
    ///
    /// - 50-60: only badly smeared frames are penalized
    /// - Default (80): soft-focus and motion-blurred frames flagged
    /// - 120+: demands tripod-sharp footage
    pub blur_threshold: f64,

    /// Brightness below this is flagged dark.
    pub dark_threshold: f64,

    /// Brightness below this (but not dark) takes the dim penalty.
    pub dim_threshold: f64,

    /// Brightness above this is flagged overexposed.
    pub bright_threshold: f64,

    /// Contrast below this takes the low-contrast penalty (lens covered,
    /// fog, haze).
    pub contrast_threshold: f64,

    /// Lower edge of the rewarded motion band (exclusive).
    pub good_motion_min: f64,

    /// Upper edge of the rewarded motion band (exclusive).
    pub good_motion_max: f64,

    /// Motion above this is flagged excessive (shake, whip pans).
    pub excessive_motion_min: f64,

    /// Lower edge of the rewarded exposure band (exclusive).
    pub good_exposure_min: f64,

    /// Upper edge of the rewarded exposure band (exclusive).
    pub good_exposure_max: f64,

    /// Contrast floor for the exposure bonus; a flat frame in the right
    /// brightness band is not well exposed.
    pub good_exposure_contrast: f64,

    /// Penalty for a blurry frame.
    pub blur_penalty: f64,

    /// Penalty for a dark frame.
    pub dark_penalty: f64,

    /// Penalty for a dim (not dark) frame.
    pub dim_penalty: f64,

    /// Penalty for an overexposed frame.
    pub overexposure_penalty: f64,

    /// Penalty for a low-contrast frame.
    pub low_contrast_penalty: f64,

    /// Penalty for excessive motion.
    pub excessive_motion_penalty: f64,

    /// Bonus for motion inside the rewarded band.
    pub good_motion_bonus: f64,

    /// Bonus for brightness inside the rewarded band with adequate contrast.
    pub good_exposure_bonus: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            blur_threshold: 80.0,
            dark_threshold: 40.0,
            dim_threshold: 60.0,
            bright_threshold: 230.0,
            contrast_threshold: 15.0,
            good_motion_min: 2.0,
            good_motion_max: 20.0,
            excessive_motion_min: 30.0,
            good_exposure_min: 80.0,
            good_exposure_max: 180.0,
            good_exposure_contrast: 30.0,
            blur_penalty: 0.5,
            dark_penalty: 0.6,
            dim_penalty: 0.2,
            overexposure_penalty: 0.4,
            low_contrast_penalty: 0.5,
            excessive_motion_penalty: 0.2,
            good_motion_bonus: 0.1,
            good_exposure_bonus: 0.1,
        }
    }
}

impl ScorerConfig {
    /// Builder-style setter for the blur threshold.
    pub fn with_blur_threshold(mut self, threshold: f64) -> Self {
        self.blur_threshold = threshold.max(0.0);
        self
    }

    /// Validate threshold orderings and weight signs.
    pub fn validate(&self) -> SelectResult<()> {
        let fields = [
            ("blur_threshold", self.blur_threshold),
            ("dark_threshold", self.dark_threshold),
            ("dim_threshold", self.dim_threshold),
            ("bright_threshold", self.bright_threshold),
            ("contrast_threshold", self.contrast_threshold),
            ("good_motion_min", self.good_motion_min),
            ("good_motion_max", self.good_motion_max),
            ("excessive_motion_min", self.excessive_motion_min),
            ("good_exposure_min", self.good_exposure_min),
            ("good_exposure_max", self.good_exposure_max),
            ("good_exposure_contrast", self.good_exposure_contrast),
            ("blur_penalty", self.blur_penalty),
            ("dark_penalty", self.dark_penalty),
            ("dim_penalty", self.dim_penalty),
            ("overexposure_penalty", self.overexposure_penalty),
            ("low_contrast_penalty", self.low_contrast_penalty),
            ("excessive_motion_penalty", self.excessive_motion_penalty),
            ("good_motion_bonus", self.good_motion_bonus),
            ("good_exposure_bonus", self.good_exposure_bonus),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if self.dark_threshold > self.dim_threshold {
            return Err(SelectError::invalid_config(format!(
                "dark_threshold ({}) must not exceed dim_threshold ({})",
                self.dark_threshold, self.dim_threshold
            )));
        }
        if self.dim_threshold > self.good_exposure_min {
            return Err(SelectError::invalid_config(format!(
                "dim_threshold ({}) must not exceed good_exposure_min ({})",
                self.dim_threshold, self.good_exposure_min
            )));
        }
        if self.good_exposure_min >= self.good_exposure_max {
            return Err(SelectError::invalid_config(format!(
                "good_exposure_min ({}) must be below good_exposure_max ({})",
                self.good_exposure_min, self.good_exposure_max
            )));
        }
        if self.good_exposure_max > self.bright_threshold {
            return Err(SelectError::invalid_config(format!(
                "good_exposure_max ({}) must not exceed bright_threshold ({})",
                self.good_exposure_max, self.bright_threshold
            )));
        }
        if self.good_motion_min >= self.good_motion_max {
            return Err(SelectError::invalid_config(format!(
                "good_motion_min ({}) must be below good_motion_max ({})",
                self.good_motion_min, self.good_motion_max
            )));
        }
        if self.good_motion_max > self.excessive_motion_min {
            return Err(SelectError::invalid_config(format!(
                "good_motion_max ({}) must not exceed excessive_motion_min ({})",
                self.good_motion_max, self.excessive_motion_min
            )));
        }

        Ok(())
    }
}

/// Run partitioning and duration policy for the segment selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Frames scoring below this never enter a run.
    ///
    /// - 0.2: keeps marginal footage, more but weaker segments
    /// - Default (0.3): drops frames carrying more than one major penalty
    /// - 0.5+: only clean footage survives
    pub min_confidence: f64,

    /// Shortest emitted segment in seconds; shorter sub-runs are dropped
    /// (or absorbed, where no scene cut intervenes).
    pub min_segment_duration: f64,

    /// Longest emitted segment in seconds; longer sub-runs are split.
    pub max_segment_duration: f64,

    /// Spacing of the sampled metrics in seconds. A segment's end extends
    /// one interval past its last member frame.
    pub sample_interval: f64,

    /// How far below the window mean a quality dip must sit before the
    /// long-run splitter prefers it over a fixed cut at the maximum.
    pub split_score_drop: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            min_segment_duration: 5.0,
            max_segment_duration: 25.0,
            sample_interval: 1.0,
            split_score_drop: 0.05,
        }
    }
}

impl SelectorConfig {
    /// Stricter selection: higher confidence gate, tighter durations.
    pub fn strict() -> Self {
        Self {
            min_confidence: 0.5,
            min_segment_duration: 8.0,
            max_segment_duration: 20.0,
            ..Default::default()
        }
    }

    /// Lenient selection: keeps marginal footage and longer cuts.
    pub fn lenient() -> Self {
        Self {
            min_confidence: 0.2,
            min_segment_duration: 3.0,
            max_segment_duration: 30.0,
            ..Default::default()
        }
    }

    /// Builder-style setter for the confidence gate.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the duration bounds.
    pub fn with_duration_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_segment_duration = min;
        self.max_segment_duration = max;
        self
    }

    /// Builder-style setter for the sampling interval.
    pub fn with_sample_interval(mut self, interval: f64) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Validate duration and threshold invariants.
    pub fn validate(&self) -> SelectResult<()> {
        if !self.min_confidence.is_finite() || !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(SelectError::invalid_config(format!(
                "min_confidence ({}) must lie in [0, 1]",
                self.min_confidence
            )));
        }
        if !self.min_segment_duration.is_finite() || self.min_segment_duration <= 0.0 {
            return Err(SelectError::invalid_config(format!(
                "min_segment_duration ({}) must be positive",
                self.min_segment_duration
            )));
        }
        if !self.max_segment_duration.is_finite()
            || self.max_segment_duration <= self.min_segment_duration
        {
            return Err(SelectError::invalid_config(format!(
                "max_segment_duration ({}) must exceed min_segment_duration ({})",
                self.max_segment_duration, self.min_segment_duration
            )));
        }
        if !self.sample_interval.is_finite() || self.sample_interval <= 0.0 {
            return Err(SelectError::invalid_config(format!(
                "sample_interval ({}) must be positive",
                self.sample_interval
            )));
        }
        if self.sample_interval > self.max_segment_duration {
            return Err(SelectError::invalid_config(format!(
                "sample_interval ({}) must not exceed max_segment_duration ({})",
                self.sample_interval, self.max_segment_duration
            )));
        }
        if !self.split_score_drop.is_finite() || self.split_score_drop < 0.0 {
            return Err(SelectError::invalid_config(format!(
                "split_score_drop ({}) must be non-negative",
                self.split_score_drop
            )));
        }
        Ok(())
    }
}

/// Segment tagging thresholds.
///
/// Deliberately decoupled from [`ScorerConfig`]: the tagger classifies
/// aggregates, not frames, and its bands may be tuned independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Average motion below this reads as a static shot.
    pub static_motion_max: f64,

    /// Average motion below this (but not static) reads as a slow pan.
    pub slow_pan_max: f64,

    /// Average motion at or above this reads as fast motion.
    pub fast_motion_min: f64,

    /// Minimum duration for the opening segment to count as an
    /// establishing shot.
    pub establishing_min_duration: f64,

    /// How much the last third's mean motion must exceed the first third's
    /// to count as a reveal.
    pub reveal_motion_delta: f64,

    /// Confidence at or above this earns the high-quality tag.
    pub high_quality_min: f64,

    /// Lower edge of the good-exposure band (exclusive).
    pub good_exposure_min: f64,

    /// Upper edge of the good-exposure band (exclusive).
    pub good_exposure_max: f64,

    /// Average brightness below this earns the low-light tag.
    pub low_light_max: f64,

    /// Average sharpness above this earns the very-sharp tag.
    pub very_sharp_min: f64,

    /// Average sharpness above this (but not very sharp) earns the clear tag.
    pub clear_min: f64,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            static_motion_max: 1.0,
            slow_pan_max: 5.0,
            fast_motion_min: 15.0,
            establishing_min_duration: 10.0,
            reveal_motion_delta: 2.0,
            high_quality_min: 0.8,
            good_exposure_min: 80.0,
            good_exposure_max: 180.0,
            low_light_max: 40.0,
            very_sharp_min: 200.0,
            clear_min: 100.0,
        }
    }
}

impl TaggerConfig {
    /// Validate band orderings.
    pub fn validate(&self) -> SelectResult<()> {
        let fields = [
            ("static_motion_max", self.static_motion_max),
            ("slow_pan_max", self.slow_pan_max),
            ("fast_motion_min", self.fast_motion_min),
            ("establishing_min_duration", self.establishing_min_duration),
            ("reveal_motion_delta", self.reveal_motion_delta),
            ("good_exposure_min", self.good_exposure_min),
            ("good_exposure_max", self.good_exposure_max),
            ("low_light_max", self.low_light_max),
            ("very_sharp_min", self.very_sharp_min),
            ("clear_min", self.clear_min),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !self.high_quality_min.is_finite() || !(0.0..=1.0).contains(&self.high_quality_min) {
            return Err(SelectError::invalid_config(format!(
                "high_quality_min ({}) must lie in [0, 1]",
                self.high_quality_min
            )));
        }
        if self.static_motion_max > self.slow_pan_max {
            return Err(SelectError::invalid_config(format!(
                "static_motion_max ({}) must not exceed slow_pan_max ({})",
                self.static_motion_max, self.slow_pan_max
            )));
        }
        if self.slow_pan_max > self.fast_motion_min {
            return Err(SelectError::invalid_config(format!(
                "slow_pan_max ({}) must not exceed fast_motion_min ({})",
                self.slow_pan_max, self.fast_motion_min
            )));
        }
        if self.good_exposure_min >= self.good_exposure_max {
            return Err(SelectError::invalid_config(format!(
                "good_exposure_min ({}) must be below good_exposure_max ({})",
                self.good_exposure_min, self.good_exposure_max
            )));
        }
        if self.clear_min > self.very_sharp_min {
            return Err(SelectError::invalid_config(format!(
                "clear_min ({}) must not exceed very_sharp_min ({})",
                self.clear_min, self.very_sharp_min
            )));
        }
        Ok(())
    }
}

/// Combined configuration for the full pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectConfig {
    pub scorer: ScorerConfig,
    pub selector: SelectorConfig,
    pub tagger: TaggerConfig,
}

impl SelectConfig {
    /// Validate all three component configurations.
    pub fn validate(&self) -> SelectResult<()> {
        self.scorer.validate()?;
        self.selector.validate()?;
        self.tagger.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SelectConfig::default().validate().is_ok());
        assert!(SelectorConfig::strict().validate().is_ok());
        assert!(SelectorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_duration_bounds_rejected() {
        let config = SelectorConfig::default().with_duration_bounds(10.0, 8.0);
        assert!(config.validate().is_err());

        let config = SelectorConfig::default().with_duration_bounds(0.0, 25.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_confidence_clamped_and_checked() {
        let config = SelectorConfig::default().with_min_confidence(1.5);
        assert!((config.min_confidence - 1.0).abs() < f64::EPSILON);

        let mut config = SelectorConfig::default();
        config.min_confidence = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlapping_brightness_bands_rejected() {
        let mut config = ScorerConfig::default();
        config.dim_threshold = 100.0; // overlaps the good-exposure band
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_motion_band_ordering_rejected() {
        let mut config = ScorerConfig::default();
        config.good_motion_max = 40.0; // past the excessive ceiling
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let mut config = ScorerConfig::default();
        config.blur_penalty = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tagger_band_ordering_rejected() {
        let mut config = TaggerConfig::default();
        config.slow_pan_max = 20.0; // past fast_motion_min
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_interval_bounds() {
        let config = SelectorConfig::default().with_sample_interval(0.0);
        assert!(config.validate().is_err());

        let config = SelectorConfig::default().with_sample_interval(30.0);
        assert!(config.validate().is_err());
    }
}
