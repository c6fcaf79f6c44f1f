//! Frame scoring: additive penalties and bonuses over a 1.0 baseline.
//!
//! Each frame is scored independently of every other frame except for a
//! single lookback at the previous raw metric's motion value, so a batch can
//! be scored serially or in parallel with identical results.

use rayon::prelude::*;
use tracing::debug;

use csift_models::{FrameMetric, ScoredFrame};

use crate::config::ScorerConfig;
use crate::error::{SelectError, SelectResult};

/// Score a single frame.
///
/// Pure function of its inputs. `previous_motion` is the raw motion value of
/// the adjacent earlier sample; `None` marks a frame with no predecessor,
/// whose frame-diff motion is meaningless, so neither motion flag nor any
/// motion bonus/penalty applies to it.
pub fn score_frame(
    metric: &FrameMetric,
    previous_motion: Option<f64>,
    config: &ScorerConfig,
) -> ScoredFrame {
    let mut score = 1.0;

    let is_blurry = metric.blur_score < config.blur_threshold;
    if is_blurry {
        score -= config.blur_penalty;
    }

    // Dark wins over dim; the bands cannot overlap the exposure bonus band.
    let is_dark = metric.brightness < config.dark_threshold;
    if is_dark {
        score -= config.dark_penalty;
    } else if metric.brightness < config.dim_threshold {
        score -= config.dim_penalty;
    }

    let is_overexposed = metric.brightness > config.bright_threshold;
    if is_overexposed {
        score -= config.overexposure_penalty;
    }

    if metric.contrast < config.contrast_threshold {
        score -= config.low_contrast_penalty;
    }

    let (has_good_motion, has_excessive_motion) = match previous_motion {
        Some(_) => (
            metric.motion_score > config.good_motion_min
                && metric.motion_score < config.good_motion_max,
            metric.motion_score > config.excessive_motion_min,
        ),
        None => (false, false),
    };
    if has_good_motion {
        score += config.good_motion_bonus;
    }
    if has_excessive_motion {
        score -= config.excessive_motion_penalty;
    }

    if metric.brightness > config.good_exposure_min
        && metric.brightness < config.good_exposure_max
        && metric.contrast > config.good_exposure_contrast
    {
        score += config.good_exposure_bonus;
    }

    ScoredFrame {
        timestamp: metric.timestamp,
        blur_score: metric.blur_score,
        brightness: metric.brightness,
        contrast: metric.contrast,
        motion_score: metric.motion_score,
        quality_score: score.clamp(0.0, 1.0),
        is_dark,
        is_overexposed,
        is_blurry,
        has_good_motion,
        has_excessive_motion,
    }
}

/// Score an ordered metric sequence in a single pass.
///
/// Fails fast on an invalid configuration or a sequence whose timestamps are
/// not strictly increasing.
pub fn score_frames(
    frames: &[FrameMetric],
    config: &ScorerConfig,
) -> SelectResult<Vec<ScoredFrame>> {
    config.validate()?;
    ensure_strictly_increasing(frames.iter().map(|f| f.timestamp))?;

    Ok(frames
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            let previous_motion = i.checked_sub(1).map(|p| frames[p].motion_score);
            score_frame(metric, previous_motion, config)
        })
        .collect())
}

/// Score a metric sequence in parallel over the read-only raw slice.
///
/// Each frame's previous-motion lookup reads the adjacent raw metric, never
/// the scored output, so work ordering cannot affect results.
pub fn score_frames_parallel(
    frames: &[FrameMetric],
    config: &ScorerConfig,
) -> SelectResult<Vec<ScoredFrame>> {
    config.validate()?;
    ensure_strictly_increasing(frames.iter().map(|f| f.timestamp))?;

    let scored = frames
        .par_iter()
        .enumerate()
        .map(|(i, metric)| {
            let previous_motion = i.checked_sub(1).map(|p| frames[p].motion_score);
            score_frame(metric, previous_motion, config)
        })
        .collect();

    debug!(frames = frames.len(), "scored frame batch in parallel");
    Ok(scored)
}

/// Reject timestamp sequences that are not strictly increasing.
///
/// Duplicates and NaN both fail the comparison and surface as ordering
/// errors.
pub(crate) fn ensure_strictly_increasing(
    timestamps: impl IntoIterator<Item = f64>,
) -> SelectResult<()> {
    let mut previous: Option<f64> = None;
    for (index, timestamp) in timestamps.into_iter().enumerate() {
        if let Some(prev) = previous {
            if !(timestamp > prev) {
                return Err(SelectError::unordered_frames(index, timestamp, prev));
            }
        }
        previous = Some(timestamp);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(blur: f64, brightness: f64, contrast: f64, motion: f64) -> FrameMetric {
        FrameMetric::new(0.0, blur, brightness, contrast, motion)
    }

    #[test]
    fn test_clean_frame_scores_full() {
        // Sharp, well exposed, moderate motion: bonuses push past 1.0 and clamp.
        let frame = score_frame(
            &metric(150.0, 120.0, 45.0, 5.0),
            Some(4.0),
            &ScorerConfig::default(),
        );
        assert!((frame.quality_score - 1.0).abs() < f64::EPSILON);
        assert!(frame.has_good_motion);
        assert!(!frame.is_blurry && !frame.is_dark && !frame.is_overexposed);
    }

    #[test]
    fn test_blur_penalty() {
        let frame = score_frame(
            &metric(40.0, 120.0, 45.0, 0.0),
            Some(0.0),
            &ScorerConfig::default(),
        );
        assert!(frame.is_blurry);
        // 1.0 - 0.5 blur + 0.1 exposure bonus
        assert!((frame.quality_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_dark_wins_over_dim() {
        let config = ScorerConfig::default();

        let dark = score_frame(&metric(150.0, 30.0, 45.0, 0.0), Some(0.0), &config);
        assert!(dark.is_dark);
        assert!((dark.quality_score - 0.4).abs() < 1e-9);

        let dim = score_frame(&metric(150.0, 50.0, 45.0, 0.0), Some(0.0), &config);
        assert!(!dim.is_dark);
        assert!((dim.quality_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_overexposure_penalty() {
        let frame = score_frame(
            &metric(150.0, 240.0, 45.0, 0.0),
            Some(0.0),
            &ScorerConfig::default(),
        );
        assert!(frame.is_overexposed);
        assert!((frame.quality_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_low_contrast_blocks_exposure_bonus() {
        let frame = score_frame(
            &metric(150.0, 120.0, 10.0, 0.0),
            Some(0.0),
            &ScorerConfig::default(),
        );
        // Low-contrast penalty applies and the exposure bonus does not.
        assert!((frame.quality_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_excessive_motion_penalty() {
        let frame = score_frame(
            &metric(150.0, 120.0, 45.0, 35.0),
            Some(30.0),
            &ScorerConfig::default(),
        );
        assert!(frame.has_excessive_motion);
        assert!(!frame.has_good_motion);
        // 1.0 - 0.2 motion + 0.1 exposure
        assert!((frame.quality_score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_first_frame_gets_no_motion_classification() {
        let config = ScorerConfig::default();
        let with_prev = score_frame(&metric(150.0, 200.0, 45.0, 5.0), Some(4.0), &config);
        let without_prev = score_frame(&metric(150.0, 200.0, 45.0, 5.0), None, &config);

        assert!(with_prev.has_good_motion);
        assert!(!without_prev.has_good_motion);
        assert!((with_prev.quality_score - without_prev.quality_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_score_clamps_to_zero() {
        let frame = score_frame(
            &metric(10.0, 10.0, 5.0, 50.0),
            Some(50.0),
            &ScorerConfig::default(),
        );
        assert_eq!(frame.quality_score, 0.0);
    }

    #[test]
    fn test_batch_matches_parallel() {
        let frames: Vec<FrameMetric> = (0..600)
            .map(|i| {
                FrameMetric::new(
                    i as f64,
                    60.0 + (i % 50) as f64 * 4.0,
                    40.0 + (i % 40) as f64 * 5.0,
                    10.0 + (i % 10) as f64 * 5.0,
                    (i % 35) as f64,
                )
            })
            .collect();

        let config = ScorerConfig::default();
        let serial = score_frames(&frames, &config).unwrap();
        let parallel = score_frames_parallel(&frames, &config).unwrap();
        assert_eq!(serial, parallel);
        assert!(serial
            .iter()
            .all(|f| (0.0..=1.0).contains(&f.quality_score)));
    }

    #[test]
    fn test_unordered_frames_rejected() {
        let frames = vec![
            FrameMetric::new(0.0, 150.0, 120.0, 45.0, 0.0),
            FrameMetric::new(1.0, 150.0, 120.0, 45.0, 1.0),
            FrameMetric::new(1.0, 150.0, 120.0, 45.0, 1.0),
        ];
        let err = score_frames(&frames, &ScorerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SelectError::UnorderedFrames { index: 2, .. }
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_scoring() {
        let mut config = ScorerConfig::default();
        config.good_motion_min = 25.0; // inverted band
        let frames = vec![FrameMetric::new(0.0, 150.0, 120.0, 45.0, 0.0)];
        assert!(matches!(
            score_frames(&frames, &config),
            Err(SelectError::InvalidConfig { .. })
        ));
    }
}
