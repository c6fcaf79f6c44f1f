//! Asset pipeline: score, select, position, tag, report.

use tracing::{debug, info};

use csift_models::{
    FootageSummary, FrameMetric, SegmentPosition, SelectionReport, TaggedSegment,
};

use crate::config::SelectConfig;
use crate::error::SelectResult;
use crate::scorer::{score_frames, score_frames_parallel};
use crate::selector::select_segments;
use crate::tagger::tag_segment;

/// Frame count above which scoring switches to the parallel pass.
const PARALLEL_SCORING_MIN_FRAMES: usize = 512;

/// Run the full selection pipeline over one asset.
///
/// Validates the configuration and frame ordering up front, scores every
/// frame, selects duration-constrained segments around the scene
/// boundaries, tags each segment with its ordinal position, and assembles
/// the report. Pure computation with no I/O, clock, or randomness, so
/// identical inputs always produce identical reports. An empty frame
/// sequence yields an empty report, not an error.
pub fn analyze_asset(
    frames: &[FrameMetric],
    scene_boundaries: &[f64],
    config: &SelectConfig,
) -> SelectResult<SelectionReport> {
    config.validate()?;

    let scored = if frames.len() >= PARALLEL_SCORING_MIN_FRAMES {
        score_frames_parallel(frames, &config.scorer)?
    } else {
        score_frames(frames, &config.scorer)?
    };
    debug!(frames = scored.len(), "frames scored");

    let selection = select_segments(&scored, scene_boundaries, &config.selector)?;

    let count = selection.segments.len();
    let segments: Vec<TaggedSegment> = selection
        .segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            let position = if index == 0 {
                SegmentPosition::First
            } else if index + 1 == count {
                SegmentPosition::Last
            } else {
                SegmentPosition::Middle
            };
            tag_segment(segment, position, &config.tagger)
        })
        .collect();

    let total_duration = match (scored.first(), scored.last()) {
        (Some(first), Some(last)) => {
            last.timestamp + config.selector.sample_interval - first.timestamp
        }
        _ => 0.0,
    };
    let selected_duration: f64 = segments.iter().map(|s| s.duration()).sum();
    let rejected_duration = (total_duration - selected_duration).max(0.0);

    info!(
        frames = scored.len(),
        segments = segments.len(),
        selected_secs = selected_duration,
        rejected_secs = rejected_duration,
        "asset analysis complete"
    );

    Ok(SelectionReport {
        summary: FootageSummary::from_frames(&scored),
        segments,
        total_duration,
        selected_duration,
        rejected_duration,
        dropped_short_runs: selection.dropped_short_runs,
    })
}

/// Order tagged segments by descending confidence.
///
/// Ties break on ascending start time so identical inputs always produce
/// identical orderings. Useful for building a cross-asset master timeline
/// out of several reports' segments.
pub fn rank_by_confidence(mut segments: Vec<TaggedSegment>) -> Vec<TaggedSegment> {
    segments.sort_by(|a, b| {
        b.confidence()
            .total_cmp(&a.confidence())
            .then_with(|| a.start().total_cmp(&b.start()))
    });
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use csift_models::SegmentTag;

    fn good_frame(timestamp: f64) -> FrameMetric {
        FrameMetric::new(timestamp, 150.0, 120.0, 45.0, 3.0)
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = analyze_asset(&[], &[], &SelectConfig::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total_duration, 0.0);
        assert_eq!(report.summary.frame_count, 0);
    }

    #[test]
    fn test_lone_segment_is_first_and_establishing() {
        let frames: Vec<FrameMetric> = (0..15).map(|i| good_frame(i as f64)).collect();
        let report = analyze_asset(&frames, &[], &SelectConfig::default()).unwrap();

        assert_eq!(report.segment_count(), 1);
        assert!(report.segments[0].has_tag(SegmentTag::EstablishingShot));
    }

    #[test]
    fn test_accounting_identity() {
        let frames: Vec<FrameMetric> = (0..90)
            .map(|i| {
                if (30..40).contains(&i) {
                    // Dark, blurry stretch scores below the gate.
                    FrameMetric::new(i as f64, 20.0, 20.0, 10.0, 1.0)
                } else {
                    good_frame(i as f64)
                }
            })
            .collect();
        let report = analyze_asset(&frames, &[60.0], &SelectConfig::default()).unwrap();

        assert!(!report.is_empty());
        assert!(
            (report.selected_duration + report.rejected_duration - report.total_duration).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_rank_by_confidence_orders_and_breaks_ties() {
        let frames: Vec<FrameMetric> = (0..60).map(|i| good_frame(i as f64)).collect();
        let report = analyze_asset(&frames, &[30.0], &SelectConfig::default()).unwrap();
        assert_eq!(report.segment_count(), 2);

        let ranked = rank_by_confidence(report.segments);
        for pair in ranked.windows(2) {
            assert!(pair[0].confidence() >= pair[1].confidence());
            if (pair[0].confidence() - pair[1].confidence()).abs() < f64::EPSILON {
                assert!(pair[0].start() < pair[1].start());
            }
        }
    }
}
