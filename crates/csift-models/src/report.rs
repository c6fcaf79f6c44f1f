//! Per-asset summary aggregates and the selection report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::frame::ScoredFrame;
use crate::segment::TaggedSegment;

/// Whole-asset aggregates over the scored frame sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FootageSummary {
    /// Number of sampled frames
    pub frame_count: usize,

    /// Mean sharpness score across all frames
    pub avg_blur: f64,

    /// Mean brightness across all frames
    pub avg_brightness: f64,

    /// Mean motion score across all frames
    pub avg_motion: f64,

    /// Fraction of frames flagged dark, in [0, 1]
    pub dark_ratio: f64,

    /// Fraction of frames flagged blurry, in [0, 1]
    pub blurry_ratio: f64,
}

impl FootageSummary {
    /// Compute aggregates over a scored frame sequence.
    ///
    /// An empty sequence yields an all-zero summary.
    pub fn from_frames(frames: &[ScoredFrame]) -> Self {
        if frames.is_empty() {
            return Self {
                frame_count: 0,
                avg_blur: 0.0,
                avg_brightness: 0.0,
                avg_motion: 0.0,
                dark_ratio: 0.0,
                blurry_ratio: 0.0,
            };
        }

        let n = frames.len() as f64;
        Self {
            frame_count: frames.len(),
            avg_blur: frames.iter().map(|f| f.blur_score).sum::<f64>() / n,
            avg_brightness: frames.iter().map(|f| f.brightness).sum::<f64>() / n,
            avg_motion: frames.iter().map(|f| f.motion_score).sum::<f64>() / n,
            dark_ratio: frames.iter().filter(|f| f.is_dark).count() as f64 / n,
            blurry_ratio: frames.iter().filter(|f| f.is_blurry).count() as f64 / n,
        }
    }
}

/// Selection results for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionReport {
    /// Tagged segments in time order
    pub segments: Vec<TaggedSegment>,

    /// Whole-asset frame aggregates
    pub summary: FootageSummary,

    /// Coverage span of the frame timeline in seconds
    pub total_duration: f64,

    /// Sum of emitted segment durations in seconds
    pub selected_duration: f64,

    /// Coverage not selected (total minus selected, floored at zero)
    pub rejected_duration: f64,

    /// Runs and sub-runs discarded for falling under the minimum duration
    pub dropped_short_runs: usize,
}

impl SelectionReport {
    /// Number of emitted segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// True when no segment qualified.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(timestamp: f64, blur: f64, dark: bool, blurry: bool) -> ScoredFrame {
        ScoredFrame {
            timestamp,
            blur_score: blur,
            brightness: if dark { 20.0 } else { 120.0 },
            contrast: 40.0,
            motion_score: 2.0,
            quality_score: 0.5,
            is_dark: dark,
            is_overexposed: false,
            is_blurry: blurry,
            has_good_motion: false,
            has_excessive_motion: false,
        }
    }

    #[test]
    fn test_summary_empty() {
        let summary = FootageSummary::from_frames(&[]);
        assert_eq!(summary.frame_count, 0);
        assert_eq!(summary.avg_blur, 0.0);
        assert_eq!(summary.dark_ratio, 0.0);
    }

    #[test]
    fn test_report_roundtrip() {
        let report = SelectionReport {
            segments: Vec::new(),
            summary: FootageSummary::from_frames(&[make_frame(0.0, 150.0, false, false)]),
            total_duration: 1.0,
            selected_duration: 0.0,
            rejected_duration: 1.0,
            dropped_short_runs: 1,
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: SelectionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
        assert!(back.is_empty());
    }

    #[test]
    fn test_summary_ratios() {
        let frames = vec![
            make_frame(0.0, 100.0, true, true),
            make_frame(1.0, 200.0, false, false),
            make_frame(2.0, 300.0, false, true),
            make_frame(3.0, 400.0, false, false),
        ];
        let summary = FootageSummary::from_frames(&frames);

        assert_eq!(summary.frame_count, 4);
        assert!((summary.avg_blur - 250.0).abs() < 1e-9);
        assert!((summary.dark_ratio - 0.25).abs() < 1e-9);
        assert!((summary.blurry_ratio - 0.5).abs() < 1e-9);
    }
}
