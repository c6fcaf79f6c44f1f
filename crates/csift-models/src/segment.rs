//! Segment models: candidates, tags, positions, and the tagged terminal form.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::frame::ScoredFrame;

/// Descriptive label for a segment's visual character.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SegmentTag {
    /// Average motion below the static threshold
    StaticShot,
    /// Low-to-moderate motion, not static
    SlowPan,
    /// Motion between the slow-pan and fast bands
    ModerateMotion,
    /// Average motion above the high-motion threshold
    FastMotion,
    /// Motion trend rises from the first third to the last third
    RevealShot,
    /// First segment of the asset, long enough to set a scene
    EstablishingShot,
    /// Average brightness inside the good-exposure band
    GoodExposure,
    /// Average brightness below the dark boundary
    LowLight,
    /// Very high average sharpness
    VerySharp,
    /// High average sharpness
    Clear,
    /// Aggregate confidence at or above the high-quality cutoff
    HighQuality,
}

impl SegmentTag {
    /// Returns the tag as its serialized string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaticShot => "static_shot",
            Self::SlowPan => "slow_pan",
            Self::ModerateMotion => "moderate_motion",
            Self::FastMotion => "fast_motion",
            Self::RevealShot => "reveal_shot",
            Self::EstablishingShot => "establishing_shot",
            Self::GoodExposure => "good_exposure",
            Self::LowLight => "low_light",
            Self::VerySharp => "very_sharp",
            Self::Clear => "clear",
            Self::HighQuality => "high_quality",
        }
    }

    /// Display phrase used in generated notes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StaticShot => "static shot",
            Self::SlowPan => "slow pan",
            Self::ModerateMotion => "moderate motion",
            Self::FastMotion => "fast motion",
            Self::RevealShot => "reveal shot",
            Self::EstablishingShot => "establishing shot",
            Self::GoodExposure => "good exposure",
            Self::LowLight => "low light",
            Self::VerySharp => "very sharp",
            Self::Clear => "clear",
            Self::HighQuality => "high quality",
        }
    }
}

/// A segment's ordinal position within its asset.
///
/// A lone segment counts as `First`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPosition {
    First,
    Middle,
    Last,
}

/// A contiguous slice of the frame timeline selected as worth keeping.
///
/// Built by the selector from an append-only run of frames and finalized
/// into this immutable value; never modified once handed to the tagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds (last member frame plus one sampling interval)
    pub end: f64,

    /// Mean member quality score, in [0, 1]
    pub confidence: f64,

    /// Mean member sharpness score
    pub avg_blur: f64,

    /// Mean member brightness
    pub avg_brightness: f64,

    /// Mean member motion score
    pub avg_motion: f64,

    /// Member frames in time order
    pub frames: Vec<ScoredFrame>,
}

impl Segment {
    /// Build a segment from its member frames, computing the aggregates.
    ///
    /// The end bound extends one `sample_interval` past the last member frame
    /// so the segment spans the coverage of its samples rather than stopping
    /// at the last sample point. Returns `None` for an empty frame list.
    pub fn from_frames(frames: Vec<ScoredFrame>, sample_interval: f64) -> Option<Self> {
        let start = frames.first()?.timestamp;
        let end = frames.last()?.timestamp + sample_interval;
        let n = frames.len() as f64;

        let confidence = frames.iter().map(|f| f.quality_score).sum::<f64>() / n;
        let avg_blur = frames.iter().map(|f| f.blur_score).sum::<f64>() / n;
        let avg_brightness = frames.iter().map(|f| f.brightness).sum::<f64>() / n;
        let avg_motion = frames.iter().map(|f| f.motion_score).sum::<f64>() / n;

        Some(Self {
            start,
            end,
            confidence,
            avg_blur,
            avg_brightness,
            avg_motion,
            frames,
        })
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of member frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// A segment with its descriptive tags and generated notes.
///
/// Terminal artifact of the pipeline; immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaggedSegment {
    #[serde(flatten)]
    pub segment: Segment,

    /// Deduplicated descriptive tags
    pub tags: BTreeSet<SegmentTag>,

    /// Human-readable summary; presentational only
    pub notes: String,
}

impl TaggedSegment {
    /// Whether the segment carries the given tag.
    pub fn has_tag(&self, tag: SegmentTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Aggregate confidence of the underlying segment.
    pub fn confidence(&self) -> f64 {
        self.segment.confidence
    }

    /// Start time in seconds.
    pub fn start(&self) -> f64 {
        self.segment.start
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.segment.end
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.segment.duration()
    }
}
