//! Segment tagging and note generation.
//!
//! Stateless per segment: every rule reads only the finished segment's
//! aggregates, its member frames' motion values, and its ordinal position.

use std::collections::BTreeSet;

use csift_models::{Segment, SegmentPosition, SegmentTag, TaggedSegment};

use crate::config::TaggerConfig;

/// Priority order for picking the dominant tag used in notes.
const NOTE_PRIORITY: [SegmentTag; 11] = [
    SegmentTag::FastMotion,
    SegmentTag::ModerateMotion,
    SegmentTag::SlowPan,
    SegmentTag::StaticShot,
    SegmentTag::RevealShot,
    SegmentTag::EstablishingShot,
    SegmentTag::GoodExposure,
    SegmentTag::LowLight,
    SegmentTag::VerySharp,
    SegmentTag::Clear,
    SegmentTag::HighQuality,
];

/// Tag a finished segment and generate its notes.
///
/// Pure and deterministic; the segment is consumed and returned unchanged
/// inside the tagged artifact. Notes are presentational only and never feed
/// back into tags or confidence.
pub fn tag_segment(
    segment: Segment,
    position: SegmentPosition,
    config: &TaggerConfig,
) -> TaggedSegment {
    let mut tags = BTreeSet::new();

    // Motion pattern: exactly one of the four bands applies.
    if segment.avg_motion < config.static_motion_max {
        tags.insert(SegmentTag::StaticShot);
    } else if segment.avg_motion < config.slow_pan_max {
        tags.insert(SegmentTag::SlowPan);
    } else if segment.avg_motion < config.fast_motion_min {
        tags.insert(SegmentTag::ModerateMotion);
    } else {
        tags.insert(SegmentTag::FastMotion);
    }

    if position == SegmentPosition::First
        && segment.duration() >= config.establishing_min_duration
    {
        tags.insert(SegmentTag::EstablishingShot);
    }

    if has_rising_motion(&segment, config.reveal_motion_delta) {
        tags.insert(SegmentTag::RevealShot);
    }

    if segment.confidence >= config.high_quality_min {
        tags.insert(SegmentTag::HighQuality);
    }

    if segment.avg_brightness > config.good_exposure_min
        && segment.avg_brightness < config.good_exposure_max
    {
        tags.insert(SegmentTag::GoodExposure);
    }
    if segment.avg_brightness < config.low_light_max {
        tags.insert(SegmentTag::LowLight);
    }

    if segment.avg_blur > config.very_sharp_min {
        tags.insert(SegmentTag::VerySharp);
    } else if segment.avg_blur > config.clear_min {
        tags.insert(SegmentTag::Clear);
    }

    let notes = generate_notes(&segment, &tags);
    TaggedSegment {
        segment,
        tags,
        notes,
    }
}

/// Motion trend check: mean of the last third of member frames against the
/// mean of the first third. Fewer than three frames never qualifies.
fn has_rising_motion(segment: &Segment, delta: f64) -> bool {
    let n = segment.frames.len();
    let third = n / 3;
    if third == 0 {
        return false;
    }

    let head: f64 = segment.frames[..third]
        .iter()
        .map(|f| f.motion_score)
        .sum::<f64>()
        / third as f64;
    let tail: f64 = segment.frames[n - third..]
        .iter()
        .map(|f| f.motion_score)
        .sum::<f64>()
        / third as f64;

    tail - head >= delta
}

/// Build the note string from duration, dominant tag, and confidence.
fn generate_notes(segment: &Segment, tags: &BTreeSet<SegmentTag>) -> String {
    let dominant = NOTE_PRIORITY
        .iter()
        .copied()
        .find(|tag| tags.contains(tag))
        .map(|tag| tag.label())
        .unwrap_or("unclassified");

    format!(
        "{:.1}s segment, {}, {:.0}% confidence",
        segment.duration(),
        dominant,
        segment.confidence * 100.0
    )
}
