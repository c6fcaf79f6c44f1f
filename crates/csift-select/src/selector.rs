//! Segment selection: threshold runs, scene cuts, and the duration policy.
//!
//! A single greedy pass over the scored frames:
//!
//! 1. Accumulate maximal runs of consecutive frames at or above the
//!    confidence gate.
//! 2. Cut each run at every scene boundary strictly inside its span; a
//!    boundary equal to a frame timestamp splits before that frame.
//! 3. Drop sub-runs under the minimum duration (counted, not errors).
//! 4. Split sub-runs over the maximum duration, preferring a clear quality
//!    dip inside the interior third of each chunk over a fixed cut; a
//!    too-short tail folds back into its predecessor.
//! 5. Finalize each surviving slice into an immutable [`Segment`] with mean
//!    aggregates.
//!
//! The pass holds no cross-call state, so it is restartable from any prefix
//! and deterministic for a given input and configuration.

use tracing::debug;

use csift_models::{ScoredFrame, Segment};

use crate::config::SelectorConfig;
use crate::error::SelectResult;
use crate::scorer::ensure_strictly_increasing;

/// Output of a selection pass.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Emitted segments in time order.
    pub segments: Vec<Segment>,

    /// Runs and sub-runs discarded for falling under the minimum duration.
    pub dropped_short_runs: usize,
}

/// Select keeper segments from an ordered scored-frame sequence.
///
/// `scene_boundaries` may arrive unsorted or with duplicates; they are
/// normalized, and values outside the frame timeline are ignored. An empty
/// frame sequence yields an empty selection, not an error.
pub fn select_segments(
    frames: &[ScoredFrame],
    scene_boundaries: &[f64],
    config: &SelectorConfig,
) -> SelectResult<Selection> {
    config.validate()?;
    ensure_strictly_increasing(frames.iter().map(|f| f.timestamp))?;

    let mut selection = Selection::default();
    if frames.is_empty() {
        return Ok(selection);
    }

    let boundaries = normalize_boundaries(scene_boundaries, frames, config.sample_interval);

    let mut run: Vec<ScoredFrame> = Vec::new();
    for frame in frames {
        if frame.quality_score >= config.min_confidence {
            run.push(frame.clone());
        } else if !run.is_empty() {
            flush_run(std::mem::take(&mut run), &boundaries, config, &mut selection);
        }
    }
    if !run.is_empty() {
        flush_run(run, &boundaries, config, &mut selection);
    }

    debug!(
        segments = selection.segments.len(),
        dropped = selection.dropped_short_runs,
        "segment selection complete"
    );
    Ok(selection)
}

/// Drop non-finite and out-of-span boundaries, sort, and collapse duplicates.
fn normalize_boundaries(raw: &[f64], frames: &[ScoredFrame], sample_interval: f64) -> Vec<f64> {
    let first = frames[0].timestamp;
    let coverage_end = frames[frames.len() - 1].timestamp + sample_interval;

    let mut boundaries: Vec<f64> = raw
        .iter()
        .copied()
        .filter(|b| b.is_finite() && *b > first && *b < coverage_end)
        .collect();
    boundaries.sort_by(f64::total_cmp);
    boundaries.dedup();
    boundaries
}

/// Cut a finished run at its interior scene boundaries, then apply the
/// duration policy to each side.
fn flush_run(
    run: Vec<ScoredFrame>,
    boundaries: &[f64],
    config: &SelectorConfig,
    selection: &mut Selection,
) {
    let mut rest = run.as_slice();
    for &boundary in boundaries {
        // First frame at or past the cut; an exact timestamp match lands on
        // the right-hand side.
        let cut = rest.partition_point(|f| f.timestamp < boundary);
        if cut == 0 || cut == rest.len() {
            continue;
        }
        emit_sub_run(&rest[..cut], config, selection);
        rest = &rest[cut..];
    }
    emit_sub_run(rest, config, selection);
}

/// Apply the duration policy to one scene-bounded sub-run.
fn emit_sub_run(frames: &[ScoredFrame], config: &SelectorConfig, selection: &mut Selection) {
    if frames.is_empty() {
        return;
    }

    let duration = coverage(frames, config.sample_interval);
    if duration < config.min_segment_duration {
        // Separated from any neighbor by a scene cut or a below-threshold
        // gap; nothing to absorb into.
        selection.dropped_short_runs += 1;
        debug!(
            start = frames[0].timestamp,
            duration, "dropped short sub-run"
        );
        return;
    }

    if duration <= config.max_segment_duration {
        push_segment(frames, config, selection);
        return;
    }

    for chunk in split_long_run(frames, config) {
        push_segment(chunk, config, selection);
    }
}

/// Finalize a frame slice into a segment.
fn push_segment(frames: &[ScoredFrame], config: &SelectorConfig, selection: &mut Selection) {
    if let Some(segment) = Segment::from_frames(frames.to_vec(), config.sample_interval) {
        selection.segments.push(segment);
    }
}

/// Coverage span of a non-empty frame slice: last sample plus one interval.
fn coverage(frames: &[ScoredFrame], sample_interval: f64) -> f64 {
    frames[frames.len() - 1].timestamp + sample_interval - frames[0].timestamp
}

/// Split an over-long sub-run into chunks no longer than the maximum.
///
/// A chunk ending short of the minimum duration is folded back into its
/// predecessor rather than dropped: those frames already passed the
/// confidence gate, and the merged chunk exceeding the maximum is the
/// documented exemption to the duration bounds.
fn split_long_run<'a>(
    frames: &'a [ScoredFrame],
    config: &SelectorConfig,
) -> Vec<&'a [ScoredFrame]> {
    let interval = config.sample_interval;

    let mut cuts: Vec<usize> = Vec::new();
    let mut chunk_start = 0usize;
    while coverage(&frames[chunk_start..], interval) > config.max_segment_duration {
        let cut = chunk_start + find_split_index(&frames[chunk_start..], config);
        cuts.push(cut);
        chunk_start = cut;
    }

    if coverage(&frames[chunk_start..], interval) < config.min_segment_duration {
        cuts.pop();
    }

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0usize;
    for cut in cuts {
        chunks.push(&frames[start..cut]);
        start = cut;
    }
    chunks.push(&frames[start..]);
    chunks
}

/// Pick the cut index for the next chunk of an over-long run.
///
/// The candidate window is the interior third of the chunk's maximum span.
/// A frame there counts as a clear dip when its score sits at least
/// `split_score_drop` below the window mean; ties resolve to the earliest
/// frame and the cut lands before it. Without a clear dip, or when the dip
/// would leave the head chunk under the minimum duration, the cut falls at
/// the fixed maximum offset.
fn find_split_index(frames: &[ScoredFrame], config: &SelectorConfig) -> usize {
    let interval = config.sample_interval;
    let start = frames[0].timestamp;
    let window_lo = start + config.max_segment_duration / 3.0;
    let window_hi = start + config.max_segment_duration * 2.0 / 3.0;

    let window: Vec<(usize, f64)> = frames
        .iter()
        .enumerate()
        .filter(|(_, f)| f.timestamp > window_lo && f.timestamp < window_hi)
        .map(|(i, f)| (i, f.quality_score))
        .collect();

    if let Some(&(first_index, first_score)) = window.first() {
        let mean = window.iter().map(|(_, s)| s).sum::<f64>() / window.len() as f64;
        let mut best = (first_index, first_score);
        for &(index, score) in &window[1..] {
            if score < best.1 {
                best = (index, score);
            }
        }
        if best.1 <= mean - config.split_score_drop {
            let head = &frames[..best.0];
            if !head.is_empty() && coverage(head, interval) >= config.min_segment_duration {
                return best.0;
            }
        }
    }

    // Fixed offset: last index whose coverage still fits under the maximum.
    let limit = start + config.max_segment_duration;
    let cut = frames.partition_point(|f| f.timestamp + interval <= limit);
    cut.clamp(1, frames.len() - 1)
}
