//! Shared data models for the ClipSift selection pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Per-frame quality metrics and their scored form
//! - Candidate and tagged segments
//! - Per-asset summaries and selection reports

pub mod frame;
pub mod report;
pub mod segment;

// Re-export common types
pub use frame::{FrameMetric, ScoredFrame};
pub use report::{FootageSummary, SelectionReport};
pub use segment::{Segment, SegmentPosition, SegmentTag, TaggedSegment};
