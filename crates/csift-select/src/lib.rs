//! Segment selection engine for ClipSift.
//!
//! Turns a per-frame stream of objective quality measurements plus a list of
//! scene-cut timestamps into a short, ranked, tagged list of keeper
//! segments. Everything here is pure computation between two in-memory data
//! structures: metric extraction happens upstream, trimming/encoding and
//! report rendering happen downstream.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ FrameMetric  │───►│ Frame Scorer │───►│   Segment    │───►│   Segment    │
//! │   sequence   │    │ (quality 0-1)│    │   Selector   │    │    Tagger    │
//! └──────────────┘    └──────────────┘    └──────┬───────┘    └──────┬───────┘
//!                                                ▲                   │
//!                              scene boundaries ─┘                   ▼
//!                                                            SelectionReport
//! ```
//!
//! # Usage
//!
//! ```rust
//! use csift_models::FrameMetric;
//! use csift_select::{analyze_asset, SelectConfig};
//!
//! let frames: Vec<FrameMetric> = (0..30)
//!     .map(|i| FrameMetric::new(i as f64, 150.0, 120.0, 45.0, 5.0))
//!     .collect();
//!
//! let report = analyze_asset(&frames, &[12.0], &SelectConfig::default()).unwrap();
//! assert_eq!(report.segment_count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod selector;
pub mod tagger;

pub use config::{ScorerConfig, SelectConfig, SelectorConfig, TaggerConfig};
pub use error::{SelectError, SelectResult};
pub use pipeline::{analyze_asset, rank_by_confidence};
pub use scorer::{score_frame, score_frames, score_frames_parallel};
pub use selector::{select_segments, Selection};
pub use tagger::tag_segment;
