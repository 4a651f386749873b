//! SORT: Simple Online and Realtime Tracking.
//!
//! A per-frame multi-object tracker. Detections for each frame are supplied
//! by an external detector; the tracker maintains persistent object
//! identities across frames by predicting each object's motion with a
//! constant-velocity Kalman filter and matching predictions against new
//! detections by bounding-box overlap.
//!
//! The crate has two layers:
//! - [`tracker`] holds the core algorithm: the motion filter, the
//!   IoU-based association step, and the [`Sort`] lifecycle manager.
//! - [`integration`] holds the seams for external collaborators: the
//!   [`DetectionSource`](integration::DetectionSource) trait and the
//!   [`TrackerPipeline`](integration::TrackerPipeline) that bundles a
//!   source with a tracker.
//!
//! # Example
//!
//! ```
//! use sort_rs::{Detection, Sort, SortConfig};
//!
//! let mut tracker = Sort::new(SortConfig::default());
//!
//! // One call per frame, including frames with zero detections.
//! let detections = vec![Detection::new(100.0, 100.0, 200.0, 200.0, 0.9)];
//! let reported = tracker.update(&detections).unwrap();
//! for track in &reported {
//!     println!("id {} at {:?}", track.track_id, track.bbox);
//! }
//! ```

pub mod integration;
pub mod tracker;

pub use tracker::{Detection, Rect, Sort, SortConfig, SortError, TrackState, TrackedBox};
