//! Integration module for connecting detection sources with the tracker.
//!
//! This module provides the seams for the external collaborators: a trait
//! for pull-based detection sources, a builder for converting raw boxes into
//! `Detection`s, and a pipeline that drives a tracker from a source.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{PipelineError, TrackerPipeline};
