//! TrackerPipeline for combining a detection source with tracking.

use thiserror::Error;

use crate::tracker::{Sort, SortConfig, SortError, TrackedBox};

use super::DetectionSource;

/// Error produced while advancing a [`TrackerPipeline`].
#[derive(Debug, Error)]
pub enum PipelineError<E: std::error::Error> {
    /// The detection source failed to produce a frame.
    #[error("detection source failed: {0}")]
    Source(E),
    /// The tracker rejected the frame's detections.
    #[error(transparent)]
    Tracker(#[from] SortError),
}

/// A combined tracker that bundles a detection source with SORT.
///
/// This struct provides a convenient way to run end-to-end tracking by
/// pulling frames from any `DetectionSource` and feeding them to a `Sort`
/// tracker, one call per frame.
pub struct TrackerPipeline<S: DetectionSource> {
    source: S,
    tracker: Sort,
}

impl<S: DetectionSource> TrackerPipeline<S>
where
    S::Error: std::error::Error,
{
    /// Create a new tracking pipeline with the given source and tracker config.
    pub fn new(source: S, config: SortConfig) -> Self {
        Self {
            source,
            tracker: Sort::new(config),
        }
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, SortConfig::default())
    }

    /// Pull the next frame from the source and run one tracker update.
    ///
    /// Returns `Ok(None)` once the source is exhausted; otherwise the
    /// frame's reportable tracks.
    pub fn advance(&mut self) -> Result<Option<Vec<TrackedBox>>, PipelineError<S::Error>> {
        let Some(detections) = self.source.next_frame().map_err(PipelineError::Source)? else {
            return Ok(None);
        };
        let reported = self.tracker.update(&detections)?;
        Ok(Some(reported))
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &Sort {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut Sort {
        &mut self.tracker
    }
}
