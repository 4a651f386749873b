//! SORT tracker: the per-frame predict/associate/update/create/retire loop.

use thiserror::Error;

use crate::tracker::association::{self, AssociationResult, Detection};
use crate::tracker::bbox::Rect;
use crate::tracker::track::Track;

/// Configuration for the SORT tracker.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Frames without a correction tolerated before a track is retired
    pub max_age: u32,
    /// Consecutive matches required before a track is reportable, once the
    /// run is past its warm-up window
    pub min_hits: u32,
    /// Minimum IoU for an assignment pair to be accepted
    pub iou_threshold: f32,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            max_age: 2,
            min_hits: 3,
            iou_threshold: 0.3,
        }
    }
}

/// Errors surfaced by [`Sort::update`].
#[derive(Debug, Error)]
pub enum SortError {
    /// A detection with non-finite or inverted coordinates was supplied.
    /// The call is rejected before any track state is touched, so a corrupt
    /// box can never poison a track's filter.
    #[error("malformed detection at index {index}: [{x1}, {y1}, {x2}, {y2}]")]
    MalformedDetection {
        index: usize,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

/// Display palette for reported tracks. Purely presentational.
const COLOR_PALETTE: [(u8, u8, u8); 8] = [
    (255, 64, 64),
    (64, 255, 64),
    (64, 64, 255),
    (255, 255, 64),
    (255, 64, 255),
    (64, 255, 255),
    (255, 128, 0),
    (128, 0, 255),
];

/// One reported track for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedBox {
    /// Estimated box in TLBR format (x1, y1, x2, y2)
    pub bbox: [f32; 4],
    /// Positive track identity; zero is reserved as a non-identity sentinel
    pub track_id: u64,
}

impl TrackedBox {
    /// Display color for this identity, stable across frames.
    pub fn color(&self) -> (u8, u8, u8) {
        COLOR_PALETTE[self.track_id as usize % COLOR_PALETTE.len()]
    }
}

/// The track registry and lifecycle manager.
///
/// Owns the active tracks, the identity counter and the frame counter.
/// [`Sort::update`] must be called exactly once per frame, including frames
/// with zero detections; the struct is not meant to be shared across
/// threads mid-run.
pub struct Sort {
    tracks: Vec<Track>,
    next_id: u64,
    frame_count: u32,
    config: SortConfig,
}

impl Sort {
    pub fn new(config: SortConfig) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 0,
            frame_count: 0,
            config,
        }
    }

    /// Number of frames processed so far.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Number of currently active tracks, confirmed or not.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Process one frame of detections and return the reportable tracks,
    /// most recently created first.
    pub fn update(&mut self, detections: &[Detection]) -> Result<Vec<TrackedBox>, SortError> {
        validate_detections(detections)?;

        self.frame_count += 1;

        // Predict every live track; a track whose box goes non-finite is
        // removed here and takes no part in this frame's association.
        let mut predictions: Vec<Rect> = Vec::with_capacity(self.tracks.len());
        let mut i = 0;
        while i < self.tracks.len() {
            let predicted = self.tracks[i].predict();
            if predicted.is_finite() {
                predictions.push(predicted);
                i += 1;
            } else {
                let track = self.tracks.remove(i);
                log::debug!(
                    "dropping track {} after non-finite prediction",
                    track.public_id()
                );
            }
        }

        let det_boxes: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
        let AssociationResult {
            matched,
            unmatched_detections,
            unmatched_tracks,
        } = association::associate_detections_to_tracks(
            &det_boxes,
            &predictions,
            self.config.iou_threshold,
        );

        for &(det_idx, trk_idx) in &matched {
            self.tracks[trk_idx].correct(detections[det_idx].bbox, self.config.min_hits);
        }

        for &trk_idx in &unmatched_tracks {
            self.tracks[trk_idx].mark_missed();
        }

        for &det_idx in &unmatched_detections {
            let track = Track::new(self.next_id, detections[det_idx].bbox, self.config.min_hits);
            log::debug!(
                "created track {} from detection {}",
                track.public_id(),
                det_idx
            );
            self.next_id += 1;
            self.tracks.push(track);
        }

        // Report before retiring, so a track can still be emitted in its
        // last living frame.
        let mut reported = Vec::new();
        for track in self.tracks.iter().rev() {
            if track.is_reportable(self.frame_count, self.config.min_hits) {
                reported.push(TrackedBox {
                    bbox: track.rect().to_tlbr(),
                    track_id: track.public_id(),
                });
            }
        }

        let before = self.tracks.len();
        self.tracks
            .retain(|t| t.time_since_update <= self.config.max_age);
        if self.tracks.len() < before {
            log::debug!(
                "retired {} stale tracks ({} remaining)",
                before - self.tracks.len(),
                self.tracks.len()
            );
        }

        Ok(reported)
    }
}

fn validate_detections(detections: &[Detection]) -> Result<(), SortError> {
    for (index, det) in detections.iter().enumerate() {
        let [x1, y1, x2, y2] = det.bbox.to_tlbr();
        let well_formed =
            x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite() && x1 < x2 && y1 < y2;
        if !well_formed {
            return Err(SortError::MalformedDetection { index, x1, y1, x2, y2 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_is_not_an_error() {
        let mut tracker = Sort::new(SortConfig::default());
        let reported = tracker.update(&[]).unwrap();
        assert!(reported.is_empty());
        assert_eq!(tracker.frame_count(), 1);
    }

    #[test]
    fn test_malformed_detection_rejected_before_mutation() {
        let mut tracker = Sort::new(SortConfig::default());
        tracker
            .update(&[Detection::new(0.0, 0.0, 10.0, 10.0, 0.9)])
            .unwrap();

        let inverted = Detection::new(10.0, 10.0, 0.0, 20.0, 0.9);
        assert!(tracker.update(&[inverted]).is_err());
        let nan = Detection::new(f32::NAN, 0.0, 10.0, 10.0, 0.9);
        assert!(tracker.update(&[nan]).is_err());

        // The rejected calls left the registry untouched.
        assert_eq!(tracker.frame_count(), 1);
        assert_eq!(tracker.track_count(), 1);
    }

    #[test]
    fn test_identities_are_monotonic_across_retirements() {
        let config = SortConfig {
            max_age: 0,
            min_hits: 1,
            iou_threshold: 0.3,
        };
        let mut tracker = Sort::new(config);

        let det = Detection::new(0.0, 0.0, 10.0, 10.0, 0.9);
        let first = tracker.update(&[det.clone()]).unwrap();
        assert_eq!(first[0].track_id, 1);

        // Miss a frame; with max_age = 0 the track is retired immediately.
        tracker.update(&[]).unwrap();
        assert_eq!(tracker.track_count(), 0);

        // The same object reappearing gets a fresh, larger identity.
        let second = tracker.update(&[det]).unwrap();
        assert_eq!(second[0].track_id, 2);
    }

    #[test]
    fn test_color_is_stable_per_identity() {
        let a = TrackedBox {
            bbox: [0.0, 0.0, 1.0, 1.0],
            track_id: 3,
        };
        let b = TrackedBox {
            bbox: [5.0, 5.0, 6.0, 6.0],
            track_id: 3,
        };
        assert_eq!(a.color(), b.color());
    }
}
