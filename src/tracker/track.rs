//! Single tracked object: identity, lifecycle counters and motion filter.

use crate::tracker::bbox::Rect;
use crate::tracker::kalman_filter::KalmanBoxFilter;
use crate::tracker::track_state::TrackState;

/// A persistent tracked-object identity.
///
/// The identity is immutable once assigned and never reused within a run.
/// The motion filter is exclusively owned by the track.
#[derive(Debug, Clone)]
pub struct Track {
    /// Zero-based identity, unique for the whole run
    pub id: u64,
    /// Lifecycle state, kept consistent with `hit_streak`
    pub state: TrackState,
    /// Frames since the last successful correction
    pub time_since_update: u32,
    /// Consecutive matched frames ending now
    pub hit_streak: u32,
    /// Total frames ever matched
    pub hits: u32,
    /// Frames since creation
    pub age: u32,
    filter: KalmanBoxFilter,
}

impl Track {
    /// Create a track from its first detection. Creation counts as a hit.
    pub fn new(id: u64, bbox: Rect, min_hits: u32) -> Self {
        let state = if 1 >= min_hits {
            TrackState::Confirmed
        } else {
            TrackState::Tentative
        };
        Self {
            id,
            state,
            time_since_update: 0,
            hit_streak: 1,
            hits: 1,
            age: 0,
            filter: KalmanBoxFilter::new(bbox),
        }
    }

    /// Advance the motion filter one frame and return the predicted box.
    ///
    /// The box may carry non-finite coordinates; the caller drops the track
    /// for the frame in that case.
    pub fn predict(&mut self) -> Rect {
        self.age += 1;
        self.filter.predict()
    }

    /// Fuse a matched detection box into the filter state.
    pub fn correct(&mut self, bbox: Rect, min_hits: u32) {
        self.filter.correct(bbox);
        self.time_since_update = 0;
        self.hits += 1;
        self.hit_streak += 1;
        if self.hit_streak >= min_hits {
            self.state = TrackState::Confirmed;
        }
    }

    /// Age the track through a frame with no matching detection.
    pub fn mark_missed(&mut self) {
        self.time_since_update += 1;
        self.hit_streak = 0;
        self.state = TrackState::Tentative;
    }

    /// Current best-estimate box, without advancing the filter.
    pub fn rect(&self) -> Rect {
        self.filter.state()
    }

    /// Identity exposed to consumers; zero stays reserved as a non-identity.
    pub fn public_id(&self) -> u64 {
        self.id + 1
    }

    /// Whether the track is reported this frame.
    ///
    /// Requires a correction in the current frame, plus either a confirmed
    /// streak or a run still inside the warm-up window (the first `min_hits`
    /// frames), where no streak could have accumulated yet.
    pub fn is_reportable(&self, frame_count: u32, min_hits: u32) -> bool {
        self.time_since_update < 1
            && (self.state == TrackState::Confirmed || frame_count <= min_hits)
    }
}
