mod association;
mod bbox;
mod kalman_filter;
mod sort;
mod track;
mod track_state;

pub use association::{
    AssociationResult, Detection, associate_detections_to_tracks, iou_distance, linear_assignment,
};
pub use bbox::Rect;
pub use kalman_filter::KalmanBoxFilter;
pub use sort::{Sort, SortConfig, SortError, TrackedBox};
pub use track::Track;
pub use track_state::TrackState;
