//! Trait for external detection sources feeding the tracker.

use crate::tracker::Detection;

/// Pull-based source of per-frame detections.
///
/// Implement this trait to connect any detector to the tracker. One call
/// yields one frame's detections; `Ok(None)` signals the end of the stream.
///
/// # Example
///
/// ```ignore
/// use sort_rs::integration::DetectionSource;
/// use sort_rs::Detection;
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<Vec<Detection>>, Self::Error> {
///         // Run inference on the next frame and return its detections
///         Ok(Some(vec![]))
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Produce the next frame's detections, or `None` when the stream ends.
    ///
    /// A frame in which the detector saw nothing is `Ok(Some(vec![]))`,
    /// not `Ok(None)`; the tracker still has to age its tracks through it.
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>, Self::Error>;
}

/// Helper trait for converting detector-specific outputs to `Detection`s.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// Raw `[x1, y1, x2, y2, score]` rows, the conventional detector output.
impl IntoDetections for Vec<[f32; 5]> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|[x1, y1, x2, y2, score]| Detection::new(x1, y1, x2, y2, score))
            .collect()
    }
}
