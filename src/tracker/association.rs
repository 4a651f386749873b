//! Detection-to-track association for the per-frame update.

use crate::tracker::bbox::Rect;
use ndarray::Array2;

/// Detection input for the tracker.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Bounding box
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self { bbox, score }
    }
}

/// Compute the IoU cost matrix between detections and track predictions.
///
/// Entry `(i, j)` is `1 - IoU(det_boxes[i], track_boxes[j])`.
pub fn iou_distance(det_boxes: &[Rect], track_boxes: &[Rect]) -> Array2<f32> {
    let mut dists = Array2::zeros((det_boxes.len(), track_boxes.len()));
    for (i, d) in det_boxes.iter().enumerate() {
        for (j, t) in track_boxes.iter().enumerate() {
            dists[[i, j]] = 1.0 - d.iou(t);
        }
    }
    dists
}

/// Outcome of one association round.
///
/// `matched`, `unmatched_detections` and `unmatched_tracks` partition both
/// input index spaces: every detection index appears either in a matched
/// pair or in `unmatched_detections`, and likewise for track indices.
#[derive(Debug, Clone)]
pub struct AssociationResult {
    /// Accepted pairs of (detection index, track index)
    pub matched: Vec<(usize, usize)>,
    pub unmatched_detections: Vec<usize>,
    pub unmatched_tracks: Vec<usize>,
}

/// Solve the rectangular assignment over a cost matrix with detections as
/// rows and tracks as columns.
///
/// Pairs whose cost exceeds `thresh` are rejected and pushed back into the
/// unmatched sets. A solver failure degrades to no matches at all.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssociationResult {
    let (num_dets, num_tracks) = cost_matrix.dim();

    if num_dets == 0 {
        return AssociationResult {
            matched: vec![],
            unmatched_detections: vec![],
            unmatched_tracks: (0..num_tracks).collect(),
        };
    }

    if num_tracks == 0 {
        return AssociationResult {
            matched: vec![],
            unmatched_detections: (0..num_dets).collect(),
            unmatched_tracks: vec![],
        };
    }

    // lapjv wants a square matrix; pad with a prohibitive cost.
    let size = num_dets.max(num_tracks);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_dets {
        for j in 0..num_tracks {
            padded[[i, j]] = cost_matrix[[i, j]] as f64;
        }
    }

    let result = lapjv::lapjv(&padded);
    let mut matched = vec![];
    let mut unmatched_detections = vec![];
    let mut unmatched_tracks_mask: Vec<bool> = vec![true; num_tracks];

    match result {
        Ok((row_to_col, _)) => {
            for (det_idx, &trk_idx) in row_to_col.iter().enumerate() {
                if det_idx >= num_dets {
                    continue;
                }
                if trk_idx >= num_tracks {
                    unmatched_detections.push(det_idx);
                } else if cost_matrix[[det_idx, trk_idx]] <= thresh {
                    matched.push((det_idx, trk_idx));
                    unmatched_tracks_mask[trk_idx] = false;
                } else {
                    unmatched_detections.push(det_idx);
                }
            }
        }
        Err(_) => {
            unmatched_detections = (0..num_dets).collect();
        }
    }

    let unmatched_tracks: Vec<usize> = unmatched_tracks_mask
        .iter()
        .enumerate()
        .filter_map(|(j, &u)| if u { Some(j) } else { None })
        .collect();

    AssociationResult {
        matched,
        unmatched_detections,
        unmatched_tracks,
    }
}

/// Match detection boxes against predicted track boxes by IoU.
///
/// A pair the solver selects is still rejected when its IoU falls below
/// `iou_threshold`; its indices then join the unmatched sets.
pub fn associate_detections_to_tracks(
    det_boxes: &[Rect],
    track_boxes: &[Rect],
    iou_threshold: f32,
) -> AssociationResult {
    let dists = iou_distance(det_boxes, track_boxes);
    linear_assignment(&dists, 1.0 - iou_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(result: &AssociationResult, num_dets: usize, num_tracks: usize) {
        let mut det_seen = vec![0usize; num_dets];
        let mut trk_seen = vec![0usize; num_tracks];
        for &(d, t) in &result.matched {
            det_seen[d] += 1;
            trk_seen[t] += 1;
        }
        for &d in &result.unmatched_detections {
            det_seen[d] += 1;
        }
        for &t in &result.unmatched_tracks {
            trk_seen[t] += 1;
        }
        assert!(det_seen.iter().all(|&c| c == 1));
        assert!(trk_seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_perfect_overlap_matches() {
        let dets = vec![Rect::from_tlbr(0.0, 0.0, 10.0, 10.0)];
        let tracks = vec![Rect::from_tlbr(0.0, 0.0, 10.0, 10.0)];
        let result = associate_detections_to_tracks(&dets, &tracks, 0.3);
        assert_eq!(result.matched, vec![(0, 0)]);
        assert!(result.unmatched_detections.is_empty());
        assert!(result.unmatched_tracks.is_empty());
    }

    #[test]
    fn test_gating_rejects_disjoint_pair() {
        let dets = vec![Rect::from_tlbr(100.0, 100.0, 110.0, 110.0)];
        let tracks = vec![Rect::from_tlbr(0.0, 0.0, 10.0, 10.0)];
        let result = associate_detections_to_tracks(&dets, &tracks, 0.3);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched_detections, vec![0]);
        assert_eq!(result.unmatched_tracks, vec![0]);
    }

    #[test]
    fn test_empty_inputs() {
        let boxes = vec![Rect::from_tlbr(0.0, 0.0, 10.0, 10.0)];

        let result = associate_detections_to_tracks(&[], &boxes, 0.3);
        assert!(result.matched.is_empty());
        assert!(result.unmatched_detections.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0]);

        let result = associate_detections_to_tracks(&boxes, &[], 0.3);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched_detections, vec![0]);
        assert!(result.unmatched_tracks.is_empty());
    }

    #[test]
    fn test_rectangular_partition() {
        // Three detections, two tracks; one detection overlaps nothing.
        let dets = vec![
            Rect::from_tlbr(0.0, 0.0, 10.0, 10.0),
            Rect::from_tlbr(50.0, 50.0, 60.0, 60.0),
            Rect::from_tlbr(200.0, 200.0, 210.0, 210.0),
        ];
        let tracks = vec![
            Rect::from_tlbr(1.0, 1.0, 11.0, 11.0),
            Rect::from_tlbr(51.0, 51.0, 61.0, 61.0),
        ];
        let result = associate_detections_to_tracks(&dets, &tracks, 0.3);
        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.unmatched_detections, vec![2]);
        assert_partition(&result, dets.len(), tracks.len());
    }

    #[test]
    fn test_solver_picks_global_optimum() {
        // Detection 0 overlaps both tracks; the assignment must keep the
        // total IoU maximal rather than match greedily.
        let dets = vec![
            Rect::from_tlbr(0.0, 0.0, 10.0, 10.0),
            Rect::from_tlbr(4.0, 0.0, 14.0, 10.0),
        ];
        let tracks = vec![
            Rect::from_tlbr(4.0, 0.0, 14.0, 10.0),
            Rect::from_tlbr(0.0, 0.0, 10.0, 10.0),
        ];
        let result = associate_detections_to_tracks(&dets, &tracks, 0.3);
        let mut matched = result.matched.clone();
        matched.sort_unstable();
        assert_eq!(matched, vec![(0, 1), (1, 0)]);
        assert_partition(&result, dets.len(), tracks.len());
    }
}
