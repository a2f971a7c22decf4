use crate::models::PixelBox;

/// Raw detection decoded from the prediction tensor.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub bbox: PixelBox,
    pub confidence: f32,
    /// Mask coefficients, one per prototype.
    pub coeffs: Vec<f32>,
}

/// Class-agnostic greedy non-maximum suppression.
///
/// Output is ordered by descending confidence and capped at `max_detections`.
pub fn non_max_suppression(
    mut candidates: Vec<Candidate>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if kept.len() >= max_detections {
            break;
        }
        let overlaps = kept
            .iter()
            .any(|k| k.bbox.iou(&candidate.bbox) > iou_threshold);
        if !overlaps {
            kept.push(candidate);
        }
    }
    kept
}
