use crate::geometry::{NormalizedBox, iou};

/// Anything with a box and a confidence can go through suppression.
pub trait Scored {
    fn bbox(&self) -> &NormalizedBox;
    fn score(&self) -> f32;
}

/// Greedy non-max suppression.
///
/// Candidates are stable-sorted by score (highest first, ties keep input
/// order). A candidate survives when its IoU against every survivor so far
/// is strictly below `threshold`. Survivors come back in descending score
/// order.
pub fn nms<T: Scored>(mut candidates: Vec<T>, threshold: f32) -> Vec<T> {
    candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));

    let mut kept: Vec<T> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let overlaps = kept
            .iter()
            .any(|survivor| iou(survivor.bbox(), candidate.bbox()) >= threshold);
        if overlaps {
            tracing::trace!(score = candidate.score(), "suppressed overlapping box");
            continue;
        }
        kept.push(candidate);
    }

    kept
}
