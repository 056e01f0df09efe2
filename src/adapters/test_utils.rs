use crate::adapters::{Detection, DetectionSource};
use crate::catalog::categorize;
use crate::geometry::NormalizedBox;

/// Create a boxed object detection categorized against the builtin catalog.
///
/// # Example
///
/// ```rust
/// use aidsense::adapters::test_utils::boxed_detection;
///
/// let towel = boxed_detection("towel", 0.82, [0.1, 0.3, 0.3, 0.5]);
/// assert_eq!(towel.label(), "Clean cloth / towel");
/// ```
pub fn boxed_detection(raw_label: &str, score: f32, bbox: [f32; 4]) -> Detection {
    let [x0, y0, x1, y1] = bbox;
    Detection::new(
        DetectionSource::Object,
        raw_label,
        score,
        NormalizedBox::new(x0, y0, x1, y1),
        categorize(raw_label),
    )
}

/// Create a detection with no location, as the text and label adapters emit.
pub fn unlocated_detection(source: DetectionSource, raw_label: &str, score: f32) -> Detection {
    Detection::new(
        source,
        raw_label,
        score,
        NormalizedBox::EMPTY,
        categorize(raw_label),
    )
}
