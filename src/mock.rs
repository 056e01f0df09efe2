//! Substitute result for callers whose detector call failed.

use crate::adapters::{Detection, DetectionSource};
use crate::catalog::{Catalog, Categorization};
use crate::config::FusionConfig;
use crate::engine::FusionEngine;
use crate::geometry::NormalizedBox;
use crate::schema::FusionResult;

const MOCK_FINDINGS: [(&str, f32, [f32; 4]); 3] = [
    ("clean_cloth", 0.82, [0.12, 0.35, 0.32, 0.55]),
    ("zip_bag", 0.76, [0.55, 0.40, 0.75, 0.68]),
    ("cooking_oil", 0.70, [0.30, 0.20, 0.42, 0.36]),
];

/// A fixed three-item result flagged as degraded, so a UI keeps working
/// without the detector.
pub fn degraded_result() -> FusionResult {
    let catalog = Catalog::builtin();
    let candidates: Vec<Detection> = MOCK_FINDINGS
        .iter()
        .filter_map(|(key, score, [x0, y0, x1, y1])| {
            let item = catalog.get(key)?;
            Some(Detection::new(
                DetectionSource::Object,
                item.label.clone(),
                *score,
                NormalizedBox::new(*x0, *y0, *x1, *y1),
                Categorization {
                    priority: item.priority,
                    item: Some(item),
                },
            ))
        })
        .collect();

    let mut result = FusionEngine::new(FusionConfig::default()).fuse_candidates(candidates);
    result.degraded = true;
    result
}
