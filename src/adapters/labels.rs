use crate::adapters::{Detection, DetectionSource, SourceAdapter, sanitize_score};
use crate::annotation::AnnotationResult;
use crate::catalog::Catalog;
use crate::config::FusionConfig;
use crate::geometry::NormalizedBox;

/// Whole-image labels become unlocated detections, but only when they
/// reinforce a known catalog item with enough confidence.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelAdapter;

impl LabelAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAdapter for LabelAdapter {
    fn name(&self) -> &'static str {
        "label"
    }

    fn adapt(
        &self,
        annotation: &AnnotationResult,
        catalog: &Catalog,
        config: &FusionConfig,
    ) -> Vec<Detection> {
        let detections: Vec<Detection> = annotation
            .label_annotations
            .iter()
            .filter_map(|label| {
                let description = label.description.as_deref().unwrap_or_default();
                let score = sanitize_score(label.score.unwrap_or(0.0));
                let categorization = catalog.categorize(description);
                if !categorization.is_known() || score < config.min_label_score {
                    return None;
                }
                Some(Detection::new(
                    DetectionSource::Label,
                    description,
                    score,
                    NormalizedBox::EMPTY,
                    categorization,
                ))
            })
            .collect();

        tracing::debug!(
            adapter = self.name(),
            input = annotation.label_annotations.len(),
            emitted = detections.len(),
            "adapted image labels"
        );
        detections
    }
}
