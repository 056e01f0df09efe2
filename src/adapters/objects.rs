use crate::adapters::{Detection, DetectionSource, SourceAdapter, sanitize_score};
use crate::annotation::{AnnotationResult, BoundingPoly, ImageSize};
use crate::catalog::Catalog;
use crate::config::FusionConfig;
use crate::geometry::NormalizedBox;

const DEFAULT_OBJECT_NAME: &str = "object";

/// Localized objects become boxed detections.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectAdapter;

impl ObjectAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAdapter for ObjectAdapter {
    fn name(&self) -> &'static str {
        "object"
    }

    fn adapt(
        &self,
        annotation: &AnnotationResult,
        catalog: &Catalog,
        config: &FusionConfig,
    ) -> Vec<Detection> {
        let mut detections = Vec::new();

        for object in &annotation.localized_object_annotations {
            let raw_label = object.name.as_deref().unwrap_or(DEFAULT_OBJECT_NAME);
            let score = sanitize_score(object.score.unwrap_or(0.0));
            if score < config.min_object_score {
                tracing::trace!(raw_label, score, "object below score floor");
                continue;
            }

            let bbox = object
                .bounding_poly
                .as_ref()
                .map(|poly| poly_to_box(poly, annotation.image_size))
                .unwrap_or(NormalizedBox::EMPTY);

            detections.push(Detection::new(
                DetectionSource::Object,
                raw_label,
                score,
                bbox,
                catalog.categorize(raw_label),
            ));
        }

        tracing::debug!(
            adapter = self.name(),
            input = annotation.localized_object_annotations.len(),
            emitted = detections.len(),
            "adapted localized objects"
        );
        detections
    }
}

/// Prefer normalized vertices; pixel vertices are scaled by the image size
/// when it is known and clamped as-is otherwise.
fn poly_to_box(poly: &BoundingPoly, image_size: Option<ImageSize>) -> NormalizedBox {
    if !poly.normalized_vertices.is_empty() {
        return NormalizedBox::from_vertices(poly.normalized_vertices.iter().map(|v| (v.x, v.y)));
    }

    match image_size {
        Some(size) if size.width > 0 && size.height > 0 => {
            let (w, h) = (size.width as f32, size.height as f32);
            NormalizedBox::from_vertices(
                poly.vertices
                    .iter()
                    .map(|v| (v.x.map(|x| x / w), v.y.map(|y| y / h))),
            )
        }
        _ => NormalizedBox::from_vertices(poly.vertices.iter().map(|v| (v.x, v.y))),
    }
}
