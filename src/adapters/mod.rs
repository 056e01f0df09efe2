use crate::annotation::AnnotationResult;
use crate::catalog::{Catalog, Categorization, Priority};
use crate::config::FusionConfig;
use crate::geometry::NormalizedBox;
use crate::nms::Scored;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod labels;
pub mod objects;
pub mod test_utils;
pub mod text;

pub use labels::LabelAdapter;
pub use objects::ObjectAdapter;
pub use text::TextAdapter;

/// Which detector modality produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Object,
    Text,
    Label,
}

impl DetectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::Object => "object",
            DetectionSource::Text => "text",
            DetectionSource::Label => "label",
        }
    }
}

/// Turns one modality of an annotation into candidate detections.
pub trait SourceAdapter {
    fn name(&self) -> &'static str;
    fn adapt(
        &self,
        annotation: &AnnotationResult,
        catalog: &Catalog,
        config: &FusionConfig,
    ) -> Vec<Detection>;
}

/// Candidate produced by an adapter, alive only for one fusion pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: NormalizedBox,
    /// The detector's own string
    pub raw_label: String,
    pub score: f32,
    pub priority: Priority,
    pub matched_key: Option<String>,
    pub matched_label: Option<String>,
    pub source: DetectionSource,
}

impl Detection {
    pub fn new(
        source: DetectionSource,
        raw_label: impl Into<String>,
        score: f32,
        bbox: NormalizedBox,
        categorization: Categorization<'_>,
    ) -> Self {
        Self {
            bbox,
            raw_label: raw_label.into(),
            score: sanitize_score(score),
            priority: categorization.priority,
            matched_key: categorization.key().map(str::to_string),
            matched_label: categorization.label().map(str::to_string),
            source,
        }
    }

    /// Canonical label when matched, raw label otherwise.
    pub fn label(&self) -> &str {
        self.matched_label.as_deref().unwrap_or(&self.raw_label)
    }

    /// Case-insensitive grouping key for cross-modality de-duplication.
    pub fn dedup_key(&self) -> String {
        self.label().to_lowercase()
    }

    pub fn is_boxed(&self) -> bool {
        self.bbox.is_located()
    }
}

impl Scored for Detection {
    fn bbox(&self) -> &NormalizedBox {
        &self.bbox
    }

    fn score(&self) -> f32 {
        self.score
    }
}

/// Non-finite detector scores compare as zero confidence.
pub fn sanitize_score(score: f32) -> f32 {
    if score.is_finite() { score } else { 0.0 }
}

/// The three standard adapters in pipeline order.
pub fn default_adapters() -> Vec<Box<dyn SourceAdapter + Send + Sync>> {
    vec![
        Box::new(ObjectAdapter::new()),
        Box::new(TextAdapter::new()),
        Box::new(LabelAdapter::new()),
    ]
}
