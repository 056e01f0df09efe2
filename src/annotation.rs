//! Inbound model of one completed detector annotation.
//!
//! Field names follow the detector's camelCase JSON. Every field is
//! optional; absent modalities simply contribute no candidates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Vertex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    /// Image-relative vertices in `[0, 1]`
    #[serde(default)]
    pub normalized_vertices: Vec<Vertex>,
    /// Pixel vertices
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub bounding_poly: Option<BoundingPoly>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TextAnnotation {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct LabelAnnotation {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationResult {
    #[serde(default)]
    pub localized_object_annotations: Vec<LocalizedObject>,
    /// The first entry carries the full OCR transcript
    #[serde(default)]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    pub label_annotations: Vec<LabelAnnotation>,
    /// Needed only to normalize pixel vertices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

impl AnnotationResult {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// The full OCR transcript, if the detector produced non-empty text.
    pub fn full_text(&self) -> Option<&str> {
        self.text_annotations
            .first()
            .and_then(|t| t.description.as_deref())
            .filter(|text| !text.is_empty())
    }

    pub fn with_object(mut self, name: &str, score: f32, bbox: [f32; 4]) -> Self {
        let [x0, y0, x1, y1] = bbox;
        self.localized_object_annotations.push(LocalizedObject {
            name: Some(name.to_string()),
            score: Some(score),
            bounding_poly: Some(BoundingPoly {
                normalized_vertices: vec![
                    Vertex::new(x0, y0),
                    Vertex::new(x1, y0),
                    Vertex::new(x1, y1),
                    Vertex::new(x0, y1),
                ],
                vertices: Vec::new(),
            }),
        });
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text_annotations.insert(
            0,
            TextAnnotation {
                description: Some(text.to_string()),
            },
        );
        self
    }

    pub fn with_label(mut self, description: &str, score: f32) -> Self {
        self.label_annotations.push(LabelAnnotation {
            description: Some(description.to_string()),
            score: Some(score),
        });
        self
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_size = Some(ImageSize { width, height });
        self
    }
}
