use crate::adapters::{Detection, DetectionSource, SourceAdapter};
use crate::annotation::AnnotationResult;
use crate::catalog::{Catalog, Categorization};
use crate::config::FusionConfig;
use crate::geometry::NormalizedBox;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9+]+").expect("valid token separator"));
static BIGRAM_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9+ ]+").expect("valid bigram filter"));

/// OCR transcript mentions become unlocated detections.
///
/// Matching is exact against single tokens and adjacent-word bigrams, never
/// substring, so a long document does not trigger on every short synonym.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAdapter;

impl TextAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAdapter for TextAdapter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn adapt(
        &self,
        annotation: &AnnotationResult,
        catalog: &Catalog,
        config: &FusionConfig,
    ) -> Vec<Detection> {
        let Some(text) = annotation.full_text() else {
            return Vec::new();
        };
        let terms = tokenize_with_bigrams(text);

        let detections: Vec<Detection> = catalog
            .iter()
            .filter(|item| {
                let label = item.label.to_lowercase();
                terms.contains(label.as_str())
                    || item.synonyms.iter().any(|s| terms.contains(s.as_str()))
            })
            .map(|item| {
                Detection::new(
                    DetectionSource::Text,
                    item.label.clone(),
                    config.text_hit_score,
                    NormalizedBox::EMPTY,
                    Categorization {
                        priority: item.priority,
                        item: Some(item),
                    },
                )
            })
            .collect();

        tracing::debug!(
            adapter = self.name(),
            terms = terms.len(),
            emitted = detections.len(),
            "adapted OCR text"
        );
        detections
    }
}

/// Lowercased single tokens split on anything outside `[a-z0-9+]`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_SEPARATOR
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Adjacent whitespace-separated word pairs, stripped to `[a-z0-9+ ]`.
pub fn bigrams(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    words
        .windows(2)
        .map(|pair| {
            BIGRAM_STRIP
                .replace_all(&format!("{} {}", pair[0], pair[1]), "")
                .into_owned()
        })
        .collect()
}

/// Every term an OCR transcript can match: tokens plus bigrams.
pub fn tokenize_with_bigrams(text: &str) -> HashSet<String> {
    let mut terms: HashSet<String> = tokenize(text).into_iter().collect();
    terms.extend(bigrams(text));
    terms
}
