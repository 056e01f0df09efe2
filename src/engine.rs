use crate::adapters::{Detection, SourceAdapter, default_adapters};
use crate::annotation::AnnotationResult;
use crate::catalog::Catalog;
use crate::config::FusionConfig;
use crate::nms::nms;
use crate::schema::{BoxedFinding, Finding, FusionResult, PrioritizedFindings, UnboxedFinding};
use std::collections::{HashMap, HashSet};

/// Runs registered source adapters over one annotation and fuses their
/// candidates into a single result.
///
/// The engine holds no mutable state; `fuse` is a pure function of the
/// annotation, so one engine can serve concurrent callers.
pub struct FusionEngine<'c> {
    catalog: &'c Catalog,
    config: FusionConfig,
    adapters: Vec<Box<dyn SourceAdapter + Send + Sync>>,
}

impl FusionEngine<'static> {
    /// Engine over the builtin catalog with no adapters registered.
    pub fn new(config: FusionConfig) -> Self {
        Self::with_catalog(Catalog::builtin(), config)
    }

    /// Engine over the builtin catalog with the object, text and label
    /// adapters registered in that order.
    pub fn with_default_adapters(config: FusionConfig) -> Self {
        Self::new(config).register_defaults()
    }
}

impl<'c> FusionEngine<'c> {
    pub fn with_catalog(catalog: &'c Catalog, config: FusionConfig) -> Self {
        Self {
            catalog,
            config,
            adapters: Vec::new(),
        }
    }

    pub fn register<A: SourceAdapter + Send + Sync + 'static>(mut self, adapter: A) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    pub fn register_defaults(mut self) -> Self {
        self.adapters.extend(default_adapters());
        self
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Every candidate from every adapter, in registration order.
    pub fn candidates(&self, annotation: &AnnotationResult) -> Vec<Detection> {
        self.adapters
            .iter()
            .flat_map(|adapter| adapter.adapt(annotation, self.catalog, &self.config))
            .collect()
    }

    pub fn fuse(&self, annotation: &AnnotationResult) -> FusionResult {
        let candidates = self.candidates(annotation);
        let mut result = self.fuse_candidates(candidates);
        result.raw_text = annotation.full_text().map(str::to_string);
        result
    }

    /// Fuse already-adapted candidates.
    ///
    /// Boxed candidates go through NMS; unboxed ones never do. Survivors of
    /// both kinds are then reduced to one detection per label, keeping the
    /// highest score (the earlier candidate wins a tie).
    pub fn fuse_candidates(&self, candidates: Vec<Detection>) -> FusionResult {
        let total = candidates.len();
        let (boxed, unboxed): (Vec<Detection>, Vec<Detection>) =
            candidates.into_iter().partition(Detection::is_boxed);

        let boxed_kept = nms(boxed, self.config.nms_iou_threshold);
        let best = best_by_label(boxed_kept.iter().chain(unboxed.iter()));

        let mut prioritized = PrioritizedFindings::default();
        for detection in &best {
            prioritized.push(detection.priority, Finding::from(*detection));
        }

        let boxed_labels: HashSet<String> = boxed_kept.iter().map(Detection::dedup_key).collect();
        let unboxed_findings: Vec<UnboxedFinding> = best
            .iter()
            .filter(|d| !d.is_boxed() && !boxed_labels.contains(&d.dedup_key()))
            .map(|d| UnboxedFinding::from(*d))
            .collect();

        let boxed_findings: Vec<BoxedFinding> = boxed_kept
            .iter()
            .enumerate()
            .map(|(i, d)| BoxedFinding::from_detection(i, d))
            .collect();

        tracing::debug!(
            candidates = total,
            boxed = boxed_findings.len(),
            prioritized = prioritized.len(),
            unboxed = unboxed_findings.len(),
            "fused detections"
        );

        FusionResult {
            boxed_findings,
            prioritized_findings: prioritized,
            unboxed_findings,
            ..FusionResult::default()
        }
    }
}

impl Default for FusionEngine<'static> {
    fn default() -> Self {
        Self::with_default_adapters(FusionConfig::default())
    }
}

/// One detection per case-insensitive label, in first-seen order.
fn best_by_label<'a, I>(detections: I) -> Vec<&'a Detection>
where
    I: IntoIterator<Item = &'a Detection>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut best: Vec<&'a Detection> = Vec::new();

    for detection in detections {
        let key = detection.dedup_key();
        match index.get(&key) {
            Some(&slot) => {
                if detection.score > best[slot].score {
                    tracing::trace!(label = %key, score = detection.score, "replaced weaker duplicate");
                    best[slot] = detection;
                }
            }
            None => {
                index.insert(key, best.len());
                best.push(detection);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DetectionSource;
    use crate::adapters::test_utils::{boxed_detection, unlocated_detection};
    use crate::catalog::Priority;

    fn engine() -> FusionEngine<'static> {
        FusionEngine::default()
    }

    #[test]
    fn test_empty_annotation() {
        let result = engine().fuse(&AnnotationResult::default());
        assert!(result.is_empty());
        assert_eq!(result.raw_text, None);
    }

    #[test]
    fn test_engine_without_adapters_yields_nothing() {
        let engine = FusionEngine::new(FusionConfig::default());
        let annotation = AnnotationResult::default().with_object("towel", 0.9, [0.1, 0.1, 0.4, 0.4]);
        assert!(engine.fuse(&annotation).is_empty());
    }

    #[test]
    fn test_register_single_adapter() {
        let engine =
            FusionEngine::new(FusionConfig::default()).register(crate::adapters::LabelAdapter::new());
        let annotation = AnnotationResult::default()
            .with_object("towel", 0.9, [0.1, 0.1, 0.4, 0.4])
            .with_label("Blanket", 0.8);

        let result = engine.fuse(&annotation);
        assert!(result.boxed_findings.is_empty());
        assert_eq!(result.unboxed_findings.len(), 1);
        assert_eq!(result.unboxed_findings[0].label, "Blanket");
    }

    #[test]
    fn test_dedup_keeps_highest_score() {
        let result = engine().fuse_candidates(vec![
            unlocated_detection(DetectionSource::Text, "towel", 0.6),
            unlocated_detection(DetectionSource::Label, "towel", 0.9),
        ]);

        assert_eq!(result.prioritized_findings.green.len(), 1);
        assert_eq!(result.prioritized_findings.green[0].confidence, 0.9);
        assert_eq!(result.prioritized_findings.green[0].source, DetectionSource::Label);
    }

    #[test]
    fn test_dedup_tie_keeps_first() {
        let result = engine().fuse_candidates(vec![
            unlocated_detection(DetectionSource::Text, "towel", 0.7),
            unlocated_detection(DetectionSource::Label, "cloth", 0.7),
        ]);

        assert_eq!(result.unboxed_findings.len(), 1);
        assert_eq!(result.unboxed_findings[0].source, DetectionSource::Text);
    }

    #[test]
    fn test_dedup_is_case_insensitive_for_raw_labels() {
        let result = engine().fuse_candidates(vec![
            boxed_detection("Widget", 0.7, [0.0, 0.0, 0.2, 0.2]),
            boxed_detection("WIDGET", 0.8, [0.6, 0.6, 0.9, 0.9]),
        ]);

        // Both boxes survive NMS, but only one finding per label
        assert_eq!(result.boxed_findings.len(), 2);
        assert_eq!(result.prioritized_findings.red.len(), 1);
        assert_eq!(result.prioritized_findings.red[0].label, "WIDGET");
    }

    #[test]
    fn test_boxed_label_suppresses_stronger_unboxed_mention() {
        let result = engine().fuse_candidates(vec![
            boxed_detection("towel", 0.58, [0.1, 0.3, 0.3, 0.5]),
            unlocated_detection(DetectionSource::Label, "towel", 0.9),
        ]);

        // The label hit wins the tier list but is not repeated as unboxed
        assert_eq!(result.boxed_findings.len(), 1);
        assert_eq!(result.prioritized_findings.green.len(), 1);
        assert_eq!(result.prioritized_findings.green[0].confidence, 0.9);
        assert!(result.unboxed_findings.is_empty());
    }

    #[test]
    fn test_boxed_ids_are_positional() {
        let result = engine().fuse_candidates(vec![
            boxed_detection("mouse", 0.6, [0.0, 0.0, 0.2, 0.2]),
            boxed_detection("knife", 0.9, [0.5, 0.5, 0.7, 0.7]),
        ]);

        let ids: Vec<_> = result.boxed_findings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b0", "b1"]);
        assert_eq!(result.boxed_findings[0].label, "Knives / sharp blades");
        assert_eq!(result.boxed_findings[1].priority, Priority::Red);
    }

    #[test]
    fn test_unlocated_candidates_skip_nms() {
        let result = engine().fuse_candidates(vec![
            unlocated_detection(DetectionSource::Text, "keyboard", 0.6),
            unlocated_detection(DetectionSource::Text, "blanket", 0.6),
        ]);

        assert!(result.boxed_findings.is_empty());
        assert_eq!(result.unboxed_findings.len(), 2);
    }

    #[test]
    fn test_raw_text_passthrough() {
        let annotation = AnnotationResult::default().with_text("Nothing useful here");
        let result = engine().fuse(&annotation);
        assert_eq!(result.raw_text.as_deref(), Some("Nothing useful here"));
        assert!(result.prioritized_findings.is_empty());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = Catalog::from_toml_str(
            r#"
[[items]]
key = "splint"
label = "Splint"
priority = "orange"
synonyms = ["splint"]
"#,
        )
        .unwrap();
        let engine = FusionEngine::with_catalog(&catalog, FusionConfig::default()).register_defaults();
        let result = engine.fuse(&AnnotationResult::default().with_text("SAM splint"));

        assert_eq!(result.prioritized_findings.orange.len(), 1);
        assert_eq!(result.unboxed_findings[0].key.as_deref(), Some("splint"));
    }
}
