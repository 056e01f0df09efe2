use crate::adapters::{Detection, DetectionSource};
use crate::catalog::Priority;
use crate::geometry::NormalizedBox;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: &str = "0.1.0";

/// A located finding, ready for overlay rendering.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct BoxedFinding {
    /// Positional id, unique only within one result
    pub id: String,
    #[serde(rename = "box")]
    pub bbox: NormalizedBox,
    pub label: String,
    pub score: f32,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl BoxedFinding {
    pub fn from_detection(index: usize, detection: &Detection) -> Self {
        Self {
            id: format!("b{}", index),
            bbox: detection.bbox,
            label: detection.label().to_string(),
            score: detection.score,
            priority: detection.priority,
            key: detection.matched_key.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct Finding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub label: String,
    pub confidence: f32,
    pub source: DetectionSource,
}

impl From<&Detection> for Finding {
    fn from(d: &Detection) -> Self {
        Self {
            key: d.matched_key.clone(),
            label: d.label().to_string(),
            confidence: d.score,
            source: d.source,
        }
    }
}

/// Recognized through text or labels but never located.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct UnboxedFinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub label: String,
    pub confidence: f32,
    pub priority: Priority,
    pub source: DetectionSource,
}

impl From<&Detection> for UnboxedFinding {
    fn from(d: &Detection) -> Self {
        Self {
            key: d.matched_key.clone(),
            label: d.label().to_string(),
            confidence: d.score,
            priority: d.priority,
            source: d.source,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct PrioritizedFindings {
    #[serde(default)]
    pub green: Vec<Finding>,
    #[serde(default)]
    pub orange: Vec<Finding>,
    #[serde(default)]
    pub red: Vec<Finding>,
}

impl PrioritizedFindings {
    pub fn get(&self, priority: Priority) -> &[Finding] {
        match priority {
            Priority::Green => &self.green,
            Priority::Orange => &self.orange,
            Priority::Red => &self.red,
        }
    }

    pub fn push(&mut self, priority: Priority, finding: Finding) {
        match priority {
            Priority::Green => self.green.push(finding),
            Priority::Orange => self.orange.push(finding),
            Priority::Red => self.red.push(finding),
        }
    }

    /// Tiers in green, orange, red order.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &Finding)> {
        Priority::ALL
            .into_iter()
            .flat_map(move |p| self.get(p).iter().map(move |f| (p, f)))
    }

    pub fn len(&self) -> usize {
        self.green.len() + self.orange.len() + self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one fusion pass.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct FusionResult {
    pub boxed_findings: Vec<BoxedFinding>,
    pub prioritized_findings: PrioritizedFindings,
    pub unboxed_findings: Vec<UnboxedFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub version: String,
    /// Set only on the substitute result served when the detector failed
    #[serde(default)]
    pub degraded: bool,
}

impl Default for FusionResult {
    fn default() -> Self {
        Self {
            boxed_findings: Vec::new(),
            prioritized_findings: PrioritizedFindings::default(),
            unboxed_findings: Vec::new(),
            raw_text: None,
            version: SCHEMA_VERSION.to_string(),
            degraded: false,
        }
    }
}

impl FusionResult {
    pub fn is_empty(&self) -> bool {
        self.boxed_findings.is_empty()
            && self.prioritized_findings.is_empty()
            && self.unboxed_findings.is_empty()
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FusionResult)
    }
}
