use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

pub mod builtin;

/// Triage tier assigned to every finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Take
    Green,
    /// Take if there is room
    Orange,
    /// Leave behind (also the tier for anything unrecognized)
    Red,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Green, Priority::Orange, Priority::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Green => "green",
            Priority::Orange => "orange",
            Priority::Red => "red",
        }
    }

    /// Short instruction shown next to the tier in reports.
    pub fn action(&self) -> &'static str {
        match self {
            Priority::Green => "Take!",
            Priority::Orange => "Take if have space!",
            Priority::Red => "Leave behind!",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known item the engine can recognize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogItem {
    /// Stable identifier (e.g., "clean_cloth")
    pub key: String,
    /// Canonical display name, also used as the de-duplication key
    pub label: String,
    pub priority: Priority,
    /// Lowercase strings matched against labels and OCR tokens
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Vocabulary the detector is known to emit for this item
    #[serde(default)]
    pub detector_hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog item has an empty key (label: {label})")]
    EmptyKey { label: String },
    #[error("Catalog item '{key}' has an empty label")]
    EmptyLabel { key: String },
    #[error("Duplicate catalog key: {key}")]
    DuplicateKey { key: String },
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Outcome of a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Categorization<'a> {
    pub priority: Priority,
    pub item: Option<&'a CatalogItem>,
}

impl<'a> Categorization<'a> {
    pub fn unknown() -> Self {
        Self {
            priority: Priority::Red,
            item: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.item.is_some()
    }

    pub fn key(&self) -> Option<&'a str> {
        self.item.map(|item| item.key.as_str())
    }

    pub fn label(&self) -> Option<&'a str> {
        self.item.map(|item| item.label.as_str())
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

/// Ordered, immutable table of catalog items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    items: builtin::first_aid_items(),
});

impl Catalog {
    /// Build a catalog from items, normalizing match strings to lowercase.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(items.len());

        for mut item in items {
            item.key = item.key.trim().to_string();
            item.label = item.label.trim().to_string();
            if item.key.is_empty() {
                return Err(CatalogError::EmptyKey { label: item.label });
            }
            if item.label.is_empty() {
                return Err(CatalogError::EmptyLabel { key: item.key });
            }
            if !seen.insert(item.key.clone()) {
                return Err(CatalogError::DuplicateKey { key: item.key });
            }
            item.synonyms = normalize_terms(item.synonyms);
            item.detector_hints = normalize_terms(item.detector_hints);
            normalized.push(item);
        }

        Ok(Self { items: normalized })
    }

    /// The builtin first-aid catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse a catalog from TOML made of `[[items]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.items)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Map a free-form detector label onto the catalog.
    ///
    /// Detector hints are scanned first, then synonyms, both in declaration
    /// order and both as substrings of the lowercased label. The first hit
    /// wins. Anything unmatched is classified red with no item.
    pub fn categorize(&self, raw_label: &str) -> Categorization<'_> {
        let needle = raw_label.to_lowercase();

        let by_hint = self.items.iter().find(|item| {
            item.detector_hints
                .iter()
                .any(|hint| needle.contains(hint.as_str()))
        });
        let matched = by_hint.or_else(|| {
            self.items.iter().find(|item| {
                item.synonyms
                    .iter()
                    .any(|synonym| needle.contains(synonym.as_str()))
            })
        });

        match matched {
            Some(item) => Categorization {
                priority: item.priority,
                item: Some(item),
            },
            None => Categorization::unknown(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Categorize against the builtin catalog.
pub fn categorize(raw_label: &str) -> Categorization<'static> {
    Catalog::builtin().categorize(raw_label)
}

fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(key: &str, priority: Priority, synonyms: &[&str], hints: &[&str]) -> CatalogItem {
        CatalogItem {
            key: key.to_string(),
            label: key.to_uppercase(),
            priority,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            detector_hints: hints.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let rebuilt = Catalog::new(builtin::first_aid_items()).unwrap();
        assert_eq!(&rebuilt, Catalog::builtin());
        assert!(!Catalog::builtin().is_empty());
    }

    #[test]
    fn test_hints_win_over_earlier_synonyms() {
        let catalog = Catalog::new(vec![
            test_item("first", Priority::Green, &["mug"], &[]),
            test_item("second", Priority::Red, &[], &["mug"]),
        ])
        .unwrap();

        let result = catalog.categorize("Coffee Mug");
        assert_eq!(result.key(), Some("second"));
        assert_eq!(result.priority, Priority::Red);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let catalog = Catalog::new(vec![
            test_item("a", Priority::Orange, &[], &["bag"]),
            test_item("b", Priority::Green, &[], &["plastic bag"]),
        ])
        .unwrap();

        assert_eq!(catalog.categorize("plastic bag").key(), Some("a"));
    }

    #[test]
    fn test_unknown_label_is_red() {
        let result = categorize("widget");
        assert_eq!(result.priority, Priority::Red);
        assert!(result.item.is_none());
        assert!(!result.is_known());
    }

    #[test]
    fn test_empty_label_is_unknown() {
        assert_eq!(categorize(""), Categorization::unknown());
    }

    #[test]
    fn test_match_strings_are_normalized() {
        let catalog = Catalog::new(vec![test_item(
            "towel",
            Priority::Green,
            &["  Dish Towel "],
            &["", "TOWEL"],
        )])
        .unwrap();

        let item = catalog.get("towel").unwrap();
        assert_eq!(item.synonyms, vec!["dish towel"]);
        assert_eq!(item.detector_hints, vec!["towel"]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = Catalog::new(vec![
            test_item("dup", Priority::Green, &["a"], &[]),
            test_item("dup", Priority::Red, &["b"], &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey { key } if key == "dup"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = Catalog::new(vec![test_item(" ", Priority::Green, &[], &[])]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyKey { .. }));
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
[[items]]
key = "bandage"
label = "Bandage"
priority = "green"
synonyms = ["bandage", "gauze"]

[[items]]
key = "vase"
label = "Vase"
priority = "red"
detector_hints = ["vase"]
notes = "Fragile."
"#;
        let catalog = Catalog::from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.categorize("Gauze roll").key(), Some("bandage"));
        assert_eq!(
            catalog.get("vase").unwrap().notes.as_deref(),
            Some("Fragile.")
        );
    }

    #[test]
    fn test_from_toml_rejects_bad_priority() {
        let toml_str = r#"
[[items]]
key = "x"
label = "X"
priority = "purple"
"#;
        assert!(matches!(
            Catalog::from_toml_str(toml_str),
            Err(CatalogError::Parse(_))
        ));
    }
}
