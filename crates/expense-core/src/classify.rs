//! Keyword-based category classifier
//!
//! Expenses recorded without a category are classified from their merchant and
//! note text. Rules are scanned in declaration order and the first rule with any
//! keyword contained in the lower-cased text wins, so overlapping vocabulary is
//! resolved purely by position in the table. When nothing matches the expense
//! goes to the fallback category "Other".
//!
//! ## Rule Resolution
//!
//! The rule table is loaded once at startup:
//! 1. An explicit rules file (`--rules` / `EXPENSE_RULES`), if given
//! 2. An override in the data dir (~/.local/share/expense-tracker/rules.toml)
//! 3. The built-in table below

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Category assigned when no rule matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// Built-in rule table. Order matters: earlier rules win.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("Transport", &["uber", "bus", "train", "fuel", "gas", "shell"]),
    ("Groceries", &["walmart", "aldi", "lidl", "grocery", "supermarket"]),
    (
        "Restaurants",
        &["starbucks", "kfc", "mcdonald", "restaurant", "pizza", "cafe"],
    ),
    ("Entertainment", &["netflix", "spotify", "cinema", "movie"]),
    ("Health", &["pharmacy", "drug", "doctor", "clinic"]),
    (
        "Utilities",
        &["electric", "water", "internet", "utility", "bill"],
    ),
    ("Shopping", &["amazon", "shop", "store"]),
];

/// A set of keywords that map to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    /// Lowercase, non-empty, de-duplicated (first occurrence kept)
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Build a rule, normalizing keywords to lowercase
    pub fn new<S: AsRef<str>>(category: &str, keywords: &[S]) -> Result<Self> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::Config("rule category must not be empty".to_string()));
        }

        let mut normalized: Vec<String> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(Error::Config(format!(
                    "rule '{}' has an empty keyword",
                    category
                )));
            }
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        if normalized.is_empty() {
            return Err(Error::Config(format!(
                "rule '{}' must have at least one keyword",
                category
            )));
        }

        Ok(Self {
            category: category.to_string(),
            keywords: normalized,
        })
    }

    /// First keyword contained in already lower-cased text
    pub fn matching_keyword(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(|k| k.as_str())
    }
}

/// Outcome of classifying a piece of text, with the keyword that decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: String,
    /// None when the fallback category was used
    pub keyword: Option<String>,
}

/// Ordered, immutable rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Rules are kept in the given order
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The built-in table
    pub fn builtin() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(category, keywords)| CategoryRule {
                category: (*category).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Category name for free text. Never fails; "Other" when nothing matches.
    pub fn classify(&self, text: &str) -> &str {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matching_keyword(&lowered).is_some())
            .map(|rule| rule.category.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Like `classify`, but also reports the keyword that matched
    pub fn explain(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();
        for rule in &self.rules {
            if let Some(keyword) = rule.matching_keyword(&lowered) {
                return Classification {
                    category: rule.category.clone(),
                    keyword: Some(keyword.to_string()),
                };
            }
        }
        Classification {
            category: FALLBACK_CATEGORY.to_string(),
            keyword: None,
        }
    }

    /// Parse a rules file
    ///
    /// ```toml
    /// [[rules]]
    /// category = "Transport"
    /// keywords = ["uber", "bus"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawRuleFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid rules TOML: {}", e)))?;

        let rules = raw
            .rules
            .iter()
            .map(|r| CategoryRule::new(&r.category, &r.keywords))
            .collect::<Result<Vec<_>>>()?;

        if rules.is_empty() {
            return Err(Error::Config("rules file defines no rules".to_string()));
        }

        Ok(Self::new(rules))
    }

    /// Load rules from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read rules file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the rule table (explicit path, then data-dir override, then built-in)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let rules = Self::from_file(path)?;
            info!(path = %path.display(), rules = rules.len(), "Loaded classification rules");
            return Ok(rules);
        }

        if let Some(path) = default_rules_path() {
            if path.exists() {
                let rules = Self::from_file(&path)?;
                info!(path = %path.display(), rules = rules.len(), "Loaded classification rules override");
                return Ok(rules);
            }
        }

        debug!("Using built-in classification rules");
        Ok(Self::builtin())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct RawRuleFile {
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Default rules override path
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("expense-tracker").join("rules.toml"))
}

/// Classify against the built-in table
pub fn classify(text: &str) -> &'static str {
    static BUILTIN: OnceLock<RuleSet> = OnceLock::new();
    BUILTIN.get_or_init(RuleSet::builtin).classify(text)
}
