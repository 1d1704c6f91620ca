pub mod loader;

use std::collections::BTreeMap;

use serde::Deserialize;

/// `devman.json`: raw regex fragments, matched per line against file content.
#[derive(Debug, Clone, Deserialize)]
pub struct DevmanRules {
    #[serde(rename = "sensitiveKeywords")]
    pub sensitive_keywords: Vec<String>,
}

/// One entry of `ctcrule.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryRule {
    pub name: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CtcRules {
    pub libraries: Vec<LibraryRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerRule {
    pub description: String,
}

/// `docker.json`: rule descriptions keyed by rule id.
#[derive(Debug, Clone, Deserialize)]
pub struct DockerRules {
    pub rules: BTreeMap<String, DockerRule>,
}

pub use loader::{load_rule_set, RuleSet};
