use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::KeywordViolation;
use crate::rules::DevmanRules;

/// Sensitive-keyword patterns, compiled once per run.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    patterns: Vec<(String, Regex)>,
}

impl KeywordSet {
    pub fn compile(rules: &DevmanRules) -> Result<Self> {
        let mut patterns = Vec::with_capacity(rules.sensitive_keywords.len());
        for keyword in &rules.sensitive_keywords {
            let re = Regex::new(keyword)
                .with_context(|| format!("invalid sensitive keyword pattern `{}`", keyword))?;
            patterns.push((keyword.clone(), re));
        }
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(keyword, _)| keyword.as_str())
    }
}

/// One violation per (line, keyword) pair; repeated matches within a line add
/// nothing. Lines are 1-based.
pub fn check_keywords(content: &str, keywords: &KeywordSet, file: &Path) -> Vec<KeywordViolation> {
    let mut violations = Vec::new();

    for (i, line) in content.lines().enumerate() {
        for (keyword, re) in &keywords.patterns {
            if re.is_match(line) {
                violations.push(KeywordViolation {
                    file: file.to_string_lossy().to_string(),
                    line_number: i + 1,
                    rule_matched: keyword.clone(),
                });
            }
        }
    }

    violations
}
