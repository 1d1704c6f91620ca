use serde::{Deserialize, Serialize};

/// A line matching one configured sensitive-keyword pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordViolation {
    pub file: String,
    #[serde(rename = "lineNumber")]
    pub line_number: usize,
    #[serde(rename = "ruleMatched")]
    pub rule_matched: String,
}

/// A declared dependency whose matched library rule is not "allowed".
///
/// `line_number` is the first line containing the quoted dependency name,
/// or `None` when the literal does not appear in the manifest text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyViolation {
    pub dependency: String,
    pub version: String,
    pub status: String,
    pub file: String,
    #[serde(rename = "lineNumber")]
    pub line_number: Option<usize>,
}

/// A Dockerfile statement breaking one of the configured rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerfileViolation {
    pub violation: String,
    pub file: String,
    #[serde(rename = "lineNumber")]
    pub line_number: usize,
}

impl KeywordViolation {
    pub fn description(&self) -> &str {
        &self.rule_matched
    }
}

impl DependencyViolation {
    pub fn description(&self) -> &str {
        &self.dependency
    }
}

impl DockerfileViolation {
    pub fn description(&self) -> &str {
        &self.violation
    }
}
