use serde::{Deserialize, Serialize};

use crate::models::violation::{DependencyViolation, DockerfileViolation, KeywordViolation};

/// Everything one scan run produced, assembled after all detection completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub app_name: String,
    pub app_version: String,
    pub timestamp: String,
    pub devman: Vec<KeywordViolation>,
    pub ctc: Vec<DependencyViolation>,
    pub docker: Vec<DockerfileViolation>,
}
