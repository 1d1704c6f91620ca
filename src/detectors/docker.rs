use std::path::Path;

use crate::models::DockerfileViolation;
use crate::rules::DockerRules;

const FROM_IMAGE_VERSION: &str = "FROMImageVersion";
const CONTAINER_USER: &str = "ContainerUser";

/// Statement checks over trimmed lines: `FROM` must not use `latest`,
/// `USER` must not be `root`. Extending this means adding more
/// literal-substring predicates keyed by statement prefix.
pub fn check_dockerfile(content: &str, rules: &DockerRules, file: &Path) -> Vec<DockerfileViolation> {
    let mut violations = Vec::new();

    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with("FROM") {
            if line.contains("latest") {
                violations.push(violation(rules, FROM_IMAGE_VERSION, file, i + 1));
            }
        } else if line.starts_with("USER") {
            if line.contains("root") {
                violations.push(violation(rules, CONTAINER_USER, file, i + 1));
            }
        }
    }

    violations
}

fn violation(rules: &DockerRules, rule_id: &str, file: &Path, line_number: usize) -> DockerfileViolation {
    let description = rules
        .rules
        .get(rule_id)
        .map(|rule| rule.description.clone())
        .unwrap_or_else(|| format!("No description available ({})", rule_id));

    DockerfileViolation {
        violation: description,
        file: file.to_string_lossy().to_string(),
        line_number,
    }
}
