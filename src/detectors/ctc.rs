use std::path::Path;

use anyhow::{anyhow, Context, Result};
use semver::{Version, VersionReq};

use crate::models::{DependencyViolation, PackageManifest};
use crate::rules::CtcRules;

/// Checks every declared devDependency against the library rules.
///
/// A manifest without a `devDependencies` object is an error; the caller
/// decides whether that ends the run.
pub fn check_dependencies(content: &str, rules: &CtcRules, file: &Path) -> Result<Vec<DependencyViolation>> {
    let manifest: PackageManifest = serde_json::from_str(content)
        .with_context(|| format!("parsing manifest {}", file.display()))?;
    let deps = manifest
        .dev_dependencies
        .ok_or_else(|| anyhow!("{} has no devDependencies", file.display()))?;

    let lines: Vec<&str> = content.lines().collect();
    let mut violations = Vec::new();

    for (dependency, version) in &deps {
        let rule = rules
            .libraries
            .iter()
            .find(|r| r.name == *dependency && version_in_range(version, &r.version));
        let Some(rule) = rule else { continue };
        if rule.status == "allowed" {
            continue;
        }

        // First line carrying the quoted name. A heuristic: the literal can
        // also appear outside the devDependencies block.
        let needle = format!("\"{}\"", dependency);
        let line_number = lines.iter().position(|l| l.contains(&needle)).map(|i| i + 1);

        violations.push(DependencyViolation {
            dependency: dependency.clone(),
            version: version.clone(),
            status: rule.status.clone(),
            file: file.to_string_lossy().to_string(),
            line_number,
        });
    }

    Ok(violations)
}

/// npm-style range acceptance. `*`, `latest` and an empty range accept every
/// declaration; a side that does not parse makes the rule not match.
pub fn version_in_range(declared: &str, range: &str) -> bool {
    let range = range.trim();
    if range.is_empty() || range == "*" || range == "latest" {
        return true;
    }
    let Ok(req) = VersionReq::parse(range) else {
        return false;
    };
    match parse_declared(declared) {
        Some(version) => req.matches(&version),
        None => false,
    }
}

/// Reduces a declared spec like `^1.2` or `v2.0.1` to a concrete version:
/// strip one leading range operator, pad to three components.
fn parse_declared(declared: &str) -> Option<Version> {
    let bare = declared.trim().trim_start_matches(['^', '~', '=', '>', '<', 'v', ' ']);
    if let Ok(version) = Version::parse(bare) {
        return Some(version);
    }
    let mut padded = bare.to_string();
    for _ in 0..2 {
        padded.push_str(".0");
        if let Ok(version) = Version::parse(&padded) {
            return Some(version);
        }
    }
    None
}
