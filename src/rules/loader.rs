use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};

use crate::config::PROJECT_DIR;
use crate::detectors::KeywordSet;
use crate::rules::{CtcRules, DevmanRules, DockerRules};

static BUILTIN_RULES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/builtin-rules");

pub const DEVMAN_DOC: &str = "devman.json";
pub const CTC_DOC: &str = "ctcrule.json";
pub const DOCKER_DOC: &str = "docker.json";

/// Everything one scan run detects against. Loaded once, immutable for the run.
///
/// `docker` is `None` when `docker.json` could not be loaded; only the
/// Dockerfile detector is disabled in that case.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub keywords: KeywordSet,
    pub ctc: CtcRules,
    pub docker: Option<DockerRules>,
}

pub fn load_rule_set(root: &Path, rules_dir: Option<&Path>, include_builtin: bool) -> Result<RuleSet> {
    let devman: DevmanRules = load_doc(root, rules_dir, DEVMAN_DOC, include_builtin)?;
    let keywords = KeywordSet::compile(&devman)?;

    let ctc: CtcRules = load_doc(root, rules_dir, CTC_DOC, include_builtin)?;

    let docker = match load_doc::<DockerRules>(root, rules_dir, DOCKER_DOC, include_builtin) {
        Ok(rules) => Some(rules),
        Err(e) => {
            eprintln!("warning: {:#}; skipping Dockerfile checks", e);
            None
        }
    };

    Ok(RuleSet { keywords, ctc, docker })
}

fn load_doc<T: serde::de::DeserializeOwned>(
    root: &Path,
    rules_dir: Option<&Path>,
    doc: &str,
    include_builtin: bool,
) -> Result<T> {
    let txt = read_rule_doc(root, rules_dir, doc, include_builtin)?
        .ok_or_else(|| anyhow::anyhow!("rule document {} not found", doc))?;
    serde_json::from_str(&txt).with_context(|| format!("parsing rule document {}", doc))
}

/// First found wins: explicit rules dir, project dir, user config dir, builtin.
fn read_rule_doc(
    root: &Path,
    rules_dir: Option<&Path>,
    doc: &str,
    include_builtin: bool,
) -> Result<Option<String>> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = rules_dir {
        candidates.push(dir.join(doc));
    }
    candidates.push(root.join(PROJECT_DIR).join(doc));
    if let Some(mut dir) = dirs_next::config_dir() {
        dir.push("rulescan");
        dir.push("rules");
        candidates.push(dir.join(doc));
    }

    for path in candidates {
        if path.is_file() {
            let txt = fs::read_to_string(&path)
                .with_context(|| format!("reading rule file {}", path.display()))?;
            return Ok(Some(txt));
        }
    }

    if include_builtin {
        if let Some(txt) = builtin_doc(doc) {
            return Ok(Some(txt.to_string()));
        }
    }

    Ok(None)
}

pub fn builtin_doc(name: &str) -> Option<&'static str> {
    BUILTIN_RULES_DIR.get_file(name).and_then(|f| f.contents_utf8())
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn builtin_documents_load_and_parse() {
        let td = tempdir().expect("tempdir");
        let rules = load_rule_set(td.path(), None, true).expect("builtin rules should load");

        assert!(!rules.keywords.is_empty());
        assert!(rules.ctc.libraries.iter().any(|l| l.status == "denied"));

        let docker = rules.docker.expect("builtin docker rules");
        assert!(docker.rules.contains_key("FROMImageVersion"));
        assert!(docker.rules.contains_key("ContainerUser"));
    }

    #[test]
    fn project_document_overrides_builtin() {
        let td = tempdir().expect("tempdir");
        let project = td.path().join(PROJECT_DIR);
        create_dir_all(&project).expect("mkdir");
        write(
            project.join(DEVMAN_DOC),
            r#"{ "sensitiveKeywords": ["only_this_one"] }"#,
        )
        .expect("write devman.json");

        let rules = load_rule_set(td.path(), None, true).expect("rules should load");
        let patterns: Vec<&str> = rules.keywords.patterns().collect();
        assert_eq!(patterns, vec!["only_this_one"]);
    }

    #[test]
    fn explicit_rules_dir_wins_over_project() {
        let td = tempdir().expect("tempdir");
        let project = td.path().join(PROJECT_DIR);
        let explicit = td.path().join("custom-rules");
        create_dir_all(&project).expect("mkdir project");
        create_dir_all(&explicit).expect("mkdir explicit");
        write(project.join(DEVMAN_DOC), r#"{ "sensitiveKeywords": ["from_project"] }"#)
            .expect("write project devman.json");
        write(explicit.join(DEVMAN_DOC), r#"{ "sensitiveKeywords": ["from_explicit"] }"#)
            .expect("write explicit devman.json");

        let rules = load_rule_set(td.path(), Some(&explicit), true).expect("rules should load");
        let patterns: Vec<&str> = rules.keywords.patterns().collect();
        assert_eq!(patterns, vec!["from_explicit"]);
    }

    #[test]
    fn missing_devman_document_is_fatal() {
        let td = tempdir().expect("tempdir");
        let err = load_rule_set(td.path(), None, false).unwrap_err();
        assert!(format!("{err:#}").contains(DEVMAN_DOC), "unexpected error: {err:#}");
    }

    #[test]
    fn invalid_keyword_pattern_is_fatal() {
        let td = tempdir().expect("tempdir");
        let project = td.path().join(PROJECT_DIR);
        create_dir_all(&project).expect("mkdir");
        write(project.join(DEVMAN_DOC), r#"{ "sensitiveKeywords": ["(unclosed"] }"#)
            .expect("write devman.json");

        let err = load_rule_set(td.path(), None, true).unwrap_err();
        assert!(format!("{err:#}").contains("(unclosed"), "unexpected error: {err:#}");
    }

    #[test]
    fn broken_docker_document_only_disables_docker_checks() {
        let td = tempdir().expect("tempdir");
        let project = td.path().join(PROJECT_DIR);
        create_dir_all(&project).expect("mkdir");
        write(project.join(DOCKER_DOC), "not json at all").expect("write docker.json");

        let rules = load_rule_set(td.path(), None, true).expect("run should still get rules");
        assert!(rules.docker.is_none());
        assert!(!rules.keywords.is_empty());
    }
}
