use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::scanner::DEFAULT_EXCLUDES;

pub const PROJECT_DIR: &str = ".rulescan";
pub const CONFIG_FILE: &str = "config.toml";

/// Optional per-project settings, `<root>/.rulescan/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub output: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PROJECT_DIR).join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let txt = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    /// CLI flag > config > `<root>/.rulescan/result`. Relative paths resolve
    /// against the project root.
    pub fn output_dir(&self, root: &Path, cli: Option<&Path>) -> PathBuf {
        let base = cli
            .map(Path::to_path_buf)
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| Path::new(PROJECT_DIR).join("result"));
        if base.is_absolute() {
            base
        } else {
            root.join(base)
        }
    }

    /// Defaults plus config plus CLI excludes; additive, never subtractive.
    pub fn excludes(&self, extra: &[String]) -> HashSet<String> {
        let mut set: HashSet<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        if let Some(more) = &self.exclude {
            set.extend(more.iter().cloned());
        }
        set.extend(extra.iter().cloned());
        set
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let td = tempdir().expect("tempdir");
        let config = Config::load(td.path()).expect("load");

        assert_eq!(
            config.output_dir(td.path(), None),
            td.path().join(".rulescan/result")
        );
        let excludes = config.excludes(&[]);
        for name in DEFAULT_EXCLUDES {
            assert!(excludes.contains(name));
        }
    }

    #[test]
    fn config_values_are_read_and_cli_still_wins() {
        let td = tempdir().expect("tempdir");
        let project = td.path().join(PROJECT_DIR);
        create_dir_all(&project).expect("mkdir");
        write(project.join(CONFIG_FILE), "output = \"reports\"\nexclude = [\"vendor\"]\n")
            .expect("write config");

        let config = Config::load(td.path()).expect("load");
        assert_eq!(config.output_dir(td.path(), None), td.path().join("reports"));
        assert_eq!(
            config.output_dir(td.path(), Some(Path::new("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );

        let excludes = config.excludes(&["dist".to_string()]);
        assert!(excludes.contains("vendor"));
        assert!(excludes.contains("dist"));
        assert!(excludes.contains("node_modules"));
    }

    #[test]
    fn unparseable_config_is_an_error() {
        let td = tempdir().expect("tempdir");
        let project = td.path().join(PROJECT_DIR);
        create_dir_all(&project).expect("mkdir");
        write(project.join(CONFIG_FILE), "output = [not toml").expect("write config");

        assert!(Config::load(td.path()).is_err());
    }
}
