use std::collections::BTreeMap;

use serde::Deserialize;

/// The subset of `package.json` the scanner reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}
