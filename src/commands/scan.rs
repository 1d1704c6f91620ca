use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use crate::config::Config;
use crate::detectors;
use crate::models::{PackageManifest, ScanReport};
use crate::output;
use crate::rules::loader::{self, RuleSet};
use crate::scanner::{self, FileKind};

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Project root to scan
    pub root: PathBuf,

    /// Rules directory (overrides project and builtin rule documents)
    #[arg(short = 'r', long)]
    pub rules: Option<PathBuf>,

    /// Base output directory (default: <ROOT>/.rulescan/result)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional excluded directory names
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Disable builtin rule documents
    #[arg(long)]
    pub no_builtin: bool,

    /// List the loaded rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Verbose
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One scan run: load rules, walk, detect, then write the reports.
/// Nothing is written before every detector has finished.
pub fn run(args: ScanArgs) -> Result<()> {
    let root = fs::canonicalize(&args.root)
        .with_context(|| format!("resolving project root {}", args.root.display()))?;

    let config = Config::load(&root)?;

    let rules = loader::load_rule_set(&root, args.rules.as_deref(), !args.no_builtin)
        .context("loading rules")?;

    if args.verbose > 0 {
        eprintln!(
            "Loaded {} keyword patterns, {} library rules, {} Dockerfile rules",
            rules.keywords.len(),
            rules.ctc.libraries.len(),
            rules.docker.as_ref().map_or(0, |d| d.rules.len())
        );
    }

    if args.list_rules {
        print_rules(&rules);
        return Ok(());
    }

    // Report metadata comes from the root manifest.
    let manifest_path = root.join("package.json");
    let manifest_txt = fs::read_to_string(&manifest_path)
        .with_context(|| format!("reading {}", manifest_path.display()))?;
    let manifest: PackageManifest = serde_json::from_str(&manifest_txt)
        .with_context(|| format!("parsing {}", manifest_path.display()))?;

    if args.verbose > 0 {
        eprintln!("Scanning {}", root.display());
    }
    let excludes = config.excludes(&args.exclude);
    let files = scanner::walk_files(&root, &excludes)?;
    if args.verbose > 0 {
        eprintln!("Walked {} files", files.len());
    }

    let mut report = ScanReport {
        app_name: manifest.name.clone().unwrap_or_else(|| "unknown".to_string()),
        app_version: manifest.version.clone().unwrap_or_else(|| "unknown".to_string()),
        timestamp: Utc::now().format("%Y%m%d-%H%M%S").to_string(),
        ..ScanReport::default()
    };

    for file in &files {
        let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        let kind = scanner::classify(file);

        // Dockerfiles are exempt from the keyword pass.
        if kind != FileKind::Dockerfile {
            report
                .devman
                .extend(detectors::check_keywords(&content, &rules.keywords, file));
        }
        match kind {
            FileKind::Manifest => {
                report
                    .ctc
                    .extend(detectors::check_dependencies(&content, &rules.ctc, file)?);
            }
            FileKind::Dockerfile => {
                if let Some(docker_rules) = &rules.docker {
                    report
                        .docker
                        .extend(detectors::check_dockerfile(&content, docker_rules, file));
                }
            }
            FileKind::Other => {}
        }
    }

    let out_base = config.output_dir(&root, args.output.as_deref());
    let result_dir = out_base.join(format!("result-{}", report.timestamp));
    fs::create_dir_all(&result_dir)
        .with_context(|| format!("creating result folder {}", result_dir.display()))?;

    write_json(&result_dir.join("devman_report.json"), &report.devman)?;
    write_json(&result_dir.join("ctcscan_report.json"), &report.ctc)?;
    write_json(&result_dir.join("docker_scan_report.json"), &report.docker)?;

    let html_path = result_dir.join("report.html");
    fs::write(&html_path, output::render_report(&report))
        .with_context(|| format!("writing {}", html_path.display()))?;

    println!("Scan reports written to {}", result_dir.display());
    println!("DevMan violations: {}", report.devman.len());
    println!("CTC violations: {}", report.ctc.len());
    println!("Dockerfile violations: {}", report.docker.len());

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = output::to_pretty_json(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn print_rules(rules: &RuleSet) {
    for keyword in rules.keywords.patterns() {
        println!("keyword: {}", keyword);
    }
    for library in &rules.ctc.libraries {
        println!("library: {} {} [{}]", library.name, library.version, library.status);
    }
    if let Some(docker) = &rules.docker {
        for (id, rule) in &docker.rules {
            println!("dockerfile: {} - {}", id, rule.description);
        }
    }
}
