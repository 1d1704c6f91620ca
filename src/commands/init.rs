use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{CONFIG_FILE, PROJECT_DIR};
use crate::rules::loader;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Path to initialize (default: current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// Do not copy default rule documents
    #[arg(long)]
    pub no_rules: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let base = match args.path {
        Some(p) => p,
        None => std::env::current_dir().context("resolving current directory")?,
    };
    let project = base.join(PROJECT_DIR);

    if project.exists() && !args.force {
        anyhow::bail!("{} already exists; use --force to overwrite", project.display());
    }

    fs::create_dir_all(project.join("result")).with_context(|| "creating result dir")?;

    let cfg = "# rulescan configuration\noutput = \".rulescan/result\"\nexclude = []\n";
    fs::write(project.join(CONFIG_FILE), cfg).with_context(|| "writing config.toml")?;

    if !args.no_rules {
        for doc in [loader::DEVMAN_DOC, loader::CTC_DOC, loader::DOCKER_DOC] {
            let txt = loader::builtin_doc(doc)
                .with_context(|| format!("builtin rule document {} missing", doc))?;
            fs::write(project.join(doc), txt).with_context(|| format!("writing {}", doc))?;
        }
    }

    println!("Initialized rulescan in {}", base.display());
    println!("Created: {}", project.display());
    Ok(())
}
