mod commands;
mod config;
mod detectors;
mod models;
mod output;
mod rules;
mod scanner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root to scan (shorthand for `rulescan scan <ROOT>`)
    root: Option<PathBuf>,

    /// Rules directory (overrides project and builtin rule documents)
    #[arg(short = 'r', long)]
    rules: Option<PathBuf>,

    /// Base output directory (default: <ROOT>/.rulescan/result)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Additional excluded directory names
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Disable builtin rule documents
    #[arg(long)]
    no_builtin: bool,

    /// List the loaded rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Verbose
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize rulescan files in a project
    Init(commands::init::InitArgs),
    /// Scan a project and write JSON + HTML reports
    Scan(commands::scan::ScanArgs),
}

fn main() {
    let args = Args::parse();

    if let Some(command) = args.command {
        let result = match command {
            Commands::Init(init_args) => commands::init::run(init_args),
            Commands::Scan(scan_args) => commands::scan::run(scan_args),
        };
        if let Err(e) = result {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let root = match args.root {
        Some(p) => p,
        None => {
            eprintln!("project root is required");
            std::process::exit(2);
        }
    };

    let scan_args = commands::scan::ScanArgs {
        root,
        rules: args.rules,
        output: args.output,
        exclude: args.exclude,
        no_builtin: args.no_builtin,
        list_rules: args.list_rules,
        verbose: args.verbose,
    };
    if let Err(e) = commands::scan::run(scan_args) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
