//! pkgload CLI
//!
//! Entry point for the `pkgload` command-line tool.

use clap::{Parser, Subcommand};
use pkgload::{BuildFlags, DebugImportcfg, Package};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `pkgload=debug`)
const LOG_ENV: &str = "PKGLOAD_LOG";

#[derive(Parser)]
#[command(name = "pkgload")]
#[command(about = "Resolve import paths to package directories", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve import paths to package directories
    Resolve {
        #[command(flatten)]
        flags: BuildFlags,

        /// Resolve the paths as imports of this package
        #[arg(long, value_name = "IMPORT_PATH")]
        from: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Import paths to resolve
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Load a debug importcfg file and report what it contains
    #[command(hide = true)]
    CheckImportcfg {
        /// The importcfg file
        file: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            flags,
            from,
            json,
            paths,
        } => {
            run_resolve(&flags, from.as_deref(), json, &paths);
        }
        Commands::CheckImportcfg { file, json } => {
            run_check_importcfg(&file, json);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_resolve(flags: &BuildFlags, from: Option<&str>, json_output: bool, paths: &[String]) {
    let loader = match flags.loader() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("pkgload: {}", e);
            process::exit(1);
        }
    };

    let parent = match from {
        Some(from) => match loader.resolve(None, from) {
            Ok(p) => Some(p),
            Err(e) => {
                eprintln!("pkgload: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let mut packages: Vec<Package> = Vec::with_capacity(paths.len());
    let mut failed = false;
    for path in paths {
        match loader.resolve(parent.as_ref(), path) {
            Ok(pkg) => packages.push(pkg),
            Err(e) => {
                eprintln!("pkgload: {}", e);
                failed = true;
            }
        }
    }

    if json_output {
        match serde_json::to_string_pretty(&packages) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        for pkg in &packages {
            println!("{}\t{}\t{}", pkg.import_path, pkg.dir.display(), pkg.origin);
        }
    }

    if failed {
        process::exit(1);
    }
}

fn run_check_importcfg(file: &Path, json_output: bool) {
    let importcfg = match DebugImportcfg::load(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("pkgload: {}", e);
            process::exit(1);
        }
    };

    let digest = importcfg.source().map(|s| s.digest.as_str()).unwrap_or("");

    if json_output {
        let entries: Vec<serde_json::Value> = importcfg
            .import_paths()
            .into_iter()
            .filter_map(|path| {
                importcfg.entry(path).map(|entry| {
                    let mut imports: Vec<(&String, &String)> = entry.import.iter().collect();
                    imports.sort();
                    serde_json::json!({
                        "import_path": path,
                        "dir": entry.dir,
                        "imports": imports
                            .into_iter()
                            .map(|(name, target)| serde_json::json!({ "name": name, "target": target }))
                            .collect::<Vec<_>>(),
                    })
                })
            })
            .collect();

        let output = serde_json::json!({
            "path": file.display().to_string(),
            "digest": digest,
            "entries": entries,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Importcfg valid: {}", file.display());
    println!("  Digest: sha256:{}", digest);
    println!("  Packages: {}", importcfg.len());
    for path in importcfg.import_paths() {
        let Some(entry) = importcfg.entry(path) else {
            continue;
        };
        if entry.dir.is_empty() {
            println!("    {} (no Dir)", path);
        } else {
            println!("    {} -> {}", path, entry.dir);
        }
        let mut imports: Vec<_> = entry.import.iter().collect();
        imports.sort();
        for (name, target) in imports {
            println!("      import {} => {}", name, target);
        }
    }
}
