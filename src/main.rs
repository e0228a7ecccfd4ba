//! ndoc: build or serve documentation from `.ndoc` files.
//!
//! - `ndoc build` renders `docs/*.ndoc` into `build/`
//! - `ndoc serve` serves the docs with live reload
//! - `ndoc check` lists lines the parser dropped

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ndoc", version, about = "Documentation generator for .ndoc files")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root containing ndoc.yml and the docs directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build documentation into an output directory
    Build {
        /// Input files (glob patterns supported), relative to the project
        /// root. Defaults to the docs directory.
        inputs: Vec<String>,

        /// Output directory
        #[arg(short, long, default_value = "build")]
        output: PathBuf,

        /// Output format: html (default), json, markdown
        #[arg(short, long, default_value = "html")]
        format: String,
    },

    /// Serve documentation with live reload
    Serve {
        /// Port to listen on (overrides ndoc.yml)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Report lines that do not contribute to the parsed document
    Check {
        /// Files to check, relative to the project root
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build {
            inputs,
            output,
            format,
        } => {
            let output = cli.root.join(output);
            let inputs = inputs
                .iter()
                .map(|input| cli.root.join(input).to_string_lossy().to_string())
                .collect();
            ndoc::build::run(ndoc::build::BuildConfig {
                root: cli.root,
                inputs,
                output: output.clone(),
                format,
            })?;
            println!("Documentation built at {}", output.display());
        }

        Commands::Serve { port } => {
            ndoc::serve::run(ndoc::serve::ServeConfig {
                root: cli.root,
                port,
            })?;
        }

        Commands::Check { files } => check(&cli.root, &files)?,
    }

    Ok(())
}

/// Print `path:line: reason: text` for every dropped line.
fn check(root: &Path, files: &[PathBuf]) -> Result<()> {
    let mut total = 0;
    for path in files {
        let resolved = root.join(path);
        let content = fs::read_to_string(&resolved)
            .with_context(|| format!("failed to read {}", resolved.display()))?;
        let (doc, skipped) = ndoc::parser::load_with_diagnostics(&content);
        tracing::debug!(
            "{}: module {:?} with {} functions",
            path.display(),
            doc.module.name,
            doc.module.functions.len()
        );
        for s in &skipped {
            println!("{}:{}: {}: {}", path.display(), s.line, s.reason, s.text);
        }
        total += skipped.len();
    }

    if total > 0 {
        bail!("{} line(s) skipped", total);
    }
    Ok(())
}
