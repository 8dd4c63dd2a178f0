mod config;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::debug;
use std::{env, path::PathBuf, time::Instant};

#[derive(Debug, Parser)]
#[command(name = "denoport")]
#[command(version)]
#[command(about = "Build a Deno-compatible source tree from a Node TypeScript project", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to denoport.config.json in the project root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root directory (defaults to the current working directory)
    #[arg(long)]
    project_root: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli);

    let project_root = match cli.project_root {
        Some(p) => p,
        None => env::current_dir()?,
    };

    let options = config::load_options(&project_root, cli.config.as_deref())?;
    println!(
        "{} Building {} into {}",
        "●".bright_blue(),
        options.root_dir.cyan(),
        options.out_dir.cyan()
    );

    let start = Instant::now();
    denoport_core::build(&project_root, &options)?;
    let elapsed_ms = start.elapsed().as_millis();

    println!("{} Build finished in {}ms.", "●".bright_blue(), elapsed_ms.to_string().cyan());
    Ok(())
}
