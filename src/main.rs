use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use storekit::{emblem, pipeline, AssetConfig, FontResolver, MASTER_ICON_SIZE};

/// Regenerate launcher icons, launch images, store screenshots and listing
/// copy from the project's brand icon.
#[derive(Debug, Parser)]
#[command(name = "storekit", version, about)]
struct Cli {
    /// Project root; all inputs and outputs are resolved against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Font file to try before the system defaults (repeatable)
    #[arg(long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,

    /// Seed a missing source icon with the procedural fuel-drop emblem
    #[arg(long)]
    bootstrap_icon: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = AssetConfig::for_project(&cli.root);
    config.fonts = FontResolver::default().prefer(cli.fonts);

    if cli.bootstrap_icon {
        emblem::bootstrap_source_icon(&config.source_icon, MASTER_ICON_SIZE)
            .context("failed to seed the source icon")?;
    }

    let report = pipeline::run(&config)?;
    println!("Generated App Store assets in: {}", report.absolute_output_dir().display());
    Ok(())
}
