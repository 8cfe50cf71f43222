use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pixdiff_core::io::image_io::load_raster;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let img = load_raster(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let pixels = img.width() as u64 * img.height() as u64;
    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", img.width(), img.height());
    println!("Pixels:      {}", pixels);
    println!("Decoded:     RGBA, 8 bits/channel");

    Ok(())
}
