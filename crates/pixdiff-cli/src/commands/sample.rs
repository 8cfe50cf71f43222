use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pixdiff_core::io::image_io::load_raster;
use pixdiff_core::sample::sample_at_pixel;

#[derive(Args)]
pub struct SampleArgs {
    /// Input image file
    pub file: PathBuf,

    /// Pixel column (origin top-left)
    #[arg(short, long)]
    pub x: u32,

    /// Pixel row
    #[arg(short, long)]
    pub y: u32,
}

pub fn run(args: &SampleArgs) -> Result<()> {
    let img = load_raster(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let color = sample_at_pixel(&img, args.x, args.y)
        .with_context(|| format!("Failed to sample ({}, {})", args.x, args.y))?;

    println!("Pixel:  ({}, {})", args.x, args.y);
    println!("Color:  {}", color);
    println!("Hex:    {}", color.to_hex());

    Ok(())
}
