use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use pixdiff_core::consts::DEFAULT_SENSITIVITY;
use pixdiff_core::diff::{compute_diff_with_progress, DiffMode, DiffStats};
use pixdiff_core::io::image_io::{load_raster, save_heat_map};

#[derive(Clone, ValueEnum)]
pub enum ModeArg {
    Rgb,
    Luma,
    Hue,
}

impl From<&ModeArg> for DiffMode {
    fn from(arg: &ModeArg) -> Self {
        match arg {
            ModeArg::Rgb => DiffMode::Rgb,
            ModeArg::Luma => DiffMode::Luma,
            ModeArg::Hue => DiffMode::Hue,
        }
    }
}

#[derive(Args)]
pub struct DiffArgs {
    /// First image (A)
    pub image_a: PathBuf,

    /// Second image (B)
    pub image_b: PathBuf,

    /// Difference value (1-255) at which the heat map saturates to red
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY)]
    pub sensitivity: u8,

    /// Difference metric
    #[arg(long, value_enum, default_value = "rgb")]
    pub mode: ModeArg,

    /// Output heat map path
    #[arg(short, long, default_value = "heatmap.png")]
    pub output: PathBuf,
}

pub fn run(args: &DiffArgs) -> Result<()> {
    let a = load_raster(&args.image_a)
        .with_context(|| format!("Failed to load {}", args.image_a.display()))?;
    let b = load_raster(&args.image_b)
        .with_context(|| format!("Failed to load {}", args.image_b.display()))?;

    let height = a.height().max(b.height());
    let pb = ProgressBar::new(height as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Scanning rows");

    let result = compute_diff_with_progress(&a, &b, args.sensitivity, (&args.mode).into(), |rows| {
        pb.set_position(rows as u64);
    })?;
    pb.finish_and_clear();

    save_heat_map(&result, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    print_stats(&result.stats, result.width, result.height);
    println!();
    println!("Heat map saved to {}", args.output.display());

    Ok(())
}

fn print_stats(stats: &DiffStats, width: u32, height: u32) {
    let label = Style::new().dim();
    let value = Style::new().bold().white();

    println!();
    println!(
        "  {:<22}{}",
        label.apply_to("Canvas"),
        value.apply_to(format!("{width}x{height}"))
    );
    println!(
        "  {:<22}{}",
        label.apply_to("Pixels changed"),
        value.apply_to(format!(
            "{} / {} ({}%)",
            stats.diff_pixel_count,
            stats.total_pixels,
            stats.diff_percentage_label()
        ))
    );
    println!(
        "  {:<22}{}",
        label.apply_to("Average difference"),
        value.apply_to(stats.avg_diff_label())
    );
    println!(
        "  {:<22}{}",
        label.apply_to("Maximum difference"),
        value.apply_to(stats.max_diff_label())
    );
    println!(
        "  {:<22}{}",
        label.apply_to("Above threshold"),
        value.apply_to(format!(
            "{} ({}%)",
            stats.above_threshold,
            stats.above_threshold_percentage_label()
        ))
    );
}
