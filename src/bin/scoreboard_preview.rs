//! Scoreboard preview
//!
//! Renders the scoreboard surface offline with the same rasterizer the game uses and writes it
//! out as a PNG, so font, color and baseline tweaks can be checked without launching the scene.
//!
//! Usage:
//!   cargo run --bin scoreboard_preview -- --out target/scoreboard.png --message "HOME RUN!"

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use home_run_derby::core::config::GameConfig;
use home_run_derby::rendering::scoreboard::canvas::CanvasSurface;
use home_run_derby::rendering::scoreboard::surface::{DrawSurface, FillStyle};
use home_run_derby::rendering::scoreboard::ScoreboardCanvas;

#[derive(Parser, Debug)]
#[command(about = "Render the scoreboard texture to a PNG", version, author)]
struct Args {
    #[arg(long)]
    out: PathBuf,
    /// Text to draw; defaults to the configured home run message.
    #[arg(long)]
    message: Option<String>,
    #[arg(long, default_value = "assets/config/game.ron")]
    config: PathBuf,
    /// Override the configured font.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (cfg, err) = GameConfig::load_or_default(&args.config);
    if let Some(e) = err {
        eprintln!("config {}: {e}; using defaults", args.config.display());
    }
    for w in cfg.validate() {
        eprintln!("config warning: {w}");
    }
    let sb = &cfg.scoreboard;
    let font_path = args.font.unwrap_or_else(|| PathBuf::from(&sb.font_path));
    let font = CanvasSurface::load_font(&font_path)
        .with_context(|| format!("load font {}", font_path.display()))?;

    let message = args.message.unwrap_or_else(|| cfg.home_run.message.clone());
    let surface = CanvasSurface::new(sb.surface_width, sb.surface_height, Some(font));
    if let Some(width) = surface.measure(&message, sb.font_px) {
        if width > sb.surface_width as f32 {
            eprintln!(
                "warning: '{message}' is {width:.0}px wide, surface is {}px; text will be clipped",
                sb.surface_width
            );
        }
    }
    let mut canvas = ScoreboardCanvas::new(
        Box::new(surface),
        FillStyle::from_rgb(sb.font_px, sb.color),
        sb.baseline_offset,
    );
    canvas.update(&message);

    let size = canvas.surface().size();
    let pixels = canvas.surface().pixels().to_vec();
    let img = image::RgbaImage::from_raw(size.x, size.y, pixels)
        .context("surface pixel buffer does not match its size")?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    img.save(&args.out)
        .with_context(|| format!("write {}", args.out.display()))?;
    println!(
        "Wrote {}x{} scoreboard '{}' to {}",
        size.x,
        size.y,
        message,
        args.out.display()
    );
    Ok(())
}
