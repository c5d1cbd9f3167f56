//! Command-line argument parsing for voxpaint.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, FillPatternConfig};

/// voxpaint command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "voxpaint", about = "Headless voxel painting session")]
pub struct CliArgs {
    /// Radius of the initial fill sphere, in cells.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Brush selected at startup (by name, e.g. `PixelBrush`).
    #[arg(long)]
    pub brush: Option<String>,

    /// Start in erase mode.
    #[arg(long)]
    pub erase: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to run the scripted stroke for.
    #[arg(long, default_value_t = 30)]
    pub frames: u32,

    /// Length of the scripted stroke in world units.
    #[arg(long, default_value_t = 6.0)]
    pub stroke_length: f32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.volume.fill_pattern = FillPatternConfig::Sphere { radius };
        }
        if let Some(ref brush) = args.brush {
            self.paint.brush = brush.clone();
        }
        if let Some(erase) = args.erase {
            self.paint.erase = erase;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
