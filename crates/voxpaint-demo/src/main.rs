//! Headless voxpaint session.
//!
//! Loads `config.ron` (CLI flags override it), spawns one voxel object and
//! drags a scripted stroke across its top surface, logging what changed.
//! Run with `cargo run -p voxpaint-demo -- --brush LineBrush --frames 60`.

use std::error::Error;

use clap::Parser;
use glam::{Quat, Vec3};
use tracing::info;
use voxpaint_config::{CliArgs, Config, FillPatternConfig, default_config_dir};
use voxpaint_ecs::{
    PaintStats, Painter, PointerInput, Volume, VolumeMesh, build_schedules, create_world,
    spawn_voxel_object,
};
use voxpaint_paint::{PaintColor, PaintSession};
use voxpaint_physics::PhysicsWorld;
use voxpaint_volume::{Color, FillPattern, Ray, VolumeFrame, VoxelVolume};

/// Height above the object the scripted pointer ray starts from, in world units.
const POINTER_HEIGHT: f32 = 64.0;

fn fill_pattern(config: &FillPatternConfig) -> FillPattern {
    match *config {
        FillPatternConfig::Sphere { radius } => FillPattern::Sphere { radius },
        FillPatternConfig::Cube { half_extent } => FillPattern::Cube { half_extent },
        FillPatternConfig::Single => FillPattern::Single,
    }
}

fn build_volume(config: &Config) -> VoxelVolume {
    let volume = &config.volume;
    let frame = VolumeFrame::from_scale_rotation_translation(
        Vec3::from_array(volume.scale),
        Quat::IDENTITY,
        Vec3::from_array(volume.position),
    );
    let [r, g, b, a] = volume.fill_color;
    VoxelVolume::with_pattern(frame, Color::new(r, g, b, a), &fill_pattern(&volume.fill_pattern))
}

fn build_session(config: &Config, brush_dir: &std::path::Path) -> PaintSession {
    let paint = &config.paint;
    let mut color = PaintColor::hsv(paint.hue, paint.saturation, paint.value);
    color.erase = paint.erase;

    let mut session = PaintSession::load(brush_dir, color, paint.surface_offset_cells);
    if !session.select_brush_by_name(&paint.brush) {
        tracing::warn!(brush = %paint.brush, "unknown brush in config, keeping default");
    }
    session
}

/// Pointer ray for frame `index` of `frames`, sweeping along +X over the object.
fn scripted_ray(center: Vec3, stroke_length: f32, index: u32, frames: u32) -> Ray {
    let t = if frames > 1 {
        index as f32 / (frames - 1) as f32
    } else {
        0.0
    };
    let x = (t - 0.5) * stroke_length;
    Ray::new(center + Vec3::new(x, POINTER_HEIGHT, 0.0), Vec3::NEG_Y)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    voxpaint_log::init_logging(Some(&log_dir), config.debug.log_to_file, Some(&config));

    let session = build_session(&config, &config.brush_dir(&config_dir));
    info!(
        brush = session.brushes.active().name(),
        erase = session.color.erase,
        "paint session ready"
    );

    let fixed_hz = config.simulation.fixed_hz as f32;
    let mut world = create_world(session, config.simulation.pick_distance, fixed_hz);
    let colliders = config.physics.colliders.then_some(config.physics.friction);
    let object = spawn_voxel_object(&mut world, build_volume(&config), colliders);
    let mut schedules = build_schedules(f64::from(fixed_hz));

    let center = Vec3::from_array(config.volume.position);
    let frame_dt = schedules.fixed_dt();
    let frames = args.frames.max(1);
    for index in 0..=frames {
        {
            let mut input = world.resource_mut::<PointerInput>();
            input.ray = scripted_ray(center, args.stroke_length, index.min(frames - 1), frames);
            input.button_held = index < frames;
        }
        schedules.run(&mut world, frame_dt);
    }

    let cells = world
        .get::<Volume>(object)
        .map(|volume| volume.0.len())
        .ok_or("voxel object vanished")?;
    let faces = world
        .get::<VolumeMesh>(object)
        .map(|mesh| mesh.handle().read().face_count())
        .ok_or("voxel object vanished")?;
    let stats = world.resource::<PaintStats>();
    info!(
        cells,
        faces,
        colliders = world.resource::<PhysicsWorld>().collider_set.len(),
        strokes = stats.strokes,
        cells_painted = stats.cells_painted,
        mesh_rebuilds = stats.mesh_rebuilds,
        colliders_added = stats.colliders_added,
        colliders_removed = stats.colliders_removed,
        "session finished"
    );

    if world.resource::<Painter>().session.is_painting() {
        tracing::warn!("stroke still active at exit");
    }

    Ok(())
}
