//! Schedule labels and the ordered per-frame runner.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};

use voxpaint_physics::physics_step_system;

use crate::systems::{brush_input_system, collider_sync_system, mesh_rebuild_system, paint_system};

/// Maximum number of fixed steps per frame, so a long stall cannot snowball.
const MAX_FIXED_STEPS_PER_FRAME: u32 = 10;

/// Execution stages, run in the order listed every frame.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum VoxpaintSchedule {
    /// Apply tool input (brush selection, erase toggle).
    PreUpdate,
    /// Fixed-rate physics.
    FixedUpdate,
    /// Simulation tick: strokes mutate volumes.
    Update,
    /// Incremental collider sync for the edits of this tick.
    PostUpdate,
    /// Presentation tick: coalesced mesh rebuilds.
    PreRender,
}

/// Ordered collection of [`Schedule`]s that drives one frame.
///
/// `FixedUpdate` uses a time accumulator so physics ticks at a stable rate
/// regardless of the frame rate.
pub struct VoxpaintSchedules {
    schedules: Vec<(VoxpaintSchedule, Schedule)>,
    fixed_accumulator: f64,
    fixed_dt: f64,
}

impl VoxpaintSchedules {
    /// Creates empty stages with a fixed step of `1 / fixed_hz` seconds.
    ///
    /// Non-positive rates fall back to 60 Hz.
    pub fn new(fixed_hz: f64) -> Self {
        let fixed_hz = if fixed_hz > 0.0 { fixed_hz } else { 60.0 };
        let schedules = [
            VoxpaintSchedule::PreUpdate,
            VoxpaintSchedule::FixedUpdate,
            VoxpaintSchedule::Update,
            VoxpaintSchedule::PostUpdate,
            VoxpaintSchedule::PreRender,
        ]
        .into_iter()
        .map(|label| (label, Schedule::default()))
        .collect();

        Self {
            schedules,
            fixed_accumulator: 0.0,
            fixed_dt: 1.0 / fixed_hz,
        }
    }

    /// Registers a system (or system tuple) into a stage.
    pub fn add_system<M>(&mut self, stage: VoxpaintSchedule, system: impl IntoSystemConfigs<M>) {
        if let Some(schedule) = self.get_schedule_mut(&stage) {
            schedule.add_systems(system);
        }
    }

    /// Runs all stages in order for one frame.
    ///
    /// `FixedUpdate` runs 0 to [`MAX_FIXED_STEPS_PER_FRAME`] times depending
    /// on accumulated time; every other stage runs exactly once. Returns the
    /// number of fixed steps taken.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) -> u32 {
        self.run_stage(VoxpaintSchedule::PreUpdate, world);

        self.fixed_accumulator += frame_dt;
        let mut steps: u32 = 0;
        while self.fixed_accumulator >= self.fixed_dt && steps < MAX_FIXED_STEPS_PER_FRAME {
            self.run_stage(VoxpaintSchedule::FixedUpdate, world);
            self.fixed_accumulator -= self.fixed_dt;
            steps += 1;
        }

        self.run_stage(VoxpaintSchedule::Update, world);
        self.run_stage(VoxpaintSchedule::PostUpdate, world);
        self.run_stage(VoxpaintSchedule::PreRender, world);
        steps
    }

    /// Returns the fixed timestep in seconds.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Returns the schedule for a stage.
    pub fn get_schedule_mut(&mut self, stage: &VoxpaintSchedule) -> Option<&mut Schedule> {
        self.schedules
            .iter_mut()
            .find(|(label, _)| label == stage)
            .map(|(_, schedule)| schedule)
    }

    fn run_stage(&mut self, target: VoxpaintSchedule, world: &mut World) {
        if let Some(schedule) = self.get_schedule_mut(&target) {
            schedule.run(world);
        }
    }
}

/// Builds the stages with every voxpaint system registered.
pub fn build_schedules(fixed_hz: f64) -> VoxpaintSchedules {
    let mut schedules = VoxpaintSchedules::new(fixed_hz);
    schedules.add_system(VoxpaintSchedule::PreUpdate, brush_input_system);
    schedules.add_system(VoxpaintSchedule::FixedUpdate, physics_step_system);
    schedules.add_system(VoxpaintSchedule::Update, paint_system);
    schedules.add_system(VoxpaintSchedule::PostUpdate, collider_sync_system);
    schedules.add_system(VoxpaintSchedule::PreRender, mesh_rebuild_system);
    schedules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct ExecutionLog {
        stages: Vec<&'static str>,
    }

    fn log_system(stage_name: &'static str) -> impl Fn(ResMut<'_, ExecutionLog>) {
        move |mut log: ResMut<'_, ExecutionLog>| {
            log.stages.push(stage_name);
        }
    }

    #[derive(Resource, Default)]
    struct FixedCount(u32);

    fn count_fixed(mut count: ResMut<'_, FixedCount>) {
        count.0 += 1;
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut world = World::new();
        world.insert_resource(ExecutionLog::default());

        let mut schedules = VoxpaintSchedules::new(60.0);
        schedules.add_system(VoxpaintSchedule::PreRender, log_system("PreRender"));
        schedules.add_system(VoxpaintSchedule::PreUpdate, log_system("PreUpdate"));
        schedules.add_system(VoxpaintSchedule::FixedUpdate, log_system("FixedUpdate"));
        schedules.add_system(VoxpaintSchedule::Update, log_system("Update"));
        schedules.add_system(VoxpaintSchedule::PostUpdate, log_system("PostUpdate"));

        schedules.run(&mut world, 1.0 / 60.0);

        assert_eq!(
            world.resource::<ExecutionLog>().stages,
            vec!["PreUpdate", "FixedUpdate", "Update", "PostUpdate", "PreRender"]
        );
    }

    #[test]
    fn test_fixed_update_follows_configured_rate() {
        let mut world = World::new();
        world.insert_resource(FixedCount::default());
        let mut schedules = VoxpaintSchedules::new(20.0);
        schedules.add_system(VoxpaintSchedule::FixedUpdate, count_fixed);

        // 4 frames of 0.1 s at 20 Hz: two fixed steps each.
        let steps: u32 = (0..4).map(|_| schedules.run(&mut world, 0.1)).sum();
        assert_eq!(steps, 8);
        assert_eq!(world.resource::<FixedCount>().0, 8);
    }

    #[test]
    fn test_fixed_update_skips_short_frames() {
        let mut world = World::new();
        world.insert_resource(FixedCount::default());
        let mut schedules = VoxpaintSchedules::new(60.0);
        schedules.add_system(VoxpaintSchedule::FixedUpdate, count_fixed);

        assert_eq!(schedules.run(&mut world, 0.001), 0);
        assert_eq!(world.resource::<FixedCount>().0, 0);
    }

    #[test]
    fn test_fixed_steps_are_capped() {
        let mut world = World::new();
        world.insert_resource(FixedCount::default());
        let mut schedules = VoxpaintSchedules::new(60.0);
        schedules.add_system(VoxpaintSchedule::FixedUpdate, count_fixed);

        assert_eq!(schedules.run(&mut world, 5.0), MAX_FIXED_STEPS_PER_FRAME);
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let schedules = VoxpaintSchedules::new(0.0);
        assert!((schedules.fixed_dt() - 1.0 / 60.0).abs() < 1e-12);
    }
}
