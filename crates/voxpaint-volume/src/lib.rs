//! Sparse per-object voxel volumes: grid coordinates, colors, the grid-to-world
//! frame, change notification, and initial fill patterns.

pub mod color;
pub mod coord;
pub mod events;
pub mod pattern;
pub mod volume;

pub use color::Color;
pub use coord::{GridCoord, Ray, VolumeFrame, offset_coord};
pub use events::{ChangeFeed, ChangeReceiver};
pub use pattern::FillPattern;
pub use volume::{ORIGIN, VoxelVolume};
