//! Painting: brushes and their persisted settings, the paint plane, stroke
//! rasterization, and the press/drag/release stroke controller.

pub mod brush;
pub mod color;
pub mod controller;
pub mod error;
pub mod plane;
pub mod rasterizer;
pub mod registry;
pub mod session;

pub use brush::{Brush, FillBrush, LineBrush, PixelBrush, StrokeTarget};
pub use color::PaintColor;
pub use controller::{DEFAULT_REACH, PaintController, PointerSample, StrokeReport, SurfaceHit};
pub use error::BrushError;
pub use plane::PaintPlane;
pub use rasterizer::{StrokeRasterizer, grid_line, rasterize_segment};
pub use registry::{BrushRegistry, PersistedBrush, brush_path, load_brush, save_brush};
pub use session::PaintSession;
