//! The static brush registry and per-brush RON records.
//!
//! Each brush type persists as `<Name>.ron` in the brush directory. Missing
//! records are created from defaults; unreadable or corrupt records fall back
//! to defaults with a warning and never abort startup.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::brush::{Brush, FillBrush, LineBrush, PixelBrush};
use crate::error::BrushError;

/// A brush type with a persisted settings record.
pub trait PersistedBrush: Brush + Default + Serialize + DeserializeOwned + 'static {
    /// Record file stem and display name.
    const NAME: &'static str;
}

/// Returns the record path for the brush named `name`.
pub fn brush_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.ron"))
}

/// Writes `brush` to its record in `dir`, creating the directory if needed.
pub fn save_brush<B: PersistedBrush>(dir: &Path, brush: &B) -> Result<(), BrushError> {
    std::fs::create_dir_all(dir).map_err(BrushError::WriteError)?;
    let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
    let serialized = ron::ser::to_string_pretty(brush, pretty).map_err(BrushError::SerializeError)?;
    std::fs::write(brush_path(dir, B::NAME), serialized).map_err(BrushError::WriteError)?;
    Ok(())
}

/// Loads a brush record, creating it from defaults when absent.
pub fn load_brush<B: PersistedBrush>(dir: &Path) -> Result<B, BrushError> {
    let path = brush_path(dir, B::NAME);
    if path.exists() {
        let contents = std::fs::read_to_string(&path).map_err(BrushError::ReadError)?;
        let brush = ron::from_str(&contents).map_err(BrushError::ParseError)?;
        tracing::debug!(brush = B::NAME, path = %path.display(), "loaded brush record");
        Ok(brush)
    } else {
        let brush = B::default();
        save_brush(dir, &brush)?;
        tracing::info!(brush = B::NAME, path = %path.display(), "created default brush record");
        Ok(brush)
    }
}

fn load_or_default<B: PersistedBrush>(dir: &Path) -> Box<dyn Brush> {
    match load_brush::<B>(dir) {
        Ok(brush) => Box::new(brush),
        Err(err) => {
            tracing::warn!(brush = B::NAME, %err, "using default brush settings");
            Box::new(B::default())
        }
    }
}

/// Every available brush, in a fixed order, plus the selection.
#[derive(Debug)]
pub struct BrushRegistry {
    brushes: Vec<Box<dyn Brush>>,
    active: usize,
}

impl BrushRegistry {
    /// All brushes with default settings; the first one is selected.
    pub fn with_defaults() -> Self {
        Self {
            brushes: vec![
                Box::new(PixelBrush),
                Box::new(FillBrush::default()),
                Box::new(LineBrush::default()),
            ],
            active: 0,
        }
    }

    /// All brushes with settings loaded from `dir`.
    pub fn load(dir: &Path) -> Self {
        let brushes = vec![
            load_or_default::<PixelBrush>(dir),
            load_or_default::<FillBrush>(dir),
            load_or_default::<LineBrush>(dir),
        ];
        tracing::info!(count = brushes.len(), dir = %dir.display(), "loaded brushes");
        Self { brushes, active: 0 }
    }

    /// Writes every brush's record to `dir`.
    pub fn save_all(&self, dir: &Path) -> Result<(), BrushError> {
        self.brushes.iter().try_for_each(|brush| brush.save_record(dir))
    }

    /// Number of brushes.
    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    /// Returns `true` if no brush is registered.
    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Brush names in registry order.
    pub fn names(&self) -> Vec<&'static str> {
        self.brushes.iter().map(|b| b.name()).collect()
    }

    /// Index of the selected brush.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The selected brush.
    pub fn active(&self) -> &dyn Brush {
        &*self.brushes[self.active]
    }

    /// The selected brush, mutably.
    pub fn active_mut(&mut self) -> &mut dyn Brush {
        &mut *self.brushes[self.active]
    }

    /// Selects the brush at `index`. Returns `false` if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.brushes.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Selects the brush named `name`.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.brushes.iter().position(|b| b.name() == name) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Selects the brush bound to `key` (case-insensitive).
    pub fn select_by_key(&mut self, key: char) -> bool {
        let key = key.to_ascii_uppercase();
        match self
            .brushes
            .iter()
            .position(|b| b.key_binding().to_ascii_uppercase() == key)
        {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Selects the next brush, wrapping around.
    pub fn cycle_next(&mut self) {
        self.active = (self.active + 1) % self.brushes.len();
    }

    /// Selects the previous brush, wrapping around.
    pub fn cycle_prev(&mut self) {
        self.active = (self.active + self.brushes.len() - 1) % self.brushes.len();
    }
}

impl Default for BrushRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
