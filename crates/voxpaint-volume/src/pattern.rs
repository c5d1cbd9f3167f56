//! Initial fill patterns for new volumes.

use glam::IVec3;

use crate::coord::GridCoord;

/// Shape written into a volume when it is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillPattern {
    /// Every cell whose center lies within `radius` of the origin.
    Sphere {
        /// Radius in cells.
        radius: f32,
    },
    /// Every cell in `-half_extent..=half_extent` on all three axes.
    Cube {
        /// Half edge length in cells.
        half_extent: i32,
    },
    /// Only the origin cell.
    Single,
}

impl FillPattern {
    /// Returns the cells covered by the pattern, x varying fastest.
    ///
    /// May be empty (negative radius or extent).
    pub fn cells(&self) -> Vec<GridCoord> {
        match *self {
            Self::Sphere { radius } => {
                if radius.is_nan() || radius < 0.0 {
                    return Vec::new();
                }
                let bound = radius.floor() as i32;
                cube_cells(bound)
                    .filter(|c| c.as_vec3().length() <= radius)
                    .collect()
            }
            Self::Cube { half_extent } => {
                if half_extent < 0 {
                    return Vec::new();
                }
                cube_cells(half_extent).collect()
            }
            Self::Single => vec![IVec3::ZERO],
        }
    }
}

impl Default for FillPattern {
    fn default() -> Self {
        Self::Sphere { radius: 5.0 }
    }
}

fn cube_cells(bound: i32) -> impl Iterator<Item = GridCoord> {
    (-bound..=bound).flat_map(move |z| {
        (-bound..=bound).flat_map(move |y| (-bound..=bound).map(move |x| IVec3::new(x, y, z)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_contains_axis_extremes_but_not_corners() {
        let cells = FillPattern::Sphere { radius: 5.0 }.cells();
        assert!(cells.contains(&IVec3::ZERO));
        assert!(cells.contains(&IVec3::new(5, 0, 0)));
        assert!(cells.contains(&IVec3::new(0, -5, 0)));
        assert!(cells.contains(&IVec3::new(3, 4, 0)));
        assert!(!cells.contains(&IVec3::new(4, 4, 0)));
        assert!(!cells.contains(&IVec3::new(5, 5, 5)));
    }

    #[test]
    fn test_sphere_radius_zero_is_origin() {
        assert_eq!(FillPattern::Sphere { radius: 0.0 }.cells(), vec![IVec3::ZERO]);
    }

    #[test]
    fn test_sphere_radius_one_is_seven_cells() {
        assert_eq!(FillPattern::Sphere { radius: 1.0 }.cells().len(), 7);
    }

    #[test]
    fn test_cube_cell_count() {
        assert_eq!(FillPattern::Cube { half_extent: 2 }.cells().len(), 125);
    }

    #[test]
    fn test_negative_sizes_are_empty() {
        assert!(FillPattern::Sphere { radius: -1.0 }.cells().is_empty());
        assert!(FillPattern::Cube { half_extent: -1 }.cells().is_empty());
    }
}
