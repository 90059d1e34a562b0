//! Viewport transform applied to all draw command geometry.

use vek::{Extent2, Vec2};

/// Integer offset plus uniform scale from logical to surface coordinates.
///
/// Identity by default, set by the core when it letterboxes or zooms the
/// playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Offset in surface pixels.
    offset: Vec2<i32>,
    /// Uniform scale factor.
    scale: f32,
}

impl Viewport {
    /// Set the transform.
    pub fn set(&mut self, offset: Vec2<i32>, scale: f32) {
        self.offset = offset;
        self.scale = scale;
    }

    /// Reset to the identity transform.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Map a logical point to surface coordinates.
    pub fn map_point(&self, point: Vec2<f32>) -> Vec2<f32> {
        point * self.scale + self.offset.as_::<f32>()
    }

    /// Map a logical size to surface dimensions.
    pub fn map_size(&self, size: Extent2<f32>) -> Extent2<f32> {
        size * self.scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::zero(),
            scale: 1.0,
        }
    }
}
