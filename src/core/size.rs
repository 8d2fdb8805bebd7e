use serde::{Deserialize, Serialize};

/// A width/height pair in pixels.
///
/// Optional min/max draw clamps on geometries are expressed as
/// `Option<Size>` rather than a negative sentinel, so an unconfigured clamp
/// is unrepresentable instead of runtime-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Component-wise maximum with a lower clamp.
    pub fn clamp_min(&self, minimum: &Size) -> Size {
        Size::new(
            self.width.max(minimum.width),
            self.height.max(minimum.height),
        )
    }

    /// Component-wise minimum with an upper clamp.
    pub fn clamp_max(&self, maximum: &Size) -> Size {
        Size::new(
            self.width.min(maximum.width),
            self.height.min(maximum.height),
        )
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
