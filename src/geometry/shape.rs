use crate::render::image::RasterImage;
use crate::render::style::{Brush, Pen};
use serde::{Deserialize, Serialize};

/// A procedurally generated point representation.
///
/// Shape-backed geometries do not take a user-supplied image; their raster is
/// regenerated deterministically from `(shape, pen, brush)` whenever the
/// style changes. The variant set is closed, so dispatch is a plain match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// A filled, stroked circle with the given radius in pixels.
    Circle { radius_px: u32 },
    /// A filled, stroked axis-aligned square with the given side in pixels.
    Square { side_px: u32 },
}

impl Shape {
    /// Renders this shape with the given style into a fresh raster.
    pub fn rasterize(&self, pen: &Pen, brush: &Brush) -> RasterImage {
        match self {
            Shape::Circle { radius_px } => RasterImage::circle(*radius_px, pen, brush),
            Shape::Square { side_px } => RasterImage::square(*side_px, pen, brush),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::size::Size;
    use crate::render::style::Color;

    #[test]
    fn test_rasterize_dimensions() {
        let pen = Pen::default();
        let brush = Brush::new(Color::RED);

        let circle = Shape::Circle { radius_px: 12 }.rasterize(&pen, &brush);
        assert_eq!(circle.natural_size(), Size::new(24.0, 24.0));

        let square = Shape::Square { side_px: 9 }.rasterize(&pen, &brush);
        assert_eq!(square.natural_size(), Size::new(9.0, 9.0));
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let pen = Pen::new(Color::BLUE, 2.0);
        let brush = Brush::new(Color::GREEN);
        let shape = Shape::Circle { radius_px: 8 };

        assert_eq!(shape.rasterize(&pen, &brush), shape.rasterize(&pen, &brush));
    }
}
