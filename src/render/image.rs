use crate::core::size::Size;
use crate::render::style::{Brush, Color, Pen};
use image::{Rgba, RgbaImage};

/// A raster image backing a point geometry.
///
/// Images are shared between geometries and external holders via
/// `Arc<RasterImage>`; a geometry never mutates a raster in place — style or
/// image changes always install a freshly built instance, so previously
/// shared handles stay valid.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    /// Wraps an existing RGBA buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Creates a zero-sized image; drawing code treats it as "no image".
    pub fn empty() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
        }
    }

    /// Creates a solid-color image of the given dimensions.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([color.r, color.g, color.b, color.a])),
        }
    }

    /// Renders a filled, stroked circle of the given radius.
    ///
    /// The image is a square with side `2 * radius_px`; pixels within the pen
    /// width of the rim take the pen color, the interior takes the brush
    /// color, and everything outside the disc stays transparent.
    pub fn circle(radius_px: u32, pen: &Pen, brush: &Brush) -> Self {
        let side = radius_px * 2;
        let radius = radius_px as f64;
        let stroke = pen.width.max(0.0);

        let mut pixels = RgbaImage::new(side, side);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            let dx = x as f64 + 0.5 - radius;
            let dy = y as f64 + 0.5 - radius;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist > radius {
                continue;
            }
            let color = if dist >= radius - stroke {
                pen.color
            } else {
                brush.color
            };
            *pixel = Rgba([color.r, color.g, color.b, color.a]);
        }

        Self { pixels }
    }

    /// Renders a filled, stroked axis-aligned square with the given side length.
    pub fn square(side_px: u32, pen: &Pen, brush: &Brush) -> Self {
        let stroke = pen.width.max(0.0);
        let side = side_px as f64;

        let mut pixels = RgbaImage::new(side_px, side_px);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            let fx = x as f64 + 0.5;
            let fy = y as f64 + 0.5;
            let on_border =
                fx < stroke || fy < stroke || fx > side - stroke || fy > side - stroke;

            let color = if on_border { pen.color } else { brush.color };
            *pixel = Rgba([color.r, color.g, color.b, color.a]);
        }

        Self { pixels }
    }

    /// The image's natural (unscaled) size in pixels.
    pub fn natural_size(&self) -> Size {
        Size::new(self.pixels.width() as f64, self.pixels.height() as f64)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The backing pixel buffer, for canvas backends that blit it.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_image() {
        let image = RasterImage::empty();
        assert!(image.is_empty());
        assert!(image.natural_size().is_empty());
    }

    #[test]
    fn test_filled_image_size() {
        let image = RasterImage::filled(32, 16, Color::RED);
        assert!(!image.is_empty());
        assert_eq!(image.natural_size(), Size::new(32.0, 16.0));
    }

    #[test]
    fn test_circle_rasterization() {
        let pen = Pen::new(Color::BLACK, 2.0);
        let brush = Brush::new(Color::RED);
        let image = RasterImage::circle(10, &pen, &brush);

        assert_eq!(image.width(), 20);
        assert_eq!(image.height(), 20);

        // Center pixel is filled with the brush color.
        let center = image.pixels().get_pixel(10, 10);
        assert_eq!(center.0, [255, 0, 0, 255]);

        // Corner pixel lies outside the disc and stays transparent.
        let corner = image.pixels().get_pixel(0, 0);
        assert_eq!(corner.0[3], 0);

        // A rim pixel takes the pen color.
        let rim = image.pixels().get_pixel(10, 0);
        assert_eq!(rim.0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_square_rasterization() {
        let pen = Pen::new(Color::BLUE, 1.0);
        let brush = Brush::new(Color::GREEN);
        let image = RasterImage::square(8, &pen, &brush);

        assert_eq!(image.natural_size(), Size::new(8.0, 8.0));
        assert_eq!(image.pixels().get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.pixels().get_pixel(4, 4).0, [0, 255, 0, 255]);
    }
}
