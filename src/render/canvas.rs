use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::core::size::Size;
use crate::render::image::RasterImage;
use crate::render::style::Pen;
use crate::Result;

/// Painting capability consumed by geometries.
///
/// Hosting containers supply a backend (a GPU pipeline, a software
/// rasterizer, a UI toolkit painter) implementing these primitives; the
/// geometry core only ever culls and issues calls, it never owns a surface.
pub trait Canvas {
    /// Draws `image` scaled into the destination rectangle. `source` selects
    /// a sub-rectangle of the image; `None` means the whole image.
    fn draw_image(
        &mut self,
        dest: &Bounds,
        image: &RasterImage,
        source: Option<&Bounds>,
    ) -> Result<()>;

    /// Draws a single point with the current pen.
    fn draw_point(&mut self, position: &Point) -> Result<()>;

    /// Draws a text label with its baseline origin at `position`.
    fn draw_text(&mut self, position: &Point, text: &str) -> Result<()>;

    /// Replaces the pen used by subsequent `draw_point` calls.
    fn set_pen(&mut self, pen: &Pen) -> Result<()>;
}

/// One recorded canvas primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image {
        dest: Bounds,
        source: Option<Bounds>,
        image_size: Size,
    },
    Point(Point),
    Text { position: Point, text: String },
    Pen(Pen),
}

/// A canvas backend that records every primitive instead of painting.
///
/// Useful for headless hosts and for asserting on draw behavior in tests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All primitives recorded so far, in issue order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw_image(
        &mut self,
        dest: &Bounds,
        image: &RasterImage,
        source: Option<&Bounds>,
    ) -> Result<()> {
        log::trace!(
            "draw_image dest=({:.1},{:.1})-({:.1},{:.1})",
            dest.min.x,
            dest.min.y,
            dest.max.x,
            dest.max.y
        );
        self.calls.push(DrawCall::Image {
            dest: dest.clone(),
            source: source.cloned(),
            image_size: image.natural_size(),
        });
        Ok(())
    }

    fn draw_point(&mut self, position: &Point) -> Result<()> {
        self.calls.push(DrawCall::Point(*position));
        Ok(())
    }

    fn draw_text(&mut self, position: &Point, text: &str) -> Result<()> {
        self.calls.push(DrawCall::Text {
            position: *position,
            text: text.to_string(),
        });
        Ok(())
    }

    fn set_pen(&mut self, pen: &Pen) -> Result<()> {
        self.calls.push(DrawCall::Pen(*pen));
        Ok(())
    }
}
