use crate::core::bounds::Bounds;
use crate::core::constants::{
    DEFAULT_LABEL_OFFSET_PX, DEFAULT_ZOOM_MAXIMUM, DEFAULT_ZOOM_MINIMUM,
};
use crate::core::geo::{point_in_polygon, LatLng, LatLngBounds, Point};
use crate::core::projection::Projection;
use crate::core::size::Size;
use crate::geometry::alignment::{align_top_left, Alignment};
use crate::geometry::events::{EventSink, GeometryEvent};
use crate::geometry::shape::Shape;
use crate::render::canvas::Canvas;
use crate::render::image::RasterImage;
use crate::render::style::{Brush, Pen};
use crate::Result;
use crossbeam_channel::Receiver;
use fxhash::FxHashMap;
use std::sync::Arc;

/// Where a geometry's raster comes from.
///
/// `Custom` images are supplied by the host (or absent, in which case the
/// geometry draws as a plain point). `Shape` rasters are regenerated from the
/// current pen/brush whenever the style changes.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Custom(Option<Arc<RasterImage>>),
    Shape {
        shape: Shape,
        raster: Arc<RasterImage>,
    },
}

impl ImageSource {
    /// The raster currently backing this source, if any.
    pub fn current(&self) -> Option<&Arc<RasterImage>> {
        match self {
            ImageSource::Custom(image) => image.as_ref(),
            ImageSource::Shape { raster, .. } => Some(raster),
        }
    }
}

/// A point-like geometry anchored at a world coordinate.
///
/// Rendered either as a plain point, as a host-supplied raster image, or as a
/// procedurally generated shape, with alignment and zoom-based scaling rules.
/// Mutations of visually observable state emit [`GeometryEvent`]s through the
/// subscription interface; the hosting container drains them after each call.
pub struct GeometryPoint {
    id: String,
    coord: LatLng,
    source: ImageSource,
    alignment: Alignment,
    base_zoom: Option<i32>,
    base_size: Size,
    draw_minimum: Option<Size>,
    draw_maximum: Option<Size>,
    zoom_minimum: i32,
    zoom_maximum: i32,
    pen: Option<Pen>,
    brush: Option<Brush>,
    metadata: FxHashMap<String, serde_json::Value>,
    displayed_key: Option<String>,
    displayed_zoom_minimum: i32,
    label_offset_px: f64,
    events: EventSink,
}

impl GeometryPoint {
    /// Creates a geometry with no image; it draws as a plain point.
    pub fn new(id: impl Into<String>, coord: LatLng) -> Self {
        Self {
            id: id.into(),
            coord,
            source: ImageSource::Custom(None),
            alignment: Alignment::default(),
            base_zoom: None,
            base_size: Size::default(),
            draw_minimum: None,
            draw_maximum: None,
            zoom_minimum: DEFAULT_ZOOM_MINIMUM,
            zoom_maximum: DEFAULT_ZOOM_MAXIMUM,
            pen: None,
            brush: None,
            metadata: FxHashMap::default(),
            displayed_key: None,
            displayed_zoom_minimum: DEFAULT_ZOOM_MINIMUM,
            label_offset_px: DEFAULT_LABEL_OFFSET_PX,
            events: EventSink::new(),
        }
    }

    /// Creates a geometry whose raster is a procedurally generated circle.
    ///
    /// Plays the role of a dedicated circle subclass: the raster is rebuilt
    /// from the current pen/brush on every style change.
    pub fn circle(id: impl Into<String>, coord: LatLng, radius_px: u32) -> Self {
        let shape = Shape::Circle { radius_px };
        Self::with_shape(id, coord, shape)
    }

    /// Creates a geometry whose raster is a procedurally generated square.
    pub fn square(id: impl Into<String>, coord: LatLng, side_px: u32) -> Self {
        let shape = Shape::Square { side_px };
        Self::with_shape(id, coord, shape)
    }

    fn with_shape(id: impl Into<String>, coord: LatLng, shape: Shape) -> Self {
        let mut geometry = Self::new(id, coord);
        let raster = Arc::new(shape.rasterize(&Pen::default(), &Brush::default()));
        geometry.base_size = raster.natural_size();
        geometry.source = ImageSource::Shape { shape, raster };
        geometry
    }

    /// Builder: attach a host-supplied raster image.
    pub fn with_image(mut self, image: Arc<RasterImage>) -> Self {
        self.base_size = image.natural_size();
        self.source = ImageSource::Custom(Some(image));
        self
    }

    /// Builder: set the inclusive zoom visibility range.
    pub fn with_zoom_range(mut self, zoom_minimum: i32, zoom_maximum: i32) -> Self {
        self.zoom_minimum = zoom_minimum;
        self.zoom_maximum = zoom_maximum;
        self
    }

    /// Builder: set the outline pen (regenerates shape rasters).
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = Some(pen);
        self.regenerate_raster();
        self
    }

    /// Builder: set the fill brush (regenerates shape rasters).
    pub fn with_brush(mut self, brush: Brush) -> Self {
        self.brush = Some(brush);
        self.regenerate_raster();
        self
    }

    /// Builder: set the rectangle alignment relative to the anchor.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registers an event subscriber; the host drains the receiver after
    /// each mutating call (delivery is synchronous).
    pub fn subscribe(&mut self) -> Receiver<GeometryEvent> {
        self.events.subscribe()
    }

    /// True when this geometry should be considered at the given zoom level.
    pub fn is_visible(&self, zoom: i32) -> bool {
        self.zoom_minimum <= zoom && zoom <= self.zoom_maximum
    }

    pub fn zoom_range(&self) -> (i32, i32) {
        (self.zoom_minimum, self.zoom_maximum)
    }

    /// The anchor world coordinate.
    pub fn coord(&self) -> LatLng {
        self.coord
    }

    /// Moves the anchor. A no-op when the new value equals the current one
    /// (exact equality on both components); otherwise emits a redraw request
    /// followed by a position-changed event, in that order.
    pub fn set_coord(&mut self, coord: LatLng) {
        if self.coord == coord {
            return;
        }
        self.coord = coord;
        self.events.emit(&GeometryEvent::RedrawRequested);
        self.events.emit(&GeometryEvent::PositionChanged {
            id: self.id.clone(),
        });
    }

    /// The raster currently backing this geometry, if any.
    pub fn image(&self) -> Option<&Arc<RasterImage>> {
        self.source.current()
    }

    /// Replaces the raster image; `None` is the valid "draw as point" state.
    ///
    /// A non-null image recaptures the base size from its natural size. The
    /// previous raster is never mutated, so external holders of the old
    /// handle remain valid.
    pub fn set_image(&mut self, image: Option<Arc<RasterImage>>) {
        if let Some(image) = &image {
            self.base_size = image.natural_size();
        }
        self.source = ImageSource::Custom(image);
        self.events.emit(&GeometryEvent::RedrawRequested);
    }

    pub fn pen(&self) -> Option<&Pen> {
        self.pen.as_ref()
    }

    /// Replaces the pen, regenerates shape rasters, and requests a redraw.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = Some(pen);
        self.regenerate_raster();
        self.events.emit(&GeometryEvent::RedrawRequested);
    }

    pub fn brush(&self) -> Option<&Brush> {
        self.brush.as_ref()
    }

    /// Replaces the brush, regenerates shape rasters, and requests a redraw.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = Some(brush);
        self.regenerate_raster();
        self.events.emit(&GeometryEvent::RedrawRequested);
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Plain attribute setter; affects subsequent draws only, no event.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn base_zoom(&self) -> Option<i32> {
        self.base_zoom
    }

    /// Sets the zoom level the image's natural size refers to. `None` means
    /// the image is drawn at its natural size at every zoom. No event.
    pub fn set_base_zoom(&mut self, base_zoom: Option<i32>) {
        self.base_zoom = base_zoom;
    }

    /// Lower clamp for the zoom-scaled draw size. `None` means no clamp.
    /// No event.
    pub fn set_draw_minimum(&mut self, minimum: Option<Size>) {
        self.draw_minimum = minimum;
    }

    /// Upper clamp for the zoom-scaled draw size. `None` means no clamp.
    /// No event.
    pub fn set_draw_maximum(&mut self, maximum: Option<Size>) {
        self.draw_maximum = maximum;
    }

    /// Looks up a metadata value.
    pub fn metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Stores a metadata value. Emits a redraw request only when the value
    /// under the currently displayed key actually changes.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        let key = key.into();
        let displayed = self.displayed_key.as_deref() == Some(key.as_str());
        let changed = self.metadata.get(&key) != Some(&value);
        self.metadata.insert(key, value);

        if displayed && changed {
            self.events.emit(&GeometryEvent::RedrawRequested);
        }
    }

    /// Configures which metadata key is auto-displayed as an on-map label,
    /// from which zoom level, and at which pixel offset from the geometry.
    pub fn set_displayed_metadata(
        &mut self,
        key: Option<String>,
        zoom_minimum: i32,
        offset_px: f64,
    ) {
        self.displayed_key = key;
        self.displayed_zoom_minimum = zoom_minimum;
        self.label_offset_px = offset_px;
    }

    /// The on-screen size of this geometry at the given zoom level.
    ///
    /// Without a usable image this is the degenerate 1x1 point footprint.
    /// With a base zoom configured, the base size scales by a power of two
    /// per zoom level of difference and is then clamped to the configured
    /// min/max sizes component-wise.
    pub fn calculate_size(&self, zoom: i32) -> Size {
        let image = match self.source.current() {
            Some(image) if !image.is_empty() => image,
            _ => return Size::new(1.0, 1.0),
        };

        let mut size = image.natural_size();

        if let Some(base_zoom) = self.base_zoom {
            let zoom_difference = base_zoom - zoom;
            let factor = 2_f64.powi(zoom_difference);
            size = Size::new(self.base_size.width / factor, self.base_size.height / factor);

            if let Some(minimum) = &self.draw_minimum {
                size = size.clamp_min(minimum);
            }
            if let Some(maximum) = &self.draw_maximum {
                size = size.clamp_max(maximum);
            }
        }

        size
    }

    /// The draw rectangle in pixel space at the given zoom level.
    fn pixel_rect(&self, anchor_px: &Point, zoom: i32) -> Bounds {
        let size = self.calculate_size(zoom);
        let top_left = align_top_left(anchor_px, self.alignment, &size);
        Bounds::from_top_left_and_size(top_left, size)
    }

    /// The world-coordinate bounding box of the rendered geometry at the
    /// given zoom level, for spatial indexing and culling by the host.
    pub fn bounding_box(&self, zoom: i32) -> LatLngBounds {
        let projection = Projection::get();
        let anchor_px = projection.to_pixel(&self.coord, zoom);
        let rect = self.pixel_rect(&anchor_px, zoom);

        let top_left = projection.to_world(&rect.top_left(), zoom);
        let bottom_right = projection.to_world(&rect.bottom_right(), zoom);

        LatLngBounds::new(
            LatLng::new(bottom_right.lat, top_left.lng),
            LatLng::new(top_left.lat, bottom_right.lng),
        )
    }

    /// Tests whether the supplied pixel-space polygon contains this
    /// geometry's anchor, emitting a clicked event on a hit.
    ///
    /// Only the anchor pixel is tested; the rendered image footprint is
    /// deliberately ignored (a documented limitation of the click
    /// semantics, kept as-is).
    pub fn hit_test(&self, area_px: &[Point], zoom: i32) -> bool {
        if !self.is_visible(zoom) {
            return false;
        }

        let anchor_px = Projection::get().to_pixel(&self.coord, zoom);
        if !point_in_polygon(&anchor_px, area_px) {
            return false;
        }

        log::debug!("geometry {} clicked at zoom {}", self.id, zoom);
        self.events.emit(&GeometryEvent::Clicked {
            id: self.id.clone(),
        });
        true
    }

    /// Draws this geometry onto `canvas`, culled against `visible_rect_px`.
    ///
    /// With a usable image, the zoom-scaled, aligned rectangle is drawn when
    /// it intersects the visible rectangle; otherwise the anchor is drawn as
    /// a single point with the current pen when it lies inside the visible
    /// rectangle. In both cases the displayed metadata label follows when the
    /// zoom is at or above its display threshold.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        visible_rect_px: &Bounds,
        zoom: i32,
    ) -> Result<()> {
        if !self.is_visible(zoom) {
            return Ok(());
        }

        let anchor_px = Projection::get().to_pixel(&self.coord, zoom);

        match self.source.current() {
            Some(image) if !image.is_empty() => {
                let rect = self.pixel_rect(&anchor_px, zoom);
                if !visible_rect_px.intersects(&rect) {
                    log::trace!("geometry {} culled at zoom {}", self.id, zoom);
                    return Ok(());
                }

                canvas.draw_image(&rect, image, None)?;
                self.draw_label(canvas, &rect.top_right(), zoom)?;
            }
            _ => {
                if !visible_rect_px.contains(&anchor_px) {
                    return Ok(());
                }

                canvas.set_pen(&self.pen.unwrap_or_default())?;
                canvas.draw_point(&anchor_px)?;
                self.draw_label(canvas, &anchor_px, zoom)?;
            }
        }

        Ok(())
    }

    /// Draws the displayed metadata value, offset from `origin` by the label
    /// offset (rightward and upward).
    fn draw_label(&self, canvas: &mut dyn Canvas, origin: &Point, zoom: i32) -> Result<()> {
        if zoom < self.displayed_zoom_minimum {
            return Ok(());
        }
        let value = match self.displayed_key.as_ref().and_then(|k| self.metadata.get(k)) {
            Some(value) if !value.is_null() => value,
            _ => return Ok(()),
        };

        let text = match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_string(),
        };
        let position = origin.add(&Point::new(self.label_offset_px, -self.label_offset_px));
        canvas.draw_text(&position, &text)
    }

    fn regenerate_raster(&mut self) {
        if let ImageSource::Shape { shape, raster } = &mut self.source {
            let pen = self.pen.unwrap_or_default();
            let brush = self.brush.unwrap_or_default();
            let regenerated = Arc::new(shape.rasterize(&pen, &brush));
            self.base_size = regenerated.natural_size();
            *raster = regenerated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::Color;

    fn image(width: u32, height: u32) -> Arc<RasterImage> {
        Arc::new(RasterImage::filled(width, height, Color::RED))
    }

    #[test]
    fn test_visibility_boundaries() {
        let geometry =
            GeometryPoint::new("g", LatLng::new(0.0, 0.0)).with_zoom_range(3, 10);

        assert!(!geometry.is_visible(2));
        assert!(geometry.is_visible(3));
        assert!(geometry.is_visible(10));
        assert!(!geometry.is_visible(11));
    }

    #[test]
    fn test_size_without_base_zoom_is_natural_size() {
        let geometry = GeometryPoint::new("g", LatLng::new(0.0, 0.0)).with_image(image(32, 32));

        assert_eq!(geometry.calculate_size(0), Size::new(32.0, 32.0));
        assert_eq!(geometry.calculate_size(20), Size::new(32.0, 32.0));
    }

    #[test]
    fn test_size_without_image_is_point_footprint() {
        let geometry = GeometryPoint::new("g", LatLng::new(0.0, 0.0));
        assert_eq!(geometry.calculate_size(5), Size::new(1.0, 1.0));
    }

    #[test]
    fn test_size_scales_by_power_of_two() {
        let mut geometry =
            GeometryPoint::new("g", LatLng::new(0.0, 0.0)).with_image(image(32, 32));
        geometry.set_base_zoom(Some(10));

        assert_eq!(geometry.calculate_size(10), Size::new(32.0, 32.0));
        assert_eq!(geometry.calculate_size(11), Size::new(64.0, 64.0));
        assert_eq!(geometry.calculate_size(9), Size::new(16.0, 16.0));
    }

    #[test]
    fn test_size_clamps_to_minimum() {
        let mut geometry =
            GeometryPoint::new("g", LatLng::new(0.0, 0.0)).with_image(image(100, 100));
        geometry.set_base_zoom(Some(10));
        geometry.set_draw_minimum(Some(Size::new(20.0, 20.0)));

        // At zoom 5 the unclamped size would be 100 / 2^5 = 3.125.
        assert_eq!(geometry.calculate_size(5), Size::new(20.0, 20.0));
    }

    #[test]
    fn test_size_clamps_to_maximum() {
        let mut geometry =
            GeometryPoint::new("g", LatLng::new(0.0, 0.0)).with_image(image(100, 100));
        geometry.set_base_zoom(Some(10));
        geometry.set_draw_maximum(Some(Size::new(150.0, 150.0)));

        // At zoom 12 the unclamped size would be 100 * 4 = 400.
        assert_eq!(geometry.calculate_size(12), Size::new(150.0, 150.0));
    }

    #[test]
    fn test_set_coord_emits_once_per_change() {
        let mut geometry = GeometryPoint::new("g", LatLng::new(0.0, 0.0));
        let rx = geometry.subscribe();

        let target = LatLng::new(1.0, 2.0);
        geometry.set_coord(target);
        assert_eq!(rx.try_recv().unwrap(), GeometryEvent::RedrawRequested);
        assert_eq!(
            rx.try_recv().unwrap(),
            GeometryEvent::PositionChanged {
                id: "g".to_string()
            }
        );

        // Same value again: no events at all.
        geometry.set_coord(target);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_set_image_recaptures_base_size() {
        let mut geometry =
            GeometryPoint::new("g", LatLng::new(0.0, 0.0)).with_image(image(32, 32));
        let rx = geometry.subscribe();

        geometry.set_image(Some(image(64, 16)));
        assert_eq!(rx.try_recv().unwrap(), GeometryEvent::RedrawRequested);
        assert_eq!(geometry.calculate_size(0), Size::new(64.0, 16.0));

        // Clearing the image keeps the redraw contract and falls back to the
        // point footprint.
        geometry.set_image(None);
        assert_eq!(rx.try_recv().unwrap(), GeometryEvent::RedrawRequested);
        assert_eq!(geometry.calculate_size(0), Size::new(1.0, 1.0));
    }

    #[test]
    fn test_style_change_regenerates_shape_raster() {
        let mut geometry = GeometryPoint::circle("g", LatLng::new(0.0, 0.0), 10);
        let rx = geometry.subscribe();
        let before = geometry.image().unwrap().clone();

        geometry.set_brush(Brush::new(Color::GREEN));

        assert_eq!(rx.try_recv().unwrap(), GeometryEvent::RedrawRequested);
        assert!(rx.try_recv().is_err());

        let after = geometry.image().unwrap();
        assert!(!Arc::ptr_eq(&before, after));
        // The old handle survives the swap untouched.
        assert_eq!(before.natural_size(), Size::new(20.0, 20.0));
    }

    #[test]
    fn test_metadata_redraw_only_for_displayed_key() {
        let mut geometry = GeometryPoint::new("g", LatLng::new(0.0, 0.0));
        geometry.set_displayed_metadata(Some("name".to_string()), 0, 5.0);
        let rx = geometry.subscribe();

        geometry.set_metadata("other", serde_json::json!("value"));
        assert!(rx.try_recv().is_err());

        geometry.set_metadata("name", serde_json::json!("Berlin"));
        assert_eq!(rx.try_recv().unwrap(), GeometryEvent::RedrawRequested);

        // Re-setting the displayed key to the same value changes nothing.
        geometry.set_metadata("name", serde_json::json!("Berlin"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_bounding_box_centered_on_anchor() {
        let coord = LatLng::new(40.7128, -74.0060);
        let geometry = GeometryPoint::new("g", coord).with_image(image(32, 32));

        let bbox = geometry.bounding_box(10);
        assert!(bbox.contains(&coord));

        let center = bbox.center();
        assert!((center.lat - coord.lat).abs() < 1e-3);
        assert!((center.lng - coord.lng).abs() < 1e-3);
    }
}
