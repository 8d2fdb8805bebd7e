use crate::core::constants::TILE_SIZE;
use crate::core::geo::{LatLng, Point};
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use std::f64::consts::PI;

static PROJECTION: OnceCell<Projection> = OnceCell::new();

/// Standard slippy-map (Web Mercator) projection between world coordinates
/// and pixel coordinates at a given integer zoom level.
///
/// The projection is a process-wide singleton: it is initialized once at
/// process start (or lazily with the default tile size on first use) and is
/// read-only afterwards, so concurrent reads need no synchronization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    tile_size: u32,
}

impl Projection {
    /// Initializes the process-wide projection with the given tile size.
    ///
    /// Must be called before any conversion is requested to take effect;
    /// returns an error if the projection was already initialized (explicitly
    /// or through lazy first use).
    pub fn init(tile_size: u32) -> Result<()> {
        PROJECTION
            .set(Projection { tile_size })
            .map_err(|_| Error::Projection("projection already initialized".to_string()))
    }

    /// Gets the process-wide projection, initializing it with the default
    /// tile size if [`Projection::init`] was never called.
    pub fn get() -> &'static Projection {
        PROJECTION.get_or_init(|| Projection {
            tile_size: TILE_SIZE,
        })
    }

    /// The pixel width/height of the world at the given zoom level.
    pub fn world_size_px(&self, zoom: i32) -> f64 {
        self.tile_size as f64 * 2_f64.powi(zoom)
    }

    /// Converts a world coordinate to pixel coordinates at the given zoom.
    ///
    /// Latitude is clamped to the Web Mercator limit before projecting.
    pub fn to_pixel(&self, coord: &LatLng, zoom: i32) -> Point {
        let scale = self.world_size_px(zoom);
        let lat_rad = LatLng::clamp_lat(coord.lat).to_radians();

        let x = (coord.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * scale;

        Point::new(x, y)
    }

    /// Converts pixel coordinates at the given zoom back to a world coordinate.
    pub fn to_world(&self, pixel: &Point, zoom: i32) -> LatLng {
        let scale = self.world_size_px(zoom);

        let lng = pixel.x / scale * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * pixel.y / scale)).sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let projection = Projection { tile_size: 256 };
        let coords = [
            LatLng::new(0.0, 0.0),
            LatLng::new(40.7128, -74.0060),
            LatLng::new(-33.8688, 151.2093),
            LatLng::new(78.2232, 15.6267),
        ];

        for zoom in [0, 5, 10, 17] {
            for coord in &coords {
                let pixel = projection.to_pixel(coord, zoom);
                let back = projection.to_world(&pixel, zoom);
                assert!((back.lat - coord.lat).abs() < 1e-6, "lat at zoom {zoom}");
                assert!((back.lng - coord.lng).abs() < 1e-6, "lng at zoom {zoom}");
            }
        }
    }

    #[test]
    fn test_world_origin_and_extent() {
        let projection = Projection { tile_size: 256 };

        // (lng -180, lat +max) maps to the pixel origin.
        let top_left = projection.to_pixel(&LatLng::new(85.0511287798, -180.0), 0);
        assert!(top_left.x.abs() < 1e-6);
        assert!(top_left.y.abs() < 1e-6);

        // The equator/prime-meridian crossing sits at the center of the world.
        let center = projection.to_pixel(&LatLng::new(0.0, 0.0), 0);
        assert!((center.x - 128.0).abs() < 1e-6);
        assert!((center.y - 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_doubles_pixel_space() {
        let projection = Projection { tile_size: 256 };
        let coord = LatLng::new(51.5074, -0.1278);

        let px_z3 = projection.to_pixel(&coord, 3);
        let px_z4 = projection.to_pixel(&coord, 4);

        assert!((px_z4.x - px_z3.x * 2.0).abs() < 1e-9);
        assert!((px_z4.y - px_z3.y * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_singleton_lazy_default() {
        let projection = Projection::get();
        assert_eq!(projection.world_size_px(0), 256.0);

        // Explicit init after lazy first use is rejected.
        assert!(Projection::init(512).is_err());
    }
}
