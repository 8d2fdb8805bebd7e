//! # mapglyph
//!
//! A slippy-map geometry core inspired by classic map-widget toolkits.
//!
//! The crate maintains geometric objects (points and procedurally generated
//! shapes) anchored at geographic longitude/latitude coordinates and draws
//! them onto an abstract 2D canvas at a given zoom level, converting between
//! world coordinates and pixel coordinates along the way. Hosting containers
//! supply the canvas backend, the current zoom and the visible rectangle, and
//! consume the events geometries emit (redraw requests, position changes,
//! clicks).

pub mod core;
pub mod geometry;
pub mod prelude;
pub mod render;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    geo::{LatLng, LatLngBounds, Point},
    projection::Projection,
    size::Size,
};

pub use crate::geometry::{
    alignment::Alignment,
    events::{EventSink, GeometryEvent},
    point::GeometryPoint,
    shape::Shape,
};

pub use crate::render::{
    canvas::{Canvas, DrawCall, RecordingCanvas},
    image::RasterImage,
    style::{Brush, Color, Pen},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
