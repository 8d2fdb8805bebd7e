//! Prelude module for common mapglyph types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use mapglyph::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    constants,
    geo::{point_in_polygon, LatLng, LatLngBounds, Point},
    projection::Projection,
    size::Size,
};

pub use crate::geometry::{
    alignment::{align_top_left, Alignment},
    events::{EventSink, GeometryEvent},
    point::{GeometryPoint, ImageSource},
    shape::Shape,
};

pub use crate::render::{
    canvas::{Canvas, DrawCall, RecordingCanvas},
    image::RasterImage,
    style::{Brush, Color, Pen},
};

pub use crate::{Error, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
