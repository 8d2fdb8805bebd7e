pub mod canvas;
pub mod image;
pub mod style;
