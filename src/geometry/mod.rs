pub mod alignment;
pub mod events;
pub mod point;
pub mod shape;
