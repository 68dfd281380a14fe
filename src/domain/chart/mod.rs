//! Chart payloads and their geometry.

pub mod entities;
pub mod geometry;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
