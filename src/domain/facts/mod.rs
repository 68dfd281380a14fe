//! Fact store: the immutable company record every view is derived from.

pub mod builtin;
pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
