//! Browser-backed implementations of the application traits.

pub mod dom;
pub mod logging;
pub mod rendering;

pub use dom::DomMountPoints;
pub use logging::{BrowserTimeProvider, ConsoleLogger};
pub use rendering::{CanvasChart, CanvasSurface};
