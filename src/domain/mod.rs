pub mod chart;
pub mod errors;
pub mod facts;
pub mod logging;
pub mod metrics;
