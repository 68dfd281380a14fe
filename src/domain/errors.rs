/// Every failure degrades one region of the dashboard, none is fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    MissingMountPoint(String),
    DivisionByZero { metric: &'static str },
    RenderingSurfaceUnavailable(String),
    InvalidPeriod(String),
    UnknownSegment(String),
    InvalidFactStore(String),
    Config(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::MissingMountPoint(target) => write!(f, "Missing mount point: {}", target),
            DashboardError::DivisionByZero { metric } => {
                write!(f, "Division by zero: prior value of {} is 0", metric)
            }
            DashboardError::RenderingSurfaceUnavailable(target) => {
                write!(f, "Rendering surface unavailable: {}", target)
            }
            DashboardError::InvalidPeriod(value) => write!(f, "Invalid period: {}", value),
            DashboardError::UnknownSegment(value) => write!(f, "Unknown segment: {}", value),
            DashboardError::InvalidFactStore(msg) => write!(f, "Invalid fact store: {}", msg),
            DashboardError::Config(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<DashboardError> for wasm_bindgen::JsValue {
    fn from(err: DashboardError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
