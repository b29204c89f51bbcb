// Observability: logging setup and pipeline progress reporting

pub mod logging;
pub mod observer;

pub use logging::init_logging;
pub use observer::TracingObserver;
