pub mod classifier;
pub mod date;
pub mod extract;
pub mod pipeline;
pub mod profile;
pub mod providers;
pub mod registry;

pub use pipeline::{ConversionObserver, ConversionPipeline, ConversionSummary, RecordSink, ScanState};
pub use profile::ProviderProfile;
pub use registry::ProviderRegistry;
