pub mod config;
pub mod constants;
pub mod convert;
pub mod csv_io;
pub mod error;
pub mod metrics;
pub mod observability;
pub mod types;

pub use convert::{ConversionPipeline, ConversionSummary, ProviderProfile, ProviderRegistry, ScanState};
pub use csv_io::convert_file;
pub use error::{ConvertError, Result};
pub use types::{ChangeIndicator, NormalizedRecord, RawRow};
