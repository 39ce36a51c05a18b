pub mod config;
pub mod options;

pub use config::{AppConfig, SchemeConfig};
pub use options::{default_output_path, ConversionMode, ConvertOptions, Report};
