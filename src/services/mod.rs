pub mod converter;
pub mod direct_engine;
pub mod page_content;
pub mod raster_engine;

pub use converter::{convert, Converter};
pub use direct_engine::DirectEngine;
pub use raster_engine::RasterEngine;
