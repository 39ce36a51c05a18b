//! Schemes and the scheme mapper

mod error;
mod mapper;
mod scheme;

pub use error::{ParseColorError, SchemeError};
pub use mapper::{map_color, map_colorful_content, map_document_color};
pub use scheme::{Scheme, NEAR_GRAY_TOLERANCE};
