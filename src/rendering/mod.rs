pub mod flate;
pub mod image_pdf;
pub mod page_renderer;
pub mod png_io;

pub use image_pdf::{build_image_pdf, write_image_pdf};
pub use page_renderer::PageRenderer;
pub use png_io::{decode_png, encode_png};
