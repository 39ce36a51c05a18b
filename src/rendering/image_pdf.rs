use std::path::Path;

use dark_recolor::RgbaImage;
use lopdf::{Dictionary, Document, Object, Stream};

use super::flate::deflate;
use crate::error::RasterError;

/// PDF points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Build a PDF with one page per image, each image filling its page.
///
/// Page size is derived from the pixel size at `dpi`, so pages keep the
/// physical size of the document they were rendered from.
pub fn build_image_pdf(pages: &[RgbaImage], dpi: u32) -> Result<Document, RasterError> {
    if pages.is_empty() {
        return Err(RasterError::NoPages);
    }
    let dpi = dpi.max(1) as f32;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());

    for image in pages {
        let width_pt = image.width() as f32 * POINTS_PER_INCH / dpi;
        let height_pt = image.height() as f32 * POINTS_PER_INCH / dpi;

        let image_id = doc.add_object(image_xobject(image)?);

        let content = format!("q {width_pt:.4} 0 0 {height_pt:.4} 0 0 cm /Im0 Do Q");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ]),
        );
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut tree = Dictionary::new();
    tree.set("Type", Object::Name(b"Pages".to_vec()));
    tree.set("Count", Object::Integer(kids.len() as i64));
    tree.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(tree));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    Ok(doc)
}

/// Build the image PDF and write it to `path`.
pub fn write_image_pdf(pages: &[RgbaImage], dpi: u32, path: &Path) -> Result<(), RasterError> {
    let mut doc = build_image_pdf(pages, dpi)?;
    doc.save(path)
        .map_err(|e| RasterError::Pdf(e.to_string()))?;
    Ok(())
}

/// 8-bit DeviceRGB image XObject; alpha is dropped since the page
/// background is painted by the image itself.
fn image_xobject(image: &RgbaImage) -> Result<Stream, RasterError> {
    let compressed = deflate(&image.to_rgb())?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(image.width() as i64));
    dict.set("Height", Object::Integer(image.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    Ok(Stream::new(dict, compressed))
}
