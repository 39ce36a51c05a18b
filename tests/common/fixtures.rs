//! Small PDFs built in memory with lopdf.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdfdarkmode::rendering::flate::deflate;

/// A typical light page: white fill, black text, a red stroke
pub const PAPER_PAGE: &[u8] = b"1 1 1 rg 0 0 612 792 re f\n\
BT /F1 12 Tf 0 g 72 720 Td (Hello) Tj ET\n\
0.8 0 0 RG 10 10 m 100 100 l S\n";

/// Gray and CMYK operators only
pub const PRINT_PAGE: &[u8] = b"0.9 g 0 0 595 842 re f\n0 0 0 1 K 20 20 m 200 20 l S\n";

/// A4 in points
pub const A4: [i64; 4] = [0, 0, 595, 842];

/// How content streams are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Raw,
    Flate,
}

/// Build a document with one page per content, MediaBox on the page tree.
pub fn document(pages: &[&[u8]], encoding: Encoding) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for content in pages {
        let content_id = doc.add_object(content_stream(content, encoding));
        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut tree = Dictionary::new();
    tree.set("Type", Object::Name(b"Pages".to_vec()));
    tree.set("Count", Object::Integer(kids.len() as i64));
    tree.set("Kids", Object::Array(kids));
    tree.set(
        "MediaBox",
        Object::Array(A4.iter().map(|&v| Object::Integer(v)).collect()),
    );
    doc.objects.insert(pages_id, Object::Dictionary(tree));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

pub fn content_stream(content: &[u8], encoding: Encoding) -> Stream {
    match encoding {
        Encoding::Raw => Stream::new(Dictionary::new(), content.to_vec()),
        Encoding::Flate => {
            let mut dict = Dictionary::new();
            dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
            Stream::new(dict, deflate(content).unwrap())
        }
    }
}

/// Add an uncompressed DeviceRGB image filled with `rgb`.
pub fn add_rgb_image(doc: &mut Document, width: i64, height: i64, rgb: [u8; 3]) -> ObjectId {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width));
    dict.set("Height", Object::Integer(height));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    let data = rgb.repeat((width * height) as usize);
    doc.add_object(Stream::new(dict, data))
}
