use std::collections::HashSet;
use std::path::Path;

use dark_recolor::Recolorer;
use lopdf::{Document, Object, ObjectId, Stream};

use super::converter::Converter;
use super::page_content::{
    background_content, content_stream_ids, decode_stream, encode_stream, latin1_decode,
    latin1_encode, media_box, prepend_content,
};
use crate::error::{ConvertError, DirectError};
use crate::models::Report;

/// Rewrites color operators in page content streams, keeping text and
/// vector graphics intact.
#[derive(Debug, Clone)]
pub struct DirectEngine {
    recolorer: Recolorer,
    preserve_images: bool,
}

impl DirectEngine {
    pub fn new(recolorer: Recolorer, preserve_images: bool) -> Self {
        Self {
            recolorer,
            preserve_images,
        }
    }

    /// Convert an already loaded document in place.
    pub fn convert_document(&self, doc: &mut Document) -> Report {
        let pages = doc.get_pages();
        let mut report = Report {
            pages: pages.len(),
            ..Report::default()
        };
        tracing::info!(version = %doc.version, pages = pages.len(), "Read PDF structure");

        tracing::info!("Processing page content streams");
        // Content streams can be shared between pages; rewrite each once.
        let mut visited = HashSet::new();
        for (&number, &page_id) in &pages {
            match self.rewrite_page(doc, page_id, &mut visited) {
                Ok(changed) => {
                    tracing::debug!(page = number, changed, "Rewrote page");
                    report.colors_changed += changed;
                }
                Err(e) => {
                    tracing::warn!(page = number, %e, "Failed to process page, leaving it unchanged");
                    report.pages_skipped += 1;
                }
            }
        }
        tracing::info!(
            pages = report.pages - report.pages_skipped,
            colors = report.colors_changed,
            "Transformed color operations"
        );

        tracing::info!("Adding background to pages");
        for (&number, &page_id) in &pages {
            let content = background_content(self.recolorer.scheme(), media_box(doc, page_id));
            if let Err(e) = prepend_content(doc, page_id, &content) {
                tracing::warn!(page = number, %e, "Could not add page background");
            }
        }

        if !self.preserve_images {
            report.images_recolored = self.recolor_images(doc);
            tracing::info!(images = report.images_recolored, "Recolored embedded images");
        }

        report
    }

    fn rewrite_page(
        &self,
        doc: &mut Document,
        page_id: ObjectId,
        visited: &mut HashSet<ObjectId>,
    ) -> Result<usize, DirectError> {
        let mut changed = 0;
        for id in content_stream_ids(doc, page_id)? {
            if !visited.insert(id) {
                continue;
            }
            match self.rewrite_stream(doc, id) {
                Ok(count) => changed += count,
                Err(e) => {
                    tracing::warn!(object = ?id, %e, "Skipping content stream");
                }
            }
        }
        Ok(changed)
    }

    fn rewrite_stream(&self, doc: &mut Document, id: ObjectId) -> Result<usize, DirectError> {
        let stream = stream_mut(doc, id)?;
        let text = latin1_decode(&decode_stream(stream)?);

        let rewrite = self.recolorer.rewrite_content(&text);
        if rewrite.changed == 0 {
            return Ok(0);
        }

        encode_stream(stream, &latin1_encode(&rewrite.content)?)?;
        Ok(rewrite.changed)
    }

    /// Recolor 8-bit DeviceRGB image XObjects. Returns how many were changed.
    fn recolor_images(&self, doc: &mut Document) -> usize {
        let mut recolored = 0;
        for (id, object) in doc.objects.iter_mut() {
            let Object::Stream(stream) = object else {
                continue;
            };
            if !is_rgb8_image(stream) {
                continue;
            }
            match self.recolor_image(stream) {
                Ok(()) => recolored += 1,
                Err(e) => tracing::debug!(object = ?id, %e, "Skipping image"),
            }
        }
        recolored
    }

    fn recolor_image(&self, stream: &mut Stream) -> Result<(), DirectError> {
        let width = integer(stream, b"Width");
        let height = integer(stream, b"Height");
        let mut pixels = decode_stream(stream)?;

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                DirectError::Decode(format!("image size {width}x{height} is out of range"))
            })?;
        if expected == 0 || pixels.len() != expected {
            return Err(DirectError::Decode(format!(
                "image data has {} bytes, expected {expected}",
                pixels.len()
            )));
        }

        self.recolorer.transform_rgb_pixels(&mut pixels);
        encode_stream(stream, &pixels)
    }
}

impl Converter for DirectEngine {
    fn convert(&self, input: &Path, output: &Path) -> Result<Report, ConvertError> {
        let mut doc = Document::load(input).map_err(|e| DirectError::Load(e.to_string()))?;

        let report = self.convert_document(&mut doc);

        tracing::info!(path = %output.display(), "Writing output PDF");
        doc.compress();
        doc.save(output)
            .map_err(|e| DirectError::Save(e.to_string()))?;
        Ok(report)
    }
}

fn stream_mut(doc: &mut Document, id: ObjectId) -> Result<&mut Stream, DirectError> {
    doc.get_object_mut(id)
        .and_then(Object::as_stream_mut)
        .map_err(|_| DirectError::NotAStream(id.0, id.1))
}

fn is_rgb8_image(stream: &Stream) -> bool {
    let name_is = |key: &[u8], value: &[u8]| {
        stream
            .dict
            .get(key)
            .and_then(Object::as_name)
            .is_ok_and(|name| name == value)
    };
    name_is(b"Subtype", b"Image")
        && name_is(b"ColorSpace", b"DeviceRGB")
        && integer(stream, b"BitsPerComponent") == 8
}

fn integer(stream: &Stream, key: &[u8]) -> usize {
    stream
        .dict
        .get(key)
        .and_then(Object::as_i64)
        .ok()
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dark_recolor::Scheme;
    use lopdf::Dictionary;
    use pretty_assertions::assert_eq;

    fn page_with_content(content: &[u8]) -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.to_vec()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        let page_id = doc.add_object(page);

        let mut tree = Dictionary::new();
        tree.set("Type", Object::Name(b"Pages".to_vec()));
        tree.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        tree.set("Count", Object::Integer(1));
        doc.objects.insert(pages_id, Object::Dictionary(tree));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        (doc, page_id, content_id)
    }

    fn decoded(doc: &Document, id: ObjectId) -> String {
        let stream = doc.get_object(id).and_then(Object::as_stream).unwrap();
        latin1_decode(&decode_stream(stream).unwrap())
    }

    fn engine() -> DirectEngine {
        DirectEngine::new(Recolorer::new(Scheme::default()), true)
    }

    #[test]
    fn test_rewrites_and_prepends_background() {
        let (mut doc, page_id, content_id) =
            page_with_content(b"1 1 1 rg 0 0 612 792 re f 0 g BT (Hi) Tj ET");

        let report = engine().convert_document(&mut doc);
        assert_eq!(report.pages, 1);
        assert_eq!(report.colors_changed, 2);
        assert_eq!(report.pages_skipped, 0);

        assert_eq!(
            decoded(&doc, content_id),
            "0.102 0.102 0.102 rg 0 0 612 792 re f 0.878 g BT (Hi) Tj ET"
        );

        let ids = content_stream_ids(&doc, page_id).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], content_id);
        assert!(decoded(&doc, ids[0]).starts_with("q 0.102 0.102 0.102 rg 0.00 0.00 612.00 792.00 re f Q"));
    }

    #[test]
    fn test_non_latin_bytes_survive() {
        let (mut doc, _, content_id) = page_with_content(b"BT (caf\xe9) Tj ET 1 g");
        engine().convert_document(&mut doc);

        let stream = doc.get_object(content_id).and_then(Object::as_stream).unwrap();
        assert_eq!(decode_stream(stream).unwrap(), b"BT (caf\xe9) Tj ET 0.102 g");
    }

    #[test]
    fn test_unsupported_stream_is_left_alone() {
        let (mut doc, _, content_id) = page_with_content(b"");
        {
            let stream = stream_mut(&mut doc, content_id).unwrap();
            stream.dict.set("Filter", Object::Name(b"LZWDecode".to_vec()));
            stream.set_content(vec![0x80, 0x0b]);
        }

        let report = engine().convert_document(&mut doc);
        assert_eq!(report.colors_changed, 0);
        assert_eq!(report.pages_skipped, 0);

        let stream = doc.get_object(content_id).and_then(Object::as_stream).unwrap();
        assert_eq!(stream.content, vec![0x80, 0x0b]);
    }

    #[test]
    fn test_shared_stream_rewritten_once() {
        let (mut doc, page_id, content_id) = page_with_content(b"1 1 1 rg");
        let pages_id = doc
            .get_dictionary(page_id)
            .and_then(|d| d.get(b"Parent"))
            .and_then(Object::as_reference)
            .unwrap();

        let mut second = Dictionary::new();
        second.set("Type", Object::Name(b"Page".to_vec()));
        second.set("Parent", Object::Reference(pages_id));
        second.set("Contents", Object::Reference(content_id));
        let second_id = doc.add_object(second);
        {
            let tree = doc
                .get_object_mut(pages_id)
                .and_then(Object::as_dict_mut)
                .unwrap();
            tree.set(
                "Kids",
                Object::Array(vec![Object::Reference(page_id), Object::Reference(second_id)]),
            );
            tree.set("Count", Object::Integer(2));
        }

        let report = engine().convert_document(&mut doc);
        assert_eq!(report.pages, 2);
        assert_eq!(decoded(&doc, content_id), "0.102 0.102 0.102 rg");
    }

    fn rgb_image(width: i64, height: i64, data: Vec<u8>) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(width));
        dict.set("Height", Object::Integer(height));
        dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        Stream::new(dict, data)
    }

    #[test]
    fn test_images_recolored_only_when_requested() {
        let (mut doc, _, _) = page_with_content(b"");
        let image_id = doc.add_object(rgb_image(1, 1, vec![255, 255, 255]));

        let report = engine().convert_document(&mut doc);
        assert_eq!(report.images_recolored, 0);

        let report = DirectEngine::new(Recolorer::new(Scheme::default()), false)
            .convert_document(&mut doc);
        assert_eq!(report.images_recolored, 1);

        let stream = doc.get_object(image_id).and_then(Object::as_stream).unwrap();
        assert_eq!(decode_stream(stream).unwrap(), vec![26, 26, 26]);
    }

    #[test]
    fn test_oversized_image_dimensions_are_rejected() {
        let (mut doc, _, _) = page_with_content(b"");
        let image_id = doc.add_object(rgb_image(i64::MAX, 3, vec![255, 255, 255]));

        let engine = DirectEngine::new(Recolorer::new(Scheme::default()), false);
        let report = engine.convert_document(&mut doc);
        assert_eq!(report.images_recolored, 0);

        let stream = stream_mut(&mut doc, image_id).unwrap();
        let err = engine.recolor_image(stream).unwrap_err();
        assert!(matches!(err, DirectError::Decode(_)), "{err}");

        let stream = doc.get_object(image_id).and_then(Object::as_stream).unwrap();
        assert_eq!(decode_stream(stream).unwrap(), vec![255, 255, 255]);
    }
}
