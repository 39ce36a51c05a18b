//! Page-level PDF plumbing for the direct pipeline: locating content
//! streams, decoding and re-encoding their bodies, and painting the
//! page background.

use dark_recolor::{Color, Scheme};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::DirectError;
use crate::rendering::flate::{deflate, inflate};

/// US Letter, used when no MediaBox is found on the page or its ancestors
pub const LETTER: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Bound on `/Parent` hops, so a cyclic page tree cannot loop forever
const MAX_TREE_DEPTH: usize = 32;

/// Object ids of the content streams of a page, in drawing order.
///
/// `/Contents` may be a single reference, an inline array of references, or
/// a reference to such an array.
pub fn content_stream_ids(doc: &Document, page_id: ObjectId) -> Result<Vec<ObjectId>, DirectError> {
    let page = page_dictionary(doc, page_id)?;
    let Ok(contents) = page.get(b"Contents") else {
        return Ok(Vec::new());
    };

    let ids = match contents {
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => references(items),
            _ => vec![*id],
        },
        Object::Array(items) => references(items),
        _ => Vec::new(),
    };
    Ok(ids)
}

fn references(items: &[Object]) -> Vec<ObjectId> {
    items.iter().filter_map(|o| o.as_reference().ok()).collect()
}

fn page_dictionary(doc: &Document, page_id: ObjectId) -> Result<&Dictionary, DirectError> {
    doc.get_dictionary(page_id)
        .map_err(|e| DirectError::Load(format!("page {} {}: {e}", page_id.0, page_id.1)))
}

/// Decoded body of a stream.
///
/// Only unfiltered and plain `/FlateDecode` streams are handled; predictors
/// (`/DecodeParms`) and every other filter are reported as unsupported.
pub fn decode_stream(stream: &Stream) -> Result<Vec<u8>, DirectError> {
    if stream.dict.has(b"DecodeParms") {
        return Err(DirectError::UnsupportedFilter("DecodeParms".to_string()));
    }

    let filters: Vec<&[u8]> = match stream.dict.get(b"Filter") {
        Err(_) => Vec::new(),
        Ok(Object::Name(name)) => vec![name.as_slice()],
        Ok(Object::Array(items)) => items.iter().filter_map(|o| o.as_name().ok()).collect(),
        Ok(other) => {
            return Err(DirectError::UnsupportedFilter(format!("{other:?}")));
        }
    };

    match filters.as_slice() {
        [] => Ok(stream.content.clone()),
        [b"FlateDecode"] => inflate(&stream.content).map_err(|e| DirectError::Decode(e.to_string())),
        [other] => Err(DirectError::UnsupportedFilter(
            String::from_utf8_lossy(other).into_owned(),
        )),
        _ => Err(DirectError::UnsupportedFilter("filter chain".to_string())),
    }
}

/// Replace a stream body with `data`, Flate-compressed.
pub fn encode_stream(stream: &mut Stream, data: &[u8]) -> Result<(), DirectError> {
    let compressed = deflate(data)?;
    stream.dict.remove(b"DecodeParms");
    stream
        .dict
        .set("Filter", Object::Name(b"FlateDecode".to_vec()));
    stream.set_content(compressed);
    Ok(())
}

/// Bytes to text, one char per byte, so every byte survives a round trip.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Inverse of [`latin1_decode`].
pub fn latin1_encode(text: &str) -> Result<Vec<u8>, DirectError> {
    text.chars()
        .map(|c| {
            u8::try_from(c)
                .map_err(|_| DirectError::Decode(format!("character {c:?} is not Latin-1")))
        })
        .collect()
}

/// The page's MediaBox, inherited from the page tree when the page has
/// none, falling back to US Letter.
pub fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let mut current = doc.get_dictionary(page_id).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let Some(dict) = current else { break };
        if let Some(rect) = dict.get(b"MediaBox").ok().and_then(|o| rectangle(doc, o)) {
            return rect;
        }
        current = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok();
    }
    LETTER
}

fn rectangle(doc: &Document, object: &Object) -> Option<[f32; 4]> {
    let object = match object {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let items = object.as_array().ok()?;
    if items.len() != 4 {
        return None;
    }
    let mut rect = [0.0; 4];
    for (slot, item) in rect.iter_mut().zip(items) {
        *slot = item.as_float().ok()?;
    }
    Some(rect)
}

/// Content that paints the page with the scheme background and sets the
/// scheme text color as the default fill and stroke color.
pub fn background_content(scheme: &Scheme, rect: [f32; 4]) -> String {
    let [x0, y0, x1, y1] = rect;
    let (x, y) = (x0.min(x1), y0.min(y1));
    let (w, h) = ((x1 - x0).abs(), (y1 - y0).abs());
    let bg = operands(scheme.background());
    let text = operands(scheme.text());
    format!("q {bg} rg {x:.2} {y:.2} {w:.2} {h:.2} re f Q {text} rg {text} RG\n")
}

fn operands(color: Color) -> String {
    format!("{:.3} {:.3} {:.3}", color.r, color.g, color.b)
}

/// Add `content` as a new stream drawn before everything else on the page.
pub fn prepend_content(
    doc: &mut Document,
    page_id: ObjectId,
    content: &str,
) -> Result<ObjectId, DirectError> {
    let existing = content_stream_ids(doc, page_id)?;
    let stream = Stream::new(Dictionary::new(), content.as_bytes().to_vec());
    let new_id = doc.add_object(stream);

    let mut contents = Vec::with_capacity(existing.len() + 1);
    contents.push(Object::Reference(new_id));
    contents.extend(existing.into_iter().map(Object::Reference));

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| DirectError::Load(format!("page {} {}: {e}", page_id.0, page_id.1)))?;
    page.set("Contents", Object::Array(contents));
    Ok(new_id)
}
