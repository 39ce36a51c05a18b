//! End-to-end tests for direct (content-stream) conversion.

mod common;

use common::fixtures::{self, Encoding, PAPER_PAGE, PRINT_PAGE};
use common::{assert_contains, assert_not_contains, load_pdf, page_contents, TestWorkspace};
use dark_recolor::{scan, ColorSpaceKind, Scheme};
use lopdf::Object;
use pdfdarkmode::models::{ConversionMode, ConvertOptions};
use pdfdarkmode::services::convert;
use pdfdarkmode::services::page_content::decode_stream;
use pretty_assertions::assert_eq;

fn direct(ws: &TestWorkspace, input: &std::path::Path, scheme: Scheme) -> ConvertOptions {
    ConvertOptions::new(input, ws.path("out.pdf"), scheme).with_mode(ConversionMode::Direct)
}

#[test]
fn test_paper_page_under_dark() {
    let ws = TestWorkspace::new();
    let input = ws.write_pdf("paper.pdf", fixtures::document(&[PAPER_PAGE], Encoding::Raw));

    let report = convert(&direct(&ws, &input, Scheme::default())).unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(report.colors_changed, 3);
    assert_eq!(report.pages_skipped, 0);

    let doc = load_pdf(&ws.path("out.pdf"));
    let contents = page_contents(&doc, 1);
    assert_eq!(contents.len(), 2);

    let background = &contents[0];
    assert_contains(background, "q 0.102 0.102 0.102 rg 0.00 0.00 595.00 842.00 re f Q");
    assert_contains(background, "0.878 0.878 0.878 rg 0.878 0.878 0.878 RG");

    let body = &contents[1];
    assert_contains(body, "0.102 0.102 0.102 rg 0 0 612 792 re f");
    assert_contains(body, "/F1 12 Tf 0.878 g 72 720 Td (Hello) Tj");
    assert_not_contains(body, "1 1 1 rg");
}

#[test]
fn test_saturated_stroke_stays_colorful() {
    let ws = TestWorkspace::new();
    let input = ws.write_pdf("paper.pdf", fixtures::document(&[PAPER_PAGE], Encoding::Raw));
    convert(&direct(&ws, &input, Scheme::default())).unwrap();

    let doc = load_pdf(&ws.path("out.pdf"));
    let body = &page_contents(&doc, 1)[1];
    let stroke = scan(body)
        .into_iter()
        .find(|op| op.is_stroke && op.kind == ColorSpaceKind::Rgb)
        .expect("stroke color survives");

    let [r, g, b]: [f64; 3] = stroke.operands().try_into().unwrap();
    assert!(r > g && r > b, "hue drifted: {r} {g} {b}");
    assert_ne!(stroke.values, vec!["0.8", "0", "0"]);
}

#[test]
fn test_flate_input_and_multiple_pages() {
    let ws = TestWorkspace::new();
    let input = ws.write_pdf(
        "print.pdf",
        fixtures::document(&[PAPER_PAGE, PRINT_PAGE], Encoding::Flate),
    );

    let report = convert(&direct(&ws, &input, Scheme::default())).unwrap();
    assert_eq!(report.pages, 2);

    let doc = load_pdf(&ws.path("out.pdf"));
    let second = &page_contents(&doc, 2)[1];
    assert_contains(second, "0.102 g 0 0 595 842 re f");
    assert_contains(second, "0.000 0.000 0.000 0.122 K");
}

#[test]
fn test_tinted_scheme_promotes_gray_and_cmyk_to_rgb() {
    let ws = TestWorkspace::new();
    let input = ws.write_pdf("print.pdf", fixtures::document(&[PRINT_PAGE], Encoding::Raw));

    let nord = Scheme::preset("nord").unwrap();
    convert(&direct(&ws, &input, nord)).unwrap();

    let doc = load_pdf(&ws.path("out.pdf"));
    let contents = page_contents(&doc, 1);
    assert_contains(&contents[0], "q 0.180 0.204 0.251 rg");
    assert_contains(&contents[1], "0.925 0.937 0.957 RG 20 20 m");
    assert!(scan(&contents[1])
        .iter()
        .all(|op| op.kind == ColorSpaceKind::Rgb));
}

#[test]
fn test_converted_output_converts_again() {
    let ws = TestWorkspace::new();
    let input = ws.write_pdf("paper.pdf", fixtures::document(&[PAPER_PAGE], Encoding::Raw));
    convert(&direct(&ws, &input, Scheme::default())).unwrap();

    let again = ConvertOptions::new(ws.path("out.pdf"), ws.path("again.pdf"), Scheme::default())
        .with_mode(ConversionMode::Direct);
    let report = convert(&again).unwrap();

    assert_eq!(report.pages, 1);
    let doc = load_pdf(&ws.path("again.pdf"));
    assert_eq!(page_contents(&doc, 1).len(), 3);
}

#[test]
fn test_images_recolored_when_not_preserved() {
    let ws = TestWorkspace::new();
    let mut doc = fixtures::document(&[PAPER_PAGE], Encoding::Raw);
    let image_id = fixtures::add_rgb_image(&mut doc, 4, 2, [255, 255, 255]);
    let input = ws.write_pdf("image.pdf", doc);

    let options = direct(&ws, &input, Scheme::default()).with_preserve_images(false);
    let report = convert(&options).unwrap();
    assert_eq!(report.images_recolored, 1);

    let doc = load_pdf(&ws.path("out.pdf"));
    let stream = doc.get_object(image_id).and_then(Object::as_stream).unwrap();
    assert_eq!(decode_stream(stream).unwrap(), [26u8, 26, 26].repeat(8));
}

#[test]
fn test_images_preserved_by_default() {
    let ws = TestWorkspace::new();
    let mut doc = fixtures::document(&[PAPER_PAGE], Encoding::Raw);
    let image_id = fixtures::add_rgb_image(&mut doc, 1, 1, [255, 255, 255]);
    let input = ws.write_pdf("image.pdf", doc);

    let report = convert(&direct(&ws, &input, Scheme::default())).unwrap();
    assert_eq!(report.images_recolored, 0);

    let doc = load_pdf(&ws.path("out.pdf"));
    let stream = doc.get_object(image_id).and_then(Object::as_stream).unwrap();
    assert_eq!(decode_stream(stream).unwrap(), vec![255, 255, 255]);
}

#[test]
fn test_not_a_pdf() {
    let ws = TestWorkspace::new();
    let input = ws.write("broken.pdf", b"%PDF-1.5\nthis is not really a pdf");

    let err = convert(&direct(&ws, &input, Scheme::default())).unwrap_err();
    assert!(
        err.to_string().starts_with("Direct conversion failed: Failed to parse PDF"),
        "{err}"
    );
    assert!(!ws.path("out.pdf").exists());
}
