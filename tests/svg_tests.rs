// Host-side tests for SVG sizing, the document builder and texture slots.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod hull {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod svg {
        include!("../src/core/svg.rs");
    }
    pub mod bitmap {
        include!("../src/core/bitmap.rs");
    }
}

use hull::bitmap::*;
use hull::constants::*;
use hull::svg::*;

#[test]
fn declared_size_is_used() {
    assert_eq!(svg_dimensions(r#"<svg width="512" height="256"></svg>"#), (512, 256));
    assert_eq!(
        svg_dimensions("<?xml version=\"1.0\"?>\n<svg\n  width = \"100\"\n  height='50'/>"),
        (100, 50)
    );
    assert_eq!(svg_dimensions("<svg width=640 height=480>"), (640, 480));
}

#[test]
fn sizes_parse_like_parse_int() {
    assert_eq!(svg_dimensions(r#"<svg width="512px" height="300.7">"#), (512, 300));
    assert_eq!(svg_dimensions(r#"<svg width=" 64" height="+32">"#), (64, 32));
}

#[test]
fn missing_or_bad_sizes_default() {
    let d = SVG_DEFAULT_SIZE_PX;
    assert_eq!(svg_dimensions(r#"<svg xmlns="http://www.w3.org/2000/svg">"#), (d, d));
    assert_eq!(svg_dimensions(r#"<svg width="100%" height="auto">"#), (100, d));
    assert_eq!(svg_dimensions(r#"<svg width="-5" height="0">"#), (d, d));
    assert_eq!(svg_dimensions(r#"<svg width="300">"#), (300, d));
    assert_eq!(svg_dimensions("not svg at all"), (d, d));
    assert_eq!(svg_dimensions(r#"<svg width="12"#), (d, d));
}

#[test]
fn only_the_root_svg_tag_counts() {
    assert_eq!(
        svg_dimensions(r#"<svgx width="3"></svgx><svg width="7" height="8"><rect width="1" height="1"/></svg>"#),
        (7, 8)
    );
}

#[test]
fn svg_inside_prolog_comments_is_not_the_root() {
    let markup = concat!(
        "<?xml version=\"1.0\"?>\n",
        "<!-- exported from <svg width=\"16\" height=\"16\"> icon -->\n",
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"2048\" height=\"1024\">",
        "</svg>"
    );
    assert_eq!(svg_dimensions(markup), (2048, 1024));
}

#[test]
fn doctype_cdata_and_instructions_are_skipped() {
    let markup = concat!(
        "<?xml-stylesheet href=\"<svg width='1' height='1'>\"?>",
        "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
        "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">",
        "<![CDATA[<svg width=\"2\" height=\"2\">]]>",
        "<svg width=\"300\" height=\"200\"><!-- <svg width=\"3\"> --></svg>"
    );
    assert_eq!(svg_dimensions(markup), (300, 200));
}

#[test]
fn unterminated_comment_hides_everything_after_it() {
    let d = SVG_DEFAULT_SIZE_PX;
    assert_eq!(svg_dimensions(r#"<!-- <svg width="5" height="5">"#), (d, d));
}

#[test]
fn oversized_raster_is_scaled_to_the_texture_limit() {
    let declared = svg_dimensions(r#"<svg width="10000" height="5000">"#);
    assert_eq!(declared, (10000, 5000));
    let (w, h) = fit_raster_size(declared.0, declared.1, MAX_RASTER_PX);
    assert_eq!((w, h), (8192, 4096));
    assert!(check_texture_size(w, h, MAX_RASTER_PX).is_ok());

    let (w, h) = fit_raster_size(300, 90000, MAX_RASTER_PX);
    assert_eq!(h, MAX_RASTER_PX);
    assert!(w >= 1 && w <= 30);
}

#[test]
fn raster_within_the_limit_is_untouched() {
    assert_eq!(fit_raster_size(2048, 1024, MAX_RASTER_PX), (2048, 1024));
    assert_eq!(fit_raster_size(8192, 8192, MAX_RASTER_PX), (8192, 8192));
    assert_eq!(fit_raster_size(0, 0, MAX_RASTER_PX), (1, 1));
    // extreme aspect never collapses a side to zero
    assert_eq!(fit_raster_size(u32::MAX, 1, MAX_RASTER_PX), (MAX_RASTER_PX, 1));
}

#[test]
fn texture_size_check_names_the_limit() {
    assert!(check_texture_size(8192, 8192, 8192).is_ok());
    let err = check_texture_size(10000, 5000, 8192).unwrap_err();
    assert_eq!(
        err,
        TextureError::TooLarge {
            width: 10000,
            height: 5000,
            max: 8192
        }
    );
    assert!(err.to_string().contains("8192"));
    assert!(check_texture_size(1, 8193, 8192).is_err());
}

#[test]
fn builder_hands_out_root_and_namespace() {
    let doc = SvgDocument::build(64, 32, |root, ns| {
        assert_eq!(ns, SVG_NS);
        assert_eq!(root.name, "svg");
        root.append(SvgElement::new("rect").attr("width", 64).attr("fill", "#f00"));
        let text = root.append(SvgElement::new("text").attr("x", 4));
        text.append_text("a<b & \"c\"");
    });
    assert_eq!(
        doc.to_markup(),
        concat!(
            r#"<svg width="64" height="32" xmlns="http://www.w3.org/2000/svg">"#,
            r##"<rect width="64" fill="#f00"/>"##,
            r#"<text x="4">a&lt;b &amp; "c"</text>"#,
            "</svg>"
        )
    );
    assert_eq!(svg_dimensions(&doc.to_markup()), (64, 32));
}

#[test]
fn attributes_are_escaped_and_overwritten() {
    let mut el = SvgElement::new("g").attr("id", "a\"b");
    el.set_attribute("id", "x&y");
    let mut doc = SvgDocument::new(1, 1);
    doc.root_mut().append(el);
    assert!(doc.to_markup().contains(r#"<g id="x&amp;y"/>"#));
    assert_eq!(doc.root().children.len(), 1);
}

#[test]
fn non_success_status_is_an_error() {
    assert!(check_fetch_status("./texture.svg", 200).is_ok());
    assert!(check_fetch_status("./texture.svg", 204).is_ok());
    let err = check_fetch_status("./texture.svg", 404).unwrap_err();
    assert_eq!(
        err,
        TextureError::Status {
            path: "./texture.svg".into(),
            status: 404
        }
    );
    assert!(err.to_string().contains("404"));
    assert!(check_fetch_status("x", 500).is_err());
}

#[test]
fn slot_starts_loading_with_placeholder() {
    let mut slot = BitmapSlot::loading();
    assert_eq!(slot.status(), LoadStatus::Loading);
    assert!(slot.bitmap().is_none());
    assert!(slot.take_dirty().is_none());
    assert_eq!(hull_material_for(&slot), HullMaterial::Placeholder);
}

#[test]
fn failed_load_keeps_placeholder() {
    let mut slot = BitmapSlot::default();
    slot.fail();
    assert_eq!(slot.status(), LoadStatus::Failed);
    assert_eq!(hull_material_for(&slot), HullMaterial::Placeholder);
    assert!(slot.take_dirty().is_none());
}

#[test]
fn ready_bitmap_is_uploaded_once() {
    let mut slot = BitmapSlot::loading();
    slot.replace(Bitmap::blank(2, 2));
    assert_eq!(hull_material_for(&slot), HullMaterial::Textured);
    assert_eq!(slot.take_dirty().map(|b| b.pixels.len()), Some(16));
    assert!(slot.take_dirty().is_none());
    slot.replace(Bitmap::blank(1, 1));
    assert_eq!(slot.take_dirty().map(|b| (b.width, b.height)), Some((1, 1)));
}

#[test]
fn refused_upload_falls_back_to_placeholder() {
    let mut slot = BitmapSlot::loading();
    slot.replace(Bitmap::blank(4, 2));
    let bitmap = slot.take_dirty().cloned().unwrap();
    assert!(check_texture_size(bitmap.width, bitmap.height, 2).is_err());
    slot.fail();
    assert_eq!(hull_material_for(&slot), HullMaterial::Placeholder);
    assert!(slot.take_dirty().is_none());
}

#[test]
fn rgba_length_must_match() {
    assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_some());
    assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_none());
    assert_eq!(Bitmap::blank(3, 2).pixels.len(), 24);
}
