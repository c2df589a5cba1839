use super::*;
use crate::glyph::palette::Palette;
use image::Rgba;

const BLACK: Rgba<u16> = Rgba([0, 0, 0, u16::MAX]);
const WHITE: Rgba<u16> = Rgba([u16::MAX, u16::MAX, u16::MAX, u16::MAX]);

fn checker() -> Rgba16Image {
    Rgba16Image::from_fn(2, 2, |x, _| if x == 0 { BLACK } else { WHITE })
}

fn plain_opts() -> Options {
    Options {
        palette: Palette::from_chars(" #").unwrap(),
        stride_w: 1.0,
        stride_h: 1.0,
        ..Options::default()
    }
}

struct Bracket;

impl GlyphStyler for Bracket {
    fn push_glyph(&self, row: &mut String, glyph: &str, px: Rgba<u16>) {
        row.push('[');
        row.push_str(glyph);
        row.push_str(if px.0[0] > 0 { "+" } else { "-" });
        row.push(']');
    }
}

#[test]
fn rows_are_concatenated_glyphs_with_crlf() {
    let mut r = GlyphRenderer::new(&plain_opts()).unwrap();
    assert_eq!(r.render_text(&checker()).unwrap(), " #\r\n #\r\n");
}

#[test]
fn multi_char_glyphs_have_no_separator() {
    let opts = Options {
        palette: Palette::new(["..", "##"]).unwrap(),
        ..plain_opts()
    };
    let mut r = GlyphRenderer::new(&opts).unwrap();
    assert_eq!(r.quantizer().glyph(0, 0, 0), "..");
    assert_eq!(r.render_text(&checker()).unwrap(), "..##\r\n..##\r\n");
}

#[test]
fn colorized_requires_styler() {
    let opts = Options {
        color_mode: ColorMode::Colorized,
        ..plain_opts()
    };
    assert!(matches!(GlyphRenderer::new(&opts), Err(GlyphError::Config(_))));

    let mut r = GlyphRenderer::with_styler(&opts, Bracket).unwrap();
    assert_eq!(
        r.render_text(&checker()).unwrap(),
        "[ -][#+]\r\n[ -][#+]\r\n"
    );
}

#[test]
fn emit_errors_stop_rendering() {
    let mut r = GlyphRenderer::new(&plain_opts()).unwrap();
    let mut seen = 0;
    let err = r
        .render_rows(&checker(), |_| {
            seen += 1;
            Err(GlyphError::format("stop"))
        })
        .unwrap_err();
    assert!(err.is_format());
    assert_eq!(seen, 1);
}

#[test]
fn stride_applies_before_quantizing() {
    let opts = Options {
        stride_h: 2.0,
        ..plain_opts()
    };
    let mut r = GlyphRenderer::new(&opts).unwrap();
    let img = Rgba16Image::from_pixel(3, 4, BLACK);
    assert_eq!(r.render_text(&img).unwrap(), "   \r\n   \r\n");
}
