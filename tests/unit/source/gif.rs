use super::*;

#[test]
fn disposal_maps_every_gif_variant() {
    assert_eq!(
        disposal_from_gif(gif::DisposalMethod::Keep),
        DisposalMethod::None
    );
    assert_eq!(
        disposal_from_gif(gif::DisposalMethod::Background),
        DisposalMethod::Background
    );
    assert_eq!(
        disposal_from_gif(gif::DisposalMethod::Previous),
        DisposalMethod::RestorePrevious
    );
    assert_eq!(
        disposal_from_gif(gif::DisposalMethod::Any),
        DisposalMethod::Unspecified
    );
}

#[test]
fn palette_color_is_opaque_and_bounds_checked() {
    let palette = [0, 0, 0, 255, 128, 0];
    assert_eq!(
        palette_color(&palette, 1),
        Some(Rgba([65535, 32896, 0, 65535]))
    );
    assert_eq!(palette_color(&palette, 2), None);
}

#[test]
fn short_buffers_are_rejected() {
    assert!(rgba8_to_rgba16(2, 2, &[0u8; 12]).is_err());
    let img = rgba8_to_rgba16(1, 1, &[255, 0, 0, 255]).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [65535, 0, 0, 65535]);
}

#[test]
fn garbage_input_surfaces_other_error() {
    let err = decode_gif(&b"not a gif"[..]).unwrap_err();
    assert!(matches!(err, crate::GlyphError::Other(_)));
}
