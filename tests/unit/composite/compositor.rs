use super::*;

const RED: Rgba<u16> = Rgba([u16::MAX, 0, 0, u16::MAX]);
const BLUE: Rgba<u16> = Rgba([0, 0, u16::MAX, u16::MAX]);
const GREEN: Rgba<u16> = Rgba([0, u16::MAX, 0, u16::MAX]);
const BG: Rgba<u16> = Rgba([1000, 1000, 1000, u16::MAX]);

fn solid(px: Rgba<u16>, x: i32, y: i32, w: u32, h: u32, disposal: DisposalMethod) -> SourceFrame {
    SourceFrame::new(Rgba16Image::from_pixel(w, h, px), x, y, disposal, 5)
}

fn px(c: &Compositor, x: u32, y: u32) -> Rgba<u16> {
    *c.canvas().get_pixel(x, y)
}

#[test]
fn transparent_source_pixels_leave_destination() {
    let mut c = Compositor::new(2, 1);
    c.render(&solid(RED, 0, 0, 2, 1, DisposalMethod::None), None);

    let mut img = Rgba16Image::from_pixel(2, 1, BLUE);
    img.put_pixel(1, 0, Rgba([0, u16::MAX, 0, 0]));
    let snap = c.render(&SourceFrame::new(img, 0, 0, DisposalMethod::None, 1), None);

    assert_eq!(*snap.image().get_pixel(0, 0), BLUE);
    assert_eq!(*snap.image().get_pixel(1, 0), RED);
}

#[test]
fn snapshot_is_taken_before_disposal() {
    let mut c = Compositor::new(2, 2).with_background(BG);
    let snap = c.render(&solid(RED, 0, 0, 2, 2, DisposalMethod::Background), None);
    assert!(snap.image().pixels().all(|p| *p == RED));
    assert!(c.canvas().pixels().all(|p| *p == BG));
}

#[test]
fn none_keeps_pixels_outside_next_bounds() {
    let mut c = Compositor::new(3, 3);
    c.render(&solid(RED, 0, 0, 3, 3, DisposalMethod::None), None);
    let snap = c.render(&solid(BLUE, 1, 1, 1, 1, DisposalMethod::None), None);

    for y in 0..3 {
        for x in 0..3 {
            let expected = if (x, y) == (1, 1) { BLUE } else { RED };
            assert_eq!(*snap.image().get_pixel(x, y), expected, "pixel ({x},{y})");
        }
    }
}

#[test]
fn background_clears_only_frame_bounds() {
    let mut c = Compositor::new(3, 3).with_background(BG);
    c.render(&solid(RED, 0, 0, 3, 3, DisposalMethod::None), None);
    c.render(&solid(BLUE, 0, 0, 2, 1, DisposalMethod::Background), None);

    assert_eq!(px(&c, 0, 0), BG);
    assert_eq!(px(&c, 1, 0), BG);
    assert_eq!(px(&c, 2, 0), RED);
    assert_eq!(px(&c, 0, 1), RED);
}

#[test]
fn background_defaults_to_transparent() {
    let mut c = Compositor::new(1, 1);
    c.render(&solid(RED, 0, 0, 1, 1, DisposalMethod::Background), None);
    assert_eq!(px(&c, 0, 0), TRANSPARENT);
}

#[test]
fn restore_previous_returns_to_last_kept_state() {
    let mut c = Compositor::new(2, 2);
    c.render(&solid(RED, 0, 0, 2, 2, DisposalMethod::None), None);
    let kept = c.canvas().clone();

    c.render(&solid(BLUE, 0, 0, 1, 1, DisposalMethod::RestorePrevious), None);
    assert_eq!(c.canvas(), &kept);

    c.render(&solid(GREEN, 1, 1, 1, 1, DisposalMethod::RestorePrevious), None);
    assert_eq!(c.canvas(), &kept);
}

#[test]
fn restore_previous_without_kept_state_is_noop() {
    let mut c = Compositor::new(2, 1);
    let snap = c.render(&solid(BLUE, 0, 0, 1, 1, DisposalMethod::RestorePrevious), None);
    assert!(c.last_kept().is_none());
    assert_eq!(c.canvas(), snap.image());
}

#[test]
fn last_kept_tracks_most_recent_none_frame() {
    let mut c = Compositor::new(1, 1);
    c.render(&solid(RED, 0, 0, 1, 1, DisposalMethod::None), None);
    c.render(&solid(BLUE, 0, 0, 1, 1, DisposalMethod::None), None);
    c.render(&solid(GREEN, 0, 0, 1, 1, DisposalMethod::RestorePrevious), None);
    assert_eq!(px(&c, 0, 0), BLUE);
}

#[test]
fn unspecified_clears_next_frame_bounds() {
    let mut c = Compositor::new(3, 1).with_background(BG);
    c.render(
        &solid(RED, 0, 0, 3, 1, DisposalMethod::Unspecified),
        Some(FrameRect::new(2, 0, 1, 1)),
    );
    assert_eq!(px(&c, 0, 0), RED);
    assert_eq!(px(&c, 1, 0), RED);
    assert_eq!(px(&c, 2, 0), BG);
}

#[test]
fn unspecified_last_frame_is_noop() {
    let mut c = Compositor::new(2, 1).with_background(BG);
    let snap = c.render(&solid(RED, 0, 0, 2, 1, DisposalMethod::Unspecified), None);
    assert_eq!(c.canvas(), snap.image());
}

#[test]
fn frames_are_clipped_to_canvas() {
    let mut c = Compositor::new(2, 2);
    let snap = c.render(&solid(RED, 1, 1, 4, 4, DisposalMethod::None), None);
    assert_eq!(*snap.image().get_pixel(0, 0), TRANSPARENT);
    assert_eq!(*snap.image().get_pixel(1, 1), RED);
}

#[test]
fn composite_all_uses_canvas_origin_and_lookahead() {
    let anim = Animation::new(
        2,
        1,
        vec![
            solid(RED, -1, 0, 3, 1, DisposalMethod::Unspecified),
            solid(BLUE, 1, 0, 1, 1, DisposalMethod::None),
        ],
    )
    .with_background(BG);

    let out: Vec<_> = Compositor::composite_all(&anim).collect();
    assert_eq!(out.len(), 2);
    assert_eq!((out[0].1.width(), out[0].1.height()), (3, 1));
    assert!(out[0].1.image().pixels().all(|p| *p == RED));

    // Source x = 1 lands at canvas x = 2 once the origin is shifted.
    let second = out[1].1.image();
    assert_eq!(*second.get_pixel(0, 0), RED);
    assert_eq!(*second.get_pixel(1, 0), RED);
    assert_eq!(*second.get_pixel(2, 0), BLUE);
    assert_eq!(out[1].0, 5);
}

#[test]
fn composite_all_reports_exact_len() {
    let anim = Animation::new(
        1,
        1,
        vec![
            solid(RED, 0, 0, 1, 1, DisposalMethod::None),
            solid(RED, 0, 0, 1, 1, DisposalMethod::None),
        ],
    );
    let mut frames = Compositor::composite_all(&anim);
    assert_eq!(frames.len(), 2);
    assert!(frames.compositor().last_kept().is_none());
    frames.next();
    assert_eq!(frames.len(), 1);
    assert_eq!(
        frames.compositor().last_kept().map(|k| *k.get_pixel(0, 0)),
        Some(RED)
    );
}
