use super::*;
use image::Rgba;

fn opts() -> Options {
    Options {
        stride_w: 1.0,
        stride_h: 1.0,
        ..Options::default()
    }
}

fn raster(o: Options) -> Rasterizer {
    Rasterizer::new(&o).unwrap()
}

#[test]
fn crop_order_changes_intermediate_dimensions() {
    let base = Options {
        resize: true,
        width: 4,
        height: 4,
        crop_left: 1,
        crop_top: 1,
        crop_right: 1,
        crop_bottom: 1,
        ..Options::default()
    };

    let first = raster(Options {
        crop_first: true,
        ..base.clone()
    })
    .plan(10, 10)
    .unwrap();
    let after = raster(Options {
        crop_first: false,
        ..base
    })
    .plan(10, 10)
    .unwrap();

    assert_eq!(first.steps[0].output_size(), (8, 8));
    assert_eq!(after.steps[0].output_size(), (4, 4));
    assert_eq!(first.pre_stride_size(), (4, 4));
    assert_eq!(after.pre_stride_size(), (2, 2));
    assert_ne!(first.pre_stride_size(), after.pre_stride_size());
    assert!(matches!(
        first.steps.last(),
        Some(RasterStep::Stride {
            width: 4,
            height: 2
        })
    ));
}

#[test]
fn degenerate_crop_is_config_error() {
    let r = raster(Options {
        crop_left: 6,
        crop_right: 4,
        ..opts()
    });
    assert!(matches!(r.plan(10, 10), Err(GlyphError::Config(_))));

    let r = raster(Options {
        crop_top: u32::MAX,
        crop_bottom: u32::MAX,
        ..opts()
    });
    assert!(matches!(r.plan(10, 10), Err(GlyphError::Config(_))));
}

#[test]
fn crop_removes_each_edge() {
    let mut img = Rgba16Image::new(5, 4);
    img.put_pixel(1, 2, Rgba([9, 9, 9, 9]));
    let r = raster(Options {
        crop_left: 1,
        crop_top: 2,
        crop_right: 2,
        crop_bottom: 1,
        ..opts()
    });
    let out = r.transform(&img).unwrap();
    assert_eq!(out.dimensions(), (2, 1));
    assert_eq!(out.get_pixel(0, 0).0, [9, 9, 9, 9]);
}

#[test]
fn resize_derives_missing_dimension_from_aspect() {
    assert_eq!(resize_size((200, 100), 50, 0), (50, 25));
    assert_eq!(resize_size((200, 100), 0, 10), (20, 10));
    assert_eq!(resize_size((200, 100), 7, 9), (7, 9));
}

#[test]
fn thumbnail_fits_box_without_upscaling() {
    assert_eq!(thumbnail_size((200, 100), 50, 50), (50, 25));
    assert_eq!(thumbnail_size((100, 200), 50, 50), (25, 50));
    assert_eq!(thumbnail_size((20, 10), 50, 50), (20, 10));
    assert_eq!(thumbnail_size((200, 100), 0, 20), (40, 20));
}

#[test]
fn resize_only_runs_with_flag_and_target() {
    let r = raster(Options {
        width: 3,
        ..opts()
    });
    assert!(r.plan(10, 10).unwrap().steps.is_empty());

    let r = raster(Options {
        resize: true,
        ..opts()
    });
    assert!(r.plan(10, 10).unwrap().steps.is_empty());
}

#[test]
fn stride_divides_and_never_reaches_zero() {
    let r = raster(Options {
        stride_w: 2.0,
        stride_h: 3.0,
        ..Options::default()
    });
    let plan = r.plan(9, 9).unwrap();
    assert_eq!(plan.output_size(), (4, 3));

    let plan = r.plan(1, 2).unwrap();
    assert_eq!(plan.output_size(), (1, 1));
}

#[test]
fn transform_output_matches_plan() {
    let img = Rgba16Image::from_pixel(12, 8, Rgba([40_000, 40_000, 40_000, u16::MAX]));
    let r = raster(Options {
        resize: true,
        width: 6,
        crop_top: 1,
        ..Options::default()
    });
    let plan = r.plan(12, 8).unwrap();
    let out = r.transform(&img).unwrap();
    assert_eq!(out.dimensions(), plan.output_size());
    assert_eq!(plan.output_size(), (6, 1));
}

#[test]
fn identity_options_return_copy() {
    let img = Rgba16Image::from_pixel(3, 3, Rgba([1, 2, 3, 4]));
    let out = raster(opts()).transform(&img).unwrap();
    assert_eq!(out, img);
}

#[test]
fn invalid_stride_rejected_at_construction() {
    let o = Options {
        stride_h: f64::NAN,
        ..Options::default()
    };
    assert!(Rasterizer::new(&o).is_err());
}

#[test]
fn tiny_stride_cannot_stretch_past_the_limit() {
    let r = raster(Options {
        stride_w: 1e-9,
        stride_h: 2.0,
        ..Options::default()
    });
    assert!(matches!(r.plan(10, 10), Err(GlyphError::Config(_))));
    let img = Rgba16Image::new(10, 10);
    assert!(matches!(r.transform(&img), Err(GlyphError::Config(_))));
}

#[test]
fn fractional_stride_may_grow_within_the_limit() {
    let r = raster(Options {
        stride_w: 0.5,
        stride_h: 2.0,
        ..Options::default()
    });
    assert_eq!(r.plan(10, 10).unwrap().output_size(), (20, 5));
}

#[test]
fn empty_input_gets_no_steps() {
    let r = raster(Options {
        resize: true,
        width: 4,
        crop_left: 1,
        ..Options::default()
    });
    let plan = r.plan(0, 0).unwrap();
    assert!(plan.steps.is_empty());
    assert_eq!(r.transform(&Rgba16Image::new(0, 0)).unwrap().dimensions(), (0, 0));
}
