use image::{DynamicImage, Rgba, RgbaImage};
use mask_canvas::{
    CanvasSettings, GestureEvent, MaskCanvas, PointerEvent, PointerKind, ToolMode, Transform,
    TrimMode,
};

fn source() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 100, Rgba([30, 60, 90, 255])))
}

fn send(canvas: &mut MaskCanvas, kind: PointerKind, x: f32, y: f32) {
    canvas.handle_pointer(PointerEvent::new(kind, x, y)).unwrap();
}

fn alpha_at(canvas: &mut MaskCanvas, x: u32, y: u32) -> u8 {
    canvas.render_composite().unwrap().pixel(x, y).unwrap().alpha()
}

#[test]
fn tap_mask_then_recover() {
    let mut canvas = MaskCanvas::new((100, 100), CanvasSettings::default());
    canvas.load(source(), None).unwrap();

    assert_eq!(alpha_at(&mut canvas, 50, 20), 0);
    assert_eq!(alpha_at(&mut canvas, 50, 30), 255);
    assert_eq!(alpha_at(&mut canvas, 50, 80), 0);

    send(&mut canvas, PointerKind::Down, 50.0, 50.0);
    send(&mut canvas, PointerKind::Up, 50.0, 50.0);
    assert_eq!(alpha_at(&mut canvas, 50, 50), 0);

    canvas.set_tool_mode(ToolMode::Recover);
    send(&mut canvas, PointerKind::Down, 50.0, 50.0);
    send(&mut canvas, PointerKind::Up, 50.0, 50.0);
    assert!(alpha_at(&mut canvas, 50, 50) > 0);
}

#[test]
fn zoom_pan_paint_and_export() {
    let settings = CanvasSettings::default()
        .with_stroke_width(10.0)
        .with_trim_mode(TrimMode::Inclusive);
    let mut canvas = MaskCanvas::new((100, 100), settings);
    canvas.load(source(), None).unwrap();

    canvas.set_tool_mode(ToolMode::Pan);
    canvas.handle_gesture(GestureEvent::ScaleBegin).unwrap();
    canvas.handle_gesture(GestureEvent::Scale { factor: 2.0 }).unwrap();
    canvas.handle_gesture(GestureEvent::ScaleEnd).unwrap();
    send(&mut canvas, PointerKind::Up, 0.0, 0.0);
    assert_eq!(canvas.transform().scale, 2.0);

    // drag right, towards the left edge of the canvas
    send(&mut canvas, PointerKind::Down, 10.0, 50.0);
    for x in [20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0] {
        send(&mut canvas, PointerKind::Move, x, 50.0);
    }
    send(&mut canvas, PointerKind::Up, 80.0, 50.0);
    assert_eq!(canvas.transform().translation.x, 0.0);

    // the top-left quarter is on screen, paint a short stroke at canvas (10, 30)
    canvas.set_tool_mode(ToolMode::Mask);
    send(&mut canvas, PointerKind::Down, 20.0, 10.0);
    send(&mut canvas, PointerKind::Move, 20.0, 10.0);
    send(&mut canvas, PointerKind::Up, 20.0, 10.0);
    let mask = canvas.mask_image().unwrap();
    assert_eq!(mask.get_pixel(10, 30)[3], 255);
    assert_eq!(mask.get_pixel(20, 30)[3], 0);

    let exported = canvas.create_masked_image().unwrap().unwrap();
    assert_eq!(canvas.transform(), Transform::IDENTITY);
    assert_eq!(exported.dimensions(), (100, 50));
    // source row 5 at column 10 sits under the hole
    assert_eq!(exported.get_pixel(10, 5)[3], 0);
    assert_eq!(exported.get_pixel(60, 25)[3], 255);
}

#[test]
fn everything_masked_exports_nothing() {
    let mut canvas = MaskCanvas::new((100, 100), CanvasSettings::default());
    let initial = DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 100, Rgba([255; 4])));
    canvas.load(source(), Some(&initial)).unwrap();
    assert_eq!(canvas.create_masked_image().unwrap(), None);
}
