use econ_dash::ChartError;
use econ_dash::core::Viewport;
use econ_dash::render::{
    CanvasLayerKind, Color, LinePrimitive, LineStrokeStyle, NullRenderer, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

fn black() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

#[test]
fn new_frame_has_layers_in_paint_order() {
    let frame = RenderFrame::new(Viewport::new(640, 480));
    let kinds: Vec<CanvasLayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(kinds, CanvasLayerKind::CANONICAL_ORDER);
    assert!(frame.is_empty());
}

#[test]
fn primitives_land_in_their_layer() {
    let mut frame = RenderFrame::new(Viewport::new(640, 480));
    frame.push_text(
        CanvasLayerKind::Legend,
        TextPrimitive::new("Food", 10.0, 10.0, 12.0, black(), TextHAlign::Left),
    );
    frame.push_line(
        CanvasLayerKind::Series,
        LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.5, black()),
    );
    frame.push_line(
        CanvasLayerKind::Grid,
        LinePrimitive::new(0.0, 5.0, 640.0, 5.0, 1.0, black().with_alpha(0.7))
            .with_stroke_style(LineStrokeStyle::Dashed),
    );
    frame.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::new(0.0, 0.0, 640.0, 480.0, Color::hex(0xE5E5E5)),
    );

    assert_eq!(frame.line_count(), 2);
    assert_eq!(frame.rect_count(), 1);
    assert_eq!(frame.text_count(), 1);

    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid layer");
    assert_eq!(grid.lines[0].stroke_style, LineStrokeStyle::Dashed);
    // Iteration follows paint order: the grid line comes before the series line.
    let widths: Vec<f64> = frame.lines().map(|line| line.stroke_width).collect();
    assert_eq!(widths, [1.0, 1.5]);
    frame.validate().expect("valid frame");
}

#[test]
fn validation_rejects_bad_geometry_and_colors() {
    let mut frame = RenderFrame::new(Viewport::new(640, 480));
    frame.push_line(
        CanvasLayerKind::Series,
        LinePrimitive::new(0.0, f64::NAN, 10.0, 10.0, 1.0, black()),
    );
    assert!(matches!(frame.validate(), Err(ChartError::InvalidData(_))));

    let mut frame = RenderFrame::new(Viewport::new(640, 480));
    frame.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::new(0.0, 0.0, -1.0, 10.0, black()),
    );
    assert!(frame.validate().is_err());

    let mut frame = RenderFrame::new(Viewport::new(640, 480));
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new("x", 0.0, 0.0, 12.0, Color::rgba(1.5, 0.0, 0.0, 1.0), TextHAlign::Left),
    );
    assert!(frame.validate().is_err());

    let frame = RenderFrame::new(Viewport::new(0, 480));
    assert!(matches!(
        frame.validate(),
        Err(ChartError::InvalidViewport { width: 0, height: 480 })
    ));
}

#[test]
fn hex_colors_unpack_channels() {
    let color = Color::hex(0x348ABD);
    assert!((color.red - 0x34 as f64 / 255.0).abs() < 1e-12);
    assert!((color.green - 0x8A as f64 / 255.0).abs() < 1e-12);
    assert!((color.blue - 0xBD as f64 / 255.0).abs() < 1e-12);
    assert_eq!(color.alpha, 1.0);
}

#[test]
fn null_renderer_counts_primitives() {
    let mut frame = RenderFrame::new(Viewport::new(320, 200));
    frame.push_line(
        CanvasLayerKind::Series,
        LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, black()),
    );
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new("2020-01-01", 5.0, 5.0, 12.0, black(), TextHAlign::Right).rotated(45.0),
    );

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(renderer.last_rect_count, 0);
}
