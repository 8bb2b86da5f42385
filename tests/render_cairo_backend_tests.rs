#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use power_mix_chart::ChartError;
use power_mix_chart::api::{ChartController, PipelineConfig};
use power_mix_chart::render::{CairoContextRenderer, CairoRenderer};

const MONTHLY: &str = "\
Country,Time,Balance,Product,Value
France,January 2021,Net Electricity Production,Nuclear,30000
France,February 2021,Net Electricity Production,Nuclear,28000
France,January 2021,Net Electricity Production,Hydro,6000
France,February 2021,Net Electricity Production,Hydro,7000
France,January 2021,Final Consumption (Calculated),Electricity,41000
France,February 2021,Final Consumption (Calculated),Electricity,39000
";

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_paints_areas_strokes_and_overlay() {
    let renderer = CairoRenderer::new(960, 500).expect("renderer");
    let mut controller =
        ChartController::from_text(MONTHLY, renderer, PipelineConfig::default()).expect("load");
    controller.set_overlay(true).expect("overlay on");

    let stats = controller.renderer().last_stats();
    assert_eq!(stats.polygons_filled, 2);
    assert_eq!(stats.polylines_stroked, 3);
    assert_eq!(stats.rects_drawn, 3);
    assert!(stats.texts_drawn >= 6);

    let mut png = Vec::new();
    controller
        .into_renderer()
        .write_png(&mut png)
        .expect("png encode");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let controller = ChartController::from_text(
        MONTHLY,
        CairoRenderer::new(960, 500).expect("renderer"),
        PipelineConfig::default(),
    )
    .expect("load");
    let frame = controller.render_frame().expect("frame").clone();

    let surface = ImageSurface::create(Format::ARgb32, 960, 500).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = controller.into_renderer();
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    assert_eq!(renderer.last_stats().polygons_filled, 2);
    assert!(renderer.last_stats().lines_drawn >= 2);
}
