use approx::assert_relative_eq;
use power_mix_chart::core::{
    CanonicalDataset, CanonicalObservation, Role, TemporalPoint, ValueFormat,
};
use power_mix_chart::render::{Color, NullRenderer, Renderer};
use power_mix_chart::selection::{DefaultSelection, SeriesSelection};
use power_mix_chart::series::{
    ChartFrame, ColorAssignment, FrameOptions, LayoutConfig, SeriesRenderer, StyleConfig,
    YPadding,
};

fn obs(year: i32, category: &str, role: Role, value: f64) -> CanonicalObservation {
    CanonicalObservation {
        country: "Spain".to_owned(),
        date: TemporalPoint::year(year).expect("year"),
        category: category.to_owned(),
        role,
        value,
    }
}

fn dataset() -> CanonicalDataset {
    CanonicalDataset::new(vec![
        obs(2019, "Wind", Role::Production, 54.0),
        obs(2020, "Wind", Role::Production, 56.0),
        obs(2021, "Wind", Role::Production, 62.0),
        obs(2019, "Solar", Role::Production, 15.0),
        obs(2020, "Solar", Role::Production, 20.0),
        obs(2021, "Solar", Role::Production, 26.0),
        obs(2019, "Electricity", Role::Consumption, 240.0),
        obs(2021, "Electricity", Role::Consumption, 235.0),
    ])
}

fn frame_for(categories: &[&str], show_overlay: bool) -> ChartFrame {
    let defaults = DefaultSelection {
        checklist: Vec::new(),
        checked: categories.iter().map(|c| (*c).to_owned()).collect(),
    };
    let selection = SeriesSelection::for_country("Spain", &defaults, show_overlay);
    ChartFrame::build(
        &dataset(),
        &selection,
        &[],
        &FrameOptions {
            y_padding: YPadding::Nice,
            nice_tick_count: 10,
            empty_domain_max: 100.0,
            overlay_label: "Final Consumption".to_owned(),
        },
    )
}

struct Fixture {
    layout: LayoutConfig,
    style: StyleConfig,
    colors: ColorAssignment,
    value_format: ValueFormat,
}

impl Fixture {
    fn new() -> Self {
        let style = StyleConfig::default();
        Self {
            layout: LayoutConfig::default(),
            colors: ColorAssignment::from_dataset(&dataset(), &style.palette),
            style,
            value_format: ValueFormat::terawatt_hours(),
        }
    }

    fn renderer(&self) -> SeriesRenderer<'_> {
        SeriesRenderer {
            layout: &self.layout,
            style: &self.style,
            colors: &self.colors,
            value_format: &self.value_format,
        }
    }
}

#[test]
fn production_series_get_area_and_solid_stroke() {
    let fixture = Fixture::new();
    let rendered = fixture
        .renderer()
        .render(&frame_for(&["Wind", "Solar"], false))
        .expect("render");

    assert_eq!(rendered.frame.polygons.len(), 2);
    assert_eq!(rendered.frame.polylines.len(), 2);
    assert!(rendered.frame.polylines.iter().all(|p| p.dash.is_none()));
    assert!(
        rendered
            .frame
            .polylines
            .iter()
            .all(|p| p.stroke_width == fixture.style.series_stroke_px)
    );

    let wind_color = fixture.colors.color_of("Wind").expect("wind color");
    assert_eq!(rendered.frame.polylines[0].color, wind_color);
    assert_relative_eq!(
        rendered.frame.polygons[0].fill_color.alpha,
        fixture.style.fill_alpha
    );

    let polygon = &rendered.frame.polygons[0].points;
    assert_eq!(polygon.first(), polygon.last());
    let baseline = rendered.geometry.plot.bottom();
    assert_relative_eq!(polygon[0].y, baseline);
}

#[test]
fn overlay_is_dashed_neutral_and_unfilled() {
    let fixture = Fixture::new();
    let rendered = fixture
        .renderer()
        .render(&frame_for(&["Solar"], true))
        .expect("render");

    assert_eq!(rendered.frame.polygons.len(), 1);
    assert_eq!(rendered.frame.polylines.len(), 2);

    let overlay = rendered
        .frame
        .polylines
        .iter()
        .find(|p| p.dash.is_some())
        .expect("dashed overlay");
    assert_eq!(overlay.color, Color::rgb(0.0, 0.0, 0.0));
    assert_eq!(overlay.stroke_width, 3.0);
    assert_eq!(overlay.dash, Some(fixture.style.overlay_dash));
}

#[test]
fn vertices_map_dates_and_values_onto_plot_area() {
    let fixture = Fixture::new();
    let rendered = fixture
        .renderer()
        .render(&frame_for(&["Wind"], false))
        .expect("render");
    let geometry = &rendered.geometry;
    let wind = &geometry.series[0];

    assert_eq!(wind.key, "Wind");
    assert_eq!(wind.samples.len(), wind.vertices.len());
    assert_relative_eq!(wind.vertices[0].x, geometry.plot.left, epsilon = 1e-9);
    assert_relative_eq!(wind.vertices[2].x, geometry.plot.right(), epsilon = 1e-9);

    // 62 TWh peak rounds up to the next 5 TWh tick.
    assert_eq!(geometry.y_scale.domain(), (0.0, 65.0));
    let expected_y = geometry.plot.bottom() - 62.0 / 65.0 * geometry.plot.height;
    assert_relative_eq!(wind.vertices[2].y, expected_y, epsilon = 1e-9);
}

#[test]
fn legend_lists_series_in_draw_order() {
    let fixture = Fixture::new();
    let rendered = fixture
        .renderer()
        .render(&frame_for(&["Solar", "Wind"], true))
        .expect("render");

    let keys: Vec<&str> = rendered
        .geometry
        .series
        .iter()
        .map(|s| s.key.as_str())
        .collect();
    assert_eq!(keys, vec!["Final Consumption", "Wind", "Solar"]);

    assert_eq!(rendered.frame.rects.len(), 3);
    let legend_labels: Vec<&str> = rendered
        .frame
        .texts
        .iter()
        .map(|t| t.text.as_str())
        .filter(|text| keys.contains(text))
        .collect();
    assert_eq!(legend_labels, keys);
}

#[test]
fn axes_carry_calendar_and_value_labels() {
    let fixture = Fixture::new();
    let rendered = fixture
        .renderer()
        .render(&frame_for(&["Wind"], false))
        .expect("render");
    let texts: Vec<&str> = rendered.frame.texts.iter().map(|t| t.text.as_str()).collect();

    for label in ["2019", "2020", "2021", "TWh", "0", "65"] {
        assert!(texts.contains(&label), "missing axis label {label}: {texts:?}");
    }
}

#[test]
fn empty_frame_renders_axes_only() {
    let fixture = Fixture::new();
    let rendered = fixture
        .renderer()
        .render(&frame_for(&[], false))
        .expect("render");

    assert!(rendered.frame.polygons.is_empty());
    assert!(rendered.frame.polylines.is_empty());
    assert!(rendered.frame.rects.is_empty());
    assert!(rendered.frame.lines.len() >= 2);
    assert!(rendered.geometry.x_scale.is_none());

    let mut renderer = NullRenderer::default();
    renderer.render(&rendered.frame).expect("valid frame");
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn single_date_is_centered_in_its_period() {
    let dataset = CanonicalDataset::new(vec![obs(2021, "Hydro", Role::Production, 30.0)]);
    let defaults = DefaultSelection {
        checklist: Vec::new(),
        checked: vec!["Hydro".to_owned()],
    };
    let frame = ChartFrame::build(
        &dataset,
        &SeriesSelection::for_country("Spain", &defaults, false),
        &[],
        &FrameOptions {
            y_padding: YPadding::Nice,
            nice_tick_count: 10,
            empty_domain_max: 100.0,
            overlay_label: "Final Consumption".to_owned(),
        },
    );
    let fixture = Fixture::new();
    let rendered = fixture.renderer().render(&frame).expect("render");
    let plot = rendered.geometry.plot;
    let vertex = rendered.geometry.series[0].vertices[0];

    assert_relative_eq!(vertex.x, plot.left + plot.width / 2.0, epsilon = 1e-6);
}
