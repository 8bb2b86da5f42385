use tracing::trace;

use crate::core::{
    LinearScale, PlotArea, TemporalPoint, ValueFormat, decimals_for_step, group_thousands,
    nice_ticks, temporal_ticks,
    ticks::{AXIS_TIME_TARGET_SPACING_PX, AXIS_VALUE_TARGET_SPACING_PX, axis_tick_target_count},
};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, PathVertex, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};
use crate::series::{
    ChartFrame, ColorAssignment, LayoutConfig, SeriesKind, SeriesPoint, StyleConfig,
};

/// Pixel-space view of one drawn series, shared with hover handling.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnSeries {
    pub key: String,
    pub kind: SeriesKind,
    pub color: Color,
    /// Samples in ascending date order.
    pub samples: Vec<SeriesPoint>,
    /// `samples` projected to pixels, index-aligned.
    pub vertices: Vec<PathVertex>,
}

/// Scales and series geometry of the last render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub plot: PlotArea,
    /// `None` when the frame had no dates to place.
    pub x_scale: Option<LinearScale>,
    pub y_scale: LinearScale,
    pub series: Vec<DrawnSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub frame: RenderFrame,
    pub geometry: ChartGeometry,
}

/// Turns a `ChartFrame` into draw instructions.
///
/// Production series get a translucent area under a solid stroke; the overlay
/// gets a heavier dashed neutral stroke and no fill. The legend lists every
/// frame key in draw order.
#[derive(Debug, Clone, Copy)]
pub struct SeriesRenderer<'a> {
    pub layout: &'a LayoutConfig,
    pub style: &'a StyleConfig,
    pub colors: &'a ColorAssignment,
    pub value_format: &'a ValueFormat,
}

impl SeriesRenderer<'_> {
    pub fn render(&self, chart: &ChartFrame) -> ChartResult<RenderedChart> {
        let plot = PlotArea::from_viewport(self.layout.viewport, self.layout.margins)?;
        let y_scale = LinearScale::new(chart.y_domain, (plot.bottom(), plot.top))?;
        let x_scale = match chart.x_domain {
            Some((start, end)) => Some(LinearScale::new(
                time_domain(start, end),
                (plot.left, plot.right()),
            )?),
            None => None,
        };

        let mut frame = RenderFrame::new(self.layout.viewport);
        let mut series = Vec::with_capacity(chart.series.len());

        for (key, frame_series) in &chart.series {
            let color = self.series_color(key, frame_series.kind);
            let vertices = match x_scale {
                Some(x_scale) => project(&frame_series.points, x_scale, y_scale)?,
                None => Vec::new(),
            };

            if !vertices.is_empty() {
                match frame_series.kind {
                    SeriesKind::Production => {
                        frame.polygons.push(PolygonPrimitive {
                            points: area_polygon(&vertices, plot.bottom()),
                            fill_color: color.with_alpha(self.style.fill_alpha),
                        });
                        frame.polylines.push(PolylinePrimitive {
                            points: vertices.clone(),
                            stroke_width: self.style.series_stroke_px,
                            color,
                            dash: None,
                        });
                    }
                    SeriesKind::Overlay => {
                        frame.polylines.push(PolylinePrimitive {
                            points: vertices.clone(),
                            stroke_width: self.style.overlay_stroke_px,
                            color,
                            dash: Some(self.style.overlay_dash),
                        });
                    }
                }
            }

            series.push(DrawnSeries {
                key: key.clone(),
                kind: frame_series.kind,
                color,
                samples: frame_series.points.clone(),
                vertices,
            });
        }

        self.push_time_axis(&mut frame, plot, x_scale, chart.x_domain)?;
        self.push_value_axis(&mut frame, plot, y_scale, chart.y_domain.1)?;
        self.push_legend(&mut frame, plot, &series);

        trace!(
            polygons = frame.polygons.len(),
            polylines = frame.polylines.len(),
            texts = frame.texts.len(),
            "series render frame built"
        );
        Ok(RenderedChart {
            frame,
            geometry: ChartGeometry {
                plot,
                x_scale,
                y_scale,
                series,
            },
        })
    }

    fn series_color(&self, key: &str, kind: SeriesKind) -> Color {
        match kind {
            SeriesKind::Overlay => self.style.overlay_color,
            SeriesKind::Production => self.colors.color_of(key).unwrap_or_else(|| {
                self.style
                    .palette
                    .first()
                    .copied()
                    .unwrap_or(self.style.overlay_color)
            }),
        }
    }

    fn push_time_axis(
        &self,
        frame: &mut RenderFrame,
        plot: PlotArea,
        x_scale: Option<LinearScale>,
        x_domain: Option<(TemporalPoint, TemporalPoint)>,
    ) -> ChartResult<()> {
        let axis_color = self.style.axis_color;
        let stroke = self.style.axis_stroke_px;
        frame.lines.push(LinePrimitive::new(
            plot.left,
            plot.bottom(),
            plot.right(),
            plot.bottom(),
            stroke,
            axis_color,
        ));

        let (Some(x_scale), Some((start, end))) = (x_scale, x_domain) else {
            return Ok(());
        };
        let target = axis_tick_target_count(plot.width, AXIS_TIME_TARGET_SPACING_PX, 2, 12);
        for tick in temporal_ticks(start, end, target) {
            let x = x_scale.domain_to_pixel(tick.axis_value())?;
            frame.lines.push(LinePrimitive::new(
                x,
                plot.bottom(),
                x,
                plot.bottom() + self.layout.axis_tick_px,
                stroke,
                axis_color,
            ));
            frame.texts.push(TextPrimitive::new(
                tick.label(),
                x,
                plot.bottom() + self.layout.axis_tick_px + self.layout.axis_font_px,
                self.layout.axis_font_px,
                self.style.text_color,
                TextHAlign::Center,
            ));
        }
        Ok(())
    }

    fn push_value_axis(
        &self,
        frame: &mut RenderFrame,
        plot: PlotArea,
        y_scale: LinearScale,
        y_max: f64,
    ) -> ChartResult<()> {
        let axis_color = self.style.axis_color;
        let stroke = self.style.axis_stroke_px;
        frame.lines.push(LinePrimitive::new(
            plot.left,
            plot.top,
            plot.left,
            plot.bottom(),
            stroke,
            axis_color,
        ));

        let target = axis_tick_target_count(plot.height, AXIS_VALUE_TARGET_SPACING_PX, 2, 10);
        let ticks = nice_ticks(0.0, y_max, target);
        let step = match ticks.as_slice() {
            [first, second, ..] => second - first,
            _ => y_max,
        };
        let decimals = decimals_for_step(step);
        if !self.value_format.unit.is_empty() {
            frame.texts.push(TextPrimitive::new(
                self.value_format.unit.clone(),
                plot.left - self.layout.axis_tick_px - 3.0,
                plot.top - self.layout.axis_font_px,
                self.layout.axis_font_px,
                self.style.text_color,
                TextHAlign::Right,
            ));
        }
        for value in ticks {
            let y = y_scale.domain_to_pixel(value)?;
            frame.lines.push(LinePrimitive::new(
                plot.left - self.layout.axis_tick_px,
                y,
                plot.left,
                y,
                stroke,
                axis_color,
            ));
            frame.texts.push(TextPrimitive::new(
                group_thousands(value, decimals),
                plot.left - self.layout.axis_tick_px - 3.0,
                y,
                self.layout.axis_font_px,
                self.style.text_color,
                TextHAlign::Right,
            ));
        }
        Ok(())
    }

    fn push_legend(&self, frame: &mut RenderFrame, plot: PlotArea, series: &[DrawnSeries]) {
        let x = plot.right() + self.layout.legend_offset_px;
        let swatch = self.layout.legend_swatch_px;
        for (row, drawn) in series.iter().enumerate() {
            let y = plot.top + row as f64 * self.layout.legend_row_height_px;
            frame.rects.push(RectPrimitive::new(x, y, swatch, swatch, drawn.color));
            frame.texts.push(TextPrimitive::new(
                drawn.key.clone(),
                x + swatch + 6.0,
                y + swatch / 2.0,
                self.layout.legend_font_px,
                self.style.text_color,
                TextHAlign::Left,
            ));
        }
    }
}

/// Axis-value domain for a date range; a single date is centered in one period.
fn time_domain(start: TemporalPoint, end: TemporalPoint) -> (f64, f64) {
    let (start_value, end_value) = (start.axis_value(), end.axis_value());
    if start_value < end_value {
        return (start_value, end_value);
    }
    let half_period = (start.advance(1).axis_value() - start_value) / 2.0;
    (start_value - half_period, start_value + half_period)
}

fn project(
    points: &[SeriesPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<PathVertex>> {
    points
        .iter()
        .map(|point| {
            Ok(PathVertex::new(
                x_scale.domain_to_pixel(point.date.axis_value())?,
                y_scale.domain_to_pixel(point.value)?,
            ))
        })
        .collect()
}

/// Closes a line against the baseline, repeating the first vertex at the end.
fn area_polygon(line: &[PathVertex], baseline_y: f64) -> Vec<PathVertex> {
    let (Some(first), Some(last)) = (line.first(), line.last()) else {
        return Vec::new();
    };
    let mut polygon = Vec::with_capacity(line.len() + 3);
    polygon.push(PathVertex::new(first.x, baseline_y));
    polygon.extend_from_slice(line);
    polygon.push(PathVertex::new(last.x, baseline_y));
    polygon.push(PathVertex::new(first.x, baseline_y));
    polygon
}
