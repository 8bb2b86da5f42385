use serde::{Deserialize, Serialize};

use crate::core::{Margins, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DashPattern};
use crate::series::color::TABLEAU_10;

/// Chart geometry: surface size, margins, legend and label metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport: Viewport,
    pub margins: Margins,
    /// Gap between the plot's right edge and the legend column.
    pub legend_offset_px: f64,
    pub legend_row_height_px: f64,
    pub legend_swatch_px: f64,
    pub legend_font_px: f64,
    pub axis_font_px: f64,
    pub axis_tick_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(960, 500),
            margins: Margins::default(),
            legend_offset_px: 20.0,
            legend_row_height_px: 20.0,
            legend_swatch_px: 12.0,
            legend_font_px: 11.0,
            axis_font_px: 10.0,
            axis_tick_px: 6.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margins.validate()?;
        for (name, value) in [
            ("legend_offset_px", self.legend_offset_px),
            ("legend_row_height_px", self.legend_row_height_px),
            ("legend_swatch_px", self.legend_swatch_px),
            ("legend_font_px", self.legend_font_px),
            ("axis_font_px", self.axis_font_px),
            ("axis_tick_px", self.axis_tick_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Colors and strokes of the two series draw styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub palette: Vec<Color>,
    /// Alpha of the production area fill.
    pub fill_alpha: f64,
    pub series_stroke_px: f64,
    pub overlay_color: Color,
    pub overlay_stroke_px: f64,
    pub overlay_dash: DashPattern,
    pub axis_color: Color,
    pub axis_stroke_px: f64,
    pub text_color: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: TABLEAU_10.to_vec(),
            fill_alpha: 0.18,
            series_stroke_px: 2.5,
            overlay_color: Color::rgb(0.0, 0.0, 0.0),
            overlay_stroke_px: 3.0,
            overlay_dash: DashPattern::new(5.0, 5.0),
            axis_color: Color::rgb(0.2, 0.2, 0.2),
            axis_stroke_px: 1.0,
            text_color: Color::rgb(0.1, 0.1, 0.1),
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        if !self.fill_alpha.is_finite() || !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(ChartError::InvalidData(
                "fill alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        for (name, value) in [
            ("series_stroke_px", self.series_stroke_px),
            ("overlay_stroke_px", self.overlay_stroke_px),
            ("axis_stroke_px", self.axis_stroke_px),
            ("overlay_dash.on_px", self.overlay_dash.on_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        self.overlay_color.validate()?;
        self.axis_color.validate()?;
        self.text_color.validate()
    }
}
