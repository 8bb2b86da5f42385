//! Pointer-to-sample resolution and tooltip state.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::ValueFormat;
use crate::render::PathVertex;
use crate::series::{ChartGeometry, DrawnSeries, SeriesPoint};

/// Pointer x within this distance of a vertex counts as on the vertex.
pub const VERTEX_SNAP_PX: f64 = 1e-6;

/// How a bisection insertion index becomes a concrete sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TooltipClampRule {
    /// Sample at the lower-bound index (first sample at or after the target).
    /// Probes past the last sample resolve to nothing.
    LowerBound,
    /// Sample before the upper-bound index, clamped at zero (last sample at or
    /// before the target, or the first sample for queries before it).
    PreviousClamped,
}

/// Index of the first sample whose date is not before `target`.
#[must_use]
pub fn bisect_left(points: &[SeriesPoint], target: f64) -> usize {
    points.partition_point(|p| p.date.axis_value() < target)
}

/// Index of the first sample whose date is after `target`.
#[must_use]
pub fn bisect_right(points: &[SeriesPoint], target: f64) -> usize {
    points.partition_point(|p| p.date.axis_value() <= target)
}

/// Resolves `target` (an axis value) to a sample index of `points`.
///
/// `points` must be sorted ascending by date. A target equal to a sample's
/// date resolves to that sample under both rules.
#[must_use]
pub fn resolve_sample_index(
    points: &[SeriesPoint],
    target: f64,
    rule: TooltipClampRule,
) -> Option<usize> {
    if points.is_empty() || !target.is_finite() {
        return None;
    }
    match rule {
        TooltipClampRule::LowerBound => {
            let idx = bisect_left(points, target);
            (idx < points.len()).then_some(idx)
        }
        TooltipClampRule::PreviousClamped => Some(bisect_right(points, target).saturating_sub(1)),
    }
}

/// Resolves a pointer x (pixels) to an index of `vertices`.
///
/// Same rules as [`resolve_sample_index`], evaluated on the projected
/// positions so a pointer placed on a drawn point always resolves to it.
/// `vertices` must be sorted ascending by `x`.
#[must_use]
pub fn resolve_vertex_index(
    vertices: &[PathVertex],
    x: f64,
    rule: TooltipClampRule,
) -> Option<usize> {
    if vertices.is_empty() || !x.is_finite() {
        return None;
    }
    match rule {
        TooltipClampRule::LowerBound => {
            let idx = vertices.partition_point(|v| v.x < x - VERTEX_SNAP_PX);
            (idx < vertices.len()).then_some(idx)
        }
        TooltipClampRule::PreviousClamped => Some(
            vertices
                .partition_point(|v| v.x <= x + VERTEX_SNAP_PX)
                .saturating_sub(1),
        ),
    }
}

/// Text and placement of a visible tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub series: String,
    pub date_label: String,
    pub value_label: String,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible {
        series: String,
        sample: SeriesPoint,
        content: TooltipContent,
    },
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        match self {
            Self::Visible { content, .. } => Some(content),
            Self::Hidden => None,
        }
    }
}

/// Tuning for tooltip placement and hit testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub clamp_rule: TooltipClampRule,
    /// Tooltip anchor relative to the pointer.
    pub offset_px: (f64, f64),
    /// Max vertical pixel distance between pointer and series for a hit.
    pub hover_tolerance_px: f64,
    pub value_format: ValueFormat,
}

/// Tooltip state machine: `Hidden` ⇄ `Visible(series, sample)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEngine {
    config: TooltipConfig,
    state: TooltipState,
}

impl TooltipEngine {
    #[must_use]
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            state: TooltipState::Hidden,
        }
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Hides the tooltip immediately.
    pub fn pointer_leave(&mut self) {
        self.state = TooltipState::Hidden;
    }

    /// Drops all hover state; called whenever the chart is rebuilt.
    pub fn reset(&mut self) {
        self.state = TooltipState::Hidden;
    }

    /// Pointer moved over the plot; picks the series under it.
    ///
    /// The hit is the series whose resolved sample lies vertically nearest
    /// the pointer within the hover tolerance; among equals the series drawn
    /// last (on top) wins. No hit, or a pointer outside the plot, hides the
    /// tooltip.
    pub fn pointer_move(&mut self, geometry: &ChartGeometry, x: f64, y: f64) -> &TooltipState {
        if !geometry.plot.contains(x, y) {
            self.state = TooltipState::Hidden;
            return &self.state;
        }

        let mut candidates: SmallVec<[(OrderedFloat<f64>, usize, usize); 4]> = SmallVec::new();
        for (series_idx, drawn) in geometry.series.iter().enumerate().rev() {
            let Some(sample_idx) = resolve_vertex_index(&drawn.vertices, x, self.config.clamp_rule)
            else {
                continue;
            };
            let Some(vertex) = drawn.vertices.get(sample_idx) else {
                continue;
            };
            let distance = (vertex.y - y).abs();
            if distance <= self.config.hover_tolerance_px {
                candidates.push((OrderedFloat(distance), series_idx, sample_idx));
            }
        }

        match candidates.into_iter().min_by_key(|candidate| candidate.0) {
            Some((_, series_idx, sample_idx)) => {
                self.show(&geometry.series[series_idx], sample_idx, x, y);
            }
            None => self.state = TooltipState::Hidden,
        }
        &self.state
    }

    /// Pointer moved over a series the host already hit-tested.
    ///
    /// When no sample resolves (for example a lower-bound target past the last
    /// sample) the current state is kept.
    pub fn pointer_move_over_series(
        &mut self,
        geometry: &ChartGeometry,
        key: &str,
        x: f64,
        y: f64,
    ) -> &TooltipState {
        let Some(drawn) = geometry.series.iter().find(|s| s.key == key) else {
            self.state = TooltipState::Hidden;
            return &self.state;
        };
        if let Some(sample_idx) = resolve_vertex_index(&drawn.vertices, x, self.config.clamp_rule)
        {
            self.show(drawn, sample_idx, x, y);
        }
        &self.state
    }

    fn show(&mut self, drawn: &DrawnSeries, sample_idx: usize, x: f64, y: f64) {
        let Some(sample) = drawn.samples.get(sample_idx).copied() else {
            return;
        };
        trace!(series = %drawn.key, date = %sample.date, value = sample.value, "tooltip sample");
        let content = TooltipContent {
            series: drawn.key.clone(),
            date_label: sample.date.label(),
            value_label: self.config.value_format.format(sample.value),
            anchor_x: x + self.config.offset_px.0,
            anchor_y: y + self.config.offset_px.1,
        };
        self.state = TooltipState::Visible {
            series: drawn.key.clone(),
            sample,
            content,
        };
    }
}
