use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CanonicalDataset, ObservationFilter, Role, TemporalPoint, nice_upper_bound};
use crate::error::{ChartError, ChartResult};
use crate::selection::SeriesSelection;

/// How the value axis upper bound is derived from the frame maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum YPadding {
    /// Factor 1.0, then round up to a nice tick-aligned value.
    Nice,
    /// Multiply by an explicit headroom factor, no rounding.
    Headroom(f64),
}

impl YPadding {
    pub fn validate(self) -> ChartResult<Self> {
        if let Self::Headroom(factor) = self {
            if !factor.is_finite() || factor < 1.0 {
                return Err(ChartError::InvalidData(
                    "y headroom factor must be finite and >= 1".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn apply(self, max: f64, tick_count: usize) -> f64 {
        match self {
            Self::Nice => nice_upper_bound(max, tick_count),
            Self::Headroom(factor) => max * factor,
        }
    }
}

/// Inputs of the domain calculation that come from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    pub y_padding: YPadding,
    pub nice_tick_count: usize,
    /// Upper bound used when the frame has no positive value.
    pub empty_domain_max: f64,
    pub overlay_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Production category, drawn as filled area plus stroke.
    Production,
    /// Consumption overlay, drawn as a dashed stroke.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: TemporalPoint,
    pub value: f64,
}

/// One drawable series aligned to the frame timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSeries {
    pub kind: SeriesKind,
    pub peak: f64,
    /// One point per timeline entry, ascending by date.
    pub points: Vec<SeriesPoint>,
}

/// View-model derived from a dataset and a selection for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub x_domain: Option<(TemporalPoint, TemporalPoint)>,
    pub y_domain: (f64, f64),
    /// Every date present in any included observation, ascending.
    pub timeline: Vec<TemporalPoint>,
    /// Series keyed by category (or overlay label) in draw and legend order.
    pub series: IndexMap<String, FrameSeries>,
}

impl ChartFrame {
    /// Builds the frame for `selection`.
    ///
    /// `key_order` is the checklist order; it breaks ties between series with
    /// equal peaks. Visible categories missing from it follow in name order,
    /// and the overlay comes last among equals.
    #[must_use]
    pub fn build(
        dataset: &CanonicalDataset,
        selection: &SeriesSelection,
        key_order: &[String],
        options: &FrameOptions,
    ) -> Self {
        let country = selection.country();
        let mut keyed: IndexMap<String, (SeriesKind, BTreeMap<TemporalPoint, f64>)> =
            IndexMap::new();

        let ordered_categories = key_order
            .iter()
            .filter(|key| selection.is_visible(key))
            .chain(
                selection
                    .visible_categories()
                    .iter()
                    .filter(|key| !key_order.contains(*key)),
            );
        for category in ordered_categories {
            let values = dataset
                .query(
                    ObservationFilter::new()
                        .country(country)
                        .role(Role::Production)
                        .category(category),
                )
                .map(|o| (o.date, o.value))
                .collect();
            keyed.insert(category.clone(), (SeriesKind::Production, values));
        }

        if selection.show_overlay() {
            // Several consumption rows for one date: the last one read wins.
            let values: BTreeMap<_, _> = dataset
                .query(
                    ObservationFilter::new()
                        .country(country)
                        .role(Role::Consumption),
                )
                .map(|o| (o.date, o.value))
                .collect();
            if keyed.contains_key(&options.overlay_label) {
                warn!(
                    label = %options.overlay_label,
                    "overlay label names a drawn category; overlay skipped"
                );
            } else if !values.is_empty() {
                keyed.insert(options.overlay_label.clone(), (SeriesKind::Overlay, values));
            }
        }

        let timeline: Vec<TemporalPoint> = keyed
            .values()
            .flat_map(|(_, values)| values.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut series: Vec<(String, FrameSeries)> = keyed
            .into_iter()
            .map(|(key, (kind, values))| {
                let points: Vec<SeriesPoint> = timeline
                    .iter()
                    .map(|date| SeriesPoint {
                        date: *date,
                        value: values.get(date).copied().unwrap_or(0.0),
                    })
                    .collect();
                let peak = points
                    .iter()
                    .map(|p| p.value)
                    .fold(f64::NEG_INFINITY, f64::max);
                let peak = if peak.is_finite() { peak } else { 0.0 };
                (key, FrameSeries { kind, peak, points })
            })
            .collect();
        series.sort_by_key(|(_, s)| Reverse(OrderedFloat(s.peak)));

        let max_value = series
            .iter()
            .map(|(_, s)| s.peak)
            .fold(0.0_f64, f64::max);
        let y_max = if max_value > 0.0 {
            options.y_padding.apply(max_value, options.nice_tick_count)
        } else {
            options
                .y_padding
                .apply(options.empty_domain_max, options.nice_tick_count)
        };

        let x_domain = timeline.first().copied().zip(timeline.last().copied());
        debug!(
            country,
            series = series.len(),
            timeline = timeline.len(),
            y_max,
            "built chart frame"
        );

        Self {
            x_domain,
            y_domain: (0.0, y_max),
            timeline,
            series: series.into_iter().collect(),
        }
    }

    /// Frame with no series: axes only, default value domain.
    #[must_use]
    pub fn empty(options: &FrameOptions) -> Self {
        Self {
            x_domain: None,
            y_domain: (
                0.0,
                options
                    .y_padding
                    .apply(options.empty_domain_max, options.nice_tick_count),
            ),
            timeline: Vec::new(),
            series: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Keys in draw (and legend) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn points(&self, key: &str) -> Option<&[SeriesPoint]> {
        self.series.get(key).map(|s| s.points.as_slice())
    }
}
