use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{CanonicalDataset, ObservationFilter, Role};
use crate::error::{ChartError, ChartResult};
use crate::ingest::{DataSource, IngestReport, ingest};
use crate::interaction::{TooltipEngine, TooltipState};
use crate::render::{RenderFrame, Renderer};
use crate::selection::{DefaultSelection, SeriesSelection, compute_default_selection};
use crate::series::{ChartFrame, ChartGeometry, ColorAssignment, RenderedChart, SeriesRenderer};

use super::PipelineConfig;

/// One checklist row as a host would display it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub name: String,
    pub peak: f64,
    pub checked: bool,
}

/// Owner of all pipeline state.
///
/// Holds the immutable dataset and color assignment built at load time, the
/// current selection, the last rendered chart and the tooltip state. Every
/// user event goes through one `&mut self` method that runs to completion;
/// selection changes rebuild and re-render the whole chart.
pub struct ChartController<R: Renderer> {
    renderer: R,
    config: PipelineConfig,
    dataset: CanonicalDataset,
    report: IngestReport,
    colors: ColorAssignment,
    countries: Vec<String>,
    defaults: DefaultSelection,
    selection: Option<SeriesSelection>,
    chart: Option<(ChartFrame, RenderedChart)>,
    tooltip: TooltipEngine,
}

impl<R: Renderer> ChartController<R> {
    /// Fetches the source once, ingests it and renders the first country.
    ///
    /// Fetch and header failures are fatal and returned as is.
    pub fn load<S: DataSource>(
        source: &mut S,
        renderer: R,
        config: PipelineConfig,
    ) -> ChartResult<Self> {
        info!(source = %source.describe(), schema = ?config.schema, "loading source");
        let text = source.fetch()?;
        Self::from_text(&text, renderer, config)
    }

    pub fn from_text(text: &str, renderer: R, config: PipelineConfig) -> ChartResult<Self> {
        config.validate()?;
        let ingested = ingest(text, config.schema, &config.ingest)?;
        Self::build(ingested.dataset, ingested.report, renderer, config)
    }

    /// Starts from an already ingested dataset.
    pub fn from_dataset(
        dataset: CanonicalDataset,
        renderer: R,
        config: PipelineConfig,
    ) -> ChartResult<Self> {
        config.validate()?;
        let report = IngestReport {
            observations: dataset.len(),
            ..IngestReport::default()
        };
        Self::build(dataset, report, renderer, config)
    }

    fn build(
        dataset: CanonicalDataset,
        report: IngestReport,
        renderer: R,
        config: PipelineConfig,
    ) -> ChartResult<Self> {
        let overlay_collides = dataset
            .query(
                ObservationFilter::new()
                    .role(Role::Production)
                    .category(&config.overlay_label),
            )
            .next()
            .is_some();
        if overlay_collides {
            return Err(ChartError::InvalidData(format!(
                "overlay label '{}' is also a production category",
                config.overlay_label
            )));
        }

        let colors = ColorAssignment::from_dataset(&dataset, &config.style.palette);
        let countries = dataset.countries();
        for allowed in &config.ingest.allowed_countries {
            if !countries.contains(allowed) {
                debug!(country = %allowed, "allowed country has no observations");
            }
        }
        if countries.is_empty() {
            warn!("dataset has no observations for any allowed country");
        }

        let tooltip = TooltipEngine::new(config.tooltip_config());
        let mut controller = Self {
            renderer,
            config,
            dataset,
            report,
            colors,
            countries,
            defaults: DefaultSelection::default(),
            selection: None,
            chart: None,
            tooltip,
        };

        match controller.countries.first().cloned() {
            Some(first) => controller.select_country(&first)?,
            None => controller.render()?,
        }
        Ok(controller)
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &CanonicalDataset {
        &self.dataset
    }

    #[must_use]
    pub fn ingest_report(&self) -> IngestReport {
        self.report
    }

    #[must_use]
    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    /// Sorted countries present in the dataset.
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SeriesSelection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn default_selection(&self) -> &DefaultSelection {
        &self.defaults
    }

    /// Checklist rows in descending-peak order.
    #[must_use]
    pub fn checklist(&self) -> Vec<ChecklistEntry> {
        self.defaults
            .checklist
            .iter()
            .map(|ranked| ChecklistEntry {
                name: ranked.name.clone(),
                peak: ranked.peak,
                checked: self
                    .selection
                    .as_ref()
                    .is_some_and(|s| s.is_visible(&ranked.name)),
            })
            .collect()
    }

    #[must_use]
    pub fn chart_title(&self) -> String {
        match &self.selection {
            Some(selection) => format!("{} - {}", self.config.title_prefix, selection.country()),
            None => self.config.title_prefix.clone(),
        }
    }

    /// Whether the current country has consumption data to overlay.
    #[must_use]
    pub fn overlay_available(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| {
            self.dataset.has_role(s.country(), Role::Consumption)
        })
    }

    /// Switches country; categories reset to the freshly ranked default.
    pub fn select_country(&mut self, country: &str) -> ChartResult<()> {
        if !self.dataset.contains_country(country) {
            return Err(ChartError::UnknownCountry(country.to_owned()));
        }
        self.defaults = compute_default_selection(
            &self.dataset,
            country,
            &self.config.excluded_categories,
            self.config.top_n_default,
        );
        let show_overlay = self.selection.as_ref().is_some_and(SeriesSelection::show_overlay);
        self.selection = Some(SeriesSelection::for_country(
            country,
            &self.defaults,
            show_overlay,
        ));
        debug!(country, checked = ?self.defaults.checked, "country selected");
        self.render()
    }

    /// Flips one checklist category and returns its new state.
    pub fn toggle_category(&mut self, category: &str) -> ChartResult<bool> {
        let visible = {
            let selection = self.checklist_selection(category)?;
            selection.toggle_category(category)
        };
        self.render()?;
        Ok(visible)
    }

    pub fn set_category_visible(&mut self, category: &str, visible: bool) -> ChartResult<()> {
        self.checklist_selection(category)?
            .set_category_visible(category, visible);
        self.render()
    }

    /// Applies the configured select-all policy to the checklist.
    pub fn toggle_select_all(&mut self) -> ChartResult<()> {
        let keys = self.defaults.keys();
        let policy = self.config.select_all_policy;
        if let Some(selection) = self.selection.as_mut() {
            selection.apply_select_all(&keys, policy);
        }
        self.render()
    }

    pub fn set_overlay(&mut self, show: bool) -> ChartResult<()> {
        if let Some(selection) = self.selection.as_mut() {
            selection.set_overlay(show);
        }
        self.render()
    }

    /// Rebuilds the frame from the current selection and redraws everything.
    ///
    /// Tooltip state never survives a rebuild.
    pub fn render(&mut self) -> ChartResult<()> {
        self.tooltip.reset();
        let options = self.config.frame_options();
        let frame = match &self.selection {
            Some(selection) => {
                ChartFrame::build(&self.dataset, selection, &self.defaults.keys(), &options)
            }
            None => ChartFrame::empty(&options),
        };
        let rendered = SeriesRenderer {
            layout: &self.config.layout,
            style: &self.config.style,
            colors: &self.colors,
            value_format: &self.config.value_format,
        }
        .render(&frame)?;

        self.chart = None;
        self.renderer.render(&rendered.frame)?;
        self.chart = Some((frame, rendered));
        Ok(())
    }

    #[must_use]
    pub fn frame(&self) -> Option<&ChartFrame> {
        self.chart.as_ref().map(|(frame, _)| frame)
    }

    #[must_use]
    pub fn render_frame(&self) -> Option<&RenderFrame> {
        self.chart.as_ref().map(|(_, rendered)| &rendered.frame)
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&ChartGeometry> {
        self.chart.as_ref().map(|(_, rendered)| &rendered.geometry)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> &TooltipState {
        match self.chart.as_ref() {
            Some((_, rendered)) => self.tooltip.pointer_move(&rendered.geometry, x, y),
            None => {
                self.tooltip.pointer_leave();
                self.tooltip.state()
            }
        }
    }

    pub fn pointer_move_over_series(&mut self, key: &str, x: f64, y: f64) -> &TooltipState {
        match self.chart.as_ref() {
            Some((_, rendered)) => {
                self.tooltip
                    .pointer_move_over_series(&rendered.geometry, key, x, y)
            }
            None => {
                self.tooltip.pointer_leave();
                self.tooltip.state()
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip.pointer_leave();
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.tooltip.state()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn checklist_selection(&mut self, category: &str) -> ChartResult<&mut SeriesSelection> {
        if self.defaults.peak_of(category).is_none() {
            return Err(ChartError::InvalidData(format!(
                "category `{category}` is not in the checklist"
            )));
        }
        self.selection
            .as_mut()
            .ok_or_else(|| ChartError::InvalidData("no country selected".to_owned()))
    }
}
