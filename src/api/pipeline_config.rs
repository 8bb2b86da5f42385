use serde::{Deserialize, Serialize};

use crate::core::{DateGranularity, ValueFormat};
use crate::error::{ChartError, ChartResult};
use crate::ingest::{IngestConfig, SourceSchema, defaults};
use crate::interaction::{TooltipClampRule, TooltipConfig};
use crate::selection::SelectAllPolicy;
use crate::series::{FrameOptions, LayoutConfig, StyleConfig, YPadding};

pub const PIPELINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Every policy knob of the pipeline in one place.
///
/// Serializable so hosts can keep chart setup in a JSON file. Missing fields
/// fall back to the monthly-balance preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub schema: SourceSchema,
    /// Chart title is `"<title_prefix> - <country>"`.
    pub title_prefix: String,
    pub top_n_default: usize,
    pub select_all_policy: SelectAllPolicy,
    pub tooltip_clamp_rule: TooltipClampRule,
    pub y_padding: YPadding,
    pub date_granularity: DateGranularity,
    pub value_format: ValueFormat,
    /// Aggregate categories kept out of the default ranking.
    pub excluded_categories: Vec<String>,
    pub overlay_label: String,
    pub ingest: IngestConfig,
    pub layout: LayoutConfig,
    pub style: StyleConfig,
    pub tooltip_offset_px: (f64, f64),
    pub hover_tolerance_px: f64,
    pub empty_domain_max: f64,
    pub nice_tick_count: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::monthly_balance()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: PipelineConfig,
}

impl PipelineConfig {
    /// Long-schema monthly net production/consumption balance in GWh.
    #[must_use]
    pub fn monthly_balance() -> Self {
        Self {
            schema: SourceSchema::Long,
            title_prefix: "Total Net Electricity Production".to_owned(),
            top_n_default: 2,
            select_all_policy: SelectAllPolicy::ClearIfAllSelected,
            tooltip_clamp_rule: TooltipClampRule::LowerBound,
            y_padding: YPadding::Nice,
            date_granularity: DateGranularity::Month,
            value_format: ValueFormat::gigawatt_hours(),
            excluded_categories: defaults::owned(&defaults::AGGREGATE_CATEGORIES),
            overlay_label: "Final Consumption".to_owned(),
            ingest: IngestConfig::default(),
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            tooltip_offset_px: (15.0, -35.0),
            hover_tolerance_px: 8.0,
            empty_domain_max: 100.0,
            nice_tick_count: 10,
        }
    }

    /// Wide-schema annual generation by source in TWh.
    ///
    /// The wide table spells entities and rollup columns differently from the
    /// monthly one, so both lists are replaced.
    #[must_use]
    pub fn annual_generation() -> Self {
        Self {
            schema: SourceSchema::Wide,
            title_prefix: "Electricity Generation".to_owned(),
            top_n_default: 3,
            date_granularity: DateGranularity::Year,
            value_format: ValueFormat::terawatt_hours(),
            excluded_categories: defaults::owned(&defaults::WIDE_AGGREGATE_CATEGORIES),
            ingest: IngestConfig::default()
                .with_allowed_countries(defaults::WIDE_EUROPEAN_COUNTRIES),
            ..Self::monthly_balance()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.date_granularity != self.schema.granularity() {
            return Err(ChartError::InvalidData(format!(
                "{:?} schema carries {:?} dates, not {:?}",
                self.schema,
                self.schema.granularity(),
                self.date_granularity
            )));
        }
        self.y_padding.validate()?;
        self.layout.validate()?;
        self.style.validate()?;
        if self.overlay_label.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "overlay label must not be empty".to_owned(),
            ));
        }
        if !self.tooltip_offset_px.0.is_finite() || !self.tooltip_offset_px.1.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip offset must be finite".to_owned(),
            ));
        }
        if !self.hover_tolerance_px.is_finite() || self.hover_tolerance_px < 0.0 {
            return Err(ChartError::InvalidData(
                "hover tolerance must be finite and >= 0".to_owned(),
            ));
        }
        if !self.empty_domain_max.is_finite() || self.empty_domain_max <= 0.0 {
            return Err(ChartError::InvalidData(
                "empty domain max must be finite and > 0".to_owned(),
            ));
        }
        if self.nice_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "nice tick count must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            y_padding: self.y_padding,
            nice_tick_count: self.nice_tick_count,
            empty_domain_max: self.empty_domain_max,
            overlay_label: self.overlay_label.clone(),
        }
    }

    #[must_use]
    pub fn tooltip_config(&self) -> TooltipConfig {
        TooltipConfig {
            clamp_rule: self.tooltip_clamp_rule,
            offset_px: self.tooltip_offset_px,
            hover_tolerance_px: self.hover_tolerance_px,
            value_format: self.value_format.clone(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = PipelineConfigJsonContractV1 {
            schema_version: PIPELINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize pipeline config v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse pipeline config json: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: PipelineConfigJsonContractV1 =
                serde_json::from_value(value).map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse pipeline config v1: {e}"))
                })?;
            if payload.schema_version != PIPELINE_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported pipeline config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse pipeline config json: {e}"))
            })?
        };
        config.validate()?;
        Ok(config)
    }
}
