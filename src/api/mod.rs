mod controller;
mod pipeline_config;

pub use controller::{ChartController, ChecklistEntry};
pub use pipeline_config::{
    PIPELINE_CONFIG_JSON_SCHEMA_V1, PipelineConfig, PipelineConfigJsonContractV1,
};
