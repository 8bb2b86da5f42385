//! Source-table ingestion.
//!
//! Both table layouts reduce to a `CanonicalDataset`. Row-level problems
//! (unparseable date, non-numeric required value, filtered country/role) drop
//! the row and are only counted in `IngestReport`; the missing long-schema
//! header is the one fatal error.

pub mod defaults;
mod long;
mod source;
mod wide;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CanonicalDataset, DateGranularity};
use crate::error::ChartResult;

pub use source::{DataSource, FileSource, TextSource};
#[cfg(feature = "http-source")]
pub use source::HttpSource;
pub use wide::normalize_category_name;

/// Layout of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSchema {
    /// One observation per row, preceded by an optional metadata block.
    Long,
    /// One row per entity-year, one column per category.
    Wide,
}

impl SourceSchema {
    #[must_use]
    pub fn granularity(self) -> DateGranularity {
        match self {
            Self::Long => DateGranularity::Month,
            Self::Wide => DateGranularity::Year,
        }
    }
}

/// Column names and labels of the long layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongSchemaConfig {
    pub entity_column: String,
    pub role_column: String,
    pub time_column: String,
    pub category_column: String,
    pub value_column: String,
    pub production_label: String,
    pub consumption_label: String,
    /// `chrono` pattern for the time column, without a day field.
    pub date_pattern: String,
}

impl Default for LongSchemaConfig {
    fn default() -> Self {
        Self {
            entity_column: defaults::LONG_ENTITY_COLUMN.to_owned(),
            role_column: defaults::LONG_ROLE_COLUMN.to_owned(),
            time_column: defaults::LONG_TIME_COLUMN.to_owned(),
            category_column: defaults::LONG_CATEGORY_COLUMN.to_owned(),
            value_column: defaults::LONG_VALUE_COLUMN.to_owned(),
            production_label: defaults::PRODUCTION_LABEL.to_owned(),
            consumption_label: defaults::CONSUMPTION_LABEL.to_owned(),
            date_pattern: defaults::LONG_DATE_PATTERN.to_owned(),
        }
    }
}

/// Column names and header normalization rules of the wide layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WideSchemaConfig {
    pub entity_column: String,
    pub year_column: String,
    /// Columns that never carry a category (entity, code, year).
    pub identifier_columns: Vec<String>,
    pub category_prefix: String,
    pub unit_suffix: String,
}

impl Default for WideSchemaConfig {
    fn default() -> Self {
        Self {
            entity_column: defaults::WIDE_ENTITY_COLUMN.to_owned(),
            year_column: defaults::WIDE_YEAR_COLUMN.to_owned(),
            identifier_columns: defaults::owned(&[
                defaults::WIDE_ENTITY_COLUMN,
                defaults::WIDE_CODE_COLUMN,
                defaults::WIDE_YEAR_COLUMN,
            ]),
            category_prefix: defaults::WIDE_CATEGORY_PREFIX.to_owned(),
            unit_suffix: defaults::WIDE_UNIT_SUFFIX.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_allowed_countries")]
    pub allowed_countries: Vec<String>,
    #[serde(default)]
    pub long: LongSchemaConfig,
    #[serde(default)]
    pub wide: WideSchemaConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            allowed_countries: default_allowed_countries(),
            long: LongSchemaConfig::default(),
            wide: WideSchemaConfig::default(),
        }
    }
}

impl IngestConfig {
    #[must_use]
    pub fn with_allowed_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn allows(&self, country: &str) -> bool {
        self.allowed_countries.iter().any(|c| c == country)
    }
}

fn default_allowed_countries() -> Vec<String> {
    defaults::owned(&defaults::EUROPEAN_COUNTRIES)
}

/// Why a row (or a wide-schema cell) was left out of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    CountryNotAllowed,
    UntrackedRole,
    InvalidDate,
    InvalidValue,
    MissingField,
    DuplicateCategory,
}

/// Counters describing one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub rows_read: usize,
    pub observations: usize,
    pub country_not_allowed: usize,
    pub untracked_role: usize,
    pub invalid_date: usize,
    pub invalid_value: usize,
    pub missing_field: usize,
    pub duplicate_category: usize,
}

impl IngestReport {
    pub(crate) fn record_drop(&mut self, reason: DropReason) {
        let counter = match reason {
            DropReason::CountryNotAllowed => &mut self.country_not_allowed,
            DropReason::UntrackedRole => &mut self.untracked_role,
            DropReason::InvalidDate => &mut self.invalid_date,
            DropReason::InvalidValue => &mut self.invalid_value,
            DropReason::MissingField => &mut self.missing_field,
            DropReason::DuplicateCategory => &mut self.duplicate_category,
        };
        *counter += 1;
    }

    /// Rows or cells excluded because a field failed to parse.
    #[must_use]
    pub fn malformed(&self) -> usize {
        self.invalid_date + self.invalid_value + self.missing_field
    }
}

/// Dataset plus the report of how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub dataset: CanonicalDataset,
    pub report: IngestReport,
}

/// Parses raw table text into a canonical dataset.
pub fn ingest(text: &str, schema: SourceSchema, config: &IngestConfig) -> ChartResult<Ingested> {
    let mut report = IngestReport::default();
    let observations = match schema {
        SourceSchema::Long => long::parse_long(text, &config.long, config, &mut report)?,
        SourceSchema::Wide => wide::parse_wide(text, &config.wide, config, &mut report)?,
    };
    report.observations = observations.len();
    debug!(
        ?schema,
        rows_read = report.rows_read,
        observations = report.observations,
        malformed = report.malformed(),
        "ingested source table"
    );

    Ok(Ingested {
        dataset: CanonicalDataset::new(observations),
        report,
    })
}
