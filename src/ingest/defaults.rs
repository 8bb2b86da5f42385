//! Static allow-lists and column names for the two supported tables.
//!
//! The pipeline never reads these directly: they seed `IngestConfig` and
//! `PipelineConfig` defaults and can be replaced there.

pub const EUROPEAN_COUNTRIES: [&str; 27] = [
    "Austria",
    "Belgium",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Netherlands",
    "Norway",
    "Poland",
    "Portugal",
    "Slovak Republic",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Republic of Turkiye",
    "United Kingdom",
];

/// Entity spellings of the same countries in the annual wide table.
pub const WIDE_EUROPEAN_COUNTRIES: [&str; 27] = [
    "Austria",
    "Belgium",
    "Czechia",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Netherlands",
    "Norway",
    "Poland",
    "Portugal",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Turkey",
    "United Kingdom",
];

/// Rollup categories that sum other categories.
pub const AGGREGATE_CATEGORIES: [&str; 4] = [
    "Electricity",
    "Total Combustible Fuels",
    "Total Renewables (Hydro, Geo, Solar, Wind, Other)",
    "Renewable Combustible Fuels",
];

/// Rollup columns of the wide table, as normalized category names.
pub const WIDE_AGGREGATE_CATEGORIES: [&str; 4] = [
    "Renewables",
    "Fossil Fuels",
    "Low-carbon Sources",
    "Other Renewables Including Bioenergy",
];

pub const LONG_ENTITY_COLUMN: &str = "Country";
pub const LONG_ROLE_COLUMN: &str = "Balance";
pub const LONG_TIME_COLUMN: &str = "Time";
pub const LONG_CATEGORY_COLUMN: &str = "Product";
pub const LONG_VALUE_COLUMN: &str = "Value";
pub const LONG_DATE_PATTERN: &str = "%B %Y";

pub const PRODUCTION_LABEL: &str = "Net Electricity Production";
pub const CONSUMPTION_LABEL: &str = "Final Consumption (Calculated)";

pub const WIDE_ENTITY_COLUMN: &str = "Entity";
pub const WIDE_CODE_COLUMN: &str = "Code";
pub const WIDE_YEAR_COLUMN: &str = "Year";
pub const WIDE_CATEGORY_PREFIX: &str = "Electricity from ";
pub const WIDE_UNIT_SUFFIX: &str = "- TWh";

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}
