use std::collections::HashSet;

use csv::StringRecord;
use tracing::{debug, trace, warn};

use crate::core::{CanonicalObservation, Role, TemporalPoint};
use crate::error::ChartResult;

use super::{DropReason, IngestConfig, IngestReport, WideSchemaConfig};

/// One header column that feeds a category.
#[derive(Debug)]
struct CategoryColumn {
    index: usize,
    category: String,
}

#[derive(Debug)]
struct WidePlan {
    entity: usize,
    year: usize,
    categories: Vec<CategoryColumn>,
    /// Header columns shadowed by an earlier column with the same category.
    shadowed: usize,
}

pub(super) fn parse_wide(
    text: &str,
    schema: &WideSchemaConfig,
    config: &IngestConfig,
    report: &mut IngestReport,
) -> ChartResult<Vec<CanonicalObservation>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let Some(plan) = plan_columns(&headers, schema) else {
        warn!(
            entity_column = %schema.entity_column,
            year_column = %schema.year_column,
            "wide table lacks identifier columns; no rows ingested"
        );
        return Ok(Vec::new());
    };
    debug!(
        categories = plan.categories.len(),
        shadowed = plan.shadowed,
        "resolved wide-table category columns"
    );

    let mut observations = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        report.rows_read += 1;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                trace!(row = idx + 1, error = %err, "dropping unreadable row");
                report.record_drop(DropReason::MissingField);
                continue;
            }
        };
        if let Err(reason) = parse_row(&record, &plan, config, report, &mut observations) {
            trace!(row = idx + 1, ?reason, "dropping row");
            report.record_drop(reason);
        }
    }

    Ok(observations)
}

fn plan_columns(headers: &StringRecord, schema: &WideSchemaConfig) -> Option<WidePlan> {
    let find = |name: &str| headers.iter().position(|h| h == name);
    let entity = find(&schema.entity_column)?;
    let year = find(&schema.year_column)?;

    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    let mut shadowed = 0;
    for (index, header) in headers.iter().enumerate() {
        if schema.identifier_columns.iter().any(|id| id == header) {
            continue;
        }
        let category =
            normalize_category_name(header, &schema.category_prefix, &schema.unit_suffix);
        if category.is_empty() {
            continue;
        }
        if !seen.insert(category.clone()) {
            trace!(column = header, %category, "later duplicate category column dropped");
            shadowed += 1;
            continue;
        }
        categories.push(CategoryColumn { index, category });
    }

    Some(WidePlan {
        entity,
        year,
        categories,
        shadowed,
    })
}

fn parse_row(
    record: &StringRecord,
    plan: &WidePlan,
    config: &IngestConfig,
    report: &mut IngestReport,
    out: &mut Vec<CanonicalObservation>,
) -> Result<(), DropReason> {
    let entity = record.get(plan.entity).ok_or(DropReason::MissingField)?;
    if !config.allows(entity) {
        return Err(DropReason::CountryNotAllowed);
    }
    let date = record
        .get(plan.year)
        .and_then(TemporalPoint::parse_year)
        .ok_or(DropReason::InvalidDate)?;

    for _ in 0..plan.shadowed {
        report.record_drop(DropReason::DuplicateCategory);
    }
    for column in &plan.categories {
        let Some(value) = parse_cell(record.get(column.index).unwrap_or_default()) else {
            trace!(entity, category = %column.category, "dropping non-finite cell");
            report.record_drop(DropReason::InvalidValue);
            continue;
        };
        out.push(CanonicalObservation {
            country: entity.to_owned(),
            date,
            category: column.category.clone(),
            role: Role::Production,
            value,
        });
    }
    Ok(())
}

/// Non-numeric text counts as zero; numbers must be finite.
fn parse_cell(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(_) => None,
        Err(_) => Some(0.0),
    }
}

/// Derives a category name from a wide-table column header.
///
/// Strips `prefix` (case-insensitive), cuts at the unit suffix and at the
/// first parenthetical, trims, then title-cases each word:
/// `"Electricity from solar - TWh (various sources)"` becomes `"Solar"`.
#[must_use]
pub fn normalize_category_name(header: &str, prefix: &str, unit_suffix: &str) -> String {
    let mut name = header.trim();
    if !prefix.is_empty()
        && name
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    {
        name = &name[prefix.len()..];
    }
    if !unit_suffix.is_empty() {
        if let Some(pos) = name.find(unit_suffix) {
            name = &name[..pos];
        }
    }
    if let Some(pos) = name.find('(') {
        name = &name[..pos];
    }
    title_case(name.trim())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
