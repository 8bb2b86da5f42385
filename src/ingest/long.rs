use csv::StringRecord;
use tracing::{debug, trace};

use crate::core::{CanonicalObservation, Role, TemporalPoint};
use crate::error::{ChartError, ChartResult};

use super::{DropReason, IngestConfig, IngestReport, LongSchemaConfig};

struct LongColumns {
    entity: usize,
    role: usize,
    time: usize,
    category: usize,
    value: usize,
}

pub(super) fn parse_long(
    text: &str,
    schema: &LongSchemaConfig,
    config: &IngestConfig,
    report: &mut IngestReport,
) -> ChartResult<Vec<CanonicalObservation>> {
    let offset = header_offset(text, schema).ok_or_else(|| header_not_found(schema))?;
    if offset > 0 {
        debug!(skipped_bytes = offset, "skipped metadata block before header");
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text[offset..].as_bytes());
    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers, schema).ok_or_else(|| header_not_found(schema))?;

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
        match parse_row(&record, &columns, schema, config) {
            Ok(observation) => observations.push(observation),
            Err(reason) => {
                trace!(row = idx + 1, ?reason, "dropping row");
                report.record_drop(reason);
            }
        }
    }

    Ok(observations)
}

/// Byte offset of the first line carrying both the entity and role column names.
fn header_offset(text: &str, schema: &LongSchemaConfig) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.contains(&schema.entity_column) && line.contains(&schema.role_column) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

fn header_not_found(schema: &LongSchemaConfig) -> ChartError {
    ChartError::HeaderNotFound {
        required: vec![
            schema.entity_column.clone(),
            schema.role_column.clone(),
            schema.time_column.clone(),
            schema.category_column.clone(),
            schema.value_column.clone(),
        ],
    }
}

fn resolve_columns(headers: &StringRecord, schema: &LongSchemaConfig) -> Option<LongColumns> {
    let find = |name: &str| headers.iter().position(|h| h == name);
    Some(LongColumns {
        entity: find(&schema.entity_column)?,
        role: find(&schema.role_column)?,
        time: find(&schema.time_column)?,
        category: find(&schema.category_column)?,
        value: find(&schema.value_column)?,
    })
}

fn parse_row(
    record: &StringRecord,
    columns: &LongColumns,
    schema: &LongSchemaConfig,
    config: &IngestConfig,
) -> Result<CanonicalObservation, DropReason> {
    let field = |idx: usize| record.get(idx).ok_or(DropReason::MissingField);

    let country = field(columns.entity)?;
    if !config.allows(country) {
        return Err(DropReason::CountryNotAllowed);
    }

    let role_label = field(columns.role)?;
    let role = if role_label == schema.production_label {
        Role::Production
    } else if role_label == schema.consumption_label {
        Role::Consumption
    } else {
        return Err(DropReason::UntrackedRole);
    };

    let date = TemporalPoint::parse_month_year(field(columns.time)?, &schema.date_pattern)
        .ok_or(DropReason::InvalidDate)?;
    let category = field(columns.category)?;
    let value = parse_value(field(columns.value)?).ok_or(DropReason::InvalidValue)?;

    Ok(CanonicalObservation {
        country: country.to_owned(),
        date,
        category: category.to_owned(),
        role,
        value,
    })
}

/// Empty means zero; anything else must parse to a finite number.
fn parse_value(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}
