use power_mix_chart::core::{ObservationFilter, Role, TemporalPoint};
use power_mix_chart::ingest::{IngestConfig, SourceSchema, ingest, normalize_category_name};

const PREFIX: &str = "Electricity from ";
const UNIT: &str = "- TWh";

fn ingest_wide(text: &str) -> power_mix_chart::ingest::Ingested {
    ingest(text, SourceSchema::Wide, &IngestConfig::default()).expect("wide ingest")
}

#[test]
fn headers_normalize_to_title_cased_categories() {
    assert_eq!(
        normalize_category_name("Electricity from solar - TWh (various sources)", PREFIX, UNIT),
        "Solar"
    );
    assert_eq!(
        normalize_category_name("electricity from WIND - TWh", PREFIX, UNIT),
        "Wind"
    );
    assert_eq!(
        normalize_category_name(
            "Electricity from other renewables excluding bioenergy - TWh",
            PREFIX,
            UNIT
        ),
        "Other Renewables Excluding Bioenergy"
    );
    assert_eq!(
        normalize_category_name("Other renewables (including geothermal) - TWh", PREFIX, UNIT),
        "Other Renewables"
    );
    assert_eq!(normalize_category_name("  - TWh", PREFIX, UNIT), "");
}

#[test]
fn one_observation_per_entity_year_category() {
    let text = "\
Entity,Code,Year,Electricity from solar - TWh,Electricity from nuclear - TWh
France,FRA,2020,12.5,335.4
France,FRA,2021,14.25,360.7
Germany,DEU,2021,49.0,65.4
";
    let ingested = ingest_wide(text);

    assert_eq!(ingested.report.rows_read, 3);
    assert_eq!(ingested.dataset.len(), 6);
    assert_eq!(ingested.dataset.categories(), vec!["Nuclear", "Solar"]);
    assert_eq!(ingested.dataset.countries(), vec!["France", "Germany"]);
    assert!(
        ingested
            .dataset
            .observations()
            .iter()
            .all(|o| o.role == Role::Production)
    );

    let solar: Vec<_> = ingested
        .dataset
        .query(ObservationFilter::new().country("France").category("Solar"))
        .map(|o| (o.date, o.value))
        .collect();
    assert_eq!(
        solar,
        vec![
            (TemporalPoint::year(2020).expect("year"), 12.5),
            (TemporalPoint::year(2021).expect("year"), 14.25),
        ]
    );
}

#[test]
fn duplicate_normalized_columns_keep_the_first() {
    let text = "\
Entity,Code,Year,Electricity from wind - TWh,Wind - TWh (offshore)
Spain,ESP,2021,10,99
Spain,ESP,2022,11,98
";
    let ingested = ingest_wide(text);

    let wind: Vec<f64> = ingested
        .dataset
        .query(ObservationFilter::new().category("Wind"))
        .map(|o| o.value)
        .collect();
    assert_eq!(wind, vec![10.0, 11.0]);
    assert_eq!(ingested.dataset.categories(), vec!["Wind"]);
    assert_eq!(ingested.report.duplicate_category, 2);
}

#[test]
fn non_numeric_cells_become_zero_and_non_finite_cells_are_dropped() {
    let text = "\
Entity,Code,Year,Electricity from solar - TWh,Electricity from hydro - TWh,Electricity from coal - TWh
Italy,ITA,2021,,n/a,NaN
";
    let ingested = ingest_wide(text);

    let values: Vec<(&str, f64)> = ingested
        .dataset
        .observations()
        .iter()
        .map(|o| (o.category.as_str(), o.value))
        .collect();
    assert_eq!(values, vec![("Solar", 0.0), ("Hydro", 0.0)]);
    assert_eq!(ingested.report.invalid_value, 1);
}

#[test]
fn rows_with_bad_year_or_foreign_entity_are_dropped() {
    let text = "\
Entity,Code,Year,Electricity from solar - TWh
World,OWID_WRL,2021,1000
Poland,POL,20x1,3
Poland,POL,2021,4
";
    let ingested = ingest_wide(text);

    assert_eq!(ingested.dataset.len(), 1);
    assert_eq!(ingested.report.country_not_allowed, 1);
    assert_eq!(ingested.report.invalid_date, 1);
    assert_eq!(ingested.dataset.observations()[0].value, 4.0);
}

#[test]
fn allow_list_is_configurable() {
    let text = "\
Entity,Code,Year,Electricity from solar - TWh
World,OWID_WRL,2021,1000
";
    let config = IngestConfig::default().with_allowed_countries(["World"]);
    let ingested = ingest(text, SourceSchema::Wide, &config).expect("ingest");

    assert_eq!(ingested.dataset.countries(), vec!["World"]);
}

#[test]
fn table_without_identifier_columns_yields_empty_dataset() {
    let text = "\
Country,Electricity from solar - TWh
France,12
";
    let ingested = ingest_wide(text);

    assert!(ingested.dataset.is_empty());
    assert_eq!(ingested.report.observations, 0);
}
