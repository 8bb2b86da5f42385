use std::collections::BTreeSet;

use power_mix_chart::core::{CanonicalDataset, CanonicalObservation, Role, TemporalPoint};
use power_mix_chart::selection::{
    SelectAllPolicy, SeriesSelection, compute_default_selection, toggle_select_all,
};

fn obs(country: &str, month: u32, category: &str, role: Role, value: f64) -> CanonicalObservation {
    CanonicalObservation {
        country: country.to_owned(),
        date: TemporalPoint::month(2021, month).expect("month"),
        category: category.to_owned(),
        role,
        value,
    }
}

fn excluded() -> Vec<String> {
    vec!["Electricity".to_owned(), "Total Combustible Fuels".to_owned()]
}

fn france_dataset() -> CanonicalDataset {
    CanonicalDataset::new(vec![
        obs("France", 1, "Electricity", Role::Production, 50_000.0),
        obs("France", 1, "Nuclear", Role::Production, 30_000.0),
        obs("France", 2, "Nuclear", Role::Production, 32_000.0),
        obs("France", 1, "Hydro", Role::Production, 6_000.0),
        obs("France", 2, "Hydro", Role::Production, 7_500.0),
        obs("France", 1, "Wind", Role::Production, 4_000.0),
        obs("France", 1, "Solar", Role::Production, 1_000.0),
        obs("France", 1, "Oil", Role::Production, 0.0),
        obs("France", 1, "Electricity", Role::Consumption, 41_000.0),
        obs("Germany", 1, "Coal", Role::Production, 90_000.0),
    ])
}

#[test]
fn default_selection_takes_top_n_by_peak_without_aggregates() {
    let defaults = compute_default_selection(&france_dataset(), "France", &excluded(), 2);

    assert_eq!(defaults.checked, vec!["Nuclear", "Hydro"]);
    assert_eq!(defaults.keys(), vec!["Nuclear", "Hydro", "Wind", "Solar"]);
    assert_eq!(defaults.peak_of("Nuclear"), Some(32_000.0));
    assert_eq!(defaults.peak_of("Hydro"), Some(7_500.0));
    assert_eq!(defaults.peak_of("Electricity"), None);
    assert_eq!(defaults.peak_of("Coal"), None);
}

#[test]
fn all_zero_category_is_not_ranked() {
    let defaults = compute_default_selection(&france_dataset(), "France", &excluded(), 10);

    assert_eq!(defaults.peak_of("Oil"), None);
    assert_eq!(defaults.checked.len(), 4);
}

#[test]
fn top_n_larger_than_checklist_checks_everything() {
    let defaults = compute_default_selection(&france_dataset(), "France", &excluded(), 50);
    assert_eq!(defaults.checked, defaults.keys());
}

#[test]
fn equal_peaks_keep_first_seen_order() {
    let dataset = CanonicalDataset::new(vec![
        obs("Spain", 1, "Wind", Role::Production, 10.0),
        obs("Spain", 1, "Solar", Role::Production, 10.0),
        obs("Spain", 1, "Hydro", Role::Production, 10.0),
    ]);
    let defaults = compute_default_selection(&dataset, "Spain", &[], 2);

    assert_eq!(defaults.keys(), vec!["Wind", "Solar", "Hydro"]);
    assert_eq!(defaults.checked, vec!["Wind", "Solar"]);
}

#[test]
fn unknown_country_yields_empty_default() {
    let defaults = compute_default_selection(&france_dataset(), "Norway", &excluded(), 2);

    assert!(defaults.checklist.is_empty());
    assert!(defaults.checked.is_empty());
}

#[test]
fn select_all_selects_everything_from_partial_selection() {
    let keys = vec!["A".to_owned(), "B".to_owned(), "C".to_owned()];
    let partial: BTreeSet<String> = ["A".to_owned()].into_iter().collect();

    for policy in [
        SelectAllPolicy::ClearIfAllSelected,
        SelectAllPolicy::SelectIfAnyUnselected,
    ] {
        let toggled = toggle_select_all(&partial, &keys, policy);
        assert_eq!(toggled.len(), 3, "{policy:?}");
    }
}

#[test]
fn select_all_twice_restores_full_and_empty_selections() {
    let keys = vec!["A".to_owned(), "B".to_owned()];
    let full: BTreeSet<String> = keys.iter().cloned().collect();
    let empty = BTreeSet::new();

    for policy in [
        SelectAllPolicy::ClearIfAllSelected,
        SelectAllPolicy::SelectIfAnyUnselected,
    ] {
        let cleared = toggle_select_all(&full, &keys, policy);
        assert!(cleared.is_empty());
        assert_eq!(toggle_select_all(&cleared, &keys, policy), full);

        let filled = toggle_select_all(&empty, &keys, policy);
        assert_eq!(filled, full);
        assert_eq!(toggle_select_all(&filled, &keys, policy), empty);
    }
}

#[test]
fn series_selection_tracks_checkbox_changes() {
    let defaults = compute_default_selection(&france_dataset(), "France", &excluded(), 2);
    let mut selection = SeriesSelection::for_country("France", &defaults, false);

    assert_eq!(selection.country(), "France");
    assert!(selection.is_visible("Nuclear"));
    assert!(!selection.is_visible("Wind"));

    assert!(selection.toggle_category("Wind"));
    assert!(selection.is_visible("Wind"));
    assert!(!selection.toggle_category("Nuclear"));
    assert!(!selection.is_visible("Nuclear"));

    selection.set_category_visible("Hydro", false);
    selection.set_category_visible("Wind", false);
    assert!(selection.is_empty());

    selection.set_overlay(true);
    assert!(!selection.is_empty());
    assert!(selection.show_overlay());

    selection.apply_select_all(&defaults.keys(), SelectAllPolicy::ClearIfAllSelected);
    assert_eq!(selection.visible_categories().len(), 4);
}
