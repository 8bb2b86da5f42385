//! Default-view ranking and user-driven selection changes.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CanonicalDataset, ObservationFilter, Role};

/// Rule applied by the "select all" control.
///
/// Both rules resolve to the same outcome for any selection; they differ in
/// which predicate is evaluated, and a configuration names exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectAllPolicy {
    /// Every key selected: clear all. Otherwise select all.
    ClearIfAllSelected,
    /// Any key unselected: select all. Otherwise clear all.
    SelectIfAnyUnselected,
}

/// Category with the peak of its production series for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCategory {
    pub name: String,
    pub peak: f64,
}

/// Checklist order plus the categories checked by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultSelection {
    /// All rankable categories by descending peak, ties in first-seen order.
    pub checklist: Vec<RankedCategory>,
    /// The first `top_n` entries of `checklist`.
    pub checked: Vec<String>,
}

impl DefaultSelection {
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.checklist.iter().map(|c| c.name.clone()).collect()
    }

    #[must_use]
    pub fn peak_of(&self, category: &str) -> Option<f64> {
        self.checklist
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.peak)
    }
}

/// Ranks a country's production categories and picks the default view.
///
/// Excluded (aggregate) categories never rank. Zero-valued samples do not
/// count toward a peak, so a category whose samples are all zero is not
/// listed.
#[must_use]
pub fn compute_default_selection(
    dataset: &CanonicalDataset,
    country: &str,
    excluded_categories: &[String],
    top_n: usize,
) -> DefaultSelection {
    let mut peaks: IndexMap<&str, f64> = IndexMap::new();
    let filter = ObservationFilter::new()
        .country(country)
        .role(Role::Production);
    for observation in dataset.query(filter) {
        if observation.value == 0.0
            || excluded_categories
                .iter()
                .any(|excluded| *excluded == observation.category)
        {
            continue;
        }
        peaks
            .entry(observation.category.as_str())
            .and_modify(|peak| *peak = peak.max(observation.value))
            .or_insert(observation.value);
    }

    let mut checklist: Vec<RankedCategory> = peaks
        .into_iter()
        .map(|(name, peak)| RankedCategory {
            name: name.to_owned(),
            peak,
        })
        .collect();
    // `sort_by_key` is stable: equal peaks keep first-seen order.
    checklist.sort_by_key(|c| Reverse(OrderedFloat(c.peak)));
    let checked = checklist
        .iter()
        .take(top_n)
        .map(|c| c.name.clone())
        .collect();

    debug!(
        country,
        ranked = checklist.len(),
        top_n,
        "computed default selection"
    );
    DefaultSelection { checklist, checked }
}

/// Applies the select-all control to `current` over `all_keys`.
#[must_use]
pub fn toggle_select_all(
    current: &BTreeSet<String>,
    all_keys: &[String],
    policy: SelectAllPolicy,
) -> BTreeSet<String> {
    let select_all = match policy {
        SelectAllPolicy::ClearIfAllSelected => !all_keys.iter().all(|k| current.contains(k)),
        SelectAllPolicy::SelectIfAnyUnselected => all_keys.iter().any(|k| !current.contains(k)),
    };
    if select_all {
        all_keys.iter().cloned().collect()
    } else {
        BTreeSet::new()
    }
}

/// Which series the user currently wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSelection {
    country: String,
    visible_categories: BTreeSet<String>,
    show_overlay: bool,
}

impl SeriesSelection {
    /// Fresh selection for `country` seeded from its default view.
    #[must_use]
    pub fn for_country(
        country: impl Into<String>,
        defaults: &DefaultSelection,
        show_overlay: bool,
    ) -> Self {
        Self {
            country: country.into(),
            visible_categories: defaults.checked.iter().cloned().collect(),
            show_overlay,
        }
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn visible_categories(&self) -> &BTreeSet<String> {
        &self.visible_categories
    }

    #[must_use]
    pub fn is_visible(&self, category: &str) -> bool {
        self.visible_categories.contains(category)
    }

    #[must_use]
    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    pub fn set_overlay(&mut self, show: bool) {
        self.show_overlay = show;
    }

    pub fn set_category_visible(&mut self, category: &str, visible: bool) {
        if visible {
            self.visible_categories.insert(category.to_owned());
        } else {
            self.visible_categories.remove(category);
        }
    }

    /// Flips one checkbox and returns its new state.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        let visible = !self.is_visible(category);
        self.set_category_visible(category, visible);
        visible
    }

    pub fn apply_select_all(&mut self, all_keys: &[String], policy: SelectAllPolicy) {
        self.visible_categories = toggle_select_all(&self.visible_categories, all_keys, policy);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_categories.is_empty() && !self.show_overlay
    }
}
