use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::TemporalPoint;

/// Balance role of an observation.
///
/// Wide-schema sources carry no role column; all their observations are
/// production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Production,
    Consumption,
}

/// Schema-independent `(country, date, category, value)` tuple.
///
/// Only the ingestion layer constructs these, after the date parsed and the
/// value proved finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalObservation {
    pub country: String,
    pub date: TemporalPoint,
    pub category: String,
    pub role: Role,
    pub value: f64,
}

/// Conjunction of optional predicates over observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservationFilter<'a> {
    pub country: Option<&'a str>,
    pub category: Option<&'a str>,
    pub role: Option<Role>,
}

impl<'a> ObservationFilter<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn country(mut self, country: &'a str) -> Self {
        self.country = Some(country);
        self
    }

    #[must_use]
    pub fn category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn matches(&self, observation: &CanonicalObservation) -> bool {
        self.country.is_none_or(|c| observation.country == c)
            && self.category.is_none_or(|c| observation.category == c)
            && self.role.is_none_or(|r| observation.role == r)
    }
}

/// Ordered, load-once collection of observations.
///
/// There is no mutating API: the dataset is built by ingestion and then only
/// queried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDataset {
    observations: Vec<CanonicalObservation>,
}

impl CanonicalDataset {
    #[must_use]
    pub fn new(observations: Vec<CanonicalObservation>) -> Self {
        Self { observations }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn observations(&self) -> &[CanonicalObservation] {
        &self.observations
    }

    /// Observations matching `filter`, in ingestion order.
    pub fn query<'s>(
        &'s self,
        filter: ObservationFilter<'s>,
    ) -> impl Iterator<Item = &'s CanonicalObservation> + 's {
        self.observations.iter().filter(move |o| filter.matches(o))
    }

    /// Sorted, de-duplicated list of countries.
    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Sorted, de-duplicated list of categories across the whole dataset.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[must_use]
    pub fn contains_country(&self, country: &str) -> bool {
        self.observations.iter().any(|o| o.country == country)
    }

    #[must_use]
    pub fn has_role(&self, country: &str, role: Role) -> bool {
        self.query(ObservationFilter::new().country(country).role(role))
            .next()
            .is_some()
    }
}
