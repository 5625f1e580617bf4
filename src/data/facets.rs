use std::collections::{BTreeMap, BTreeSet};

use super::model::{FacetCategory, Resource};

// ---------------------------------------------------------------------------
// FacetIndex – distinct filterable values
// ---------------------------------------------------------------------------

/// Sorted, de-duplicated values for every filter dimension.
///
/// Derived from the dataset and never mutated afterwards; rebuild it when a
/// new dataset is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    /// Atomized conditions (`;`-split, trimmed).
    pub conditions: Vec<String>,
    pub regions: Vec<String>,
    pub costs: Vec<String>,
    pub modalities: Vec<String>,
}

impl FacetIndex {
    /// Collect the distinct facet values of `resources`.
    ///
    /// Blank fields are skipped rather than offered as an empty option.
    pub fn build(resources: &[Resource]) -> Self {
        let mut conditions = BTreeSet::new();
        let mut per_category: BTreeMap<FacetCategory, BTreeSet<String>> = BTreeMap::new();

        for resource in resources {
            for condition in resource.condition_list() {
                conditions.insert(condition.to_string());
            }
            for category in FacetCategory::ALL {
                let value = resource.facet_value(category);
                if !value.trim().is_empty() {
                    per_category
                        .entry(category)
                        .or_default()
                        .insert(value.to_string());
                }
            }
        }

        let mut take = |category: FacetCategory| -> Vec<String> {
            per_category
                .remove(&category)
                .map(|set| set.into_iter().collect())
                .unwrap_or_default()
        };

        FacetIndex {
            conditions: conditions.into_iter().collect(),
            regions: take(FacetCategory::Region),
            costs: take(FacetCategory::Cost),
            modalities: take(FacetCategory::Modality),
        }
    }

    /// Values offered for an exact-match category.
    pub fn values(&self, category: FacetCategory) -> &[String] {
        match category {
            FacetCategory::Region => &self.regions,
            FacetCategory::Cost => &self.costs,
            FacetCategory::Modality => &self.modalities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
            && self.regions.is_empty()
            && self.costs.is_empty()
            && self.modalities.is_empty()
    }
}

/// How many resources carry each value of `category`.
pub fn counts(resources: &[Resource], category: FacetCategory) -> BTreeMap<&str, usize> {
    let mut out = BTreeMap::new();
    for resource in resources {
        let value = resource.facet_value(category);
        if !value.trim().is_empty() {
            *out.entry(value).or_insert(0) += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Resource> {
        vec![
            Resource::new("Alpha Clinic", "Diabetes; Cancer", "North", "Free")
                .with_modality("Virtual"),
            Resource::new("Beta Center", "Cancer", "South", "Paid").with_modality("Both"),
            Resource::new("Gamma House", "", "", "").with_modality("Virtual"),
            Resource::new("Delta Group", "ALS;;  ", "North", "  "),
        ]
    }

    fn is_sorted_unique(values: &[String]) -> bool {
        values.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn builds_sorted_distinct_values() {
        let idx = FacetIndex::build(&sample());
        assert_eq!(idx.conditions, vec!["ALS", "Cancer", "Diabetes"]);
        assert_eq!(idx.regions, vec!["North", "South"]);
        assert_eq!(idx.costs, vec!["Free", "Paid"]);
        assert_eq!(idx.modalities, vec!["Both", "Virtual"]);
    }

    #[test]
    fn no_duplicates_or_blank_entries() {
        let idx = FacetIndex::build(&sample());
        for values in [&idx.conditions, &idx.regions, &idx.costs, &idx.modalities] {
            assert!(is_sorted_unique(values));
            assert!(values.iter().all(|v| !v.trim().is_empty()));
        }
    }

    #[test]
    fn tolerates_resources_without_optional_fields() {
        let idx = FacetIndex::build(&[Resource::default(), Resource::default()]);
        assert!(idx.is_empty());
    }

    #[test]
    fn values_maps_category_to_list() {
        let idx = FacetIndex::build(&sample());
        assert_eq!(idx.values(FacetCategory::Cost), idx.costs.as_slice());
    }

    #[test]
    fn counts_per_value() {
        let data = sample();
        let regions = counts(&data, FacetCategory::Region);
        assert_eq!(regions.get("North"), Some(&2));
        assert_eq!(regions.get("South"), Some(&1));
        assert_eq!(regions.len(), 2);
    }
}
