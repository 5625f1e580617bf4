use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FacetCategory – the exact-match filter dimensions
// ---------------------------------------------------------------------------

/// A categorical filter dimension with one value per resource.
///
/// Conditions are a facet too, but they are multi-valued and matched by
/// substring, so they live in their own field of the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetCategory {
    Region,
    Cost,
    Modality,
}

impl FacetCategory {
    pub const ALL: [FacetCategory; 3] = [
        FacetCategory::Region,
        FacetCategory::Cost,
        FacetCategory::Modality,
    ];

    /// Heading used by the UI.
    pub fn label(self) -> &'static str {
        match self {
            FacetCategory::Region => "Health Region",
            FacetCategory::Cost => "Cost",
            FacetCategory::Modality => "Virtual/In-person",
        }
    }
}

impl fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Resource – one row of the dataset
// ---------------------------------------------------------------------------

/// One directory entry. Field names map onto the CSV header row.
///
/// Every field is plain text; a missing column or cell decodes to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(rename = "Name of Organization")]
    pub name: String,
    /// `;`-delimited condition tags, kept raw.
    #[serde(rename = "Condition(s)")]
    pub conditions: String,
    #[serde(rename = "Health Region")]
    pub region: String,
    #[serde(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "Virtual/In-person")]
    pub modality: String,
    /// `,`-delimited free-text keywords. Files with both a `Tag` and a `Tags`
    /// column get them merged by the loader.
    #[serde(rename = "Tag", alias = "Tags")]
    pub tags: String,

    #[serde(rename = "Services offered")]
    pub services: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Contact phone number")]
    pub phone: String,
    #[serde(rename = "Contact website")]
    pub website: String,
    #[serde(rename = "Contact email")]
    pub email: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Language restriction")]
    pub language: String,
    #[serde(rename = "Age restriction")]
    pub age_restriction: String,
    /// Embedded map markup.
    #[serde(rename = "map")]
    pub map: String,
    /// Image path, relative to the dataset file.
    #[serde(rename = "images")]
    pub image: String,
}

impl Resource {
    /// Convenience constructor for the filterable fields.
    pub fn new(
        name: impl Into<String>,
        conditions: impl Into<String>,
        region: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            conditions: conditions.into(),
            region: region.into(),
            cost: cost.into(),
            ..Default::default()
        }
    }

    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = modality.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// The single-valued field behind a facet category.
    pub fn facet_value(&self, category: FacetCategory) -> &str {
        match category {
            FacetCategory::Region => &self.region,
            FacetCategory::Cost => &self.cost,
            FacetCategory::Modality => &self.modality,
        }
    }

    /// Atomized conditions: split on `;`, trimmed, empties dropped.
    pub fn condition_list(&self) -> Vec<&str> {
        split_list(&self.conditions, ';')
    }

    /// Atomized tags: split on `,`, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        split_list(&self.tags, ',')
    }
}

fn split_list(raw: &str, sep: char) -> Vec<&str> {
    raw.split(sep)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// ResourceDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded resources with their facet index, built once per load.
#[derive(Debug, Clone, Default)]
pub struct ResourceDataset {
    pub resources: Vec<Resource>,
    pub facets: super::facets::FacetIndex,
}

impl ResourceDataset {
    pub fn from_resources(resources: Vec<Resource>) -> Self {
        let facets = super::facets::FacetIndex::build(&resources);
        Self { resources, facets }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_list_trims_and_skips_empty_pieces() {
        let r = Resource::new("A", " Diabetes ;Cancer;; ", "", "");
        assert_eq!(r.condition_list(), vec!["Diabetes", "Cancer"]);
    }

    #[test]
    fn tag_list_splits_on_commas() {
        let r = Resource::default().with_tags("support, peer group,");
        assert_eq!(r.tag_list(), vec!["support", "peer group"]);
    }

    #[test]
    fn facet_value_reads_matching_field() {
        let r = Resource::new("A", "", "North", "Free").with_modality("Virtual");
        assert_eq!(r.facet_value(FacetCategory::Region), "North");
        assert_eq!(r.facet_value(FacetCategory::Cost), "Free");
        assert_eq!(r.facet_value(FacetCategory::Modality), "Virtual");
    }

    #[test]
    fn dataset_builds_facets_on_construction() {
        let ds = ResourceDataset::from_resources(vec![Resource::new("A", "", "North", "")]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.facets.regions, vec!["North".to_string()]);
    }
}
