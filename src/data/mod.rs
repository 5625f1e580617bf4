/// Data layer: core types, loading, facet indexing and filtering.
///
/// Architecture:
/// ```text
///  resources.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResourceDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ ResourceDataset │  Vec<Resource> + FacetIndex (facets)
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → filtered indices
///   └──────────┘
/// ```
pub mod facets;
pub mod filter;
pub mod loader;
pub mod model;
