//! Headless front end: run the filter engine against a dataset and print
//! the matches.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::config::AppConfig;
use crate::data::facets::FacetIndex;
use crate::data::filter::{apply, by_letter, FilterState, SelectionMode, SelectionModes};
use crate::data::loader;
use crate::data::model::{FacetCategory, Resource};
use crate::nav::{find_by_name, Route};

#[derive(Parser, Debug)]
#[command(name = "care-directory-cli")]
#[command(about = "Search a health-support resource directory from the terminal", long_about = None)]
pub struct Cli {
    /// Dataset to read (CSV or JSON); falls back to the configured one
    pub dataset: Option<PathBuf>,

    /// Config file (defaults to <config dir>/care-directory/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Text query matched against names (and tags unless --names-only)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Condition, matched as a substring of the conditions column
    #[arg(short, long)]
    pub condition: Option<String>,

    /// Health region; repeat to accept several
    #[arg(short, long)]
    pub region: Vec<String>,

    /// Cost tier; repeat to accept several
    #[arg(long)]
    pub cost: Vec<String>,

    /// Virtual/In-person value; repeat to accept several
    #[arg(short, long)]
    pub modality: Vec<String>,

    /// Alphabetical index: names starting with this letter (other filters ignored)
    #[arg(short, long)]
    pub letter: Option<char>,

    /// Don't search the tags column
    #[arg(long)]
    pub names_only: bool,

    /// Print the facet index instead of resources
    #[arg(long)]
    pub facets: bool,

    /// Show one resource by exact name
    #[arg(long, conflicts_with = "location")]
    pub show: Option<String>,

    /// Resolve a location such as `resource?name=...` or `alphabet?letter=B`
    #[arg(long)]
    pub location: Option<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Filter state from the flags. Repeated facet flags are OR-combined, so
    /// every category is multi-select here.
    pub fn filter_state(&self, config: &AppConfig) -> FilterState {
        let search_tags = config.search_tags && !self.names_only;
        let mut state = FilterState::new(SelectionModes::uniform(SelectionMode::Multi), search_tags);
        if let Some(text) = &self.search {
            state.set_search_text(text.as_str());
        }
        state.set_condition(self.condition.clone());
        for (category, values) in [
            (FacetCategory::Region, &self.region),
            (FacetCategory::Cost, &self.cost),
            (FacetCategory::Modality, &self.modality),
        ] {
            for value in values {
                if !state.is_selected(category, value) {
                    state.toggle_facet(category, value);
                }
            }
        }
        state
    }

    /// Matches for the search view: text only, and nothing until a query is
    /// given.
    pub fn search_results<'a>(
        &self,
        resources: &'a [Resource],
        config: &AppConfig,
    ) -> Vec<&'a Resource> {
        let text = self.search.as_deref().unwrap_or_default();
        if text.trim().is_empty() {
            return Vec::new();
        }
        let search_tags = config.search_tags && !self.names_only;
        let mut state = FilterState::new(SelectionModes::default(), search_tags);
        state.set_search_text(text);
        apply(resources, &state)
    }
}

/// What a single invocation asks for, after flags and `--location` are
/// reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Facets,
    Detail(String),
    Letter(Option<char>),
    Search,
    Filter,
}

impl Query {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.facets {
            return Ok(Query::Facets);
        }
        if let Some(name) = &cli.show {
            return Ok(Query::Detail(name.clone()));
        }
        if let Some(location) = &cli.location {
            let route = Route::from_location(location)
                .with_context(|| format!("unknown location '{location}'"))?;
            return Ok(match route {
                Route::Detail { name } => Query::Detail(name),
                Route::Alphabet { letter } => Query::Letter(letter),
                Route::Search => Query::Search,
                Route::Browse | Route::List => Query::Filter,
            });
        }
        if let Some(letter) = cli.letter {
            return Ok(Query::Letter(Some(letter.to_ascii_uppercase())));
        }
        Ok(Query::Filter)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.config.as_deref())?;
    let path = cli
        .dataset
        .clone()
        .or_else(|| config.dataset.clone())
        .context("no dataset given and none configured")?;
    let dataset = loader::load_file(&path)?;

    let query = Query::from_cli(&cli)?;
    let out = match query {
        Query::Facets => render_facets(&dataset.facets, cli.json)?,
        Query::Detail(name) => render_detail(find_by_name(&dataset.resources, &name), cli.json)?,
        Query::Letter(letter) => render_list(&by_letter(&dataset.resources, letter), cli.json)?,
        Query::Search => {
            render_list(&cli.search_results(&dataset.resources, &config), cli.json)?
        }
        Query::Filter => {
            let state = cli.filter_state(&config);
            log::debug!("Filtering with {state:?}");
            render_list(&apply(&dataset.resources, &state), cli.json)?
        }
    };
    print!("{out}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FacetsJson<'a> {
    conditions: &'a [String],
    regions: &'a [String],
    costs: &'a [String],
    modalities: &'a [String],
}

pub fn render_facets(index: &FacetIndex, json: bool) -> Result<String> {
    if json {
        let doc = FacetsJson {
            conditions: &index.conditions,
            regions: &index.regions,
            costs: &index.costs,
            modalities: &index.modalities,
        };
        return Ok(serde_json::to_string_pretty(&doc)? + "\n");
    }
    let mut out = String::new();
    for (heading, values) in [
        ("Condition(s)", &index.conditions),
        (FacetCategory::Region.label(), &index.regions),
        (FacetCategory::Cost.label(), &index.costs),
        (FacetCategory::Modality.label(), &index.modalities),
    ] {
        writeln!(out, "{heading}:")?;
        for value in values {
            writeln!(out, "  {value}")?;
        }
    }
    Ok(out)
}

pub fn render_list(resources: &[&Resource], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(resources)? + "\n");
    }
    let mut out = String::new();
    for r in resources {
        writeln!(out, "{} | {} | {} | {}", r.name, r.region, r.cost, r.modality)?;
    }
    if resources.is_empty() {
        writeln!(out, "No results found.")?;
    } else {
        writeln!(out, "Number of results found: {}", resources.len())?;
    }
    Ok(out)
}

pub fn render_detail(resource: Option<&Resource>, json: bool) -> Result<String> {
    let Some(r) = resource else {
        return Ok(if json {
            "null\n".to_string()
        } else {
            "Resource not found.\n".to_string()
        });
    };
    if json {
        return Ok(serde_json::to_string_pretty(r)? + "\n");
    }
    let mut out = String::new();
    writeln!(out, "{}", r.name)?;
    for (label, value) in [
        ("Services offered", &r.services),
        ("Tags", &r.tags),
        ("Address", &r.address),
        ("Phone Number", &r.phone),
        ("Website", &r.website),
        ("Email", &r.email),
        ("Status", &r.status),
        ("Cost", &r.cost),
        ("Language", &r.language),
        ("Condition(s)", &r.conditions),
        ("Health Region", &r.region),
        ("Service Type", &r.modality),
        ("Age Restriction", &r.age_restriction),
    ] {
        if !value.is_empty() {
            writeln!(out, "  {label}: {value}")?;
        }
    }
    Ok(out)
}
