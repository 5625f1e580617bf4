use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Resource, ResourceDataset};
use crate::error::LoadError;

const NAME_COLUMN: &str = "Name of Organization";
const TAG_COLUMN: &str = "Tag";
const TAGS_COLUMN: &str = "Tags";
/// Header the secondary tag column is renamed to so it decodes as an
/// unknown field.
const MERGED_TAGS_COLUMN: &str = "Tags (merged)";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a resource dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the directory's column names (recommended)
/// * `.json` – `[{ "Name of Organization": "...", "Cost": "...", ... }, ...]`
pub fn load_file(path: &Path) -> Result<ResourceDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let resources = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)?
        }
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} resources from {}",
        resources.len(),
        path.display()
    );
    Ok(ResourceDataset::from_resources(resources))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV records. The header row names the fields; cells are trimmed.
///
/// Short rows are null-filled, rows that fail to decode are skipped with a
/// warning, and rows without a name are dropped. A file carrying both a
/// `Tag` and a `Tags` column gets the two merged into `tags`.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<Resource>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut headers = reader.headers().context("reading CSV headers")?.clone();
    if !headers.iter().any(|h| h == NAME_COLUMN) {
        return Err(LoadError::MissingColumn(NAME_COLUMN).into());
    }

    let secondary_tags = secondary_tag_column(&headers);
    if let Some(idx) = secondary_tags {
        log::info!("Both '{TAG_COLUMN}' and '{TAGS_COLUMN}' columns present; merging them");
        headers = headers
            .iter()
            .enumerate()
            .map(|(i, h)| if i == idx { MERGED_TAGS_COLUMN } else { h })
            .collect();
    }

    let mut resources = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let mut record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping unreadable CSV row: {e}");
                continue;
            }
        };
        let line = file_line(&record, i);

        while record.len() < headers.len() {
            record.push_field("");
        }

        match record.deserialize::<Resource>(Some(&headers)) {
            Ok(mut resource) => {
                if let Some(extra) = secondary_tags.and_then(|idx| record.get(idx)) {
                    resource.tags = merge_tags(&resource.tags, extra);
                }
                push_named(&mut resources, resource, line);
            }
            Err(e) => log::warn!("Skipping CSV line {line}: {e}"),
        }
    }
    Ok(resources)
}

/// 1-based line a record starts on; the header is line 1.
fn file_line(record: &csv::StringRecord, index: usize) -> usize {
    record
        .position()
        .map_or(index + 2, |pos| pos.line() as usize)
}

/// Index of the `Tags` column when a `Tag` column is also present.
fn secondary_tag_column(headers: &csv::StringRecord) -> Option<usize> {
    let has_tag = headers.iter().any(|h| h == TAG_COLUMN);
    let idx = headers.iter().position(|h| h == TAGS_COLUMN)?;
    has_tag.then_some(idx)
}

fn merge_tags(primary: &str, secondary: &str) -> String {
    let secondary = secondary.trim();
    if secondary.is_empty() || primary.trim() == secondary {
        primary.to_string()
    } else if primary.trim().is_empty() {
        secondary.to_string()
    } else {
        format!("{primary}, {secondary}")
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array using the CSV column names as keys.
pub fn parse_json(text: &str) -> Result<Vec<Resource>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let JsonValue::Array(records) = root else {
        return Err(LoadError::NotAnArray.into());
    };

    let mut resources = Vec::with_capacity(records.len());
    for (i, mut record) in records.into_iter().enumerate() {
        let Some(fields) = record.as_object_mut() else {
            log::warn!("Skipping JSON record {i}: not an object");
            continue;
        };
        let extra_tags = if fields.contains_key(TAG_COLUMN) {
            fields.remove(TAGS_COLUMN)
        } else {
            None
        };
        match serde_json::from_value::<Resource>(record) {
            Ok(mut resource) => {
                if let Some(extra) = extra_tags.as_ref().and_then(JsonValue::as_str) {
                    resource.tags = merge_tags(&resource.tags, extra);
                }
                push_named(&mut resources, resource, i);
            }
            Err(e) => log::warn!("Skipping JSON record {i}: {e}"),
        }
    }
    Ok(resources)
}

fn push_named(out: &mut Vec<Resource>, resource: Resource, row: usize) {
    if resource.name.trim().is_empty() {
        log::debug!("Dropping row {row}: no organization name");
        return;
    }
    out.push(resource);
}
