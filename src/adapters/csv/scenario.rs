//! Scenario file: `SimplifiedID,Value`, one row per indicator with a supplied value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};

use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::{HierarchyNode, SimplifiedIds};
use crate::ports::StoreError;

use super::line_of;

#[derive(Debug, Serialize, Deserialize)]
struct ScenarioRow {
    #[serde(rename = "SimplifiedID")]
    simplified_id: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Writes the supplied values of `root`'s indicators, in pre-order.
pub fn write_scenario<W: Write>(
    writer: W,
    root: &HierarchyNode,
    ids: &SimplifiedIds,
    values: &HashMap<NodeId, f64>,
) -> Result<(), StoreError> {
    let mut csv = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(["SimplifiedID", "Value"])?;

    for indicator in root.indicators() {
        let Some(value) = values.get(&indicator.id()) else {
            continue;
        };
        let label = ids.label_of(indicator.id()).ok_or_else(|| {
            StoreError::csv(format!("indicator '{}' has no simplified id", indicator.name()))
        })?;
        csv.serialize(ScenarioRow {
            simplified_id: label.to_string(),
            value: value.to_string(),
        })?;
    }

    csv.flush()?;
    Ok(())
}

/// Reads scenario values, keeping rows whose id `resolve` recognizes.
///
/// # Errors
///
/// `StoreError::InvalidRow` when a recognized row's value is not a number.
pub fn read_scenario<R, F>(reader: R, resolve: F) -> Result<HashMap<NodeId, f64>, StoreError>
where
    R: Read,
    F: Fn(&str) -> Option<NodeId>,
{
    let mut csv = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);
    let headers = csv.headers()?.clone();
    let mut values = HashMap::new();

    for record in csv.records() {
        let record = record?;
        let line = line_of(&record);
        let row: ScenarioRow = record.deserialize(Some(&headers))?;

        let Some(id) = resolve(&row.simplified_id) else {
            tracing::debug!(line, id = %row.simplified_id, "scenario row for unknown id ignored");
            continue;
        };
        let value = row.value.parse::<f64>().map_err(|_| {
            StoreError::invalid_row(line, format!("value '{}' is not a number", row.value))
        })?;
        values.insert(id, value);
    }

    Ok(values)
}
