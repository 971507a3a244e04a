//! Function file: `SimplifiedID,X_Sat_0,X_Sat_1,Units,P,K,C`, one row per indicator.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::{HierarchyNode, SimplifiedIds, ValueFunctionParams};
use crate::ports::StoreError;

use super::line_of;

#[derive(Debug, Serialize, Deserialize)]
struct FunctionRow {
    #[serde(rename = "SimplifiedID")]
    simplified_id: String,
    #[serde(rename = "X_Sat_0")]
    x_sat_0: String,
    #[serde(rename = "X_Sat_1")]
    x_sat_1: String,
    #[serde(rename = "Units")]
    units: String,
    #[serde(rename = "P")]
    p: String,
    #[serde(rename = "K")]
    k: String,
    #[serde(rename = "C")]
    c: String,
}

impl FunctionRow {
    fn new(simplified_id: &str, params: &ValueFunctionParams) -> Self {
        Self {
            simplified_id: simplified_id.to_string(),
            x_sat_0: params.x_sat_0.to_string(),
            x_sat_1: params.x_sat_1.to_string(),
            units: params.units.clone(),
            p: params.p.to_string(),
            k: params.k.to_string(),
            c: params.c.to_string(),
        }
    }

    fn to_params(&self, line: u64) -> Result<ValueFunctionParams, StoreError> {
        let number = |column: &str, text: &str| {
            text.parse::<f64>().map_err(|_| {
                StoreError::invalid_row(line, format!("{} '{}' is not a number", column, text))
            })
        };
        Ok(ValueFunctionParams::new(
            number("X_Sat_0", &self.x_sat_0)?,
            number("X_Sat_1", &self.x_sat_1)?,
            number("P", &self.p)?,
            number("K", &self.k)?,
            number("C", &self.c)?,
        )
        .with_units(self.units.clone()))
    }
}

/// Writes one row per indicator in pre-order.
///
/// Indicators without parameters are written with the defaults they are
/// scored with.
pub fn write_functions<W: Write>(
    writer: W,
    root: &HierarchyNode,
    ids: &SimplifiedIds,
) -> Result<(), StoreError> {
    let mut csv = ::csv::Writer::from_writer(writer);
    let defaults = ValueFunctionParams::default();

    for indicator in root.indicators() {
        let label = ids.label_of(indicator.id()).ok_or_else(|| {
            StoreError::csv(format!("indicator '{}' has no simplified id", indicator.name()))
        })?;
        let params = indicator.function().unwrap_or(&defaults);
        csv.serialize(FunctionRow::new(label, params))?;
    }

    csv.flush()?;
    Ok(())
}

/// Applies function rows to the indicators of `root`.
///
/// `resolve` maps a simplified id to a node. Returns how many indicators
/// were updated.
///
/// # Edge Cases
/// - Rows for unknown ids, or ids naming a non-indicator, are ignored
/// - Any non-numeric `X_Sat_0`, `X_Sat_1`, `P`, `K` or `C` is an `InvalidRow`
pub fn read_functions<R, F>(
    reader: R,
    root: &mut HierarchyNode,
    resolve: F,
) -> Result<usize, StoreError>
where
    R: Read,
    F: Fn(&str) -> Option<NodeId>,
{
    let mut csv = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);
    let headers = csv.headers()?.clone();
    let mut applied = 0;

    for record in csv.records() {
        let record = record?;
        let line = line_of(&record);
        let row: FunctionRow = record.deserialize(Some(&headers))?;
        let params = row.to_params(line)?;

        let Some(node) = resolve(&row.simplified_id).and_then(|id| root.find_mut(id)) else {
            tracing::debug!(line, id = %row.simplified_id, "function row for unknown id ignored");
            continue;
        };
        if node.set_function(params).is_ok() {
            applied += 1;
        } else {
            tracing::debug!(line, id = %row.simplified_id, "function row for non-indicator ignored");
        }
    }

    Ok(applied)
}
