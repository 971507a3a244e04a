//! Structure file: `SimplifiedID,ParentID,Weight,Type,Name`, one row per node in pre-order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};

use crate::domain::foundation::{NodeId, NodeKind, Weight};
use crate::domain::hierarchy::{HierarchyNode, SimplifiedIds};
use crate::ports::StoreError;

use super::{line_of, NO_PARENT};

#[derive(Debug, Serialize, Deserialize)]
struct StructureRow {
    #[serde(rename = "SimplifiedID")]
    simplified_id: String,
    #[serde(rename = "ParentID")]
    parent_id: String,
    #[serde(rename = "Weight")]
    weight: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Name")]
    name: String,
}

/// A tree read from a structure file, plus the file's own simplified ids.
///
/// The file's ids are kept because companion function and scenario files
/// refer to them, even when they differ from a fresh numbering.
#[derive(Debug, Clone)]
pub struct ImportedStructure {
    pub root: HierarchyNode,
    ids: SimplifiedIds,
}

impl ImportedStructure {
    /// Resolves a simplified id used in the structure file.
    pub fn node_of(&self, label: &str) -> Option<NodeId> {
        self.ids.node_of(label)
    }

    /// Splits into the tree and the file's simplified ids.
    pub fn into_parts(self) -> (HierarchyNode, SimplifiedIds) {
        (self.root, self.ids)
    }
}

/// A node read from one row, waiting to be attached to its parent.
struct Slot {
    node: HierarchyNode,
    parent: Option<usize>,
    line: u64,
}

/// Writes every node in pre-order. The root's parent is written as `None`.
pub fn write_structure<W: Write>(
    writer: W,
    root: &HierarchyNode,
    ids: &SimplifiedIds,
) -> Result<(), StoreError> {
    let mut csv = ::csv::Writer::from_writer(writer);
    let mut stack: Vec<(&HierarchyNode, Option<&str>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        let label = ids.label_of(node.id()).ok_or_else(|| {
            StoreError::csv(format!("node '{}' has no simplified id", node.name()))
        })?;
        csv.serialize(StructureRow {
            simplified_id: label.to_string(),
            parent_id: parent.unwrap_or(NO_PARENT).to_string(),
            weight: node.local_weight().value().to_string(),
            kind: node.kind().display_name().to_string(),
            name: node.name().to_string(),
        })?;
        for child in node.children().iter().rev() {
            stack.push((child, Some(label)));
        }
    }

    csv.flush()?;
    Ok(())
}

/// Rebuilds a tree from a structure file.
///
/// # Errors
///
/// - `StoreError::MissingRoot` if no row has parent `None`
/// - `StoreError::InvalidRow` for an unknown `Type`, or a node placed at the
///   wrong level under its parent
///
/// # Edge Cases
/// - Rows whose parent was not seen earlier are skipped with a warning
/// - Malformed weights import as 0%
/// - Every node receives a fresh `NodeId`; indicators get default functions
pub fn read_structure<R: Read>(reader: R) -> Result<ImportedStructure, StoreError> {
    let mut csv = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);
    let headers = csv.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let row: StructureRow = record.deserialize(Some(&headers))?;
        rows.push((line_of(&record), row));
    }

    let (root_line, root_row) = rows
        .iter()
        .find(|(_, row)| row.parent_id == NO_PARENT)
        .ok_or(StoreError::MissingRoot)?;
    let root_kind = parse_kind(*root_line, &root_row.kind)?;
    if root_kind != NodeKind::Root {
        return Err(StoreError::invalid_row(
            *root_line,
            format!("parentless row must be a Root, found {}", root_kind),
        ));
    }

    let mut slots = vec![Slot {
        node: HierarchyNode::root(root_row.name.clone()),
        parent: None,
        line: *root_line,
    }];
    let mut slot_of = HashMap::from([(root_row.simplified_id.clone(), 0usize)]);

    for (line, row) in &rows {
        if row.parent_id == NO_PARENT {
            if *line != *root_line {
                tracing::warn!(line, id = %row.simplified_id, "second root row skipped");
            }
            continue;
        }
        let Some(parent) = slot_of.get(&row.parent_id).copied() else {
            tracing::warn!(
                line,
                id = %row.simplified_id,
                parent = %row.parent_id,
                "row with unknown parent skipped"
            );
            continue;
        };

        let kind = parse_kind(*line, &row.kind)?;
        let parent_kind = slots[parent].node.kind();
        if !parent_kind.accepts_child(kind) {
            return Err(StoreError::invalid_row(
                *line,
                format!("{} cannot be placed under {}", kind, parent_kind),
            ));
        }

        slots.push(Slot {
            node: HierarchyNode::of_kind(kind, row.name.clone(), Weight::parse_lenient(&row.weight)),
            parent: Some(parent),
            line: *line,
        });
        if slot_of.insert(row.simplified_id.clone(), slots.len() - 1).is_some() {
            tracing::warn!(line, id = %row.simplified_id, "duplicate simplified id, last row wins");
        }
    }

    let labels: HashMap<String, NodeId> = slot_of
        .into_iter()
        .map(|(label, slot)| (label, slots[slot].node.id()))
        .collect();
    let root = assemble(slots)?;

    Ok(ImportedStructure {
        root,
        ids: SimplifiedIds::from_labels(labels),
    })
}

/// Attaches every slot to its parent, children in row order.
///
/// Parents always precede their children, so walking the slots backwards
/// finishes each subtree before its parent is attached.
fn assemble(slots: Vec<Slot>) -> Result<HierarchyNode, StoreError> {
    let mut pending: Vec<Vec<HierarchyNode>> = slots.iter().map(|_| Vec::new()).collect();
    let mut root = None;

    for (index, slot) in slots.into_iter().enumerate().rev() {
        let mut node = slot.node;
        for child in std::mem::take(&mut pending[index]).into_iter().rev() {
            node.add_child(child)
                .map_err(|err| StoreError::invalid_row(slot.line, err.to_string()))?;
        }
        match slot.parent {
            Some(parent) => pending[parent].push(node),
            None => root = Some(node),
        }
    }

    root.ok_or(StoreError::MissingRoot)
}

fn parse_kind(line: u64, text: &str) -> Result<NodeKind, StoreError> {
    text.parse::<NodeKind>()
        .map_err(|err| StoreError::invalid_row(line, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hierarchy::ValueFunctionParams;

    const SAMPLE: &str = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Bridge
R01,ROOT,60,Requirement,Economic
C01,R01,100%,Criterion,Cost
I01,C01,50,Indicator,Build cost
I02,C01,50,Indicator,Upkeep
R02,ROOT,40,Requirement,Social
";

    fn sample_tree() -> HierarchyNode {
        let mut root = HierarchyNode::root("Bridge");
        let req = root
            .add_child(HierarchyNode::requirement("Economic", Weight::new(60.0)))
            .unwrap();
        let crit = req
            .add_child(HierarchyNode::criterion("Cost", Weight::HUNDRED))
            .unwrap();
        crit.add_child(HierarchyNode::indicator(
            "Build cost",
            Weight::new(50.0),
            ValueFunctionParams::default(),
        ))
        .unwrap();
        crit.add_child(HierarchyNode::indicator(
            "Upkeep",
            Weight::new(50.0),
            ValueFunctionParams::default(),
        ))
        .unwrap();
        root.add_child(HierarchyNode::requirement("Social", Weight::new(40.0)))
            .unwrap();
        root
    }

    #[test]
    fn read_structure_builds_tree_in_file_order() {
        let imported = read_structure(SAMPLE.as_bytes()).unwrap();
        let root = &imported.root;

        assert_eq!(root.name(), "Bridge");
        assert_eq!(root.iter().count(), 6);
        let names: Vec<&str> = root.iter().map(|n| n.name()).collect();
        assert_eq!(
            names,
            vec!["Bridge", "Economic", "Cost", "Build cost", "Upkeep", "Social"]
        );
        assert_eq!(root.children()[0].local_weight(), Weight::new(60.0));
        assert_eq!(root.children()[0].children()[0].local_weight(), Weight::HUNDRED);
    }

    #[test]
    fn read_structure_keeps_file_labels() {
        let imported = read_structure(SAMPLE.as_bytes()).unwrap();
        let upkeep = imported.node_of("I02").unwrap();
        assert_eq!(imported.root.find(upkeep).unwrap().name(), "Upkeep");
        assert!(imported.node_of("I99").is_none());
    }

    #[test]
    fn read_structure_without_root_fails() {
        let csv = "SimplifiedID,ParentID,Weight,Type,Name\nR01,ROOT,100,Requirement,A\n";
        let err = read_structure(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::MissingRoot));
    }

    #[test]
    fn read_structure_skips_orphans() {
        let csv = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Index
R01,ROOT,100,Requirement,A
C01,R09,100,Criterion,Lost
";
        let imported = read_structure(csv.as_bytes()).unwrap();
        assert_eq!(imported.root.iter().count(), 2);
        assert!(imported.node_of("C01").is_none());
    }

    #[test]
    fn read_structure_rejects_unknown_type() {
        let csv = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Index
R01,ROOT,100,Leaf,A
";
        let err = read_structure(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn read_structure_rejects_level_skip() {
        let csv = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Index
I01,ROOT,100,Indicator,Too shallow
";
        let err = read_structure(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn read_structure_imports_malformed_weight_as_zero() {
        let csv = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Index
R01,ROOT,lots,Requirement,A
";
        let imported = read_structure(csv.as_bytes()).unwrap();
        assert_eq!(imported.root.children()[0].local_weight(), Weight::ZERO);
    }

    #[test]
    fn write_structure_emits_header_and_preorder_rows() {
        let root = sample_tree();
        let ids = SimplifiedIds::assign(&root);
        let mut buffer = Vec::new();
        write_structure(&mut buffer, &root, &ids).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, SAMPLE.replace("100%", "100"));
    }

    #[test]
    fn write_then_read_preserves_shape() {
        let root = sample_tree();
        let ids = SimplifiedIds::assign(&root);
        let mut buffer = Vec::new();
        write_structure(&mut buffer, &root, &ids).unwrap();

        let imported = read_structure(buffer.as_slice()).unwrap();
        let original: Vec<_> = root
            .iter()
            .map(|n| (n.kind(), n.name().to_string(), n.local_weight()))
            .collect();
        let restored: Vec<_> = imported
            .root
            .iter()
            .map(|n| (n.kind(), n.name().to_string(), n.local_weight()))
            .collect();
        assert_eq!(original, restored);
        assert_ne!(imported.root.id(), root.id());
    }

    #[test]
    fn read_structure_keeps_row_order_for_interleaved_parents() {
        let csv = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Index
R01,ROOT,50,Requirement,A
R02,ROOT,50,Requirement,B
C01,R01,50,Criterion,A1
C02,R02,100,Criterion,B1
C03,R01,50,Criterion,A2
";
        let imported = read_structure(csv.as_bytes()).unwrap();
        let names: Vec<&str> = imported.root.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Index", "A", "A1", "A2", "B", "B1"]);
    }

    #[test]
    fn read_structure_handles_many_indicators() {
        let mut csv = String::from(
            "SimplifiedID,ParentID,Weight,Type,Name\n\
             ROOT,None,100,Root,Index\n\
             R01,ROOT,100,Requirement,A\n\
             C01,R01,100,Criterion,A1\n",
        );
        for i in 1..=5000 {
            csv.push_str(&format!("I{i:02},C01,0.02,Indicator,Leaf {i}\n"));
        }

        let imported = read_structure(csv.as_bytes()).unwrap();
        assert_eq!(imported.root.indicators().count(), 5000);
        let last = imported.node_of("I5000").unwrap();
        assert_eq!(imported.root.find(last).unwrap().name(), "Leaf 5000");
    }

    #[test]
    fn read_structure_keeps_out_of_order_labels() {
        let csv = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Index
R01,ROOT,100,Requirement,A
C01,R01,100,Criterion,A1
I02,C01,50,Indicator,Alpha
I01,C01,50,Indicator,Beta
";
        let (root, ids) = read_structure(csv.as_bytes()).unwrap().into_parts();
        let beta = ids.node_of("I01").unwrap();
        assert_eq!(root.find(beta).unwrap().name(), "Beta");
        assert_eq!(ids.label_of(root.indicators().next().unwrap().id()), Some("I02"));
    }
}
