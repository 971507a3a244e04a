//! Integration tests for the file-backed workflow.
//!
//! Writes structure, function and scenario files into a temporary directory,
//! then drives both query handlers through the CSV stores.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use mives_engine::adapters::{CsvHierarchyStore, CsvScenarioStore};
use mives_engine::application::{
    DescribeStructureHandler, DescribeStructureQuery, EvaluateScenarioHandler,
    EvaluateScenarioQuery,
};
use mives_engine::config::EngineConfig;
use mives_engine::domain::layout::ColorHint;
use mives_engine::ports::{HierarchyStore, StoreError};
use tempfile::TempDir;

const STRUCTURE: &str = "\
SimplifiedID,ParentID,Weight,Type,Name
ROOT,None,100,Root,Bridge
R01,ROOT,60%,Requirement,Economic
C01,R01,100,Criterion,Cost
I01,C01,50,Indicator,Build cost
I02,C01,50,Indicator,Upkeep
R02,ROOT,40,Requirement,Environmental
C02,R02,100,Criterion,Emissions
I03,C02,100,Indicator,CO2
";

const FUNCTIONS: &str = "\
SimplifiedID,X_Sat_0,X_Sat_1,Units,P,K,C
I01,1000,200,k€,1.5,0.2,400
I02,50,5,k€/yr,1,0.1,20
I03,900,100,t,2,0.5,300
";

fn write_files(dir: &Path, scenario: &str) -> (CsvHierarchyStore, CsvScenarioStore) {
    let structure = dir.join("structure.csv");
    let functions = dir.join("functions.csv");
    let values = dir.join("scenario.csv");
    fs::write(&structure, STRUCTURE).unwrap();
    fs::write(&functions, FUNCTIONS).unwrap();
    fs::write(&values, scenario).unwrap();
    let hierarchy = CsvHierarchyStore::new(structure, functions);
    let scenario = hierarchy.scenario_store(values);
    (hierarchy, scenario)
}

#[test]
fn describe_reads_files_and_lays_out_structure() {
    let dir = TempDir::new().unwrap();
    let (hierarchy, _) = write_files(dir.path(), "SimplifiedID,Value\n");
    let config = EngineConfig::default();

    let handler = DescribeStructureHandler::new(Arc::new(hierarchy));
    let result = handler
        .handle(DescribeStructureQuery {
            layout: config.layout.options(),
        })
        .unwrap();

    assert!(result.violations.is_empty());
    assert_eq!(result.layout.nodes.len(), 8);
    assert_eq!(result.layout.links.len(), 7);
    assert_eq!(result.simplified_ids.len(), 8);

    let co2 = result.root.indicators().find(|n| n.name() == "CO2").unwrap();
    assert!((result.absolute_weights[&co2.id()] - 0.4).abs() < 1e-9);
    assert_eq!(co2.function().unwrap().units, "t");
}

#[test]
fn evaluate_scores_scenario_from_files() {
    let dir = TempDir::new().unwrap();
    let scenario = "SimplifiedID,Value\nI01,200\nI02,5\nI03,900\n";
    let (hierarchy, values) = write_files(dir.path(), scenario);

    let handler = EvaluateScenarioHandler::new(Arc::new(hierarchy), Arc::new(values));
    let result = handler.handle(EvaluateScenarioQuery::default()).unwrap();

    // Economic fully satisfied, Environmental at its worst bound
    assert!((result.index - 0.6).abs() < 1e-9);
    assert_eq!(result.inputs.len(), 3);
    assert_eq!(result.contributions.len(), 3);

    let root_bar = result.layout.filled.node(result.root.id()).unwrap();
    assert_eq!(root_bar.color_hint, ColorHint::RootHighlight);
    assert_eq!(result.layout.shadow.nodes.len(), result.layout.filled.nodes.len());
}

#[test]
fn evaluate_reports_unbalanced_weights_but_still_scores() {
    let dir = TempDir::new().unwrap();
    let (_, values) = write_files(dir.path(), "SimplifiedID,Value\nI01,600\n");
    let skewed = STRUCTURE.replace("R02,ROOT,40", "R02,ROOT,30");
    let structure = dir.path().join("skewed.csv");
    fs::write(&structure, skewed).unwrap();
    let hierarchy = CsvHierarchyStore::new(structure, dir.path().join("functions.csv"));

    let handler = EvaluateScenarioHandler::new(Arc::new(hierarchy), Arc::new(values));
    let result = handler.handle(EvaluateScenarioQuery::default()).unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].node_name, "Bridge");
    assert!(result.index.is_finite());
    assert!((0.0..=1.0).contains(&result.index));
}

#[test]
fn save_then_load_keeps_functions_and_weights() {
    let dir = TempDir::new().unwrap();
    let (hierarchy, _) = write_files(dir.path(), "SimplifiedID,Value\n");
    let original = hierarchy.load().unwrap();

    let copy = CsvHierarchyStore::new(
        dir.path().join("copy_structure.csv"),
        dir.path().join("copy_functions.csv"),
    );
    copy.save(&original).unwrap();
    let reloaded = copy.load().unwrap();

    let shape = |root: &mives_engine::domain::hierarchy::HierarchyNode| {
        root.iter()
            .map(|n| (n.name().to_string(), n.local_weight(), n.function().cloned()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&reloaded), shape(&original));
}

#[test]
fn evaluate_matches_inputs_by_structure_file_labels() {
    let dir = TempDir::new().unwrap();
    let structure = dir.path().join("structure.csv");
    let functions = dir.path().join("functions.csv");
    fs::write(
        &structure,
        "SimplifiedID,ParentID,Weight,Type,Name\n\
         ROOT,None,100,Root,Plant\n\
         R01,ROOT,100,Requirement,Economic\n\
         C01,R01,100,Criterion,Cost\n\
         I07,C01,50,Indicator,Capex\n\
         I03,C01,50,Indicator,Opex\n",
    )
    .unwrap();
    fs::write(
        &functions,
        "SimplifiedID,X_Sat_0,X_Sat_1,Units,P,K,C\n\
         I07,0,10,k€,1,0.1,5\n\
         I03,0,10,k€/yr,1,0.1,5\n",
    )
    .unwrap();
    let hierarchy = CsvHierarchyStore::new(structure, functions);
    let scenario = hierarchy.scenario_store(dir.path().join("scenario.csv"));
    fs::write(dir.path().join("scenario.csv"), "SimplifiedID,Value\nI03,10\n").unwrap();

    let handler = EvaluateScenarioHandler::new(Arc::new(hierarchy), Arc::new(scenario));
    let result = handler.handle(EvaluateScenarioQuery::default()).unwrap();

    let opex = result.root.indicators().find(|n| n.name() == "Opex").unwrap();
    assert_eq!(result.inputs.get(&opex.id()), Some(&10.0));
    assert_eq!(result.scores.score_of(opex.id()), 1.0);
    assert!((result.index - 0.5).abs() < 1e-9);
}

#[test]
fn missing_scenario_file_fails_evaluation() {
    let dir = TempDir::new().unwrap();
    let (hierarchy, _) = write_files(dir.path(), "SimplifiedID,Value\n");
    let values = CsvScenarioStore::new(dir.path().join("absent.csv"));

    let handler = EvaluateScenarioHandler::new(Arc::new(hierarchy), Arc::new(values));
    let err = handler.handle(EvaluateScenarioQuery::default()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}
