// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Loading hierarchies from table files on disk

use anatomy_hierarchy::{
    to_newick, AnatomyModel, ConceptHierarchy, HierarchyError, HierarchyKind, RelationTables,
    TableFiles,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PARTS: &str = "concept id\trepresentation id\tname\n\
                     FMA1\tBP1\tP\n\
                     FMA2\tBP2\tA\n\
                     FMA3\tBP3\tB\n\
                     FMA4\tBP4\tC\n";

const ELEMENTS: &str = "concept id\tname\tfile id\n\
                        FMA3\tB\tFJ10\n\
                        FMA4\tC\tFJ11\n\
                        FMA4\tC\tFJ12\n";

const RELATIONS: &str = "parent\tparent name\tchild\tchild name\n\
                         FMA1\tP\tFMA2\tA\n\
                         FMA1\tP\tFMA3\tB\n\
                         FMA2\tA\tFMA4\tC\n";

fn write_tables(dir: &Path, prefix: &str, parts: &str, elements: &str, relations: &str) -> TableFiles {
    let files = TableFiles::new(
        format!("{}_parts_list_e.txt", prefix),
        format!("{}_element_parts.txt", prefix),
        format!("{}_inclusion_relation_list.txt", prefix),
    );
    fs::write(dir.join(&files.parts), parts).unwrap();
    fs::write(dir.join(&files.elements), elements).unwrap();
    fs::write(dir.join(&files.relations), relations).unwrap();
    files
}

#[test]
fn test_load_example_hierarchy_from_disk() {
    let dir = TempDir::new().unwrap();
    let files = write_tables(dir.path(), "partof", PARTS, ELEMENTS, RELATIONS);

    let tables = RelationTables::load_from_dir(dir.path(), &files).unwrap();
    let hierarchy = ConceptHierarchy::build(&tables).unwrap();

    assert_eq!(hierarchy.root().name(), "P");
    let names: Vec<&str> = hierarchy
        .children(hierarchy.root_id())
        .iter()
        .map(|&id| hierarchy.node(id).name())
        .collect();
    assert_eq!(names, vec!["A", "B"]);

    let summary = hierarchy.summary();
    assert_eq!(summary.node_count, 4);
    assert_eq!(summary.edge_count, 3);
    assert_eq!(summary.leaf_count, 2);
    assert_eq!(summary.max_depth, 2);

    assert_eq!(to_newick(&hierarchy), "((C)A,B)P;");
    assert_eq!(hierarchy.collect_file_ids(hierarchy.root_id()), vec!["FJ11", "FJ12", "FJ10"]);
}

#[test]
fn test_missing_table_is_resource_not_found() {
    let dir = TempDir::new().unwrap();
    let files = write_tables(dir.path(), "partof", PARTS, ELEMENTS, RELATIONS);
    fs::remove_file(dir.path().join(&files.elements)).unwrap();

    match RelationTables::load_from_dir(dir.path(), &files) {
        Err(HierarchyError::ResourceNotFound { path }) => {
            assert!(path.ends_with("partof_element_parts.txt"));
        }
        other => panic!("expected ResourceNotFound, got {:?}", other),
    }
}

#[test]
fn test_root_failure_surfaces_from_disk_load() {
    let dir = TempDir::new().unwrap();
    let cyclic = "parent\tparent name\tchild\tchild name\n\
                  FMA1\tP\tFMA2\tA\n\
                  FMA2\tA\tFMA1\tP\n";
    let files = write_tables(dir.path(), "isa", PARTS, ELEMENTS, cyclic);

    let tables = RelationTables::load_from_dir(dir.path(), &files).unwrap();
    let err = ConceptHierarchy::build(&tables).unwrap_err();
    assert!(matches!(err, HierarchyError::NoRootFound | HierarchyError::AmbiguousRoot { .. }));
}

#[test]
fn test_model_loads_both_relations() {
    let dir = TempDir::new().unwrap();
    let part_of = write_tables(dir.path(), "partof", PARTS, ELEMENTS, RELATIONS);
    let is_a_relations = "parent\tparent name\tchild\tchild name\n\
                          FMA4\tC\tFMA1\tP\n\
                          FMA4\tC\tFMA2\tA\n\
                          FMA4\tC\tFMA3\tB\n";
    let is_a = write_tables(dir.path(), "isa", PARTS, ELEMENTS, is_a_relations);

    let model = AnatomyModel::load(dir.path(), &part_of, &is_a).unwrap();

    assert_eq!(model.hierarchy(HierarchyKind::PartOf).root().name(), "P");
    assert_eq!(model.hierarchy(HierarchyKind::IsA).root().name(), "C");
    assert_eq!(model.is_a().leaves().len(), 3);
}

#[test]
fn test_model_fails_when_either_hierarchy_fails() {
    let dir = TempDir::new().unwrap();
    let part_of = write_tables(dir.path(), "partof", PARTS, ELEMENTS, RELATIONS);
    let is_a = TableFiles::new("missing_parts.txt", "missing_elements.txt", "missing_relations.txt");

    let err = AnatomyModel::load(dir.path(), &part_of, &is_a).unwrap_err();
    assert!(matches!(err, HierarchyError::ResourceNotFound { .. }));
}
