// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Relation table loading.

An ontology hierarchy ships as three tab-separated tables, each starting with a
header line that is always skipped:

| table     | columns used                        | minimum columns |
|-----------|-------------------------------------|-----------------|
| parts     | conceptId, representationId, name   | 3               |
| elements  | conceptId, (unused), fileId         | 3               |
| relations | parentId, (name), childId, (name)   | 4               |

Rows with fewer columns are skipped without error. Trailing empty fields do not
count as columns.
*/

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::{HierarchyError, HierarchyResult};

const PARTS_MIN_COLUMNS: usize = 3;
const ELEMENTS_MIN_COLUMNS: usize = 3;
const RELATIONS_MIN_COLUMNS: usize = 4;

/// Paths of the three tables making up one hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFiles {
    pub parts: PathBuf,
    pub elements: PathBuf,
    pub relations: PathBuf,
}

impl TableFiles {
    pub fn new(
        parts: impl Into<PathBuf>,
        elements: impl Into<PathBuf>,
        relations: impl Into<PathBuf>,
    ) -> Self {
        Self {
            parts: parts.into(),
            elements: elements.into(),
            relations: relations.into(),
        }
    }

    /// Resolve relative table paths against `dir`
    pub fn in_dir(&self, dir: &Path) -> Self {
        Self {
            parts: dir.join(&self.parts),
            elements: dir.join(&self.elements),
            relations: dir.join(&self.relations),
        }
    }
}

/// One relations-table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub parent_id: String,
    pub parent_name: String,
    pub child_id: String,
    pub child_name: String,
}

/// Row accounting for one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub parts_rows: usize,
    pub element_rows: usize,
    pub relation_rows: usize,
    /// Data rows dropped for having too few columns, all tables together
    pub skipped_rows: usize,
    /// Relation rows whose child already had a recorded parent
    pub overwritten_parent_links: usize,
}

/// Normalized intermediate maps produced from the three tables
#[derive(Debug, Clone, Default)]
pub struct RelationTables {
    /// Concept ids in order of first appearance in the parts table
    concepts: Vec<String>,
    names: AHashMap<String, String>,
    representation_ids: AHashMap<String, String>,
    file_ids: AHashMap<String, Vec<String>>,
    children: AHashMap<String, Vec<String>>,
    parents: AHashMap<String, String>,
    stats: TableStats,
}

impl RelationTables {
    /// Read and parse the three tables from disk
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` if a table does not exist, `Io` if it cannot be read.
    /// Either aborts the whole load.
    pub fn load(files: &TableFiles) -> HierarchyResult<Self> {
        let parts = read_table(&files.parts)?;
        let elements = read_table(&files.elements)?;
        let relations = read_table(&files.relations)?;

        let tables = Self::parse(&parts, &elements, &relations);
        info!(target: "anatomy-hierarchy",
            "Loaded tables {}: {} concepts, {} relation rows",
            files.relations.display(), tables.concepts.len(), tables.stats.relation_rows);
        Ok(tables)
    }

    /// Read tables named relative to a data directory
    pub fn load_from_dir(dir: &Path, files: &TableFiles) -> HierarchyResult<Self> {
        Self::load(&files.in_dir(dir))
    }

    /// Parse already-read table text
    pub fn parse(parts: &str, elements: &str, relations: &str) -> Self {
        let mut tables = Self::default();

        for columns in data_rows(parts) {
            if columns.len() < PARTS_MIN_COLUMNS {
                tables.stats.skipped_rows += 1;
                continue;
            }
            tables.insert_part(columns[0], columns[1], columns[2]);
        }

        for columns in data_rows(elements) {
            if columns.len() < ELEMENTS_MIN_COLUMNS {
                tables.stats.skipped_rows += 1;
                continue;
            }
            tables.stats.element_rows += 1;
            tables
                .file_ids
                .entry(columns[0].to_string())
                .or_default()
                .push(columns[2].to_string());
        }

        for columns in data_rows(relations) {
            if columns.len() < RELATIONS_MIN_COLUMNS {
                tables.stats.skipped_rows += 1;
                continue;
            }
            tables.insert_relation(Relation {
                parent_id: columns[0].to_string(),
                parent_name: columns[1].to_string(),
                child_id: columns[2].to_string(),
                child_name: columns[3].to_string(),
            });
        }

        debug!(target: "anatomy-hierarchy",
            "Parsed {} part rows, {} element rows, {} relation rows ({} skipped)",
            tables.stats.parts_rows, tables.stats.element_rows,
            tables.stats.relation_rows, tables.stats.skipped_rows);
        tables
    }

    fn insert_part(&mut self, concept_id: &str, representation_id: &str, name: &str) {
        self.stats.parts_rows += 1;
        if !self.names.contains_key(concept_id) {
            self.concepts.push(concept_id.to_string());
        }
        self.names.insert(concept_id.to_string(), name.to_string());
        self.representation_ids
            .insert(concept_id.to_string(), representation_id.to_string());
    }

    fn insert_relation(&mut self, relation: Relation) {
        self.stats.relation_rows += 1;
        self.children
            .entry(relation.parent_id.clone())
            .or_default()
            .push(relation.child_id.clone());

        if let Some(previous) = self
            .parents
            .insert(relation.child_id.clone(), relation.parent_id.clone())
        {
            self.stats.overwritten_parent_links += 1;
            warn!(target: "anatomy-hierarchy",
                "Concept {} ({}) re-parented from {} to {} ({}); keeping the last parent",
                relation.child_id, relation.child_name, previous,
                relation.parent_id, relation.parent_name);
        }
    }

    /// Concept ids in order of first appearance in the parts table
    pub fn concepts(&self) -> &[String] {
        &self.concepts
    }

    pub fn name_of(&self, concept_id: &str) -> Option<&str> {
        self.names.get(concept_id).map(String::as_str)
    }

    pub fn representation_id_of(&self, concept_id: &str) -> Option<&str> {
        self.representation_ids.get(concept_id).map(String::as_str)
    }

    /// File ids of a concept in row order; empty when it has none
    pub fn file_ids_of(&self, concept_id: &str) -> &[String] {
        self.file_ids.get(concept_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Child ids of a parent in row order; empty when it has none
    pub fn children_of(&self, parent_id: &str) -> &[String] {
        self.children.get(parent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The single recorded parent of a child (last row wins)
    pub fn parent_of(&self, child_id: &str) -> Option<&str> {
        self.parents.get(child_id).map(String::as_str)
    }

    pub fn has_parent(&self, concept_id: &str) -> bool {
        self.parents.contains_key(concept_id)
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }
}

fn read_table(path: &Path) -> HierarchyResult<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => HierarchyError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => HierarchyError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Data rows of a table (header skipped), each split into columns
fn data_rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines().skip(1).map(split_columns)
}

fn split_columns(line: &str) -> Vec<&str> {
    let mut columns: Vec<&str> = line.trim().split('\t').collect();
    while columns.last().is_some_and(|column| column.is_empty()) {
        columns.pop();
    }
    columns
}
