use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::parse::operation::Operation;
use crate::parse::spec::Document;

/// One tag's slice of the document: path → method → operation, held by
/// reference. `BTreeMap` keeps paths and methods in lexicographic order so
/// repeated runs emit byte-identical output.
#[derive(Debug)]
pub struct TagGroup<'a> {
    pub name: String,
    pub paths: BTreeMap<&'a str, BTreeMap<&'a str, &'a Operation>>,
}

impl<'a> TagGroup<'a> {
    /// All (path, method, operation) triples in emission order.
    pub fn operations(&self) -> impl Iterator<Item = (&'a str, &'a str, &'a Operation)> + '_ {
        self.paths
            .iter()
            .flat_map(|(path, methods)| methods.iter().map(move |(m, op)| (*path, *m, *op)))
    }
}

/// Partition every (path, method, operation) triple by declared tag.
/// Untagged operations land in "default". An operation carrying two tags is
/// recorded under both groups and visited independently by every downstream
/// stage. Groups come back in first-seen document order.
pub fn partition_by_tag(doc: &Document) -> Vec<TagGroup<'_>> {
    let mut groups: IndexMap<String, TagGroup<'_>> = IndexMap::new();

    for (path, item) in &doc.paths {
        for (method, op) in &item.0 {
            if op.tags.is_empty() {
                record(&mut groups, "default", path, method, op);
            } else {
                for tag in &op.tags {
                    record(&mut groups, tag, path, method, op);
                }
            }
        }
    }

    groups.into_values().collect()
}

fn record<'a>(
    groups: &mut IndexMap<String, TagGroup<'a>>,
    tag: &str,
    path: &'a str,
    method: &'a str,
    op: &'a Operation,
) {
    groups
        .entry(tag.to_string())
        .or_insert_with(|| TagGroup {
            name: tag.to_string(),
            paths: BTreeMap::new(),
        })
        .paths
        .entry(path)
        .or_default()
        .insert(method, op);
}
