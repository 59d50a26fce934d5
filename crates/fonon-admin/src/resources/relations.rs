//! Select options drawn from the records of a resource.
//!
//! Some lists come back as trees (children nested under a key). Those are
//! walked depth first so each option can be indented by its depth.

use std::collections::HashSet;

use fonon_core::Record;
use serde_json::Value;

use super::config::ResourceKey;
use crate::fields::SelectOption;
use crate::values::record_id;

pub type OptionLabel = fn(&Record) -> String;

/// Fills one select field with the records of a resource.
#[derive(Debug, Clone, Copy)]
pub struct OptionSource {
    pub field: &'static str,
    pub resource: ResourceKey,
    /// Key holding nested child records when the list is a tree.
    pub children_key: Option<&'static str>,
    pub label: OptionLabel,
}

/// Each record of a tree list with its depth, parents before children.
pub fn flatten_tree<'a>(records: &'a [Record], children_key: Option<&str>) -> Vec<(usize, &'a Record)> {
    let mut out = Vec::new();
    for record in records {
        push_subtree(record, 0, children_key, &mut out);
    }
    out
}

fn push_subtree<'a>(
    record: &'a Record,
    depth: usize,
    children_key: Option<&str>,
    out: &mut Vec<(usize, &'a Record)>,
) {
    out.push((depth, record));
    let children = children_key
        .and_then(|key| record.get(key))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object);
    for child in children {
        push_subtree(child, depth + 1, children_key, out);
    }
}

/// Prefix a label with one dash marker per tree level.
pub fn indent_label(depth: usize, label: &str) -> String {
    format!("{}{}", "— ".repeat(depth), label)
}

impl OptionSource {
    /// One option per record that has an id, skipping `excluded`.
    pub fn options(&self, records: &[Record], excluded: &HashSet<i64>) -> Vec<SelectOption> {
        flatten_tree(records, self.children_key)
            .into_iter()
            .filter_map(|(depth, record)| {
                let id = record_id(record).filter(|id| !excluded.contains(id))?;
                Some(SelectOption::new(indent_label(depth, &(self.label)(record)), id.to_string()))
            })
            .collect()
    }

    /// Ids a record of the same resource may not point at: itself and
    /// everything below it, so a tree can never loop.
    pub fn excluded_for(&self, records: &[Record], editing: &Record) -> HashSet<i64> {
        let Some(id) = record_id(editing) else {
            return HashSet::new();
        };
        let subtree = flatten_tree(records, self.children_key)
            .into_iter()
            .find(|(_, record)| record_id(record) == Some(id))
            .map(|(_, record)| record);
        match subtree {
            Some(record) => flatten_tree(std::slice::from_ref(record), self.children_key)
                .into_iter()
                .filter_map(|(_, r)| record_id(r))
                .collect(),
            None => HashSet::from([id]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn name(record: &Record) -> String {
        record["nameUz"].as_str().unwrap_or_default().to_string()
    }

    fn tree() -> Vec<Record> {
        records(json!([
            {"id": 1, "nameUz": "Bosh", "children": [
                {"id": 2, "nameUz": "Kurslar", "children": [
                    {"id": 3, "nameUz": "Gitara"}
                ]}
            ]},
            {"id": 4, "nameUz": "Aloqa", "children": []}
        ]))
    }

    fn source() -> OptionSource {
        OptionSource {
            field: "parentId",
            resource: ResourceKey::NavItems,
            children_key: Some("children"),
            label: name,
        }
    }

    #[test]
    fn test_flatten_tree_depths() {
        let list = tree();
        let flat: Vec<(usize, i64)> = flatten_tree(&list, Some("children"))
            .into_iter()
            .map(|(depth, r)| (depth, record_id(r).unwrap()))
            .collect();
        assert_eq!(flat, vec![(0, 1), (1, 2), (2, 3), (0, 4)]);
        assert_eq!(flatten_tree(&list, None).len(), 2);
    }

    #[test]
    fn test_options_are_indented() {
        let options = source().options(&tree(), &HashSet::new());
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Bosh", "— Kurslar", "— — Gitara", "Aloqa"]);
        assert_eq!(options[2].value, "3");
    }

    #[test]
    fn test_editing_record_cannot_pick_its_own_subtree() {
        let list = tree();
        let editing = list[0]["children"][0].as_object().cloned().unwrap();
        let excluded = source().excluded_for(&list, &editing);
        assert_eq!(excluded, HashSet::from([2, 3]));

        let values: Vec<String> = source()
            .options(&list, &excluded)
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, vec!["1", "4"]);

        let detached = records(json!([{"id": 9}])).remove(0);
        assert_eq!(source().excluded_for(&list, &detached), HashSet::from([9]));
    }
}
