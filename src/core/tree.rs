use crate::core::path::NodePath;
use crate::core::value::JsonValue;
use std::collections::HashMap;

/// Expansion flags keyed by structural path. Entries are created lazily on
/// first toggle; an absent path defaults to expanded only at the document
/// root. Collapsing a parent hides descendants without touching their
/// remembered flags.
#[derive(Debug, Default)]
pub struct TreeState {
    expanded: HashMap<NodePath, bool>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded
            .get(path)
            .copied()
            .unwrap_or_else(|| path.is_root())
    }

    pub fn toggle(&mut self, path: &NodePath) {
        let next = !self.is_expanded(path);
        self.expanded.insert(path.clone(), next);
    }

    /// Drop every flag; called when the document is replaced so no stale
    /// path can leak into the next tree.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLabel {
    Root,
    Key(String),
    Index(usize),
}

/// One renderable line of the tree: a node at its structural position, or
/// the closing bracket of an expanded container (same path, same depth).
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow<'a> {
    pub path: NodePath,
    pub depth: usize,
    pub label: RowLabel,
    pub value: &'a JsonValue,
    pub expanded: bool,
    pub closing: bool,
}

impl<'a> TreeRow<'a> {
    /// True when this row carries a toggle affordance: a container with at
    /// least one child. Empty containers are never interactive.
    pub fn expandable(&self) -> bool {
        self.value.is_container() && self.value.child_count() > 0
    }
}

/// Collapsed-container one-liner, exact literal format. Empty containers
/// get no preview; they render their brackets adjacently instead.
pub fn preview(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Array(items) if !items.is_empty() => {
            Some(format!("[...] {} items", items.len()))
        }
        JsonValue::Object(entries) if !entries.is_empty() => {
            Some(format!("{{...}} {} keys", entries.len()))
        }
        _ => None,
    }
}

/// Walk the document into visible rows in source order, honoring the
/// expansion state. Expanded containers are followed by their children one
/// level deeper and a closing-bracket row at their own depth.
pub fn flatten<'a>(root: &'a JsonValue, state: &TreeState) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    push_node(&mut rows, NodePath::root(), 0, RowLabel::Root, root, state);
    rows
}

fn push_node<'a>(
    rows: &mut Vec<TreeRow<'a>>,
    path: NodePath,
    depth: usize,
    label: RowLabel,
    value: &'a JsonValue,
    state: &TreeState,
) {
    let expanded = value.is_container() && value.child_count() > 0 && state.is_expanded(&path);
    rows.push(TreeRow {
        path: path.clone(),
        depth,
        label: label.clone(),
        value,
        expanded,
        closing: false,
    });
    if !expanded {
        return;
    }

    match value {
        JsonValue::Object(entries) => {
            for (key, child) in entries {
                push_node(
                    rows,
                    path.child_key(key.as_str()),
                    depth + 1,
                    RowLabel::Key(key.clone()),
                    child,
                    state,
                );
            }
        }
        JsonValue::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                push_node(
                    rows,
                    path.child_index(index),
                    depth + 1,
                    RowLabel::Index(index),
                    child,
                    state,
                );
            }
        }
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => {
            return;
        }
    }

    rows.push(TreeRow {
        path,
        depth,
        label,
        value,
        expanded: true,
        closing: true,
    });
}
