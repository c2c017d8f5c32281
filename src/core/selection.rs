use crate::core::path::NodePath;
use crate::core::value::JsonValue;

/// The one currently selected node, identified by structural position so a
/// value duplicated elsewhere in the document is never co-selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    path: NodePath,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn select(&mut self, path: NodePath) {
        self.path = path;
    }

    /// Back to the document root; called whenever the document is replaced,
    /// even by a structurally identical one.
    pub fn reset(&mut self) {
        self.path = NodePath::root();
    }

    pub fn is_selected(&self, path: &NodePath) -> bool {
        self.path == *path
    }

    /// Resolve against the current document, falling back to the root. The
    /// fallback keeps the API total; within one document generation the
    /// selected path always resolves.
    pub fn resolve<'a>(&self, root: &'a JsonValue) -> &'a JsonValue {
        self.path.resolve(root).unwrap_or(root)
    }
}
