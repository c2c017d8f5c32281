use crate::core::value::JsonValue;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// Structural identity of one node: the key/index steps from the document
/// root. Used to key per-node UI state so repeated values stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath {
    steps: Vec<PathStep>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PathStep] {
        self.steps.as_slice()
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Key(key.into()));
        Self { steps }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Index(index));
        Self { steps }
    }

    /// Walk the path from `root`. `None` when the path points into a
    /// document that no longer has this shape.
    pub fn resolve<'a>(&self, root: &'a JsonValue) -> Option<&'a JsonValue> {
        let mut current = root;
        for step in &self.steps {
            current = match (step, current) {
                (PathStep::Key(key), JsonValue::Object(entries)) => entries.get(key.as_str())?,
                (PathStep::Index(index), JsonValue::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for NodePath {
    /// Selector form: `topping[3].type`, quoting keys that are not plain
    /// identifiers. The root renders as `$`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("$");
        }

        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Key(key) => {
                    if is_identifier(key) {
                        if idx > 0 {
                            f.write_str(".")?;
                        }
                        f.write_str(key)?;
                    } else {
                        f.write_str("[\"")?;
                        f.write_str(key.replace('\\', "\\\\").replace('"', "\\\"").as_str())?;
                        f.write_str("\"]")?;
                    }
                }
                PathStep::Index(index) => {
                    write!(f, "[{index}]")?;
                }
            }
        }
        Ok(())
    }
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
