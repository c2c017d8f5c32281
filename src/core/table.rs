use crate::core::value::JsonValue;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current sort of the property table. `click` reproduces header-click
/// behavior: same column flips direction, a new column resets to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            key: SortKey::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl TableSort {
    pub fn click(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Flat, one-level listing of an object's direct children. Anything that is
/// not an object projects to nothing; the caller shows a placeholder.
pub fn project<'a>(value: &'a JsonValue, sort: TableSort) -> Vec<(&'a str, &'a JsonValue)> {
    let JsonValue::Object(entries) = value else {
        return Vec::new();
    };

    let mut rows: Vec<(&str, &JsonValue)> = entries
        .iter()
        .map(|(key, child)| (key.as_str(), child))
        .collect();

    // Stable sort; descending reverses the comparator, so ties keep their
    // relative order under both directions.
    rows.sort_by(|left, right| {
        let ordering = match sort.key {
            SortKey::Name => compare_ci(left.0, right.0),
            SortKey::Value => compare_ci(left.1.summary().as_str(), right.1.summary().as_str()),
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}

fn compare_ci(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{SortDirection, SortKey, TableSort, project};
    use crate::core::parse::parse_source;

    fn keys(source: &str, sort: TableSort) -> Vec<String> {
        let doc = parse_source(source).expect("document should parse");
        project(&doc, sort)
            .iter()
            .map(|(key, _)| key.to_string())
            .collect()
    }

    #[test]
    fn sorts_by_name_both_directions() {
        let source = r#"{"b":2,"a":1,"c":{}}"#;
        assert_eq!(keys(source, TableSort::default()), vec!["a", "b", "c"]);
        let desc = TableSort {
            key: SortKey::Name,
            direction: SortDirection::Desc,
        };
        assert_eq!(keys(source, desc), vec!["c", "b", "a"]);
    }

    #[test]
    fn sorts_by_value_summary_strings() {
        // Summaries: "1", "2", "Object" — lexicographic on the summary.
        let source = r#"{"b":2,"a":1,"c":{}}"#;
        let by_value = TableSort {
            key: SortKey::Value,
            direction: SortDirection::Asc,
        };
        assert_eq!(keys(source, by_value), vec!["a", "b", "c"]);
    }

    #[test]
    fn name_comparison_ignores_case() {
        let source = r#"{"Beta":1,"alpha":2,"GAMMA":3}"#;
        assert_eq!(
            keys(source, TableSort::default()),
            vec!["alpha", "Beta", "GAMMA"]
        );
    }

    #[test]
    fn non_objects_project_to_nothing() {
        for source in ["[1,2,3]", "\"text\"", "42", "true", "null"] {
            assert!(keys(source, TableSort::default()).is_empty());
        }
    }

    #[test]
    fn container_children_display_their_summaries() {
        let doc = parse_source(r#"{"list":[1,2,3],"obj":{"k":1},"s":"v"}"#)
            .expect("document should parse");
        let rows = project(&doc, TableSort::default());
        let summaries: Vec<String> = rows.iter().map(|(_, value)| value.summary()).collect();
        assert_eq!(summaries, vec!["Array[3]", "Object", "\"v\""]);
    }

    #[test]
    fn header_click_cycles_direction_then_switches_column() {
        let mut sort = TableSort::default();
        sort.click(SortKey::Name);
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.click(SortKey::Name);
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.click(SortKey::Value);
        assert_eq!(sort.key, SortKey::Value);
        assert_eq!(sort.direction, SortDirection::Asc);
    }
}
