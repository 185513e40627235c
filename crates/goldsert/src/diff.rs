// Path-level differences between two decoded data trees

use serde_json::Value;
use std::fmt;

/// A single difference between the reference tree and the encoded tree
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Path to the differing node, e.g. `author.first_name` or `tags[2]`
    pub path: String,
    /// Value found in the reference artifact
    pub expected: Option<Value>,
    /// Value produced by encoding the value under test
    pub actual: Option<Value>,
    pub kind: DifferenceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    Added,
    Removed,
    Changed,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        let show = |v: &Option<Value>| match v {
            Some(v) => v.to_string(),
            None => "<missing>".to_string(),
        };
        match self.kind {
            DifferenceKind::Added => write!(f, "+ {}: {}", path, show(&self.actual)),
            DifferenceKind::Removed => write!(f, "- {}: {}", path, show(&self.expected)),
            DifferenceKind::Changed => write!(
                f,
                "~ {}: {} => {}",
                path,
                show(&self.expected),
                show(&self.actual)
            ),
        }
    }
}

/// Compare two trees; an empty result means they are structurally equal.
pub fn diff_values(expected: &Value, actual: &Value) -> Vec<Difference> {
    let mut differences = Vec::new();
    diff_recursive(expected, actual, "", &mut differences);
    differences
}

fn field_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn diff_recursive(expected: &Value, actual: &Value, path: &str, differences: &mut Vec<Difference>) {
    match (expected, actual) {
        (Value::Object(expected_obj), Value::Object(actual_obj)) => {
            for (key, expected_value) in expected_obj {
                let path = field_path(path, key);
                match actual_obj.get(key) {
                    Some(actual_value) => {
                        diff_recursive(expected_value, actual_value, &path, differences)
                    }
                    None => differences.push(Difference {
                        path,
                        expected: Some(expected_value.clone()),
                        actual: None,
                        kind: DifferenceKind::Removed,
                    }),
                }
            }

            for (key, actual_value) in actual_obj {
                if !expected_obj.contains_key(key) {
                    differences.push(Difference {
                        path: field_path(path, key),
                        expected: None,
                        actual: Some(actual_value.clone()),
                        kind: DifferenceKind::Added,
                    });
                }
            }
        }
        (Value::Array(expected_arr), Value::Array(actual_arr)) => {
            let max_len = expected_arr.len().max(actual_arr.len());
            for i in 0..max_len {
                let item_path = format!("{}[{}]", path, i);
                match (expected_arr.get(i), actual_arr.get(i)) {
                    (Some(e), Some(a)) => diff_recursive(e, a, &item_path, differences),
                    (Some(e), None) => differences.push(Difference {
                        path: item_path,
                        expected: Some(e.clone()),
                        actual: None,
                        kind: DifferenceKind::Removed,
                    }),
                    (None, Some(a)) => differences.push(Difference {
                        path: item_path,
                        expected: None,
                        actual: Some(a.clone()),
                        kind: DifferenceKind::Added,
                    }),
                    (None, None) => {}
                }
            }
        }
        (Value::Number(expected_num), Value::Number(actual_num)) => {
            // 1 and 1.0 are the same JSON number
            if expected_num != actual_num && expected_num.as_f64() != actual_num.as_f64() {
                differences.push(Difference {
                    path: path.to_string(),
                    expected: Some(expected.clone()),
                    actual: Some(actual.clone()),
                    kind: DifferenceKind::Changed,
                });
            }
        }
        (expected_val, actual_val) => {
            if expected_val != actual_val {
                differences.push(Difference {
                    path: path.to_string(),
                    expected: Some(expected_val.clone()),
                    actual: Some(actual_val.clone()),
                    kind: DifferenceKind::Changed,
                });
            }
        }
    }
}
