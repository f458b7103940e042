//! Locating where two canonical trees stop being structurally equal

use std::fmt;

use crate::parser::{CanonicalDocument, Scalar};

/// First point of divergence between two trees
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Path from the root, e.g. `$.root.items[2]`
    pub path: String,
    pub description: String,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.description)
    }
}

/// Walk both trees in parallel and report the first divergence, or `None`
/// when they are structurally equal.
pub fn first_difference(left: &CanonicalDocument, right: &CanonicalDocument) -> Option<Difference> {
    walk(left, right, "$".to_string())
}

fn walk(left: &CanonicalDocument, right: &CanonicalDocument, path: String) -> Option<Difference> {
    match (left, right) {
        (CanonicalDocument::Mapping(a), CanonicalDocument::Mapping(b)) => {
            for key in a.keys() {
                if !b.contains_key(key) {
                    return Some(Difference {
                        path,
                        description: format!("key {:?} missing on the right", key),
                    });
                }
            }
            for key in b.keys() {
                if !a.contains_key(key) {
                    return Some(Difference {
                        path,
                        description: format!("key {:?} missing on the left", key),
                    });
                }
            }
            a.iter().find_map(|(key, value)| {
                let theirs = b.get(key)?;
                walk(value, theirs, format!("{}.{}", path, key))
            })
        }
        (CanonicalDocument::Sequence(a), CanonicalDocument::Sequence(b)) => {
            if a.len() != b.len() {
                return Some(Difference {
                    path,
                    description: format!("sequence length {} vs {}", a.len(), b.len()),
                });
            }
            a.iter()
                .zip(b)
                .enumerate()
                .find_map(|(index, (x, y))| walk(x, y, format!("{}[{}]", path, index)))
        }
        (CanonicalDocument::Scalar(a), CanonicalDocument::Scalar(b)) => {
            if a == b {
                None
            } else {
                Some(Difference {
                    path,
                    description: format!("{} vs {}", describe_scalar(a), describe_scalar(b)),
                })
            }
        }
        _ => Some(Difference {
            path,
            description: format!("{} vs {}", kind(left), kind(right)),
        }),
    }
}

fn kind(document: &CanonicalDocument) -> &'static str {
    match document {
        CanonicalDocument::Scalar(_) => "scalar",
        CanonicalDocument::Sequence(_) => "sequence",
        CanonicalDocument::Mapping(_) => "mapping",
    }
}

fn describe_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => format!("bool {}", b),
        Scalar::Number(n) => format!("number {}", n),
        Scalar::String(s) => format!("string {:?}", s),
    }
}
