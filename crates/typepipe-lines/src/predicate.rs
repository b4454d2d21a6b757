use serde_json::Value;

use typepipe_types::{TypeSet, TypeTag};

/// Check whether a line matches any of the enabled type tags.
///
/// `all` short-circuits before any other tag is tested.
pub fn matches(line: &[u8], types: &TypeSet) -> bool {
    if types.contains(TypeTag::All) {
        return true;
    }
    types.iter().any(|tag| tag_matches(tag, line))
}

/// Test a single tag against a line
pub fn tag_matches(tag: TypeTag, line: &[u8]) -> bool {
    match tag {
        TypeTag::All => true,
        TypeTag::None => false,
        TypeTag::Json => is_json(line),
    }
}

/// True if the line parses as exactly one JSON value of any kind.
/// Surrounding whitespace is allowed, trailing content after the value is not.
fn is_json(line: &[u8]) -> bool {
    serde_json::from_slice::<Value>(line).is_ok()
}

/// Match predicate for the line loop
#[derive(Clone, Debug)]
pub struct LineMatcher {
    types: TypeSet,

    /// Whether to invert match
    complement: bool,
}

impl LineMatcher {
    pub fn new(types: TypeSet) -> Self {
        Self {
            types,
            complement: false,
        }
    }

    /// Invert the match
    pub fn complemented(mut self, complement: bool) -> Self {
        self.complement = complement;
        self
    }

    /// Check if a line matches, after applying the complement
    pub fn matches(&self, line: &[u8]) -> bool {
        matches(line, &self.types) != self.complement
    }
}
